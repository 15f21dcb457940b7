use super::QuoteService;
use super::upstream::Upstream;
use crate::server::error::{Error, Result};
use crate::server::telemetry::increment_requests;
use axum::Json;
use axum::extract::State;
use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};
use starlit::TimeSource;
use std::sync::Arc;

/// Handles `/generate-quote` for every method.
///
/// Only `POST` is served; the request body is ignored. Successful answers
/// carry `Cache-Control: no-store` so every reveal shows a fresh quote.
#[tracing::instrument(skip_all, fields(%method))]
pub async fn generate_quote<U, T>(
    State(service): State<Arc<QuoteService<U, T>>>,
    method: Method,
) -> Result<Response>
where
    U: Upstream,
    T: TimeSource<u64> + Send + Sync + 'static,
{
    increment_requests();

    if method != Method::POST {
        tracing::debug!("Rejecting {method} request");
        return Err(Error::MethodNotAllowed);
    }

    let quote = service.generate().await.inspect_err(|e| {
        tracing::warn!("Quote request failed: {e}");
    })?;

    tracing::info!(author = %quote.author, "Quote generated");
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(quote)).into_response())
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
