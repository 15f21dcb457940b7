//! HTTP surface of the quote proxy.
//!
//! [`QuoteService`] holds the configuration, the upstream client and a clock.
//! [`router`] mounts it under both quote paths, plus a liveness probe.
//!
//! ## Structure
//!
//! - [`handler`] - axum handlers.
//! - [`prompt`] - prompt template and output schema.
//! - [`parse`] - extraction and validation of the model's output.
//! - [`upstream`] - the generation API client.

pub mod handler;
pub mod parse;
pub mod prompt;
pub mod upstream;

use crate::server::config::ServerConfig;
use crate::server::error::{Error, Result};
use crate::server::telemetry::increment_placeholders;
use axum::Router;
use axum::routing::{any, get};
use parse::parse_quote;
use prompt::Prompt;
use starlit::{QuoteResponse, SystemClock, ThreadRandom, TimeSource};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use upstream::Upstream;

pub const QUOTE_PATH: &str = "/generate-quote";

/// Path the page used when the proxy ran as a Netlify function.
pub const NETLIFY_QUOTE_PATH: &str = "/.netlify/functions/generate-quote";

pub const HEALTH_PATH: &str = "/health";

pub struct QuoteService<U, T = SystemClock> {
    config: ServerConfig,
    upstream: U,
    clock: T,
}

impl<U: Upstream> QuoteService<U> {
    pub fn new(config: ServerConfig, upstream: U) -> Self {
        Self::with_clock(config, upstream, SystemClock)
    }
}

impl<U, T> QuoteService<U, T>
where
    U: Upstream,
    T: TimeSource<u64>,
{
    pub fn with_clock(config: ServerConfig, upstream: U, clock: T) -> Self {
        Self {
            config,
            upstream,
            clock,
        }
    }

    #[cfg(test)]
    pub(crate) fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Asks the model for a quote.
    ///
    /// Fails without calling upstream when no API key is configured. Output
    /// that does not parse is replaced by a placeholder quote instead of
    /// failing the request.
    pub async fn generate(&self) -> Result<QuoteResponse> {
        let api_key = self.config.api_key.as_deref().ok_or(Error::MissingApiKey)?;

        let prompt = Prompt::build(&mut ThreadRandom, self.clock.current_millis());
        let text = self.upstream.complete(api_key, &prompt).await?;

        let parsed = parse_quote(&text);
        if parsed.placeholder {
            increment_placeholders();
            tracing::warn!("Model output was not a valid quote, using placeholder");
        }

        Ok(QuoteResponse::new(parsed.quote, prompt.ts))
    }
}

/// Builds the application router around `service`.
pub fn router<U, T>(service: Arc<QuoteService<U, T>>) -> Router
where
    U: Upstream,
    T: TimeSource<u64> + Send + Sync + 'static,
{
    Router::new()
        .route(QUOTE_PATH, any(handler::generate_quote::<U, T>))
        .route(NETLIFY_QUOTE_PATH, any(handler::generate_quote::<U, T>))
        .route(HEALTH_PATH, get(handler::health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
