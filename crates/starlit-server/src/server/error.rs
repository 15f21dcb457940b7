//! Error types for the quote proxy.
//!
//! [`Error`] covers every way a quote request can fail. It implements
//! [`IntoResponse`] so handlers can return `Result<_, Error>` and let axum
//! turn failures into the status codes and JSON bodies the page expects.
//!
//! Malformed model output is not an error: it is coerced into a placeholder
//! quote by the service.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use starlit::ErrorBody;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Anything but `POST` on the quote route.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// `OPENAI_API_KEY` is unset or blank.
    #[error("Missing OPENAI_API_KEY")]
    MissingApiKey,

    /// The generation API answered with a non-2xx status.
    #[error("OpenAI error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The generation API could not be reached or the read failed.
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The generation API answered 2xx with something that is not JSON.
    #[error("invalid upstream body: {0}")]
    InvalidUpstreamBody(#[from] serde_json::Error),
}

impl Error {
    /// Status code sent back to the page.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            // Out-of-range codes cannot be forwarded as is.
            Error::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Error::MissingApiKey | Error::Transport(_) | Error::InvalidUpstreamBody(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Error::MethodNotAllowed => (
                status,
                [(header::ALLOW, "POST")],
                "Method Not Allowed",
            )
                .into_response(),
            Error::MissingApiKey => {
                (status, Json(ErrorBody::new("Missing OPENAI_API_KEY"))).into_response()
            }
            Error::Upstream { body, .. } => (
                status,
                Json(ErrorBody::with_details("OpenAI error", body)),
            )
                .into_response(),
            Error::Transport(_) | Error::InvalidUpstreamBody(_) => {
                (status, Json(ErrorBody::new("Server error"))).into_response()
            }
        }
    }
}
