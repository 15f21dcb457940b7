/// Why a quote could not be fetched from the proxy.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The request never completed (DNS, connection, TLS, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The proxy answered with a non-success status.
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body parsed but carried no quote text.
    #[error("response has no quote")]
    MissingQuote,
}

impl FetchError {
    /// The proxy's status code, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
