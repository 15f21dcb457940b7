//! Quote payloads shared by the proxy and the page client.
//!
//! The proxy answers `POST /generate-quote` with a [`QuoteResponse`] or an
//! [`ErrorBody`]. The client falls back to one of [`FALLBACK_QUOTES`] when the
//! proxy cannot be reached.

use crate::RandSource;
use core::fmt;

/// Author used when the model's output could not be parsed.
pub const PLACEHOLDER_AUTHOR: &str = "Sconosciuto";

/// Quote used when the model's output could not be parsed and carried no
/// usable text either.
pub const PLACEHOLDER_QUOTE: &str = "Il cielo tace, ma le stelle continuano a parlare.";

/// Label shown in the modal when a quote arrives without an author.
pub const UNKNOWN_AUTHOR_LABEL: &str = "Autore sconosciuto";

/// The local quotes shown when the proxy call fails, as `(quote, author)`.
pub const FALLBACK_QUOTES: [(&str, &str); 2] = [
    ("La notte ascolta i pensieri più profondi.", "Jacopo"),
    ("Ogni stella è un pensiero che brilla.", "Jacopo"),
];

/// A quote and its author.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quote {
    pub author: String,
    pub quote: String,
}

impl Quote {
    pub fn new(author: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            quote: quote.into(),
        }
    }

    /// The fixed quote returned when model output is malformed and empty.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_AUTHOR, PLACEHOLDER_QUOTE)
    }

    /// Picks one of [`FALLBACK_QUOTES`] uniformly at random.
    pub fn fallback<R: RandSource>(rng: &mut R) -> Self {
        let (quote, author) = FALLBACK_QUOTES[rng.index(FALLBACK_QUOTES.len())];
        Self::new(author, quote)
    }

    /// Returns `true` if this quote is one of [`FALLBACK_QUOTES`].
    pub fn is_fallback(&self) -> bool {
        FALLBACK_QUOTES
            .iter()
            .any(|(quote, author)| self.quote == *quote && self.author == *author)
    }

    /// The author line as the modal shows it.
    pub fn attribution(&self) -> String {
        let author = self.author.trim();
        let author = if author.is_empty() {
            UNKNOWN_AUTHOR_LABEL
        } else {
            author
        };
        format!("— {author}")
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "“{}” {}", self.quote, self.attribution())
    }
}

/// Successful proxy response body.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuoteResponse {
    pub author: String,
    pub quote: String,
    /// Unix timestamp in milliseconds baked into the prompt.
    pub ts: u64,
}

impl QuoteResponse {
    pub fn new(quote: Quote, ts: u64) -> Self {
        Self {
            author: quote.author,
            quote: quote.quote,
            ts,
        }
    }
}

impl From<QuoteResponse> for Quote {
    fn from(resp: QuoteResponse) -> Self {
        Self {
            author: resp.author,
            quote: resp.quote,
        }
    }
}

/// Error response body.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorBody {
    pub error: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
