use super::QuoteSource;
use crate::{Quote, RandSource};
use tracing::{debug, warn};

/// Where a displayed quote came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteOrigin {
    Remote,
    Fallback,
}

/// A quote ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivered {
    pub quote: Quote,
    pub origin: QuoteOrigin,
}

/// Fetches a quote from `source`, substituting one of the local fallback
/// quotes on any failure.
///
/// There is no retry. The failure is only logged as a warning; the caller
/// always gets something to display.
pub async fn fetch_or_fallback<S, R>(source: &S, rng: &mut R) -> Delivered
where
    S: QuoteSource + ?Sized,
    R: RandSource,
{
    match source.fetch().await {
        Ok(quote) => {
            debug!(author = %quote.author, "quote received");
            Delivered {
                quote,
                origin: QuoteOrigin::Remote,
            }
        }
        Err(err) => {
            warn!(error = %err, status = ?err.status(), "quote fetch failed, using local fallback");
            Delivered {
                quote: Quote::fallback(rng),
                origin: QuoteOrigin::Fallback,
            }
        }
    }
}
