//! The page side of the quote flow.
//!
//! When the starfield reports its reveal, the host calls
//! [`Revealer::reveal`], which opens the [`QuoteModal`], asks the proxy for a
//! quote through a [`QuoteSource`], and shows either the result or one of the
//! local fallback quotes.

mod error;
mod fallback;
mod modal;
mod revealer;
mod source;
#[cfg(test)]
mod tests;

pub use error::*;
pub use fallback::*;
pub use modal::*;
pub use revealer::*;
pub use source::*;
