use crate::Quote;

/// Key that dismisses the modal.
pub const CLOSE_KEY: &str = "Escape";

/// State of the quote modal.
///
/// Closing the modal does not cancel a fetch: a quote that arrives after the
/// modal was closed is stored and shown the next time it opens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteModal {
    visible: bool,
    loading: bool,
    quote: Option<Quote>,
}

impl QuoteModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the modal with the loader running.
    pub fn open(&mut self) {
        self.visible = true;
        self.loading = true;
    }

    /// Displays `quote` and stops the loader.
    pub fn show(&mut self, quote: Quote) {
        self.quote = Some(quote);
        self.loading = false;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Closes the modal on [`CLOSE_KEY`]. Returns whether the key was
    /// handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == CLOSE_KEY {
            self.close();
            true
        } else {
            false
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    /// The quote line, wrapped in typographic quotes.
    pub fn content(&self) -> Option<String> {
        self.quote.as_ref().map(|q| format!("“{}”", q.quote))
    }

    /// The author line, e.g. `— Seneca`.
    pub fn meta(&self) -> Option<String> {
        self.quote.as_ref().map(Quote::attribution)
    }
}
