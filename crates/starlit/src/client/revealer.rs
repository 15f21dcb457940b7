use super::{Delivered, QuoteModal, QuoteSource, fetch_or_fallback};
use crate::RandSource;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};
use tracing::debug;

/// Connects reveal triggers (the starfield's reveal and the "new quote"
/// button) to the modal.
///
/// At most one fetch runs at a time: a trigger that arrives while a fetch is
/// in flight is ignored and returns `None`.
#[derive(Debug)]
pub struct Revealer<S> {
    source: S,
    in_flight: Arc<AtomicBool>,
}

/// Marks a fetch as in flight until dropped.
#[derive(Debug)]
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: QuoteSource> Revealer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Option<InFlight> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(Arc::clone(&self.in_flight)))
    }

    /// Opens `modal` with the loader, fetches a quote (or a fallback) and
    /// displays it.
    ///
    /// The modal lock is never held across the fetch, so the host may close
    /// the modal meanwhile.
    pub async fn reveal<R: RandSource>(
        &self,
        modal: &Mutex<QuoteModal>,
        rng: &mut R,
    ) -> Option<Delivered> {
        let Some(_guard) = self.begin() else {
            debug!("quote fetch already in flight, ignoring trigger");
            return None;
        };

        lock(modal).open();
        let delivered = fetch_or_fallback(&self.source, rng).await;
        lock(modal).show(delivered.quote.clone());
        Some(delivered)
    }
}

fn lock(modal: &Mutex<QuoteModal>) -> MutexGuard<'_, QuoteModal> {
    modal.lock().unwrap_or_else(PoisonError::into_inner)
}
