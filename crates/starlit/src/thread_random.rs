use crate::RandSource;
use rand::{Rng, SeedableRng, rng, rngs::SmallRng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free. This type does **not** store the RNG itself; it simply
/// accesses the thread-local generator on each call, which keeps it `Send`
/// and `Sync` even though `ThreadRng` is neither.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn unit(&mut self) -> f64 {
        rng().random()
    }
}

/// A deterministic `RandSource` backed by [`SmallRng`].
///
/// Two sources built from the same seed produce the same sequence, so a
/// starfield built from one is reproducible frame for frame. Not suitable for
/// anything security related.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    inner: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandSource for SeededRandom {
    fn unit(&mut self) -> f64 {
        self.inner.random()
    }
}
