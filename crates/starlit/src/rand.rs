/// A trait for random sources that return uniformly distributed floats.
///
/// This abstraction allows you to plug in the thread-local RNG, a seeded RNG
/// for reproducible fields, or a mocked random source in tests.
///
/// # Example
/// ```
/// use starlit::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn unit(&mut self) -> f64 {
///         0.5
///     }
/// }
///
/// let mut rng = FixedRand;
/// assert_eq!(rng.range(0.0, 10.0), 5.0);
/// assert_eq!(rng.index(4), 2);
/// ```
pub trait RandSource {
    /// Returns a float in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Returns a float in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }

    /// Returns an index in `[0, len)`.
    ///
    /// Sources that misbehave and return `1.0` are clamped to the last index.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick an index from an empty range");
        let idx = (self.unit() * len as f64) as usize;
        idx.min(len - 1)
    }
}

impl<R: RandSource + ?Sized> RandSource for &mut R {
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}
