/// Index into the proxy pool, shared by all URLs of one batch run
///
/// A cursor starts at zero when a run starts and is dropped when the run ends.
/// It never decreases. Once it reaches the pool size the pool is exhausted for
/// the remainder of the run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProxyCursor {
    position: usize,
}

impl ProxyCursor {
    /// Creates a cursor pointing at the first proxy
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in the pool
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves to the next proxy and returns the new position
    pub fn advance(&mut self) -> usize {
        self.position += 1;
        self.position
    }

    /// Returns true once every proxy of a pool of `pool_len` has been used up
    pub fn is_exhausted(&self, pool_len: usize) -> bool {
        self.position >= pool_len
    }
}
