//! Sources of randomness for picking cards.

/// Picks card indices.
pub trait RandomSource {
    /// Returns an index in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Uses the operating system (or browser) random number generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn next_index(&mut self, len: usize) -> usize {
        match getrandom::u64() {
            Ok(value) => (value % len as u64) as usize,
            Err(err) => {
                log::warn!("random source unavailable, using first card: {err}");
                0
            }
        }
    }
}

/// Replays a fixed list of indices, wrapping around. Useful for tests and demos.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Creates a source that yields `values` in order.
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, len: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % len
    }
}
