//! Park-Miller Linear Congruential Generator (MINSTD)
//!
//! Maze layouts are snapshot-tested and shared as seeds, so the generator
//! must produce the same sequence on every platform and every release of
//! every dependency. A tiny LCG gives us that; `rand` is only used to pick a
//! fresh seed when the caller does not supply one.
//!
//! Constants:
//! - Multiplier (a): 48271
//! - Modulus (m): 2^31 - 1 = 2147483647
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

const A: u64 = 48271;
const M: u64 = 2147483647; // 2^31 - 1

/// Park-Miller Linear Congruential Generator
///
/// Same seed always produces the same sequence.
#[derive(Clone, Debug)]
pub struct SimpleLCG {
    state: u32,
}

impl SimpleLCG {
    /// Create a new LCG with the given seed
    ///
    /// A zero seed would lock the sequence at zero, so it is replaced with 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn advance(&mut self) -> u32 {
        self.state = ((self.state as u64 * A) % M) as u32;
        self.state
    }

    /// Random index in `[0, len)`, using integer arithmetic only.
    pub fn choice_index(&mut self, len: usize) -> usize {
        let state = self.advance() as u64;
        ((state * len as u64) / M) as usize
    }

    /// Uniform in-place Fisher-Yates shuffle, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.choice_index(i + 1);
            items.swap(i, j);
        }
    }
}

/// A seed drawn from the thread-local entropy source.
pub fn fresh_seed() -> u32 {
    rand::random()
}
