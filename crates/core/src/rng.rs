//! RNG module - piece supply with a one-ahead preview
//!
//! Pieces are drawn uniformly from the seven kinds. The supply keeps a small
//! queue so the piece after the active one is always known, which drives the
//! "next piece" preview.
//!
//! Also provides a simple LCG so seeded games replay exactly, plus a scripted
//! cyclic sequence for replays and tests.

use std::collections::VecDeque;

use crate::error::CoreError;
use crate::types::PieceKind;

/// Number of pieces kept queued (front = next piece to be drawn)
pub const QUEUE_LEN: usize = 2;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

#[derive(Debug, Clone)]
enum Source {
    Random(SimpleRng),
    Cycle { kinds: Vec<PieceKind>, cursor: usize },
}

impl Source {
    fn draw(&mut self) -> PieceKind {
        match self {
            Source::Random(rng) => PieceKind::from_index(rng.next_range(7) as usize),
            Source::Cycle { kinds, cursor } => {
                let kind = kinds[*cursor];
                *cursor = (*cursor + 1) % kinds.len();
                kind
            }
        }
    }
}

/// Piece supply: draws the next active piece and previews the one after it
#[derive(Debug, Clone)]
pub struct PieceSupply {
    queue: VecDeque<PieceKind>,
    source: Source,
    seed: Option<u32>,
}

impl PieceSupply {
    /// Create a uniform random supply with the given seed
    pub fn new(seed: u32) -> Self {
        Self::from_source(Source::Random(SimpleRng::new(seed)), Some(seed))
    }

    /// Create a uniform random supply seeded from the process entropy source
    pub fn from_entropy() -> Self {
        let seed: u32 = rand::random();
        Self::new(seed)
    }

    /// Create a supply that cycles through a fixed sequence
    pub fn from_sequence(kinds: &[PieceKind]) -> Result<Self, CoreError> {
        if kinds.is_empty() {
            return Err(CoreError::EmptySequence);
        }
        Ok(Self::from_source(
            Source::Cycle {
                kinds: kinds.to_vec(),
                cursor: 0,
            },
            None,
        ))
    }

    fn from_source(mut source: Source, seed: Option<u32>) -> Self {
        let queue = (0..QUEUE_LEN).map(|_| source.draw()).collect();
        Self {
            queue,
            source,
            seed,
        }
    }

    /// Draw the next piece and refill the queue
    pub fn next(&mut self) -> PieceKind {
        let refill = self.source.draw();
        self.queue.push_back(refill);
        // Queue holds QUEUE_LEN + 1 entries here, front is always present
        self.queue.pop_front().unwrap_or(refill)
    }

    /// Peek at the piece the next `next()` call will return
    pub fn peek_next(&self) -> PieceKind {
        self.queue[0]
    }

    /// Seed used to build a random supply (None for scripted sequences)
    pub fn seed(&self) -> Option<u32> {
        self.seed
    }
}

impl Default for PieceSupply {
    fn default() -> Self {
        Self::from_entropy()
    }
}
