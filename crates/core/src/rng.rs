//! RNG module - piece selection
//!
//! The session draws every new piece from a [`PieceSource`]. The default
//! source picks uniformly among the seven kinds from a seeded ChaCha8
//! stream, so the same seed always replays the same game.
//! [`ScriptedPieces`] replays a fixed sequence instead.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::PieceKind;

/// Supplies the kind of each newly spawned piece
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random kinds from a seeded stream
#[derive(Debug, Clone)]
pub struct RandomPieces {
    seed: u64,
    rng: ChaCha8Rng,
}

impl RandomPieces {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy; the chosen seed is still reported by [`seed`](Self::seed)
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this stream was created with (for replaying a game)
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}

/// Cycles through a fixed list of kinds
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    script: Vec<PieceKind>,
    cursor: usize,
}

impl ScriptedPieces {
    /// An empty script falls back to O pieces
    pub fn new(script: impl Into<Vec<PieceKind>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }

    /// Number of kinds drawn so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl PieceSource for ScriptedPieces {
    fn next_kind(&mut self) -> PieceKind {
        if self.script.is_empty() {
            return PieceKind::O;
        }
        let kind = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        kind
    }
}
