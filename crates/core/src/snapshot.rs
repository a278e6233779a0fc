//! Plain-data view of a session for rendering collaborators.

use serde::{Deserialize, Serialize};

use crate::piece::ActivePiece;
use crate::types::{CellRef, PieceCells, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub anchor: CellRef,
    pub cells: PieceCells,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            anchor: value.anchor,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Grid codes: 0 empty, 1-7 locked piece kind
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub drop_interval_ms: u32,
    pub started: bool,
    pub game_over: bool,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    pub fn locked_cells(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&code| code != 0)
            .count()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            score: 0,
            level: 1,
            lines_cleared: 0,
            drop_interval_ms: 0,
            started: false,
            game_over: false,
        }
    }
}
