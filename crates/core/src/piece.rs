//! Piece module - the active falling piece
//!
//! Movement is validated against the board before it is committed.
//! Rotation is not: a rotated piece may overlap locked cells or wrap past a
//! wall, and it is accepted as-is.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::shapes::offsets;
use crate::types::{CellRef, PieceCells, PieceKind, Rotation, BOARD_WIDTH};

/// Outcome of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fall {
    /// The piece moved down one row
    Moved,
    /// Something is directly below; the piece must lock
    Landed,
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub anchor: CellRef,
}

impl ActivePiece {
    pub fn new(kind: PieceKind, rotation: Rotation, anchor: CellRef) -> Self {
        Self {
            kind,
            rotation,
            anchor,
        }
    }

    /// Board cells occupied at the current anchor and rotation
    pub fn cells(&self) -> PieceCells {
        self.cells_shifted(0)
    }

    fn cells_shifted(&self, delta: CellRef) -> PieceCells {
        offsets(self.kind, self.rotation).map(|o| self.anchor + delta + o)
    }

    /// Shift one column left; rejected at the wall or against locked cells
    pub fn move_left(&mut self, board: &Board) -> bool {
        if Board::is_at_left_edge(&self.cells()) || board.overlaps(&self.cells_shifted(-1)) {
            return false;
        }
        self.anchor -= 1;
        true
    }

    /// Shift one column right; rejected at the wall or against locked cells
    pub fn move_right(&mut self, board: &Board) -> bool {
        if Board::is_at_right_edge(&self.cells()) || board.overlaps(&self.cells_shifted(1)) {
            return false;
        }
        self.anchor += 1;
        true
    }

    /// Advance one rotation state clockwise, without any collision check
    pub fn rotate(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    /// One gravity step
    pub fn fall(&mut self, board: &Board) -> Fall {
        let below = self.cells_shifted(BOARD_WIDTH as CellRef);
        if board.overlaps(&below) {
            return Fall::Landed;
        }
        self.anchor += BOARD_WIDTH as CellRef;
        Fall::Moved
    }
}
