//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data, usable by the core simulation, the driver and
//! any rendering/audio collaborator that consumes engine events.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 playable rows (indexed 0-19)
//! - **Floor**: one sentinel row below the playable area that is always taken
//!
//! Cells are addressed by a single [`CellRef`], `row * BOARD_WIDTH + col`.
//! A reference above the board is negative.
//!
//! # Timing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 and after reset |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Interval floor |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, Rotation, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.as_str(), "t");
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Command::from_str("softDrop"), Some(Command::SoftDrop));
//! assert_eq!(BOARD_WIDTH, 10);
//! ```

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Playable board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of playable cells
pub const PLAYABLE_CELLS: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

/// Number of cells including the floor row
pub const TOTAL_CELLS: usize = PLAYABLE_CELLS + BOARD_WIDTH as usize;

/// Upper bound on rows removed by a single clear
pub const MAX_CLEARED_ROWS: usize = BOARD_HEIGHT as usize;

/// Default spawn anchor (row 0, column 4)
pub const SPAWN_ANCHOR: CellRef = 4;

/// Base gravity interval (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Interval reduction per level
pub const DROP_STEP_MS: u32 = 100;

/// Interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Score awarded per cleared row
pub const POINTS_PER_LINE: u32 = 10;

/// Cleared rows needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Board cell reference: `row * BOARD_WIDTH + col`
pub type CellRef = i32;

/// The four cells occupied by a piece
pub type PieceCells = [CellRef; 4];

/// Row indices reported by a single clear, top to bottom
pub type ClearedRows = ArrayVec<usize, MAX_CLEARED_ROWS>;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Grid code used by snapshots (1-7, 0 is reserved for empty)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }
}

/// Rotation states, indexed 0..3
///
/// The cycle goes North → East → South → West → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index 0..3
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for an arbitrary index, reduced modulo 4
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_index(1), Rotation::East);
    /// assert_eq!(Rotation::from_index(6), Rotation::South);
    /// ```
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// A cell on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    /// Part of a frozen piece
    Locked(PieceKind),
    /// Sentinel row below the playable area
    Floor,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Cell::Locked(_))
    }

    /// Locked and floor cells both block movement
    pub fn is_taken(&self) -> bool {
        !self.is_empty()
    }
}

/// Commands accepted by a session
///
/// `Tick` comes from the gravity scheduler; the others come from input
/// collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Player-issued gravity step
    SoftDrop,
    /// Scheduler-issued gravity step
    Tick,
    /// Spawn the first piece and arm the scheduler
    Start,
    /// Tear down and restart the session
    Reset,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotate" => Some(Command::Rotate),
            "softdrop" => Some(Command::SoftDrop),
            "tick" => Some(Command::Tick),
            "start" => Some(Command::Start),
            "reset" => Some(Command::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::SoftDrop => "softDrop",
            Command::Tick => "tick",
            Command::Start => "start",
            Command::Reset => "reset",
        }
    }

    /// Commands that still apply once the game is over
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Command::Start | Command::Reset)
    }
}

/// Events emitted to rendering, audio and scoreboard collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The active piece now occupies these cells (spawn, move, rotate, fall)
    PieceMoved { cells: PieceCells },
    /// Full rows detected, reported before they are compacted away
    RowsCleared { rows: ClearedRows },
    ScoreUpdated {
        score: u32,
        level: u32,
        lines_cleared: u32,
    },
    /// The scheduler must re-arm its gravity timer with this interval
    IntervalChanged { interval_ms: u32 },
    /// Terminal until reset; the scheduler must stop ticking
    GameOver,
    SessionReset,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::PieceMoved { .. } => "piece_moved",
            Event::RowsCleared { .. } => "rows_cleared",
            Event::ScoreUpdated { .. } => "score_updated",
            Event::IntervalChanged { .. } => "interval_changed",
            Event::GameOver => "game_over",
            Event::SessionReset => "session_reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_values() {
        assert_eq!(BASE_DROP_MS, 1000);
        assert_eq!(DROP_STEP_MS, 100);
        assert_eq!(POINTS_PER_LINE, 10);
        assert_eq!(LINES_PER_LEVEL, 10);
        assert_eq!(TOTAL_CELLS, 210);
    }

    #[test]
    fn rotation_index_roundtrip() {
        for i in 0..4u8 {
            assert_eq!(Rotation::from_index(i).index(), i);
        }
        assert_eq!(Rotation::North.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), Rotation::North);
    }

    #[test]
    fn piece_codes_are_distinct_and_nonzero() {
        let mut codes: Vec<u8> = PieceKind::ALL.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 7);
        assert!(!codes.contains(&0));
    }

    #[test]
    fn command_strings_parse_back() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::Rotate,
            Command::SoftDrop,
            Command::Tick,
            Command::Start,
            Command::Reset,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
        assert!(Command::Reset.is_lifecycle());
        assert!(!Command::Tick.is_lifecycle());
    }

    #[test]
    fn event_json_is_tagged() {
        let ev = Event::IntervalChanged { interval_ms: 800 };
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(json, r#"{"type":"interval_changed","interval_ms":800}"#);

        let mut rows = ClearedRows::new();
        rows.push(18);
        rows.push(19);
        let json = serde_json::to_string(&Event::RowsCleared { rows }).unwrap();
        assert_eq!(json, r#"{"type":"rows_cleared","rows":[18,19]}"#);

        let json = serde_json::to_string(&Event::GameOver).unwrap();
        assert_eq!(json, r#"{"type":"game_over"}"#);
        assert_eq!(Event::GameOver.name(), "game_over");
    }
}
