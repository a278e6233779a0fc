//! Session module - one complete game
//!
//! Ties together the board, the active piece, the piece source and the
//! counters. Every change is driven by a [`Command`]; every observable
//! change is recorded as an [`Event`] that collaborators drain after each
//! command.
//!
//! Piece lifecycle: spawned → falling → locked → rows resolved → next spawn,
//! or game over when the next spawn overlaps the stack.

use std::vec::Drain;

use tracing::{debug, info};

use crate::board::Board;
use crate::config::{EngineConfig, SpawnRotation};
use crate::piece::{ActivePiece, Fall};
use crate::rng::{PieceSource, RandomPieces};
use crate::scoring::{drop_interval_ms, level_for_lines, line_clear_points};
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::types::{Command, Event, Rotation};

/// Complete game state
#[derive(Debug, Clone)]
pub struct Session<S = RandomPieces> {
    config: EngineConfig,
    board: Board,
    active: Option<ActivePiece>,
    pieces: S,
    /// Rotation of the most recently locked piece
    last_rotation: Rotation,
    score: u32,
    level: u32,
    lines_cleared: u32,
    drop_interval_ms: u32,
    started: bool,
    game_over: bool,
    events: Vec<Event>,
}

impl Session<RandomPieces> {
    /// Create a session with random pieces seeded from the config (or entropy)
    pub fn new(config: EngineConfig) -> Self {
        let pieces = match config.seed {
            Some(seed) => RandomPieces::new(seed),
            None => RandomPieces::from_entropy(),
        };
        info!(seed = pieces.seed(), "session created");
        Self::with_source(config, pieces)
    }

    /// Seed of the piece stream
    pub fn seed(&self) -> u64 {
        self.pieces.seed()
    }
}

impl<S: PieceSource> Session<S> {
    pub fn with_source(config: EngineConfig, pieces: S) -> Self {
        Self::from_parts(config, pieces, Board::new())
    }

    /// Create a session over a prepared board (puzzles, replays)
    pub fn from_parts(config: EngineConfig, pieces: S, board: Board) -> Self {
        let drop_interval_ms = config.base_interval_ms;
        Self {
            config,
            board,
            active: None,
            pieces,
            last_rotation: Rotation::North,
            score: 0,
            level: 1,
            lines_cleared: 0,
            drop_interval_ms,
            started: false,
            game_over: false,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Interval the gravity scheduler should currently honor
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    /// Events recorded since the last drain
    pub fn pending_events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Drain<'_, Event> {
        self.events.drain(..)
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Apply a command; returns true if it changed anything
    ///
    /// Before `Start` and after game over only `Start`/`Reset` do anything.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::Reset => {
                self.reset();
                true
            }
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => self.soft_drop(),
            Command::Tick => self.tick(),
        }
    }

    /// Spawn the first piece; a no-op once started
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        info!(interval_ms = self.drop_interval_ms, "session started");
        self.events.push(Event::IntervalChanged {
            interval_ms: self.drop_interval_ms,
        });
        if let Some(piece) = self.next_spawn() {
            self.activate(piece);
        }
        true
    }

    /// Clear the board and counters and start over with a fresh piece
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.last_rotation = Rotation::North;
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.drop_interval_ms = self.config.base_interval_ms;
        self.game_over = false;
        self.started = true;
        info!("session reset");

        self.events.push(Event::SessionReset);
        self.push_score();
        self.events.push(Event::IntervalChanged {
            interval_ms: self.drop_interval_ms,
        });
        if let Some(piece) = self.next_spawn() {
            self.activate(piece);
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(ActivePiece::move_left)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(ActivePiece::move_right)
    }

    fn shift(&mut self, step: fn(&mut ActivePiece, &Board) -> bool) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if !step(piece, &self.board) {
            return false;
        }
        let cells = piece.cells();
        self.events.push(Event::PieceMoved { cells });
        true
    }

    /// Rotate clockwise; accepted even when the result overlaps
    pub fn rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        piece.rotate();
        let cells = piece.cells();
        self.events.push(Event::PieceMoved { cells });
        true
    }

    /// Gravity step issued by the scheduler
    pub fn tick(&mut self) -> bool {
        self.gravity()
    }

    /// Gravity step issued by the player
    pub fn soft_drop(&mut self) -> bool {
        self.gravity()
    }

    fn gravity(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        match piece.fall(&self.board) {
            Fall::Moved => {
                let cells = piece.cells();
                self.events.push(Event::PieceMoved { cells });
            }
            Fall::Landed => self.land(),
        }
        true
    }

    /// Lock the active piece, spawn the next one and resolve full rows
    fn land(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        let written = self.board.lock(&piece.cells(), piece.kind);
        self.last_rotation = piece.rotation;
        debug!(
            kind = piece.kind.as_str(),
            rotation = piece.rotation.as_str(),
            anchor = piece.anchor,
            written,
            "piece locked"
        );

        let Some(next) = self.next_spawn() else {
            return;
        };

        self.resolve_rows();
        self.push_score();
        self.activate(next);
    }

    /// Draw the next piece; flags game over if it cannot enter the board
    fn next_spawn(&mut self) -> Option<ActivePiece> {
        let kind = self.pieces.next_kind();
        let rotation = match self.config.spawn_rotation {
            SpawnRotation::Reset => Rotation::North,
            SpawnRotation::Inherit => self.last_rotation,
        };
        let piece = ActivePiece::new(kind, rotation, self.config.spawn_anchor);

        if self.board.overlaps(&piece.cells()) {
            self.game_over = true;
            self.active = None;
            info!(
                score = self.score,
                level = self.level,
                lines = self.lines_cleared,
                "game over"
            );
            self.events.push(Event::GameOver);
            return None;
        }
        Some(piece)
    }

    fn activate(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
        self.events.push(Event::PieceMoved {
            cells: piece.cells(),
        });
    }

    fn resolve_rows(&mut self) {
        let rows = self.board.full_rows();
        if rows.is_empty() {
            return;
        }
        let cleared = rows.len();

        // Collaborators see the rows before they disappear.
        self.events.push(Event::RowsCleared { rows: rows.clone() });
        self.board.remove_rows(&rows);

        self.score = self
            .score
            .saturating_add(line_clear_points(cleared, self.config.points_per_line));
        self.lines_cleared = self.lines_cleared.saturating_add(cleared as u32);
        debug!(cleared, lines = self.lines_cleared, score = self.score, "rows cleared");

        let level = level_for_lines(self.lines_cleared, self.config.lines_per_level);
        if level != self.level {
            self.level = level;
            self.drop_interval_ms = drop_interval_ms(level, &self.config);
            info!(level, interval_ms = self.drop_interval_ms, "level up");
            self.events.push(Event::IntervalChanged {
                interval_ms: self.drop_interval_ms,
            });
        }
    }

    fn push_score(&mut self) {
        self.events.push(Event::ScoreUpdated {
            score: self.score,
            level: self.level,
            lines_cleared: self.lines_cleared,
        });
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.level = self.level;
        out.lines_cleared = self.lines_cleared;
        out.drop_interval_ms = self.drop_interval_ms;
        out.started = self.started;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
