//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens in a game lives here. There is no
//! clock, no terminal and no I/O: a [`Session`] changes only when a
//! [`Command`](types::Command) is applied, and reports every change as an
//! [`Event`](types::Event).
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with a floor row, collision queries and row clearing
//! - [`shapes`]: the seven tetromino shapes as flat cell offsets
//! - [`piece`]: the falling piece and its movement rules
//! - [`rng`]: piece sources (seeded random or scripted)
//! - [`scoring`]: points, levels and gravity interval
//! - [`session`]: a complete game driven by commands
//! - [`snapshot`]: plain-data view for renderers
//! - [`config`]: tunable rules loaded from TOML and the environment
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, ScriptedPieces, Session};
//! use blockfall_core::types::{Command, Event, PieceKind};
//!
//! let mut session = Session::with_source(
//!     EngineConfig::default(),
//!     ScriptedPieces::new(vec![PieceKind::T]),
//! );
//! session.apply(Command::Start);
//! session.apply(Command::Tick);
//!
//! let events = session.take_events();
//! assert_eq!(events[0], Event::IntervalChanged { interval_ms: 1000 });
//! assert!(matches!(events.last(), Some(Event::PieceMoved { .. })));
//! ```

pub mod board;
pub mod config;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use config::{ConfigError, EngineConfig, SpawnRotation};
pub use piece::{ActivePiece, Fall};
pub use rng::{PieceSource, RandomPieces, ScriptedPieces};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_points};
pub use session::Session;
pub use shapes::{get_shape, offsets};
pub use snapshot::{ActiveSnapshot, SessionSnapshot};
