//! Driver - runs a session against real time
//!
//! The core engine never looks at a clock. This crate is the scheduler it
//! expects: a tokio task that serializes player commands, turns the
//! session's requested drop interval into gravity ticks and forwards every
//! event to an [`EventSink`].
//!
//! ```no_run
//! use blockfall_driver::{run_session, DriverOptions, JsonLinesSink};
//! use blockfall_driver::core::{EngineConfig, Session};
//! use blockfall_driver::types::Command;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let (tx, rx) = tokio::sync::mpsc::channel(64);
//! let mut session = Session::new(EngineConfig::default());
//! let mut sink = JsonLinesSink::new(std::io::stdout());
//!
//! tx.send(Command::Start).await?;
//! let summary = run_session(&mut session, rx, &mut sink, DriverOptions::default()).await?;
//! println!("final score {}", summary.score);
//! # Ok(())
//! # }
//! ```

pub mod runtime;
pub mod scheduler;
pub mod sink;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use runtime::{run_session, DriverOptions, RunSummary};
pub use scheduler::GravityTimer;
pub use sink::{ChannelSink, EventSink, JsonLinesSink};
