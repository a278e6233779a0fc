//! Event sinks.
//!
//! Where the driver sends engine events once a command has been processed.

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use tokio::sync::mpsc;

use crate::types::Event;

/// Consumer of engine events (renderer, audio, logger, test recorder)
pub trait EventSink {
    fn emit(&mut self, event: &Event) -> Result<()>;

    /// Called once per processed command, after its events
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: &Event) -> Result<()> {
        self.push(event.clone());
        Ok(())
    }
}

/// Writes each event as one JSON object per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, event: &Event) -> Result<()> {
        serde_json::to_writer(&mut self.out, event)
            .with_context(|| format!("failed to encode {} event", event.name()))?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("failed to flush event stream")
    }
}

/// Forwards events to another task
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Event>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: &Event) -> Result<()> {
        self.tx
            .send(event.clone())
            .map_err(|_| anyhow!("event receiver dropped"))
    }
}
