//! Session runtime.
//!
//! Bridges the synchronous session with async command delivery and timers.
//! One task owns the session; commands and gravity ticks are applied one at
//! a time, each to completion, and its events are forwarded before the next
//! command is accepted.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::{PieceSource, Session};
use crate::scheduler::GravityTimer;
use crate::sink::EventSink;
use crate::types::{Command, Event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverOptions {
    /// Divides every requested interval (1 = real time)
    pub interval_divisor: u32,
    /// Return as soon as the session reports game over
    pub exit_on_game_over: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            interval_divisor: 1,
            exit_on_game_over: false,
        }
    }
}

impl DriverOptions {
    fn period(&self, interval_ms: u32) -> Duration {
        Duration::from_millis(u64::from(interval_ms / self.interval_divisor.max(1)))
    }
}

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub game_over: bool,
    /// Gravity ticks issued by the timer
    pub ticks: u64,
    /// Commands received from the channel
    pub commands: u64,
}

/// Drive `session` until the command channel closes
///
/// Events already pending on the session are forwarded first, so a session
/// started before the call still arms the timer.
pub async fn run_session<S, K>(
    session: &mut Session<S>,
    mut commands: mpsc::Receiver<Command>,
    sink: &mut K,
    options: DriverOptions,
) -> Result<RunSummary>
where
    S: PieceSource,
    K: EventSink + ?Sized,
{
    let mut timer = GravityTimer::new();
    let mut summary = RunSummary::default();

    forward_events(session, sink, &mut timer, &options)?;

    loop {
        if options.exit_on_game_over && session.game_over() {
            break;
        }

        let command = tokio::select! {
            biased;
            received = commands.recv() => match received {
                Some(command) => {
                    summary.commands += 1;
                    command
                }
                None => {
                    debug!("command channel closed");
                    break;
                }
            },
            _ = timer.tick() => {
                summary.ticks += 1;
                Command::Tick
            }
        };

        if !session.apply(command) {
            debug!(command = command.as_str(), "command ignored");
        }
        forward_events(session, sink, &mut timer, &options)?;
    }

    summary.score = session.score();
    summary.level = session.level();
    summary.lines_cleared = session.lines_cleared();
    summary.game_over = session.game_over();
    info!(
        score = summary.score,
        level = summary.level,
        lines = summary.lines_cleared,
        ticks = summary.ticks,
        "run finished"
    );
    Ok(summary)
}

fn forward_events<S, K>(
    session: &mut Session<S>,
    sink: &mut K,
    timer: &mut GravityTimer,
    options: &DriverOptions,
) -> Result<()>
where
    S: PieceSource,
    K: EventSink + ?Sized,
{
    let mut forwarded = false;
    for event in session.drain_events() {
        match event {
            Event::IntervalChanged { interval_ms } => {
                let period = options.period(interval_ms);
                debug!(interval_ms, period_ms = period.as_millis() as u64, "gravity re-armed");
                timer.arm(period);
            }
            Event::GameOver => {
                timer.stop();
            }
            _ => {}
        }
        sink.emit(&event)?;
        forwarded = true;
    }
    if forwarded {
        sink.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, EngineConfig, ScriptedPieces};
    use crate::types::{CellRef, PieceKind, BOARD_WIDTH};

    const W: CellRef = BOARD_WIDTH as CellRef;

    fn scripted(kind: PieceKind) -> Session<ScriptedPieces> {
        Session::with_source(EngineConfig::default(), ScriptedPieces::new(vec![kind]))
    }

    async fn run_for(
        session: &mut Session<ScriptedPieces>,
        options: DriverOptions,
        script: Vec<Command>,
        run_ms: u64,
    ) -> (RunSummary, Vec<Event>) {
        let (tx, rx) = mpsc::channel(16);
        for command in script {
            tx.send(command).await.unwrap();
        }
        let mut sink = Vec::new();
        let closer = async move {
            tokio::time::sleep(Duration::from_millis(run_ms)).await;
            drop(tx);
        };
        let (summary, ()) = tokio::join!(run_session(session, rx, &mut sink, options), closer);
        (summary.unwrap(), sink)
    }

    #[tokio::test(start_paused = true)]
    async fn test_gravity_follows_base_interval() {
        let mut session = scripted(PieceKind::T);
        let (summary, events) =
            run_for(&mut session, DriverOptions::default(), vec![Command::Start], 3500).await;

        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.commands, 1);
        assert_eq!(session.active().unwrap().anchor, 4 + 3 * W);
        assert_eq!(events[0], Event::IntervalChanged { interval_ms: 1000 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_divisor_speeds_up_gravity() {
        let mut session = scripted(PieceKind::T);
        let options = DriverOptions {
            interval_divisor: 10,
            ..DriverOptions::default()
        };
        let (summary, _) = run_for(&mut session, options, vec![Command::Start], 350).await;
        assert_eq!(summary.ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_before_start() {
        let mut session = scripted(PieceKind::T);
        let (summary, events) =
            run_for(&mut session, DriverOptions::default(), Vec::new(), 5000).await;
        assert_eq!(summary.ticks, 0);
        assert!(events.is_empty());
        assert!(!session.started());
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_stops_gravity() {
        let mut board = Board::new();
        board.set(2, 5, Some(PieceKind::I));
        let mut session =
            Session::from_parts(EngineConfig::default(), ScriptedPieces::new(vec![PieceKind::O]), board);

        let (summary, events) =
            run_for(&mut session, DriverOptions::default(), vec![Command::Start], 10_000).await;

        // The first tick lands the piece and the respawn is blocked.
        assert_eq!(summary.ticks, 1);
        assert!(summary.game_over);
        assert_eq!(events.last(), Some(&Event::GameOver));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_on_game_over() {
        let mut board = Board::new();
        board.set(2, 5, Some(PieceKind::I));
        let mut session =
            Session::from_parts(EngineConfig::default(), ScriptedPieces::new(vec![PieceKind::O]), board);

        let (tx, rx) = mpsc::channel(4);
        tx.send(Command::Start).await.unwrap();
        let mut sink = Vec::new();
        let options = DriverOptions {
            exit_on_game_over: true,
            ..DriverOptions::default()
        };
        // Sender stays alive; only game over can end the run.
        let summary = run_session(&mut session, rx, &mut sink, options).await.unwrap();
        assert!(summary.game_over);
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_rearms_after_game_over() {
        let mut board = Board::new();
        board.set(2, 5, Some(PieceKind::I));
        let mut session =
            Session::from_parts(EngineConfig::default(), ScriptedPieces::new(vec![PieceKind::O]), board);

        let (tx, rx) = mpsc::channel(4);
        tx.send(Command::Start).await.unwrap();
        let mut sink = Vec::new();
        let driver = run_session(&mut session, rx, &mut sink, DriverOptions::default());
        let player = async move {
            tokio::time::sleep(Duration::from_millis(5000)).await;
            tx.send(Command::Reset).await.unwrap();
            tokio::time::sleep(Duration::from_millis(2500)).await;
            drop(tx);
        };
        let (summary, ()) = tokio::join!(driver, player);
        let summary = summary.unwrap();

        // One tick before game over, two after the reset.
        assert_eq!(summary.ticks, 3);
        assert!(!summary.game_over);
        assert!(sink.contains(&Event::SessionReset));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_events_forwarded_first() {
        let mut session = scripted(PieceKind::I);
        session.start();
        let (summary, events) =
            run_for(&mut session, DriverOptions::default(), Vec::new(), 1500).await;
        assert_eq!(events[0], Event::IntervalChanged { interval_ms: 1000 });
        assert_eq!(summary.ticks, 1);
    }
}
