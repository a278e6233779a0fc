//! Headless runner (default binary).
//!
//! Plays one session with an autoplay input task standing in for a player.
//! Every engine event is written to stdout as one JSON line; logs go to
//! stderr.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use blockfall::core::{EngineConfig, Session, SpawnRotation};
use blockfall::driver::{run_session, DriverOptions, JsonLinesSink};
use blockfall::types::Command;

const COMMAND_QUEUE: usize = 64;

const PLAYER_COMMANDS: [Command; 4] = [
    Command::MoveLeft,
    Command::MoveRight,
    Command::Rotate,
    Command::SoftDrop,
];

/// Falling-block puzzle engine, played headless.
#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about)]
struct Args {
    /// TOML config file; BLOCKFALL_* environment variables override it.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Piece sequence seed (random when unset).
    #[arg(short, long)]
    seed: Option<u64>,

    /// Rotation of newly spawned pieces.
    #[arg(long, value_name = "MODE")]
    spawn_rotation: Option<SpawnRotationArg>,

    /// Run gravity this many times faster than real time.
    #[arg(long, default_value = "1", value_name = "N")]
    speed: u32,

    /// Delay between autoplay commands.
    #[arg(long, default_value = "150", value_name = "MS")]
    input_ms: u64,

    /// More log output on stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SpawnRotationArg {
    Reset,
    Inherit,
}

impl From<SpawnRotationArg> for SpawnRotation {
    fn from(value: SpawnRotationArg) -> Self {
        match value {
            SpawnRotationArg::Reset => SpawnRotation::Reset,
            SpawnRotationArg::Inherit => SpawnRotation::Inherit,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(&args)?;
    let mut session = Session::new(config);
    let seed = session.seed();

    let (tx, rx) = mpsc::channel::<Command>(COMMAND_QUEUE);
    tx.send(Command::Start)
        .await
        .context("failed to queue start command")?;
    let player = tokio::spawn(autoplay(tx, seed, Duration::from_millis(args.input_ms.max(1))));

    let mut sink = JsonLinesSink::new(BufWriter::new(io::stdout()));
    let options = DriverOptions {
        interval_divisor: args.speed.max(1),
        exit_on_game_over: true,
    };
    let result = run_session(&mut session, rx, &mut sink, options).await;
    player.abort();
    let summary = result?;

    info!(
        seed,
        score = summary.score,
        level = summary.level,
        lines = summary.lines_cleared,
        "final score"
    );
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let mut config = config
        .with_env_overrides()
        .context("invalid environment override")?;

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(rotation) = args.spawn_rotation {
        config.spawn_rotation = rotation.into();
    }
    config.validate()?;
    debug!(?config, "configuration loaded");
    Ok(config)
}

/// Random player input, derived from the session seed so runs replay
async fn autoplay(tx: mpsc::Sender<Command>, seed: u64, every: Duration) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.rotate_left(32));
    let mut ticker = time::interval(every);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let command = PLAYER_COMMANDS[rng.gen_range(0..PLAYER_COMMANDS.len())];
        if tx.send(command).await.is_err() {
            break;
        }
    }
}
