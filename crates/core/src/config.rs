//! Engine configuration
//!
//! Defaults match the classic rules (1000ms at level 1, 100ms less per
//! level, 10 points per row, a level every 10 rows). Values can come from a
//! TOML file and be overridden by `BLOCKFALL_*` environment variables.
//!
//! ```toml
//! seed = 42
//! base_interval_ms = 1000
//! min_interval_ms = 100
//! spawn_rotation = "inherit"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    CellRef, BASE_DROP_MS, BOARD_WIDTH, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL,
    POINTS_PER_LINE, SPAWN_ANCHOR,
};

/// Errors raised while building an [`EngineConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value:?}")]
    Env { key: &'static str, value: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Rotation given to a newly spawned piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnRotation {
    /// Every piece spawns facing north
    #[default]
    Reset,
    /// A piece spawns with the rotation the previous piece locked in
    Inherit,
}

impl SpawnRotation {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reset" => Some(SpawnRotation::Reset),
            "inherit" => Some(SpawnRotation::Inherit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Piece source seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub base_interval_ms: u32,
    pub interval_step_ms: u32,
    pub min_interval_ms: u32,
    pub points_per_line: u32,
    pub lines_per_level: u32,
    pub spawn_anchor: CellRef,
    pub spawn_rotation: SpawnRotation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            base_interval_ms: BASE_DROP_MS,
            interval_step_ms: DROP_STEP_MS,
            min_interval_ms: DROP_INTERVAL_MIN_MS,
            points_per_line: POINTS_PER_LINE,
            lines_per_level: LINES_PER_LEVEL,
            spawn_anchor: SPAWN_ANCHOR,
            spawn_rotation: SpawnRotation::Reset,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply `BLOCKFALL_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError::Env { key, value })
        }

        if let Some(v) = lookup("BLOCKFALL_SEED") {
            self.seed = Some(parse("BLOCKFALL_SEED", v)?);
        }
        if let Some(v) = lookup("BLOCKFALL_BASE_INTERVAL_MS") {
            self.base_interval_ms = parse("BLOCKFALL_BASE_INTERVAL_MS", v)?;
        }
        if let Some(v) = lookup("BLOCKFALL_MIN_INTERVAL_MS") {
            self.min_interval_ms = parse("BLOCKFALL_MIN_INTERVAL_MS", v)?;
        }
        if let Some(v) = lookup("BLOCKFALL_SPAWN_ROTATION") {
            let parsed = SpawnRotation::from_str(v.trim());
            self.spawn_rotation = parsed.ok_or(ConfigError::Env {
                key: "BLOCKFALL_SPAWN_ROTATION",
                value: v,
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_interval_ms == 0 {
            return Err(ConfigError::Invalid("min_interval_ms must be positive".into()));
        }
        if self.min_interval_ms > self.base_interval_ms {
            return Err(ConfigError::Invalid(format!(
                "min_interval_ms ({}) exceeds base_interval_ms ({})",
                self.min_interval_ms, self.base_interval_ms
            )));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::Invalid("lines_per_level must be positive".into()));
        }
        // Shapes span four columns from the anchor; the spawn must not wrap.
        let max_anchor = BOARD_WIDTH as CellRef - 4;
        if !(0..=max_anchor).contains(&self.spawn_anchor) {
            return Err(ConfigError::Invalid(format!(
                "spawn_anchor must be within 0..={max_anchor}, got {}",
                self.spawn_anchor
            )));
        }
        Ok(())
    }
}
