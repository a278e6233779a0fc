//! Scoring module - points, levels and gravity speed
//!
//! - Every cleared row is worth a flat `points_per_line`.
//! - The level is `1 + lines / lines_per_level`, so it only ever goes up.
//! - Level 1 runs at the base interval; each level above removes
//!   `interval_step_ms`, never going under the configured floor.

use crate::config::EngineConfig;

/// Points for clearing `rows` rows in one resolution
pub fn line_clear_points(rows: usize, points_per_line: u32) -> u32 {
    (rows as u32).saturating_mul(points_per_line)
}

/// Level reached after `lines` cleared rows
pub fn level_for_lines(lines: u32, lines_per_level: u32) -> u32 {
    1 + lines / lines_per_level.max(1)
}

/// Gravity interval for a level in milliseconds
pub fn drop_interval_ms(level: u32, config: &EngineConfig) -> u32 {
    if level <= 1 {
        return config.base_interval_ms;
    }
    config
        .base_interval_ms
        .saturating_sub(level.saturating_mul(config.interval_step_ms))
        .max(config.min_interval_ms)
}
