use std::path::PathBuf;

use thiserror::Error;

/// Reasons a `GameConfig` cannot start a game.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("field must be at least 1x1, got {width}x{height}")]
    DegenerateField { width: f32, height: f32 },
    #[error("collision padding must be positive, got {0}")]
    NonPositivePadding(f32),
    #[error("frame rate must be positive")]
    ZeroFrameRate,
    #[error("{name} must be a finite positive number, got {value}")]
    InvalidSpeed { name: &'static str, value: f32 },
    #[error("enemy fire chance must lie in [0, 1], got {0}")]
    FireChanceOutOfRange(f64),
    #[error("a run must start with at least one life")]
    ZeroLives,
    #[error("kills per level must be at least 1")]
    ZeroKillsPerLevel,
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
