/// Game configuration.
///
/// Screen size, padding, speeds and probabilities all live here and are
/// passed into `compute::new_game`.  The engine reads no global state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the enemy roster evolves when enemies die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveMode {
    /// Clearing a wave advances the level and spawns a fresh wave.
    Infinite,
    /// One wave per run.  The level advances every `kills_per_level` kills
    /// and clearing the wave is a victory.
    SingleWave { kills_per_level: u32 },
}

/// How the apple reacts to friendly shots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusMode {
    /// Never hit-tested; shots pass through it.
    Decorative,
    /// Every hit awards `score` and moves the apple elsewhere.  The shot
    /// keeps flying.
    Respawning { score: u32 },
}

/// How direction keys drive the ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    /// One step per key press.
    Step,
    /// One step per tick while the key is held.
    Held,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    /// Collision tolerance used by `geometry::collides`.
    pub padding: f32,
    /// Target frames per second for the driver; the engine itself is frame-agnostic.
    pub frame_rate: u32,
    /// Enemy shot speed in px/tick; friendly shots travel twice as fast.
    pub shot_speed: f32,
    pub shot_radius: f32,
    pub ship_step: f32,
    pub vibration_rate: f32,
    pub enemy_fire_chance: f64,
    pub starting_lives: u32,
    pub wave_mode: WaveMode,
    pub bonus_mode: BonusMode,
    pub movement: MovementMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            padding: 10.0,
            frame_rate: 60,
            shot_speed: 2.5,
            shot_radius: 5.0,
            ship_step: 10.0,
            vibration_rate: 1.0,
            enemy_fire_chance: 0.08,
            starting_lives: 3,
            wave_mode: WaveMode::Infinite,
            bonus_mode: BonusMode::Decorative,
            movement: MovementMode::Step,
        }
    }
}

impl GameConfig {
    /// Held-key movement at 5 px per frame, 50 FPS, a single wave ending in
    /// victory and a respawning apple.
    pub fn single_wave() -> Self {
        Self {
            frame_rate: 50,
            ship_step: 5.0,
            wave_mode: WaveMode::SingleWave { kills_per_level: 3 },
            bonus_mode: BonusMode::Respawning { score: 2 },
            movement: MovementMode::Held,
            ..Self::default()
        }
    }

    /// Reject configurations that cannot produce a playable field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width >= 1.0 && self.height >= 1.0) || !self.width.is_finite() || !self.height.is_finite() {
            return Err(ConfigError::DegenerateField {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.padding > 0.0) || !self.padding.is_finite() {
            return Err(ConfigError::NonPositivePadding(self.padding));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        for (name, value) in [
            ("shot_speed", self.shot_speed),
            ("shot_radius", self.shot_radius),
            ("ship_step", self.ship_step),
            ("vibration_rate", self.vibration_rate),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::InvalidSpeed { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            return Err(ConfigError::FireChanceOutOfRange(self.enemy_fire_chance));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if let WaveMode::SingleWave { kills_per_level: 0 } = self.wave_mode {
            return Err(ConfigError::ZeroKillsPerLevel);
        }
        Ok(())
    }

    /// Read a JSON config file.  Missing fields fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Err(e) = config.validate() {
            log::warn!("Rejected config {}: {}", path.display(), e);
            return Err(e);
        }
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // A struct of plain numbers and unit-like enums always serializes.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
