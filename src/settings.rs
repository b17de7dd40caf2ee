//! Session settings
//!
//! Loaded from a JSON file on native; the web build uses the defaults sized
//! to the canvas.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Arena, EntityConfig, Rgba};

/// Why settings could not be loaded
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub width: f32,
    pub height: f32,

    // === Population ===
    /// Requested enemy count (capped by the grid capacity)
    pub enemy_count: usize,
    /// RNG seed for enemy generation; random when absent
    pub seed: Option<u64>,
    /// Player overrides; missing fields use the player defaults
    pub player: EntityConfig,

    // === Host loop (native only) ===
    pub frame_rate_hz: u32,
    /// Stop the headless runner after this many frames
    pub max_frames: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            enemy_count: ENEMY_COUNT,
            seed: None,
            player: EntityConfig::default(),
            frame_rate_hz: FRAME_RATE_HZ,
            max_frames: None,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "arena {} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.frame_rate_hz == 0 {
            return Err(SettingsError::Invalid("frame_rate_hz must be > 0".into()));
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.width, self.height)
    }

    /// Player config with the defaults filled in: bottom quarter of the
    /// arena, unbounded, long invincibility window
    pub fn player_config(&self) -> EntityConfig {
        let p = &self.player;
        EntityConfig {
            x: p.x.or(Some(self.width / 2.0)),
            y: p.y.or(Some(self.height * 3.0 / 4.0)),
            radius: p.radius.or(Some(PLAYER_RADIUS)),
            speed: p.speed.or(Some(PLAYER_SPEED)),
            health: p.health.or(Some(PLAYER_HEALTH)),
            bounded: p.bounded.or(Some(false)),
            invincible_ms: p.invincible_ms.or(Some(PLAYER_INVINCIBLE_MS)),
            color: p.color.or(Some(Rgba::rgb(0, 255, 0))),
            ..p.clone()
        }
    }
}
