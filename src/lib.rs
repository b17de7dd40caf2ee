//! Disc Arena - a bounded 2D arena of elastic, damage-trading discs
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, entities, tick pipeline)
//! - `renderer`: Abstract drawing surface and entity rendering
//! - `platform`: Host input and frame scheduling
//! - `game`: Per-frame driver tying input, simulation and drawing together
//! - `settings`: Session configuration

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Logical duration of one tick in milliseconds.
    ///
    /// Invincibility decays by this amount every simulated frame, regardless
    /// of how much wall-clock time actually passed.
    pub const TICK_MS: f32 = 10.0;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Default host frame rate for the native scheduler
    pub const FRAME_RATE_HZ: u32 = 60;

    /// Enemy generator defaults
    pub const ENEMY_COUNT: usize = 200;
    pub const ENEMY_RADIUS: f32 = 10.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_DAMAGE_MIN: u32 = 10;
    pub const ENEMY_DAMAGE_MAX: u32 = 90;
    pub const ENEMY_INVINCIBLE_MS: f32 = 500.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_HEALTH: f32 = 100.0;
    pub const PLAYER_INVINCIBLE_MS: f32 = 2000.0;

    /// Fallbacks applied when an entity config carries a non-positive value
    pub const DEFAULT_RADIUS: f32 = 25.0;
    pub const DEFAULT_MASS: f32 = 1.0;
    pub const DEFAULT_MAX_HEALTH: f32 = 100.0;
    pub const DEFAULT_SPEED: f32 = 1.0;
}
