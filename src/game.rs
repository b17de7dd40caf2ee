//! Per-frame game driver
//!
//! Owns the world and the held-key state. A host calls [`Game::key_down`] /
//! [`Game::key_up`] as events arrive and [`Game::frame`] once per repaint.

use crate::platform::input::{HeldKeys, Key};
use crate::renderer::{FrameSignals, Surface, draw_world};
use crate::settings::Settings;
use crate::sim::{Status, TickInput, World, tick};

/// A single-arena session plus its input state
#[derive(Debug, Clone)]
pub struct Game {
    world: World,
    keys: HeldKeys,
    seed: u64,
}

impl Game {
    /// Start a session from settings (random seed when none is configured)
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let world = World::with_session(
            settings.arena(),
            settings.enemy_count,
            &settings.player_config(),
            seed,
        );
        Self::from_world(world, seed)
    }

    /// Wrap an existing world
    pub fn from_world(world: World, seed: u64) -> Self {
        Self {
            world,
            keys: HeldKeys::new(),
            seed,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> Status {
        self.world.status
    }

    /// Key pressed. A fresh Escape press toggles pause; auto-repeat does not.
    pub fn key_down(&mut self, key: Key) {
        let fresh = self.keys.press(key);
        if key == Key::Escape && fresh {
            self.world.toggle_pause();
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
    }

    /// Forget held keys (focus lost)
    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    /// One animation frame: simulate if running, then draw, then report the
    /// UI signals for the current status
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameSignals {
        let input = TickInput {
            directions: self.keys.directions(),
        };
        tick(&mut self.world, &input);
        draw_world(&self.world, surface);
        FrameSignals::from_status(self.world.status)
    }
}
