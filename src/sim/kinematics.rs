//! Speed-scaled velocity storage
//!
//! Velocity is kept as a scalar speed and a direction pair. Reading a
//! velocity component returns `speed * dir`; writing one stores `v / speed`
//! as the direction component, so a later speed change rescales both axes.

use glam::Vec2;
use thiserror::Error;

use crate::consts::DEFAULT_SPEED;

/// Errors raised when mutating kinematic state
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum KinematicsError {
    /// Speed must be finite and strictly positive (it is a divisor on write)
    #[error("speed must be finite and > 0, got {0}")]
    InvalidSpeed(f32),
}

/// Velocity as `speed * direction`
///
/// `speed > 0` holds for every constructed value, which keeps the
/// divide-by-speed in [`Velocity::set_x`] / [`Velocity::set_y`] finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    speed: f32,
    dir: Vec2,
}

impl Default for Velocity {
    /// At rest with the default speed
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            dir: Vec2::ZERO,
        }
    }
}

impl Velocity {
    /// Build from a speed and a raw direction pair.
    ///
    /// The direction is stored as given (not normalized): the effective
    /// velocity is exactly `speed * dir`.
    pub fn new(speed: f32, dir: Vec2) -> Result<Self, KinematicsError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(KinematicsError::InvalidSpeed(speed));
        }
        Ok(Self { speed, dir })
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    /// Change the scalar speed, rescaling the effective velocity on both axes
    pub fn set_speed(&mut self, speed: f32) -> Result<(), KinematicsError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(KinematicsError::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.speed * self.dir.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.speed * self.dir.y
    }

    /// Effective velocity vector
    #[inline]
    pub fn get(&self) -> Vec2 {
        self.dir * self.speed
    }

    #[inline]
    pub fn set_x(&mut self, vx: f32) {
        self.dir.x = vx / self.speed;
    }

    #[inline]
    pub fn set_y(&mut self, vy: f32) {
        self.dir.y = vy / self.speed;
    }

    /// Set both components of the effective velocity
    pub fn set(&mut self, v: Vec2) {
        self.set_x(v.x);
        self.set_y(v.y);
    }

    /// Zero the direction (effective velocity becomes zero, speed is kept)
    pub fn stop(&mut self) {
        self.dir = Vec2::ZERO;
    }
}
