//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed logical tick duration only
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod kinematics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Contact, detect_collision, distance, resolve_collision};
pub use entity::{Attacker, Directions, Entity, EntityConfig, EntityKind, EntityState, Rgba};
pub use kinematics::{KinematicsError, Velocity};
pub use spawn::{GridLayout, generate_enemies};
pub use state::{Arena, Status, World};
pub use tick::{Effect, TickInput, TickPlan, checking_phase, operating_phase, tick, updating_phase};
