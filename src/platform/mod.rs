//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (logical keys, held-key tracking)
//! - Frame scheduling (fixed-rate loop on native, `requestAnimationFrame` on web)

pub mod input;
pub mod time;

pub use input::{HeldKeys, Key};
pub use time::{FixedRateScheduler, Scheduler};
