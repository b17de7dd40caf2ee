//! Enemy generation
//!
//! Enemies are laid out on a grid in the top half of the arena, centered by
//! computed margins. Only the layout and value ranges are fixed; the exact
//! random sequence is not.

use rand::Rng;

use super::entity::{EntityConfig, Rgba};
use super::state::Arena;
use crate::consts::*;

/// Grid geometry for a requested enemy count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub per_row: usize,
    pub per_column: usize,
    /// Number of enemies actually placed (`min(requested, capacity)`)
    pub count: usize,
    pub margin_x: f32,
    pub margin_y: f32,
}

impl GridLayout {
    pub fn new(requested: usize, arena: &Arena) -> Self {
        let diameter = ENEMY_RADIUS * 2.0;
        let per_row = (arena.width / diameter).max(0.0) as usize;
        let per_column = (arena.height / 2.0 / diameter).max(0.0) as usize;
        let count = requested.min(per_row * per_column);

        if count == 0 {
            return Self {
                per_row,
                per_column,
                count,
                margin_x: 0.0,
                margin_y: 0.0,
            };
        }

        let rows = (count as f32 / per_row as f32).round();
        let margin_x = (arena.width - count.min(per_row) as f32 * diameter) / 2.0;
        let margin_y = (arena.height / 2.0 - rows * diameter) / 2.0;

        Self {
            per_row,
            per_column,
            count,
            margin_x,
            margin_y,
        }
    }

    pub fn capacity(&self) -> usize {
        self.per_row * self.per_column
    }

    /// Center of the `i`-th slot, filled row by row
    pub fn slot(&self, i: usize) -> (f32, f32) {
        let diameter = ENEMY_RADIUS * 2.0;
        let col = (i % self.per_row) as f32;
        let row = (i / self.per_row) as f32;
        (
            self.margin_x + ENEMY_RADIUS / 2.0 + col * diameter,
            self.margin_y + ENEMY_RADIUS / 2.0 + row * diameter,
        )
    }
}

/// Build configs for up to `requested` Autonomous enemies
///
/// Each enemy gets a random direction in `[-1, 1)` per axis, speed 2 and an
/// integer damage power in `[10, 90)`. Alpha scales with damage so more
/// dangerous enemies look more solid.
pub fn generate_enemies<R: Rng>(requested: usize, arena: &Arena, rng: &mut R) -> Vec<EntityConfig> {
    let layout = GridLayout::new(requested, arena);
    if layout.count < requested {
        log::debug!(
            "Enemy count {} exceeds grid capacity {}, placing {}",
            requested,
            layout.capacity(),
            layout.count
        );
    }

    (0..layout.count)
        .map(|i| {
            let (x, y) = layout.slot(i);
            let damage = rng.random_range(ENEMY_DAMAGE_MIN..ENEMY_DAMAGE_MAX) as f32;
            let dir = (rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
            EntityConfig {
                x: Some(x),
                y: Some(y),
                radius: Some(ENEMY_RADIUS),
                speed: Some(ENEMY_SPEED),
                dir: Some(dir),
                damage: Some(damage),
                invincible_ms: Some(ENEMY_INVINCIBLE_MS),
                color: Some(Rgba::rgba(255, 0, 0, damage / 100.0)),
                ..Default::default()
            }
        })
        .collect()
}
