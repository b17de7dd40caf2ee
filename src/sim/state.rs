//! World and session state
//!
//! The world exclusively owns the entity collection. Entities never
//! reference each other; cross-entity effects are applied by the tick
//! pipeline.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityConfig, EntityKind};
use super::spawn::generate_enemies;

/// Arena bounds. The playfield spans `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Session status
///
/// `Paused <-> Running`, and `Running -> Won | Lost`. Won and Lost are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Paused,
    Running,
    Won,
    Lost,
}

impl Status {
    /// Won or Lost
    pub fn is_over(&self) -> bool {
        matches!(self, Status::Won | Status::Lost)
    }
}

/// Authoritative simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub arena: Arena,
    pub status: Status,
    /// Live entities in iteration / z-order
    pub entities: Vec<Entity>,
    /// Simulated tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl World {
    /// Empty, running world
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            status: Status::Running,
            entities: Vec::new(),
            time_ticks: 0,
            next_id: 0,
        }
    }

    /// Standard session: a grid of enemies in the top half followed by the
    /// player (so the player draws on top)
    pub fn with_session(arena: Arena, enemy_count: usize, player: &EntityConfig, seed: u64) -> Self {
        let mut world = Self::new(arena);
        let mut rng = Pcg32::seed_from_u64(seed);

        for config in generate_enemies(enemy_count, &arena, &mut rng) {
            world.spawn(EntityKind::Autonomous, &config);
        }
        world.spawn(EntityKind::Controlled, player);

        log::info!(
            "Session started: arena {}x{}, {} enemies (requested {}), seed {}",
            arena.width,
            arena.height,
            world.entities.len() - 1,
            enemy_count,
            seed
        );
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Construct an entity and append it to the live collection
    pub fn spawn(&mut self, kind: EntityKind, config: &EntityConfig) -> u32 {
        let id = self.next_entity_id();
        self.entities.push(Entity::new(id, kind, config));
        id
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Controlled entities in collection order
    pub fn controlled(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| e.kind() == EntityKind::Controlled)
    }

    /// Flip Paused and Running. No effect once the session is over.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            other => other,
        };
        log::info!("Status: {:?}", self.status);
    }

    /// Lost when at least one Controlled entity exists and all of them are
    /// at zero health
    pub fn all_controlled_defeated(&self) -> bool {
        let mut any = false;
        for e in self.controlled() {
            if e.health() > 0.0 {
                return false;
            }
            any = true;
        }
        any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Attacker;

    #[test]
    fn test_toggle_pause() {
        let mut world = World::new(Arena::new(100.0, 100.0));
        assert_eq!(world.status, Status::Running);
        world.toggle_pause();
        assert_eq!(world.status, Status::Paused);
        world.toggle_pause();
        assert_eq!(world.status, Status::Running);
    }

    #[test]
    fn test_toggle_pause_ignored_when_over() {
        let mut world = World::new(Arena::new(100.0, 100.0));
        for status in [Status::Won, Status::Lost] {
            world.status = status;
            world.toggle_pause();
            assert_eq!(world.status, status);
        }
    }

    #[test]
    fn test_defeat_needs_a_controlled_entity() {
        let mut world = World::new(Arena::new(100.0, 100.0));
        assert!(!world.all_controlled_defeated());

        world.spawn(EntityKind::Autonomous, &EntityConfig::default());
        assert!(!world.all_controlled_defeated());

        let a = world.spawn(EntityKind::Controlled, &EntityConfig::default());
        let b = world.spawn(EntityKind::Controlled, &EntityConfig::default());
        let lethal = Attacker {
            kind: EntityKind::Autonomous,
            damage: 1000.0,
        };
        world.get_mut(a).unwrap().damage_by(lethal);
        assert!(!world.all_controlled_defeated());
        world.get_mut(b).unwrap().damage_by(lethal);
        assert!(world.all_controlled_defeated());
    }

    #[test]
    fn test_session_layout() {
        let player = EntityConfig {
            x: Some(640.0),
            y: Some(540.0),
            ..Default::default()
        };
        let world = World::with_session(Arena::new(1280.0, 720.0), 10, &player, 7);
        assert_eq!(world.entities.len(), 11);
        assert_eq!(world.controlled().count(), 1);
        // Player is last so it renders on top
        assert_eq!(world.entities[10].kind(), EntityKind::Controlled);

        // IDs are unique and ascending
        for (i, e) in world.entities.iter().enumerate() {
            assert_eq!(e.id(), i as u32);
        }
    }
}
