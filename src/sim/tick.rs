//! Per-frame simulation pipeline
//!
//! One tick runs three phases in order:
//! - checking: detect the Lost condition and decide whether to simulate
//! - operating: pairwise collision detection over the live entities, with
//!   physics resolved immediately and damage queued as deferred effects,
//!   followed by every entity's own motion / invincibility effects
//! - updating: drain the queue strictly in enqueue order
//!
//! Every collision-damage effect for every pair is queued before any entity's
//! own effects. Damage therefore always sees positions and health as they
//! stood after collision resolution but before anything moved.

use super::collision::{detect_collision, resolve_collision};
use super::entity::{Directions, Entity};
use super::state::{Status, World};
use crate::consts::TICK_MS;

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held directional keys, consumed by Controlled motion
    pub directions: Directions,
}

/// A deferred mutation, addressed by slot in the tick's work list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// `a.damage_by(b)` then `b.damage_by(a)`
    MutualDamage { a: usize, b: usize },
    /// Advance position by the entity's motion policy
    Motion { slot: usize },
    /// Count invincibility down by one tick
    DecayInvincibility { slot: usize },
    /// Publish the work list as the world's entity collection
    Commit,
}

impl Entity {
    /// The entity's own per-tick effects: motion first, then decay
    pub fn operate(&self, slot: usize) -> [Effect; 2] {
        [Effect::Motion { slot }, Effect::DecayInvincibility { slot }]
    }
}

/// Output of the operating phase, consumed by [`updating_phase`]
#[derive(Debug)]
pub struct TickPlan {
    /// Live entities this tick, in stable order
    pub work: Vec<Entity>,
    /// Entities filtered out as removed; restored if nothing commits
    stale: Vec<Entity>,
    /// Deferred effects in execution order
    pub queue: Vec<Effect>,
}

/// Mutable access to two distinct slots, `i < j`
fn pair_mut(entities: &mut [Entity], i: usize, j: usize) -> (&mut Entity, &mut Entity) {
    debug_assert!(i < j);
    let (head, tail) = entities.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Transition to Lost if every Controlled entity is at zero health.
/// Returns whether the simulation should advance this tick.
pub fn checking_phase(world: &mut World) -> bool {
    if !world.status.is_over() && world.all_controlled_defeated() {
        world.status = Status::Lost;
        log::info!("All controlled entities defeated at tick {}", world.time_ticks);
    }
    world.status == Status::Running
}

/// Filter removed entities, detect collisions and build the effect queue
pub fn operating_phase(world: &mut World) -> TickPlan {
    let (mut work, stale): (Vec<Entity>, Vec<Entity>) = std::mem::take(&mut world.entities)
        .into_iter()
        .partition(|e| !e.is_marked_for_removal());
    if !stale.is_empty() {
        log::debug!("Dropping {} removed entities", stale.len());
    }

    let mut queue = Vec::with_capacity(work.len() * 3);

    for i in 0..work.len() {
        for j in (i + 1)..work.len() {
            let Some(contact) = detect_collision(&work[i], &work[j]) else {
                continue;
            };
            queue.push(Effect::MutualDamage { a: i, b: j });
            if work[i].bounded() && work[j].bounded() {
                let (a, b) = pair_mut(&mut work, i, j);
                resolve_collision(a, b, &contact);
            }
        }
    }

    if !queue.is_empty() {
        log::debug!("Tick {}: {} collisions", world.time_ticks, queue.len());
    }

    for (slot, entity) in work.iter().enumerate() {
        queue.extend(entity.operate(slot));
        queue.push(Effect::Commit);
    }

    TickPlan { work, stale, queue }
}

/// Execute every queued effect in order and publish the result
pub fn updating_phase(world: &mut World, plan: TickPlan, input: &TickInput) {
    let TickPlan {
        mut work,
        stale,
        queue,
    } = plan;
    let mut committed = false;

    for effect in queue {
        match effect {
            Effect::MutualDamage { a, b } => {
                let hit_by_b = work[b].as_attacker();
                let hit_by_a = work[a].as_attacker();
                work[a].damage_by(hit_by_b);
                work[b].damage_by(hit_by_a);
            }
            Effect::Motion { slot } => work[slot].step_motion(input.directions, &world.arena),
            Effect::DecayInvincibility { slot } => work[slot].decay_invincibility(TICK_MS),
            Effect::Commit => committed = true,
        }
    }

    // With no live entities nothing commits and the previous collection stays
    world.entities = if committed { work } else { stale };
    world.time_ticks += 1;
}

/// Run the checking, operating and updating phases.
/// Returns whether the simulation advanced.
pub fn tick(world: &mut World, input: &TickInput) -> bool {
    if !checking_phase(world) {
        return false;
    }
    let plan = operating_phase(world);
    updating_phase(world, plan, input);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityConfig, EntityKind, EntityState};
    use crate::sim::state::Arena;
    use glam::Vec2;

    fn enemy_at(x: f32, y: f32, dir: (f32, f32), damage: f32) -> EntityConfig {
        EntityConfig {
            x: Some(x),
            y: Some(y),
            radius: Some(10.0),
            speed: Some(1.0),
            dir: Some(dir),
            damage: Some(damage),
            invincible_ms: Some(500.0),
            ..Default::default()
        }
    }

    fn player_at(x: f32, y: f32, health: f32) -> EntityConfig {
        EntityConfig {
            x: Some(x),
            y: Some(y),
            radius: Some(20.0),
            speed: Some(10.0),
            health: Some(health),
            damage: Some(40.0),
            bounded: Some(false),
            invincible_ms: Some(2000.0),
            ..Default::default()
        }
    }

    fn world() -> World {
        World::new(Arena::new(1000.0, 1000.0))
    }

    #[test]
    fn test_damage_queued_before_own_effects() {
        let mut w = world();
        w.spawn(EntityKind::Autonomous, &enemy_at(100.0, 100.0, (0.0, 0.0), 10.0));
        w.spawn(EntityKind::Controlled, &player_at(110.0, 100.0, 100.0));
        w.spawn(EntityKind::Autonomous, &enemy_at(500.0, 500.0, (0.0, 0.0), 10.0));

        let plan = operating_phase(&mut w);
        assert_eq!(
            plan.queue,
            vec![
                Effect::MutualDamage { a: 0, b: 1 },
                Effect::Motion { slot: 0 },
                Effect::DecayInvincibility { slot: 0 },
                Effect::Commit,
                Effect::Motion { slot: 1 },
                Effect::DecayInvincibility { slot: 1 },
                Effect::Commit,
                Effect::Motion { slot: 2 },
                Effect::DecayInvincibility { slot: 2 },
                Effect::Commit,
            ]
        );

        // Nothing has been damaged yet
        assert!(plan.work.iter().all(|e| e.state() == EntityState::Normal));
    }

    #[test]
    fn test_physics_immediate_for_bounded_pairs_only() {
        let mut w = world();
        w.spawn(EntityKind::Autonomous, &enemy_at(100.0, 100.0, (1.0, 0.0), 10.0));
        w.spawn(EntityKind::Autonomous, &enemy_at(115.0, 100.0, (-1.0, 0.0), 10.0));
        w.spawn(EntityKind::Controlled, &player_at(300.0, 300.0, 100.0));
        w.spawn(EntityKind::Autonomous, &enemy_at(300.0, 310.0, (0.0, 0.0), 10.0));

        let plan = operating_phase(&mut w);
        // Bounded pair is already separated and bounced before any effect runs
        assert!((plan.work[0].pos.distance(plan.work[1].pos) - 20.0).abs() < 1e-4);
        assert!(plan.work[0].velocity.x() < 0.0);
        // Unbounded player is left where it was
        assert_eq!(plan.work[2].pos, Vec2::new(300.0, 300.0));
        assert_eq!(plan.work[3].pos, Vec2::new(300.0, 310.0));
        assert!(plan.queue.contains(&Effect::MutualDamage { a: 2, b: 3 }));
    }

    #[test]
    fn test_mutual_damage_and_removal_next_tick() {
        let mut w = world();
        w.spawn(EntityKind::Autonomous, &enemy_at(100.0, 100.0, (0.0, 0.0), 25.0));
        let player = w.spawn(EntityKind::Controlled, &player_at(110.0, 100.0, 100.0));
        // Player deals 40: drop enemy health so the hit is lethal
        w.entities[0].set_health(30.0);

        assert!(tick(&mut w, &TickInput::default()));
        let p = w.get(player).unwrap();
        assert_eq!(p.health(), 75.0);
        assert!(p.is_invincible());

        // Flagged enemy stays in the collection until the next tick filters it
        assert_eq!(w.entities.len(), 2);
        assert_eq!(w.entities[0].health(), 0.0);
        assert!(w.entities[0].is_marked_for_removal());

        tick(&mut w, &TickInput::default());
        assert_eq!(w.entities.len(), 1);
        assert_eq!(w.entities[0].id(), player);
    }

    #[test]
    fn test_enemies_never_damage_each_other() {
        let mut w = world();
        w.spawn(EntityKind::Autonomous, &enemy_at(100.0, 100.0, (1.0, 0.0), 80.0));
        w.spawn(EntityKind::Autonomous, &enemy_at(105.0, 100.0, (-1.0, 0.0), 80.0));

        for _ in 0..20 {
            tick(&mut w, &TickInput::default());
        }
        assert!(w.entities.iter().all(|e| e.health() == 100.0));
        assert!(w.entities.iter().all(|e| e.state() == EntityState::Normal));
    }

    #[test]
    fn test_lost_stops_simulation() {
        let mut w = world();
        w.spawn(EntityKind::Autonomous, &enemy_at(100.0, 100.0, (1.0, 0.0), 50.0));
        w.spawn(EntityKind::Controlled, &player_at(110.0, 100.0, 10.0));

        assert!(tick(&mut w, &TickInput::default()));
        assert_eq!(w.status, Status::Running);
        assert_eq!(w.entities[1].health(), 0.0);

        // Next check sees the defeated player
        assert!(!tick(&mut w, &TickInput::default()));
        assert_eq!(w.status, Status::Lost);

        let before: Vec<Vec2> = w.entities.iter().map(|e| e.pos).collect();
        let ticks = w.time_ticks;
        for _ in 0..5 {
            assert!(!tick(&mut w, &TickInput::default()));
        }
        let after: Vec<Vec2> = w.entities.iter().map(|e| e.pos).collect();
        assert_eq!(before, after);
        assert_eq!(w.time_ticks, ticks);
    }

    #[test]
    fn test_paused_world_does_not_advance() {
        let mut w = world();
        w.spawn(EntityKind::Autonomous, &enemy_at(100.0, 100.0, (1.0, 0.0), 10.0));
        w.toggle_pause();
        assert!(!tick(&mut w, &TickInput::default()));
        assert_eq!(w.entities[0].pos, Vec2::new(100.0, 100.0));

        w.toggle_pause();
        assert!(tick(&mut w, &TickInput::default()));
        assert_eq!(w.entities[0].pos, Vec2::new(101.0, 100.0));
    }

    #[test]
    fn test_won_world_does_not_advance() {
        let mut w = world();
        w.spawn(EntityKind::Autonomous, &enemy_at(100.0, 100.0, (1.0, 0.0), 10.0));
        w.status = Status::Won;
        assert!(!tick(&mut w, &TickInput::default()));
        assert_eq!(w.entities[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(w.status, Status::Won);
        assert_eq!(w.time_ticks, 0);
    }

    #[test]
    fn test_nothing_live_keeps_previous_collection() {
        let mut w = world();
        w.spawn(EntityKind::Autonomous, &enemy_at(100.0, 100.0, (0.0, 0.0), 10.0));
        w.spawn(EntityKind::Controlled, &player_at(110.0, 100.0, 100.0));
        w.entities[0].set_health(1.0);
        tick(&mut w, &TickInput::default());
        // Remove the player by hand; only the flagged enemy remains
        w.entities.retain(|e| e.kind() == EntityKind::Autonomous);
        assert!(w.entities[0].is_marked_for_removal());

        tick(&mut w, &TickInput::default());
        assert_eq!(w.entities.len(), 1);
    }

    #[test]
    fn test_player_moves_with_input() {
        let mut w = world();
        let id = w.spawn(EntityKind::Controlled, &player_at(500.0, 500.0, 100.0));
        let input = TickInput {
            directions: Directions {
                left: true,
                ..Default::default()
            },
        };
        tick(&mut w, &input);
        tick(&mut w, &input);
        assert_eq!(w.get(id).unwrap().pos, Vec2::new(480.0, 500.0));
    }
}
