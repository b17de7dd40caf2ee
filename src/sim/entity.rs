//! Circular actors: shared state plus per-variant motion and damage rules
//!
//! Two variants share one state struct and differ only in how they move
//! ([`Entity::step_motion`]) and how they take damage ([`Entity::damage_by`]).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::Velocity;
use super::state::Arena;
use crate::consts::*;

/// Which behavior an entity follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Bounces around the arena on its own, removed when its health hits zero
    Autonomous,
    /// Steered by held directional keys, clamped to the arena, never self-removes
    Controlled,
}

/// Damage gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityState {
    #[default]
    Normal,
    /// Ignores all incoming damage until the countdown runs out
    Invincible,
}

/// Base color: RGB in 0-255, alpha in 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string (`rgba(r,g,b,a)`)
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }

    /// Normalized `[r, g, b, a]` for vertex colors
    pub fn to_f32(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a,
        ]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Directional input flags for a Controlled entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Directions {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

/// Explicit constructor input. Every field is optional; see [`Entity::new`]
/// for the fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub radius: Option<f32>,
    pub mass: Option<f32>,
    pub health: Option<f32>,
    pub max_health: Option<f32>,
    pub speed: Option<f32>,
    /// Initial direction pair (effective velocity is `speed * dir`)
    pub dir: Option<(f32, f32)>,
    pub damage: Option<f32>,
    pub bounded: Option<bool>,
    pub invincible_ms: Option<f32>,
    pub color: Option<Rgba>,
}

/// What an attacker contributes to a damage event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attacker {
    pub kind: EntityKind,
    pub damage: f32,
}

/// A circular actor
#[derive(Debug, Clone)]
pub struct Entity {
    id: u32,
    kind: EntityKind,
    pub pos: Vec2,
    radius: f32,
    pub velocity: Velocity,
    health: f32,
    max_health: f32,
    damage: f32,
    state: EntityState,
    invincible_duration_ms: f32,
    invincible_remaining_ms: f32,
    mass: f32,
    bounded: bool,
    marked_for_removal: bool,
    color: Rgba,
}

/// Positive, finite config value or the fallback
fn positive_or(name: &str, value: Option<f32>, fallback: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        Some(v) => {
            log::warn!("Entity {} = {} is not positive, using {}", name, v, fallback);
            fallback
        }
        None => fallback,
    }
}

impl Entity {
    /// Create an entity from a config.
    ///
    /// Never fails: non-positive `radius`, `mass`, `max_health`, `health` and
    /// `speed` fall back to defaults, health defaults to (and is clamped to)
    /// `max_health`, and negative damage or invincibility time become zero.
    pub fn new(id: u32, kind: EntityKind, config: &EntityConfig) -> Self {
        let radius = positive_or("radius", config.radius, DEFAULT_RADIUS);
        let mass = positive_or("mass", config.mass, DEFAULT_MASS);
        let max_health = positive_or("max_health", config.max_health, DEFAULT_MAX_HEALTH);
        let health = positive_or("health", config.health, max_health).min(max_health);
        let speed = positive_or("speed", config.speed, DEFAULT_SPEED);
        let (dx, dy) = config.dir.unwrap_or((0.0, 0.0));
        let velocity = Velocity::new(speed, Vec2::new(dx, dy)).unwrap_or_default();

        Self {
            id,
            kind,
            pos: Vec2::new(config.x.unwrap_or(0.0), config.y.unwrap_or(0.0)),
            radius,
            velocity,
            health,
            max_health,
            damage: config.damage.unwrap_or(0.0).max(0.0),
            state: EntityState::Normal,
            invincible_duration_ms: config.invincible_ms.unwrap_or(0.0).max(0.0),
            invincible_remaining_ms: 0.0,
            mass,
            bounded: config.bounded.unwrap_or(true),
            marked_for_removal: false,
            color: config.color.unwrap_or_default(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn bounded(&self) -> bool {
        self.bounded
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    pub fn is_invincible(&self) -> bool {
        self.state == EntityState::Invincible
    }

    pub fn invincible_duration_ms(&self) -> f32 {
        self.invincible_duration_ms
    }

    pub fn invincible_remaining_ms(&self) -> f32 {
        self.invincible_remaining_ms
    }

    pub fn is_marked_for_removal(&self) -> bool {
        self.marked_for_removal
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Write health, clamped to `[0, max_health]`
    pub fn set_health(&mut self, value: f32) {
        self.health = value.clamp(0.0, self.max_health);
    }

    /// Snapshot of what this entity inflicts on others
    pub fn as_attacker(&self) -> Attacker {
        Attacker {
            kind: self.kind,
            damage: self.damage,
        }
    }

    /// Enter the invincible state with a full countdown
    fn make_invincible(&mut self) {
        self.state = EntityState::Invincible;
        self.invincible_remaining_ms = self.invincible_duration_ms;
    }

    /// Apply incoming damage. Returns true if any damage landed.
    ///
    /// Invincible entities ignore every hit. Autonomous entities additionally
    /// ignore Autonomous attackers and flag themselves for removal when their
    /// health reaches zero.
    pub fn damage_by(&mut self, attacker: Attacker) -> bool {
        if self.is_invincible() {
            return false;
        }
        if self.kind == EntityKind::Autonomous && attacker.kind == EntityKind::Autonomous {
            return false;
        }

        self.set_health(self.health - attacker.damage);
        self.make_invincible();

        if self.kind == EntityKind::Autonomous && self.health == 0.0 {
            self.marked_for_removal = true;
            log::debug!("Entity {} marked for removal", self.id);
        }
        true
    }

    /// Count the invincibility timer down by one tick
    pub fn decay_invincibility(&mut self, tick_ms: f32) {
        if self.state != EntityState::Invincible {
            return;
        }
        self.invincible_remaining_ms -= tick_ms;
        if self.invincible_remaining_ms <= 0.0 {
            self.state = EntityState::Normal;
            self.invincible_remaining_ms = 0.0;
        }
    }

    /// Advance position for one tick according to this entity's motion policy
    pub fn step_motion(&mut self, input: Directions, arena: &Arena) {
        match self.kind {
            EntityKind::Autonomous => self.bounce_step(arena),
            EntityKind::Controlled => self.steer_step(input, arena),
        }
    }

    /// Move by velocity; reflect off any wall that was crossed
    fn bounce_step(&mut self, arena: &Arena) {
        self.pos += self.velocity.get();

        let r = self.radius;
        if self.pos.x < r {
            self.pos.x = r;
            self.velocity.set_x(-self.velocity.x());
        }
        if self.pos.x > arena.width - r {
            self.pos.x = arena.width - r;
            self.velocity.set_x(-self.velocity.x());
        }
        if self.pos.y < r {
            self.pos.y = r;
            self.velocity.set_y(-self.velocity.y());
        }
        if self.pos.y > arena.height - r {
            self.pos.y = arena.height - r;
            self.velocity.set_y(-self.velocity.y());
        }
    }

    /// Velocity comes only from input. Opposing keys resolve to the later
    /// check (down beats up, left beats right) and diagonals are not
    /// renormalized.
    fn steer_step(&mut self, input: Directions, arena: &Arena) {
        let speed = self.velocity.speed();
        self.velocity.stop();
        if input.up {
            self.velocity.set_y(-speed);
        }
        if input.right {
            self.velocity.set_x(speed);
        }
        if input.down {
            self.velocity.set_y(speed);
        }
        if input.left {
            self.velocity.set_x(-speed);
        }

        self.pos += self.velocity.get();

        let r = self.radius;
        self.pos.x = self.pos.x.max(r).min(arena.width - r);
        self.pos.y = self.pos.y.max(r).min(arena.height - r);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Arena {
        Arena::new(200.0, 100.0)
    }

    fn enemy(damage: f32) -> Entity {
        Entity::new(
            1,
            EntityKind::Autonomous,
            &EntityConfig {
                x: Some(50.0),
                y: Some(50.0),
                radius: Some(10.0),
                speed: Some(2.0),
                dir: Some((1.0, 0.0)),
                health: Some(100.0),
                damage: Some(damage),
                invincible_ms: Some(500.0),
                ..Default::default()
            },
        )
    }

    fn player() -> Entity {
        Entity::new(
            2,
            EntityKind::Controlled,
            &EntityConfig {
                x: Some(100.0),
                y: Some(50.0),
                radius: Some(20.0),
                speed: Some(10.0),
                health: Some(100.0),
                bounded: Some(false),
                invincible_ms: Some(2000.0),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_config_fallbacks() {
        let e = Entity::new(
            0,
            EntityKind::Autonomous,
            &EntityConfig {
                radius: Some(-1.0),
                mass: Some(0.0),
                max_health: Some(-5.0),
                health: Some(0.0),
                speed: Some(0.0),
                damage: Some(-3.0),
                invincible_ms: Some(-10.0),
                ..Default::default()
            },
        );
        assert_eq!(e.radius(), DEFAULT_RADIUS);
        assert_eq!(e.mass(), DEFAULT_MASS);
        assert_eq!(e.max_health(), DEFAULT_MAX_HEALTH);
        assert_eq!(e.health(), DEFAULT_MAX_HEALTH);
        assert_eq!(e.velocity.speed(), DEFAULT_SPEED);
        assert_eq!(e.damage(), 0.0);
        assert_eq!(e.invincible_duration_ms(), 0.0);
        assert!(e.bounded());
    }

    #[test]
    fn test_health_above_max_is_clamped() {
        let e = Entity::new(
            0,
            EntityKind::Controlled,
            &EntityConfig {
                max_health: Some(50.0),
                health: Some(80.0),
                ..Default::default()
            },
        );
        assert_eq!(e.health(), 50.0);
    }

    #[test]
    fn test_damage_then_invincible() {
        let mut p = player();
        assert!(p.damage_by(enemy(30.0).as_attacker()));
        assert_eq!(p.health(), 70.0);
        assert_eq!(p.state(), EntityState::Invincible);
        assert_eq!(p.invincible_remaining_ms(), 2000.0);

        // Second hit is ignored while invincible
        assert!(!p.damage_by(enemy(30.0).as_attacker()));
        assert_eq!(p.health(), 70.0);
    }

    #[test]
    fn test_no_friendly_fire() {
        let mut a = enemy(50.0);
        let b = enemy(50.0);
        assert!(!a.damage_by(b.as_attacker()));
        assert_eq!(a.health(), 100.0);
        assert_eq!(a.state(), EntityState::Normal);
    }

    #[test]
    fn test_enemy_marked_on_zero_health() {
        let mut e = enemy(10.0);
        let mut killer = player();
        killer.damage = 150.0;
        e.damage_by(killer.as_attacker());
        assert_eq!(e.health(), 0.0);
        assert!(e.is_marked_for_removal());
    }

    #[test]
    fn test_player_never_self_removes() {
        let mut p = player();
        p.damage_by(Attacker {
            kind: EntityKind::Autonomous,
            damage: 500.0,
        });
        assert_eq!(p.health(), 0.0);
        assert!(!p.is_marked_for_removal());
    }

    #[test]
    fn test_invincibility_decay() {
        let mut e = enemy(10.0);
        e.damage_by(Attacker {
            kind: EntityKind::Controlled,
            damage: 1.0,
        });
        for _ in 0..49 {
            e.decay_invincibility(TICK_MS);
        }
        assert!(e.is_invincible());
        e.decay_invincibility(TICK_MS);
        assert_eq!(e.state(), EntityState::Normal);

        // Decay is a no-op in the normal state
        e.decay_invincibility(TICK_MS);
        assert_eq!(e.state(), EntityState::Normal);
    }

    #[test]
    fn test_bounce_off_right_wall() {
        let mut e = enemy(10.0);
        e.pos = Vec2::new(189.0, 50.0);
        e.step_motion(Directions::default(), &arena());
        assert_eq!(e.pos.x, 190.0);
        assert!((e.velocity.x() - -2.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_off_top_wall() {
        let mut e = enemy(10.0);
        e.velocity = Velocity::new(2.0, Vec2::new(0.0, -1.0)).unwrap();
        e.pos = Vec2::new(50.0, 11.0);
        e.step_motion(Directions::default(), &arena());
        assert_eq!(e.pos.y, 10.0);
        assert!((e.velocity.y() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_controlled_diagonal_not_renormalized() {
        let mut p = player();
        p.step_motion(
            Directions {
                up: true,
                right: true,
                ..Default::default()
            },
            &Arena::new(1000.0, 1000.0),
        );
        assert_eq!(p.pos, Vec2::new(110.0, 40.0));
        assert_eq!(p.velocity.get(), Vec2::new(10.0, -10.0));
    }

    #[test]
    fn test_controlled_opposing_keys() {
        let mut p = player();
        let start = p.pos;
        p.step_motion(
            Directions {
                up: true,
                right: true,
                down: true,
                left: true,
            },
            &Arena::new(1000.0, 1000.0),
        );
        assert_eq!(p.pos, start + Vec2::new(-10.0, 10.0));
    }

    #[test]
    fn test_controlled_clamped_not_bounced() {
        let mut p = player();
        p.pos = Vec2::new(25.0, 50.0);
        p.step_motion(
            Directions {
                left: true,
                ..Default::default()
            },
            &arena(),
        );
        assert_eq!(p.pos.x, 20.0);
        // Velocity still points left: clamping does not reflect
        assert!(p.velocity.x() < 0.0);

        // No input means no motion
        p.step_motion(Directions::default(), &arena());
        assert_eq!(p.pos.x, 20.0);
        assert_eq!(p.velocity.get(), Vec2::ZERO);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(Rgba::rgba(255, 0, 0, 0.5).css(), "rgba(255,0,0,0.5)");
        assert_eq!(Rgba::rgb(0, 255, 0).css(), "rgba(0,255,0,1)");
    }
}
