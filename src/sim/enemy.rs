//! Hostile ships
//!
//! Four kinds share one record. `EnemyKind::stats` is the per-kind tuning
//! table and `Tactic` carries the per-kind movement/attack timers.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::playfield::Playfield;
use super::shapes::Triangle;
use crate::consts::{ENEMY_MARGIN, REFERENCE_FPS};
use crate::{angle_toward, approach_angle, heading, rotate_point};

/// Fast enemies re-aim this often (s)
pub const FAST_STEER_PERIOD: f32 = 5.0;
/// ...and steer for this long each time (s)
pub const FAST_STEER_WINDOW: f32 = 2.0;
/// Rotation blend per reference frame while a fast enemy steers
pub const FAST_STEER_BLEND: f32 = 0.05;

/// Quiet time between strong enemy volleys (s)
pub const VOLLEY_COOLDOWN: f32 = 5.0;
/// Length of a strong enemy volley (s)
pub const VOLLEY_WINDOW: f32 = 2.0;
/// Gap between bullet pairs inside a volley (s)
pub const VOLLEY_SHOT_INTERVAL: f32 = 0.5;

/// Boss fire interval (s)
pub const BOSS_FIRE_INTERVAL: f32 = 1.5;

/// Spawn distance past the playfield edge
const SPAWN_OFFSET: (f32, f32) = (50.0, 100.0);
/// Left/right spawners keep this far from the top and bottom
const SPAWN_INSET: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Strong,
    Boss,
}

/// Per-kind tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub points: u32,
    pub health: i32,
    /// px/s
    pub speed: f32,
    pub damage: i32,
    /// Sprite size at reference resolution
    pub size: (f32, f32),
}

impl EnemyKind {
    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Basic => EnemyStats {
                points: 20,
                health: 50,
                speed: 2.0 * REFERENCE_FPS,
                damage: 10,
                size: (57.0, 58.0),
            },
            EnemyKind::Fast => EnemyStats {
                points: 20,
                health: 30,
                speed: 4.0 * REFERENCE_FPS,
                damage: 20,
                size: (77.0, 84.0),
            },
            EnemyKind::Strong => EnemyStats {
                points: 50,
                health: 150,
                speed: REFERENCE_FPS,
                damage: 30,
                size: (129.0, 86.0),
            },
            EnemyKind::Boss => EnemyStats {
                points: 1000,
                health: 1000,
                speed: REFERENCE_FPS,
                damage: 40,
                size: (224.0, 156.0),
            },
        }
    }

    pub fn is_boss(self) -> bool {
        self == EnemyKind::Boss
    }
}

/// Per-kind behavior state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Tactic {
    /// Fixed horizontal heading, never fires
    Drift,
    /// Periodically steers toward the player, then coasts
    Intercept { until_steer: f32, steering: f32 },
    /// Always faces the player; fires paired shots in timed volleys
    Volley {
        cooldown: f32,
        window: f32,
        next_shot: f32,
    },
    /// Patrols horizontally; fires homing or energy bullets on an interval
    Barrage { cooldown: f32 },
}

impl Tactic {
    fn for_kind(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Basic => Tactic::Drift,
            EnemyKind::Fast => Tactic::Intercept {
                until_steer: 0.0,
                steering: 0.0,
            },
            EnemyKind::Strong => Tactic::Volley {
                cooldown: 0.0,
                window: 0.0,
                next_shot: 0.0,
            },
            EnemyKind::Boss => Tactic::Barrage { cooldown: 0.0 },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Center of the sprite box
    pub pos: Vec2,
    pub size: Vec2,
    /// Degrees
    pub rotation: f32,
    pub health: i32,
    pub speed: f32,
    pub damage: i32,
    pub points: u32,
    /// Contact latch: set while touching the player
    pub in_contact: bool,
    pub destroyed: bool,
    /// Removed for leaving the playfield (no score, no loot)
    pub out_of_range: bool,
    pub tactic: Tactic,
}

/// Uniform sample from [lo, hi), or `lo` when the range is empty
fn between(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, rotation: f32, field: &Playfield) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            pos,
            size: field.scale(stats.size.0, stats.size.1),
            rotation,
            health: stats.health,
            speed: stats.speed,
            damage: stats.damage,
            points: stats.points,
            in_contact: false,
            destroyed: false,
            out_of_range: false,
            tactic: Tactic::for_kind(kind),
        }
    }

    /// Spawn just outside the playfield on a side allowed for `kind`
    pub fn spawn(kind: EnemyKind, field: &Playfield, rng: &mut impl Rng) -> Self {
        let (w, h) = (field.width, field.height);
        let offset = between(rng, SPAWN_OFFSET.0, SPAWN_OFFSET.1);

        let (pos, rotation) = match kind {
            EnemyKind::Basic | EnemyKind::Boss => {
                let y_max = if kind.is_boss() { h } else { h - SPAWN_INSET };
                let y = between(rng, SPAWN_INSET, y_max);
                if rng.random_bool(0.5) {
                    (Vec2::new(-offset, y), 90.0)
                } else {
                    (Vec2::new(w + offset, y), 270.0)
                }
            }
            EnemyKind::Fast | EnemyKind::Strong => {
                let pos = match rng.random_range(0..4) {
                    0 => Vec2::new(-offset, between(rng, 0.0, h)),
                    1 => Vec2::new(w + offset, between(rng, 0.0, h)),
                    2 => Vec2::new(between(rng, 0.0, w), -offset),
                    _ => Vec2::new(between(rng, 0.0, w), h + offset),
                };
                (pos, angle_toward(pos, field.center()))
            }
        };

        log::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, pos.x, pos.y);
        Self::new(kind, pos, rotation, field)
    }

    pub fn triangle(&self) -> Triangle {
        Triangle::ship(self.pos, self.size, self.rotation)
    }

    /// Destroyed by combat rather than by leaving the playfield
    pub fn awards_score(&self) -> bool {
        self.destroyed && !self.out_of_range
    }

    pub fn take_damage(&mut self, amount: i32) {
        if self.destroyed {
            return;
        }
        self.health = (self.health - amount).max(0);
        if self.health == 0 {
            self.destroyed = true;
        }
    }

    /// Remove without score or loot
    pub fn force_out_of_range(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.out_of_range = true;
        }
    }

    /// Per-frame movement
    pub fn steer(&mut self, dt: f32, player_pos: Vec2) {
        let step = self.speed * dt;

        match &mut self.tactic {
            Tactic::Drift | Tactic::Barrage { .. } => {
                self.pos.x += heading(self.rotation).x * step;
            }
            Tactic::Intercept {
                until_steer,
                steering,
            } => {
                *until_steer -= dt;
                if *until_steer <= 0.0 {
                    *until_steer = FAST_STEER_PERIOD;
                    *steering = FAST_STEER_WINDOW;
                }
                if *steering > 0.0 {
                    let t = (FAST_STEER_BLEND * dt * REFERENCE_FPS).clamp(0.0, 1.0);
                    self.rotation =
                        approach_angle(self.rotation, angle_toward(self.pos, player_pos), t);
                    *steering -= dt;
                }
                self.pos += heading(self.rotation) * step;
            }
            Tactic::Volley { .. } => {
                self.rotation = angle_toward(self.pos, player_pos);
                self.pos += heading(self.rotation) * step;
            }
        }
    }

    /// Muzzle position for an offset in the unrotated sprite box
    fn muzzle(&self, offset: Vec2) -> Vec2 {
        rotate_point(self.pos + offset, self.pos, self.rotation)
    }

    /// Per-frame attack; new bullets are pushed onto `bullets`.
    ///
    /// Returns true if anything was fired this frame.
    pub fn attack(
        &mut self,
        dt: f32,
        player_pos: Vec2,
        field: &Playfield,
        rng: &mut impl Rng,
        bullets: &mut Vec<Bullet>,
    ) -> bool {
        let half = self.size / 2.0;

        match self.tactic {
            Tactic::Drift | Tactic::Intercept { .. } => false,
            Tactic::Volley {
                mut cooldown,
                mut window,
                mut next_shot,
            } => {
                let mut fired = false;
                if window > 0.0 {
                    window -= dt;
                    next_shot -= dt;
                    if next_shot <= 0.0 {
                        for side in [-1.0, 1.0] {
                            let muzzle = self.muzzle(Vec2::new(side * self.size.x / 3.0, -half.y));
                            bullets.push(Bullet::strong(muzzle, self.rotation, self.damage, field));
                        }
                        next_shot += VOLLEY_SHOT_INTERVAL;
                        fired = true;
                    }
                    if window <= 0.0 {
                        cooldown = VOLLEY_COOLDOWN;
                    }
                } else {
                    cooldown -= dt;
                    if cooldown <= 0.0 {
                        window = VOLLEY_WINDOW;
                        next_shot = VOLLEY_SHOT_INTERVAL;
                    }
                }
                self.tactic = Tactic::Volley {
                    cooldown,
                    window,
                    next_shot,
                };
                fired
            }
            Tactic::Barrage { cooldown } => {
                let cooldown = cooldown - dt;
                if cooldown > 0.0 {
                    self.tactic = Tactic::Barrage { cooldown };
                    return false;
                }

                let muzzle = self.muzzle(Vec2::new(0.0, -half.y));
                let bullet = if rng.random_bool(0.5) {
                    Bullet::homing(muzzle, self.rotation, self.damage, field)
                } else {
                    Bullet::energy(muzzle, self.rotation, self.damage, player_pos, field)
                };
                bullets.push(bullet);
                self.tactic = Tactic::Barrage {
                    cooldown: BOSS_FIRE_INTERVAL,
                };
                true
            }
        }
    }

    /// Out-of-range handling: the boss turns back, everything else is removed
    pub fn check_range(&mut self, field: &Playfield, rng: &mut impl Rng) {
        if self.destroyed || field.contains(self.pos, ENEMY_MARGIN) {
            return;
        }

        if self.kind.is_boss() {
            if self.pos.x < -ENEMY_MARGIN {
                self.rotation = 90.0;
                self.pos.x = -ENEMY_MARGIN;
            } else if self.pos.x > field.width + ENEMY_MARGIN {
                self.rotation = 270.0;
                self.pos.x = field.width + ENEMY_MARGIN;
            }
            self.pos.y = between(rng, SPAWN_INSET, field.height - SPAWN_INSET);
        } else {
            self.force_out_of_range();
        }
    }
}
