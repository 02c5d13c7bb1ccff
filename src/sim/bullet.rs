//! Projectiles
//!
//! Every bullet shares one data record; `Guidance` carries the per-kind
//! movement state and decides how `update` steers it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::intersect::circle_touches_segment;
use super::playfield::Playfield;
use super::shapes::Rect;
use crate::consts::{BULLET_MARGIN, REFERENCE_FPS};
use crate::{heading, heading_angle};

/// Player bullet speed (px/s)
pub const PLAYER_BULLET_SPEED: f32 = 5.0 * REFERENCE_FPS;
/// Strong enemy bullet speed (px/s)
pub const STRONG_BULLET_SPEED: f32 = 5.0 * REFERENCE_FPS;
/// Boss homing bullet speed (px/s)
pub const HOMING_BULLET_SPEED: f32 = 6.0 * REFERENCE_FPS;
/// Boss energy bullet speed (px/s)
pub const ENERGY_BULLET_SPEED: f32 = 4.0 * REFERENCE_FPS;

/// Straight run before homing bullets start steering
pub const HOMING_RUN: f32 = 100.0;
/// Homing bullets stop tracking once this close to the target
pub const HOMING_STOP_DISTANCE: f32 = 100.0;
/// Direction blend per reference frame while steering
pub const STEER_BLEND: f32 = 0.05;
/// Lower bound for the distance-scaled homing blend
pub const MIN_STEER_BLEND: f32 = 0.01;

/// Energy bullets detonate within this distance of their target point
pub const DETONATION_RADIUS: f32 = 10.0;
/// Blast animation: 10 frames of 0.1 s
pub const BLAST_DURATION: f32 = 1.0;
/// Side of the fixed square used for blast damage
pub const BLAST_SIZE: f32 = 128.0;

/// Bullet sprite size at reference resolution
const BULLET_REFERENCE_SIZE: (f32, f32) = (121.0, 126.0);

/// Which weapon produced the bullet (also the renderer's sprite key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletKind {
    Player,
    Strong,
    Homing,
    Energy,
}

/// Per-kind movement state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Guidance {
    /// Constant direction
    Straight,
    /// Runs straight, then steers toward the live target until close
    Homing { traveled: f32, tracking: bool },
    /// Runs straight, then steers toward a fixed point and detonates there.
    /// `blast` is the elapsed blast animation time once detonated.
    Energy {
        traveled: f32,
        target: Vec2,
        blast: Option<f32>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub kind: BulletKind,
    pub pos: Vec2,
    /// Travel direction, scaled by speed each frame. Steering blends it
    /// without re-normalizing, so a bullet slows while it turns.
    pub dir: Vec2,
    /// Sprite rotation (degrees)
    pub rotation: f32,
    pub speed: f32,
    pub damage: i32,
    /// Sprite size; collision radius is a tenth of the width
    pub size: Vec2,
    pub destroyed: bool,
    pub guidance: Guidance,
}

impl Bullet {
    fn launch(
        kind: BulletKind,
        guidance: Guidance,
        pos: Vec2,
        rotation: f32,
        speed: f32,
        damage: i32,
        field: &Playfield,
    ) -> Self {
        let (w, h) = BULLET_REFERENCE_SIZE;
        Self {
            kind,
            pos,
            dir: heading(rotation),
            rotation,
            speed,
            damage,
            size: field.scale(w, h),
            destroyed: false,
            guidance,
        }
    }

    pub fn player(pos: Vec2, rotation: f32, damage: i32, field: &Playfield) -> Self {
        Self::launch(
            BulletKind::Player,
            Guidance::Straight,
            pos,
            rotation,
            PLAYER_BULLET_SPEED,
            damage,
            field,
        )
    }

    pub fn strong(pos: Vec2, rotation: f32, damage: i32, field: &Playfield) -> Self {
        Self::launch(
            BulletKind::Strong,
            Guidance::Straight,
            pos,
            rotation,
            STRONG_BULLET_SPEED,
            damage,
            field,
        )
    }

    pub fn homing(pos: Vec2, rotation: f32, damage: i32, field: &Playfield) -> Self {
        Self::launch(
            BulletKind::Homing,
            Guidance::Homing {
                traveled: 0.0,
                tracking: true,
            },
            pos,
            rotation,
            HOMING_BULLET_SPEED,
            damage,
            field,
        )
    }

    /// Energy bullet aimed at `target`, captured now and never updated
    pub fn energy(pos: Vec2, rotation: f32, damage: i32, target: Vec2, field: &Playfield) -> Self {
        Self::launch(
            BulletKind::Energy,
            Guidance::Energy {
                traveled: 0.0,
                target,
                blast: None,
            },
            pos,
            rotation,
            ENERGY_BULLET_SPEED,
            damage,
            field,
        )
    }

    /// Collision radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.x / 10.0
    }

    /// Mark destroyed after striking something
    pub fn hit(&mut self) {
        self.destroyed = true;
    }

    pub fn has_exploded(&self) -> bool {
        matches!(self.guidance, Guidance::Energy { blast: Some(_), .. })
    }

    /// Elapsed blast time, if detonated
    pub fn blast_elapsed(&self) -> Option<f32> {
        match self.guidance {
            Guidance::Energy { blast, .. } => blast,
            _ => None,
        }
    }

    /// The fixed damage square around the energy target, once detonated
    pub fn blast_rect(&self) -> Option<Rect> {
        match self.guidance {
            Guidance::Energy {
                target,
                blast: Some(_),
                ..
            } => Some(Rect::from_center(target, Vec2::splat(BLAST_SIZE))),
            _ => None,
        }
    }

    /// Ready to be pruned: hit, out of bounds, or blast animation done
    pub fn is_spent(&self) -> bool {
        self.destroyed || self.blast_elapsed().is_some_and(|t| t >= BLAST_DURATION)
    }

    /// Advance one frame. `target` is the live player position.
    ///
    /// Returns true on the frame an energy bullet detonates.
    pub fn update(&mut self, dt: f32, target: Vec2, field: &Playfield) -> bool {
        if self.destroyed {
            return false;
        }

        let step = self.speed * dt;
        let blend = (STEER_BLEND * dt * REFERENCE_FPS).clamp(0.0, 1.0);

        match &mut self.guidance {
            Guidance::Straight => {}
            Guidance::Homing { traveled, tracking } => {
                if *traveled < HOMING_RUN {
                    *traveled += step;
                } else if *tracking {
                    let distance = self.pos.distance(target);
                    if distance > HOMING_STOP_DISTANCE {
                        // Blend eases off as the target gets close
                        let scaled = (STEER_BLEND * (distance / HOMING_STOP_DISTANCE))
                            .clamp(MIN_STEER_BLEND, STEER_BLEND);
                        let t = (scaled * dt * REFERENCE_FPS).clamp(0.0, 1.0);
                        let to_target = (target - self.pos).normalize_or_zero();
                        self.dir = self.dir.lerp(to_target, t);
                        self.rotation = heading_angle(self.dir);
                    } else {
                        *tracking = false;
                    }
                }
            }
            Guidance::Energy {
                traveled,
                target: aim,
                blast,
            } => {
                if let Some(elapsed) = blast {
                    *elapsed += dt;
                    return false;
                }

                if *traveled < HOMING_RUN {
                    *traveled += step;
                } else {
                    let to_target = (*aim - self.pos).normalize_or_zero();
                    self.dir = self.dir.lerp(to_target, blend);
                    self.rotation = heading_angle(self.dir);
                }

                let from = self.pos;
                self.pos += self.dir * step;

                // Swept test so large frame steps cannot skip past the target
                let arrived = self.pos.distance(*aim) < DETONATION_RADIUS
                    || circle_touches_segment(*aim, DETONATION_RADIUS, from, self.pos);
                if arrived {
                    *blast = Some(0.0);
                    return true;
                }

                self.check_bounds(field);
                return false;
            }
        }

        self.pos += self.dir * step;
        self.check_bounds(field);
        false
    }

    fn check_bounds(&mut self, field: &Playfield) {
        if !field.contains(self.pos, BULLET_MARGIN) {
            self.destroyed = true;
        }
    }
}
