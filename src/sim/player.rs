//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::playfield::Playfield;
use super::shapes::Triangle;
use crate::consts::REFERENCE_FPS;
use crate::{heading, rotate_point};

pub const MAX_HEALTH: i32 = 100;
pub const MAX_SHIELD: i32 = 100;
/// Base thrust speed (px/s)
pub const BASE_SPEED: f32 = 3.0 * REFERENCE_FPS;
/// Turn rate (deg/s)
pub const ROTATION_SPEED: f32 = 3.0 * REFERENCE_FPS;
pub const BASE_DAMAGE: i32 = 10;
/// Minimum time between shots (s)
pub const SHOT_COOLDOWN: f32 = 0.2;
/// Cooldown remainder treated as elapsed (s)
const COOLDOWN_SLACK: f32 = 1e-4;

/// Speed added while the speed boost runs
pub const SPEED_BOOST: f32 = 2.0 * REFERENCE_FPS;
/// Speed never drops below this when a boost is reverted
pub const MIN_SPEED: f32 = REFERENCE_FPS;
/// Damage added while the damage boost runs
pub const DAMAGE_BOOST: i32 = 10;
/// Damage never drops below this when a boost is reverted
pub const MIN_DAMAGE: i32 = 10;

const PLAYER_REFERENCE_SIZE: (f32, f32) = (77.0, 70.0);

/// Latch transition reported by `PowerUp::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Expired,
}

/// A countdown with an "active" latch.
///
/// The latch flips on the first frame the timer is positive and back off on
/// the first frame it is zero, so each buff is applied and reverted once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub remaining: f32,
    pub active: bool,
}

impl PowerUp {
    /// Add time; pickups stack
    pub fn extend(&mut self, seconds: f32) {
        self.remaining += seconds.max(0.0);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn advance(&mut self, dt: f32) -> Option<Transition> {
        if self.remaining > 0.0 {
            let started = !self.active;
            self.active = true;
            self.remaining = (self.remaining - dt).max(0.0);
            started.then_some(Transition::Started)
        } else if self.active {
            self.active = false;
            Some(Transition::Expired)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center of the sprite box
    pub pos: Vec2,
    pub size: Vec2,
    /// Degrees
    pub rotation: f32,
    pub health: i32,
    pub shield: i32,
    /// px/s
    pub speed: f32,
    pub damage: i32,
    /// deg/s
    pub rotation_speed: f32,
    /// True while touching any enemy this frame
    pub in_contact: bool,
    /// Time left before the next shot is allowed
    pub shot_cooldown: f32,
    pub speed_boost: PowerUp,
    pub damage_boost: PowerUp,
    pub double_fire: PowerUp,
    pub invisibility: PowerUp,
    pub bullets: Vec<Bullet>,
}

impl Player {
    /// Fresh ship at the center of the playfield
    pub fn new(field: &Playfield) -> Self {
        let (w, h) = PLAYER_REFERENCE_SIZE;
        Self {
            pos: field.center(),
            size: field.scale(w, h),
            rotation: 0.0,
            health: MAX_HEALTH,
            shield: 0,
            speed: BASE_SPEED,
            damage: BASE_DAMAGE,
            rotation_speed: ROTATION_SPEED,
            in_contact: false,
            shot_cooldown: 0.0,
            speed_boost: PowerUp::default(),
            damage_boost: PowerUp::default(),
            double_fire: PowerUp::default(),
            invisibility: PowerUp::default(),
            bullets: Vec::new(),
        }
    }

    pub fn triangle(&self) -> Triangle {
        Triangle::ship(self.pos, self.size, self.rotation)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_invisible(&self) -> bool {
        self.invisibility.is_running()
    }

    pub fn is_double_fire(&self) -> bool {
        self.double_fire.is_running()
    }

    /// Turn and thrust. `turn` and `throttle` are axes in [-1, 1]
    /// (negative turn is counterclockwise, negative throttle reverses).
    pub fn steer(&mut self, turn: f32, throttle: f32, dt: f32, field: &Playfield) {
        self.rotation += turn.clamp(-1.0, 1.0) * self.rotation_speed * dt;

        let throttle = throttle.clamp(-1.0, 1.0);
        if throttle != 0.0 {
            self.pos += heading(self.rotation) * self.speed * throttle * dt;
            self.pos = field.clamp(self.pos);
        }
    }

    /// Fire if the trigger is held and the cooldown has run out.
    ///
    /// Returns the number of bullets launched (0, 1 or 2).
    pub fn shoot(&mut self, trigger: bool, dt: f32, field: &Playfield) -> usize {
        if self.shot_cooldown > 0.0 {
            self.shot_cooldown -= dt;
            // Float drift must not hold the gun for an extra frame
            if self.shot_cooldown < COOLDOWN_SLACK {
                self.shot_cooldown = 0.0;
            }
            return 0;
        }
        if !trigger {
            return 0;
        }

        self.shot_cooldown = SHOT_COOLDOWN;
        let half = self.size / 2.0;
        let offsets = if self.is_double_fire() {
            vec![-self.size.x / 3.0, self.size.x / 3.0]
        } else {
            vec![0.0]
        };

        for &dx in &offsets {
            let muzzle = rotate_point(
                self.pos + Vec2::new(dx, -half.y),
                self.pos,
                self.rotation,
            );
            self.bullets
                .push(Bullet::player(muzzle, self.rotation, self.damage, field));
        }
        offsets.len()
    }

    /// Shield absorbs first, the remainder comes off health
    pub fn take_damage(&mut self, amount: i32) {
        let amount = amount.max(0);
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        self.health = (self.health - (amount - absorbed)).max(0);
    }

    pub fn increase_health(&mut self, amount: i32) {
        self.health = (self.health + amount).clamp(0, MAX_HEALTH);
    }

    pub fn increase_shield(&mut self, amount: i32) {
        self.shield = (self.shield + amount).clamp(0, MAX_SHIELD);
    }

    pub fn increase_speed(&mut self, amount: f32) {
        self.speed += amount;
    }

    pub fn increase_damage(&mut self, amount: i32) {
        self.damage += amount;
    }

    /// Count down all four power-ups, applying or reverting stat buffs on
    /// latch transitions
    pub fn update_power_ups(&mut self, dt: f32) {
        match self.speed_boost.advance(dt) {
            Some(Transition::Started) => self.speed += SPEED_BOOST,
            Some(Transition::Expired) => self.speed = (self.speed - SPEED_BOOST).max(MIN_SPEED),
            None => {}
        }
        match self.damage_boost.advance(dt) {
            Some(Transition::Started) => self.damage += DAMAGE_BOOST,
            Some(Transition::Expired) => {
                self.damage = (self.damage - DAMAGE_BOOST).max(MIN_DAMAGE)
            }
            None => {}
        }
        // Pure gates, only the latch matters
        self.double_fire.advance(dt);
        self.invisibility.advance(dt);
    }

    /// Advance own bullets; spent ones stay until the prune pass
    pub fn update_bullets(&mut self, dt: f32, field: &Playfield) {
        let anchor = self.pos;
        for bullet in &mut self.bullets {
            bullet.update(dt, anchor, field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_damage_without_shield() {
        let mut player = Player::new(&Playfield::default());
        player.take_damage(30);
        assert_eq!(player.health, 70);
        assert_eq!(player.shield, 0);
    }

    #[test]
    fn test_shield_absorbs_first() {
        let mut player = Player::new(&Playfield::default());
        player.shield = 20;
        player.take_damage(30);
        assert_eq!(player.shield, 0);
        assert_eq!(player.health, 90);
    }

    #[test]
    fn test_double_fire_window() {
        let field = Playfield::default();
        let mut player = Player::new(&field);

        assert_eq!(player.shoot(true, DT, &field), 1);

        player.double_fire.extend(10.0);
        player.shot_cooldown = 0.0;
        assert_eq!(player.shoot(true, DT, &field), 2);

        for _ in 0..601 {
            player.update_power_ups(DT);
        }
        assert!(!player.is_double_fire());
        player.shot_cooldown = 0.0;
        assert_eq!(player.shoot(true, DT, &field), 1);
        assert_eq!(player.bullets.len(), 4);
    }

    #[test]
    fn test_shot_cooldown() {
        let field = Playfield::default();
        let mut player = Player::new(&field);
        // Frame 0 fires; 12 frames cover 0.2 s and release the cooldown
        let fired_on: Vec<usize> = (0..30)
            .filter(|_| player.shoot(true, DT, &field) > 0)
            .collect();
        assert_eq!(fired_on, vec![0, 13, 26]);
    }

    #[test]
    fn test_speed_boost_applies_and_reverts_once() {
        let mut player = Player::new(&Playfield::default());
        player.speed_boost.extend(0.5);
        player.update_power_ups(DT);
        assert_eq!(player.speed, BASE_SPEED + SPEED_BOOST);
        // Stacking while active does not re-apply the buff
        player.speed_boost.extend(0.5);
        player.update_power_ups(DT);
        assert_eq!(player.speed, BASE_SPEED + SPEED_BOOST);

        for _ in 0..120 {
            player.update_power_ups(DT);
        }
        assert_eq!(player.speed, BASE_SPEED);
        assert!(!player.speed_boost.active);
    }

    #[test]
    fn test_damage_boost_revert_floor() {
        let mut player = Player::new(&Playfield::default());
        player.damage_boost.extend(0.1);
        player.update_power_ups(DT);
        assert_eq!(player.damage, BASE_DAMAGE + DAMAGE_BOOST);
        player.damage = 12;
        for _ in 0..20 {
            player.update_power_ups(DT);
        }
        assert_eq!(player.damage, MIN_DAMAGE);
    }

    #[test]
    fn test_steer_clamps_to_playfield() {
        let field = Playfield::new(200.0, 200.0);
        let mut player = Player::new(&field);
        for _ in 0..200 {
            player.steer(0.0, 1.0, DT, &field);
        }
        assert_eq!(player.pos.y, 0.0);
        assert_eq!(player.pos.x, 100.0);

        player.steer(1.0, 0.0, 0.5, &field);
        assert!((player.rotation - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_muzzle_follows_rotation() {
        let field = Playfield::default();
        let mut player = Player::new(&field);
        player.rotation = 90.0;
        player.shoot(true, DT, &field);
        let bullet = &player.bullets[0];
        assert!(bullet.pos.x > player.pos.x);
        assert!((bullet.pos.y - player.pos.y).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn damage_keeps_stats_in_range(
            shield in 0i32..=100,
            hits in prop::collection::vec(0i32..200, 1..20),
        ) {
            let mut player = Player::new(&Playfield::default());
            player.shield = shield;
            for d in hits {
                let (h0, s0) = (player.health, player.shield);
                player.take_damage(d);
                if d <= s0 {
                    prop_assert_eq!(player.shield, s0 - d);
                    prop_assert_eq!(player.health, h0);
                } else {
                    prop_assert_eq!(player.shield, 0);
                    prop_assert_eq!(player.health, (h0 - (d - s0)).max(0));
                }
                prop_assert!((0..=MAX_HEALTH).contains(&player.health));
                prop_assert!((0..=MAX_SHIELD).contains(&player.shield));
            }
        }

        #[test]
        fn pickups_never_exceed_caps(heal in -50i32..300, shield in -50i32..300) {
            let mut player = Player::new(&Playfield::default());
            player.increase_health(heal);
            player.increase_shield(shield);
            prop_assert!((0..=MAX_HEALTH).contains(&player.health));
            prop_assert!((0..=MAX_SHIELD).contains(&player.shield));
        }
    }
}
