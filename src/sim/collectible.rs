//! Power-up pickups dropped by destroyed enemies

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::playfield::Playfield;
use super::player::Player;

pub const HEAL_AMOUNT: i32 = 20;
pub const SHIELD_AMOUNT: i32 = 100;
pub const SCORE_BONUS: u64 = 50;
pub const SPEED_BOOST_TIME: f32 = 5.0;
pub const DAMAGE_BOOST_TIME: f32 = 5.0;
pub const DOUBLE_FIRE_TIME: f32 = 10.0;
pub const INVISIBILITY_TIME: f32 = 5.0;

/// Pulse amplitude (fraction of size) and angular rate (rad/s)
const PULSE_AMPLITUDE: f32 = 0.1;
const PULSE_RATE: f32 = 2.5 * std::f32::consts::PI;

const COLLECTIBLE_REFERENCE_SIZE: (f32, f32) = (32.0, 32.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Health,
    SpeedBoost,
    DamageBoost,
    Shield,
    DoubleFire,
    ScoreBoost,
    Invisibility,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 7] = [
        CollectibleKind::Health,
        CollectibleKind::SpeedBoost,
        CollectibleKind::DamageBoost,
        CollectibleKind::Shield,
        CollectibleKind::DoubleFire,
        CollectibleKind::ScoreBoost,
        CollectibleKind::Invisibility,
    ];

    /// Uniform pick among all kinds
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    /// Center
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
    /// Seconds alive, drives the pulse
    pub age: f32,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, pos: Vec2, field: &Playfield) -> Self {
        let (w, h) = COLLECTIBLE_REFERENCE_SIZE;
        Self {
            kind,
            pos,
            size: field.scale(w, h),
            collected: false,
            age: 0.0,
        }
    }

    pub fn random(pos: Vec2, field: &Playfield, rng: &mut impl Rng) -> Self {
        Self::new(CollectibleKind::random(rng), pos, field)
    }

    pub fn update(&mut self, dt: f32) {
        self.age += dt;
    }

    /// Draw scale, 1.0 ± 10 %
    pub fn pulse_scale(&self) -> f32 {
        1.0 + PULSE_AMPLITUDE * (self.age * PULSE_RATE).sin()
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.x / 10.0
    }

    /// Apply the effect and mark collected.
    ///
    /// Returns the score bonus to add (only the score pickup has one).
    pub fn collect(&mut self, player: &mut Player) -> u64 {
        if self.collected {
            return 0;
        }
        self.collected = true;

        match self.kind {
            CollectibleKind::Health => player.increase_health(HEAL_AMOUNT),
            CollectibleKind::SpeedBoost => player.speed_boost.extend(SPEED_BOOST_TIME),
            CollectibleKind::DamageBoost => player.damage_boost.extend(DAMAGE_BOOST_TIME),
            CollectibleKind::Shield => player.increase_shield(SHIELD_AMOUNT),
            CollectibleKind::DoubleFire => player.double_fire.extend(DOUBLE_FIRE_TIME),
            CollectibleKind::Invisibility => player.invisibility.extend(INVISIBILITY_TIME),
            CollectibleKind::ScoreBoost => return SCORE_BONUS,
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_collect_applies_once() {
        let field = Playfield::default();
        let mut player = Player::new(&field);
        player.health = 50;
        let mut heal = Collectible::new(CollectibleKind::Health, Vec2::ZERO, &field);
        assert_eq!(heal.collect(&mut player), 0);
        assert_eq!(player.health, 70);
        heal.collect(&mut player);
        assert_eq!(player.health, 70);
        assert!(heal.collected);
    }

    #[test]
    fn test_score_pickup_leaves_player_alone() {
        let field = Playfield::default();
        let mut player = Player::new(&field);
        let before = (player.health, player.shield, player.speed, player.damage);
        let mut bonus = Collectible::new(CollectibleKind::ScoreBoost, Vec2::ZERO, &field);
        assert_eq!(bonus.collect(&mut player), SCORE_BONUS);
        assert_eq!(
            (player.health, player.shield, player.speed, player.damage),
            before
        );
    }

    #[test]
    fn test_timed_pickups_stack() {
        let field = Playfield::default();
        let mut player = Player::new(&field);
        for _ in 0..2 {
            Collectible::new(CollectibleKind::Invisibility, Vec2::ZERO, &field).collect(&mut player);
        }
        assert_eq!(player.invisibility.remaining, 2.0 * INVISIBILITY_TIME);
        assert!(player.is_invisible());
    }

    #[test]
    fn test_shield_pickup_caps() {
        let field = Playfield::default();
        let mut player = Player::new(&field);
        player.shield = 40;
        Collectible::new(CollectibleKind::Shield, Vec2::ZERO, &field).collect(&mut player);
        assert_eq!(player.shield, 100);
    }

    #[test]
    fn test_random_kinds_cover_table() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(CollectibleKind::random(&mut rng));
        }
        assert_eq!(seen.len(), CollectibleKind::ALL.len());
    }

    #[test]
    fn test_pulse_stays_within_ten_percent() {
        let mut item = Collectible::new(CollectibleKind::Health, Vec2::ZERO, &Playfield::default());
        for _ in 0..200 {
            item.update(1.0 / 60.0);
            let s = item.pulse_scale();
            assert!((0.9..=1.1).contains(&s));
        }
    }
}
