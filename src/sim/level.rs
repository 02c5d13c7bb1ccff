//! Score-driven progression
//!
//! The level table is ordered by threshold. The current level is the first
//! entry whose threshold is above the score; past the last one the session
//! is won.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use super::player::Player;
use crate::consts::REFERENCE_FPS;

/// One-time stat bonus granted when a level becomes current
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelBonus {
    pub damage: i32,
    /// px/s
    pub speed: f32,
    pub shield: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    /// Score needed to move past this level
    pub threshold: u64,
    pub max_enemies: usize,
    /// Chance in percent that a combat kill drops a collectible
    pub drop_percent: u32,
    /// Level-up banner display time (s)
    pub banner_duration: f32,
    pub banner_elapsed: f32,
    pub bonus: LevelBonus,
    /// Latch so the bonus is granted once
    pub bonus_applied: bool,
}

impl Level {
    fn new(
        id: u32,
        threshold: u64,
        max_enemies: usize,
        drop_percent: u32,
        banner_duration: f32,
        bonus: LevelBonus,
    ) -> Self {
        Self {
            id,
            threshold,
            max_enemies,
            drop_percent,
            banner_duration,
            banner_elapsed: 0.0,
            bonus,
            bonus_applied: false,
        }
    }

    /// Grant the level bonus if it hasn't been granted yet.
    ///
    /// Returns true on the call that applied it.
    pub fn apply_bonus(&mut self, player: &mut Player) -> bool {
        if self.bonus_applied {
            return false;
        }
        self.bonus_applied = true;
        player.increase_shield(self.bonus.shield);
        player.increase_damage(self.bonus.damage);
        player.increase_speed(self.bonus.speed);
        true
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_elapsed < self.banner_duration
    }

    /// Advance the banner clock while it is showing
    pub fn advance_banner(&mut self, dt: f32) {
        if self.banner_visible() {
            self.banner_elapsed += dt;
        }
    }

    /// Banner progress in [0, 1]
    pub fn banner_progress(&self) -> f32 {
        if self.banner_duration <= 0.0 {
            1.0
        } else {
            (self.banner_elapsed / self.banner_duration).clamp(0.0, 1.0)
        }
    }
}

pub fn default_levels() -> Vec<Level> {
    let bonus = |damage: i32, speed: f32, shield: i32| LevelBonus {
        damage,
        speed: speed * REFERENCE_FPS,
        shield,
    };
    vec![
        Level::new(1, 100, 6, 20, 0.0, LevelBonus::default()),
        Level::new(2, 200, 5, 30, 2.0, bonus(10, 0.0, 0)),
        Level::new(3, 300, 3, 40, 2.0, bonus(10, 2.0, 0)),
        Level::new(4, 400, 2, 50, 2.0, bonus(10, 0.0, 0)),
        Level::new(5, 1400, 1, 60, 2.0, bonus(30, 1.0, 100)),
    ]
}

/// Where a score sits in the level table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    /// Index into the level table
    Level(usize),
    /// Score reached the final threshold
    Won,
}

pub fn current_level(levels: &[Level], score: u64) -> Standing {
    levels
        .iter()
        .position(|level| score < level.threshold)
        .map_or(Standing::Won, Standing::Level)
}

/// Which enemy to spawn next for a given score
pub fn pick_enemy_kind(levels: &[Level], score: u64, rng: &mut impl Rng) -> EnemyKind {
    let below = |i: usize| levels.get(i).is_some_and(|level| score < level.threshold);

    if below(0) {
        EnemyKind::Basic
    } else if below(1) {
        if rng.random_bool(0.5) { EnemyKind::Basic } else { EnemyKind::Fast }
    } else if below(2) {
        if rng.random_bool(0.5) { EnemyKind::Fast } else { EnemyKind::Strong }
    } else if below(3) {
        EnemyKind::Strong
    } else {
        EnemyKind::Boss
    }
}

/// Drop roll for a combat kill
pub fn roll_drop(level: &Level, rng: &mut impl Rng) -> bool {
    rng.random_range(0..100) < level.drop_percent
}
