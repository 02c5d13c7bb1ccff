//! Game state and core simulation types
//!
//! Everything one session needs lives in `GameState`: the live entity
//! collections, the level table, score, phase, the RNG and the queue of
//! events raised during the last ticks.

use chrono::{DateTime, Utc};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::collectible::{Collectible, CollectibleKind};
use super::enemy::{Enemy, EnemyKind};
use super::level::{Level, default_levels};
use super::player::Player;
use super::playfield::Playfield;
use crate::scores::SessionRecord;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen until unpaused
    Paused,
    /// Session ended
    Over(Outcome),
}

/// Who a bullet struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    Enemy,
    Player,
}

/// Discrete things that happened during a tick, for audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired `count` bullets
    PlayerShot { count: usize },
    /// An enemy fired
    EnemyShot { kind: EnemyKind },
    BulletHit { pos: Vec2, target: HitTarget },
    /// An energy bullet detonated
    Explosion { pos: Vec2 },
    /// Killed in combat (out-of-range removals raise nothing)
    EnemyDestroyed {
        kind: EnemyKind,
        pos: Vec2,
        points: u32,
    },
    CollectiblePicked { kind: CollectibleKind, pos: Vec2 },
    ShipCollision { pos: Vec2 },
    LevelUp { level: u32 },
    SessionOver { outcome: Outcome, score: u64 },
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub field: Playfield,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<Bullet>,
    pub collectibles: Vec<Collectible>,
    /// Ordered by threshold
    pub levels: Vec<Level>,
    /// Index of the current level
    pub level_index: usize,
    /// Never decreases during a session
    pub score: u64,
    pub phase: GamePhase,
    /// Simulated seconds
    pub time: f32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, field: Playfield) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            player: Player::new(&field),
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            collectibles: Vec::new(),
            levels: default_levels(),
            level_index: 0,
            score: 0,
            phase: GamePhase::Playing,
            time: 0.0,
            events: Vec::new(),
        }
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.level_index.min(self.levels.len().saturating_sub(1))]
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Result to persist once the session has ended
    pub fn session_record(&self, timestamp: DateTime<Utc>) -> Option<SessionRecord> {
        self.outcome().map(|outcome| SessionRecord {
            outcome,
            score: self.score,
            timestamp,
        })
    }

    /// End the session; later calls are ignored
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::Over(outcome);
        log::info!("Session over: {:?} with score {}", outcome, self.score);
        self.events.push(GameEvent::SessionOver {
            outcome,
            score: self.score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(42, Playfield::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level().id, 1);
        assert_eq!(state.player.pos, state.field.center());
        assert!(state.enemies.is_empty());
        assert!(state.session_record(Utc::now()).is_none());
    }

    #[test]
    fn test_finish_once() {
        let mut state = GameState::new(1, Playfield::default());
        state.add_score(120);
        state.finish(Outcome::Lose);
        state.finish(Outcome::Win);
        assert_eq!(state.outcome(), Some(Outcome::Lose));

        let events = state.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::SessionOver {
                outcome: Outcome::Lose,
                score: 120
            }]
        );
        assert!(state.drain_events().is_empty());

        let record = state.session_record(Utc::now());
        assert!(record.is_some_and(|r| r.score == 120 && r.outcome == Outcome::Lose));
    }

    #[test]
    fn test_same_seed_same_rng() {
        use rand::Rng;
        let mut a = GameState::new(9, Playfield::default());
        let mut b = GameState::new(9, Playfield::default());
        let xs: Vec<u32> = (0..8).map(|_| a.rng.random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.rng.random()).collect();
        assert_eq!(xs, ys);
    }
}
