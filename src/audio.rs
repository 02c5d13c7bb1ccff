//! Sound cues
//!
//! The simulation never plays audio. It raises `GameEvent`s; this module
//! maps them to one-shot `SoundEffect`s and hands those to whatever
//! `AudioSink` the host provides.

use crate::sim::{EnemyKind, GameEvent, Outcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fires
    PlayerShoot,
    /// Strong enemy volley
    EnemyShoot,
    /// Boss fires
    BossShoot,
    /// A bullet lands on a ship
    BulletImpact,
    /// Energy bullet detonates
    Explosion,
    /// Collectible picked up
    Coin,
    /// Ships ram each other
    Collision,
    LevelUp,
    Victory,
    GameOver,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        let effect = match event {
            GameEvent::PlayerShot { .. } => SoundEffect::PlayerShoot,
            GameEvent::EnemyShot {
                kind: EnemyKind::Boss,
            } => SoundEffect::BossShoot,
            GameEvent::EnemyShot { .. } => SoundEffect::EnemyShoot,
            GameEvent::BulletHit { .. } => SoundEffect::BulletImpact,
            GameEvent::Explosion { .. } => SoundEffect::Explosion,
            GameEvent::CollectiblePicked { .. } => SoundEffect::Coin,
            GameEvent::ShipCollision { .. } => SoundEffect::Collision,
            GameEvent::LevelUp { .. } => SoundEffect::LevelUp,
            GameEvent::SessionOver {
                outcome: Outcome::Win,
                ..
            } => SoundEffect::Victory,
            GameEvent::SessionOver {
                outcome: Outcome::Lose,
                ..
            } => SoundEffect::GameOver,
            GameEvent::EnemyDestroyed { .. } => return None,
        };
        Some(effect)
    }
}

/// Something that can play a one-shot cue
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Play the cue for every event that has one. Returns how many were played.
pub fn dispatch<'a>(
    events: impl IntoIterator<Item = &'a GameEvent>,
    sink: &mut impl AudioSink,
) -> usize {
    let mut played = 0;
    for effect in events.into_iter().filter_map(SoundEffect::for_event) {
        sink.play(effect);
        played += 1;
    }
    played
}

/// Headless sink: logs cues instead of playing them
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    muted: bool,
    /// Cues played so far
    pub played: usize,
}

impl LogSink {
    pub fn new(muted: bool) -> Self {
        Self { muted, played: 0 }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::debug!("Sound: {:?}", effect);
    }
}
