//! Renderer-facing snapshot of the simulation
//!
//! The core exposes what to draw as kind-tagged sprites; a renderer maps
//! each `SpriteKind` to its own texture and never reaches back into the
//! simulation.

use glam::Vec2;

use crate::sim::bullet::BLAST_DURATION;
use crate::sim::player::{MAX_HEALTH, MAX_SHIELD};
use crate::sim::{BulletKind, CollectibleKind, EnemyKind, GamePhase, GameState, Outcome};

/// Shield bubble size at reference resolution
const SHIELD_REFERENCE_SIZE: (f32, f32) = (123.0, 128.0);
/// Frames in the blast animation strip
pub const BLAST_FRAMES: u8 = 10;
/// Player opacity while invisible
const INVISIBLE_OPACITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Shield,
    Enemy(EnemyKind),
    Bullet(BulletKind),
    /// Energy blast animation frame
    Blast { frame: u8 },
    Collectible(CollectibleKind),
}

/// One textured quad, centered on `center` and rotated about it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub center: Vec2,
    pub size: Vec2,
    /// Degrees, clockwise
    pub rotation: f32,
    /// 0-1
    pub opacity: f32,
}

impl Sprite {
    fn new(kind: SpriteKind, center: Vec2, size: Vec2, rotation: f32) -> Self {
        Self {
            kind,
            center,
            size,
            rotation,
            opacity: 1.0,
        }
    }
}

/// Back-to-front draw order: pickups, enemy fire, enemies, player fire, player
pub fn draw_list(state: &GameState) -> Vec<Sprite> {
    let mut sprites = Vec::with_capacity(
        state.collectibles.len()
            + state.enemy_bullets.len()
            + state.enemies.len()
            + state.player.bullets.len()
            + 2,
    );

    for item in &state.collectibles {
        let size = item.size * item.pulse_scale();
        sprites.push(Sprite::new(SpriteKind::Collectible(item.kind), item.pos, size, 0.0));
    }

    for bullet in &state.enemy_bullets {
        let sprite = match (bullet.blast_elapsed(), bullet.blast_rect()) {
            (Some(elapsed), Some(rect)) => {
                let frame = (elapsed / BLAST_DURATION * f32::from(BLAST_FRAMES)) as u8;
                Sprite::new(
                    SpriteKind::Blast {
                        frame: frame.min(BLAST_FRAMES - 1),
                    },
                    rect.center(),
                    rect.size,
                    0.0,
                )
            }
            _ => Sprite::new(
                SpriteKind::Bullet(bullet.kind),
                bullet.pos,
                bullet.size,
                bullet.rotation,
            ),
        };
        sprites.push(sprite);
    }

    for enemy in &state.enemies {
        sprites.push(Sprite::new(
            SpriteKind::Enemy(enemy.kind),
            enemy.pos,
            enemy.size,
            enemy.rotation,
        ));
    }

    for bullet in &state.player.bullets {
        sprites.push(Sprite::new(
            SpriteKind::Bullet(bullet.kind),
            bullet.pos,
            bullet.size,
            bullet.rotation,
        ));
    }

    let player = &state.player;
    if player.shield > 0 {
        let (w, h) = SHIELD_REFERENCE_SIZE;
        let mut shield = Sprite::new(
            SpriteKind::Shield,
            player.pos,
            state.field.scale(w, h),
            player.rotation,
        );
        // Fades as it drains
        shield.opacity = player.shield as f32 / MAX_SHIELD as f32;
        sprites.push(shield);
    }

    let mut ship = Sprite::new(SpriteKind::Player, player.pos, player.size, player.rotation);
    if player.is_invisible() {
        ship.opacity = INVISIBLE_OPACITY;
    }
    sprites.push(ship);

    sprites
}

/// Level-up banner state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Banner {
    pub level: u32,
    /// 0-1
    pub progress: f32,
}

/// Seconds left on each power-up (0 when inactive)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerUpTimers {
    pub speed: f32,
    pub damage: f32,
    pub double_fire: f32,
    pub invisibility: f32,
}

/// Everything a HUD overlay shows
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub shield: i32,
    pub max_shield: i32,
    pub power_ups: PowerUpTimers,
    pub banner: Option<Banner>,
    pub paused: bool,
    pub outcome: Option<Outcome>,
}

pub fn hud(state: &GameState) -> Hud {
    let player = &state.player;
    let level = state.level();
    let banner = level.banner_visible().then(|| Banner {
        level: level.id,
        progress: level.banner_progress(),
    });

    Hud {
        score: state.score,
        level: level.id,
        health: player.health,
        max_health: MAX_HEALTH,
        shield: player.shield,
        max_shield: MAX_SHIELD,
        power_ups: PowerUpTimers {
            speed: player.speed_boost.remaining,
            damage: player.damage_boost.remaining,
            double_fire: player.double_fire.remaining,
            invisibility: player.invisibility.remaining,
        },
        banner,
        paused: state.phase == GamePhase::Paused,
        outcome: state.outcome(),
    }
}
