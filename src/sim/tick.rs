//! Per-frame simulation step
//!
//! One call advances the whole session by the host's frame time:
//! director → player → bullets → enemies → collisions → prune → session end.

use glam::Vec2;

use super::collectible::Collectible;
use super::collision::{
    resolve_bullets_vs_enemies, resolve_bullets_vs_player, resolve_player_vs_collectibles,
    resolve_ship_contacts,
};
use super::enemy::Enemy;
use super::level::{Standing, current_level, pick_enemy_kind, roll_drop};
use super::state::{GameEvent, GamePhase, GameState, HitTarget, Outcome};
use crate::{angle_toward, wrap_degrees};

/// Autopilot closes in until this far from its target
const AUTOPILOT_STANDOFF: f32 = 300.0;
/// ...and backs off inside this distance
const AUTOPILOT_TOO_CLOSE: f32 = 150.0;
/// Close enough to a pickup or the center
const AUTOPILOT_ARRIVED: f32 = 20.0;
/// Heading error (deg) the autopilot tolerates before turning
const AUTOPILOT_AIM_SLACK: f32 = 2.0;

/// Input state for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Forward thrust
    pub thrust: bool,
    /// Backward thrust
    pub reverse: bool,
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the ship flies itself
    pub autopilot: bool,
}

impl TickInput {
    /// Turn axis, -1 counterclockwise .. 1 clockwise
    fn turn(&self) -> f32 {
        (self.rotate_right as i32 - self.rotate_left as i32) as f32
    }

    fn throttle(&self) -> f32 {
        (self.thrust as i32 - self.reverse as i32) as f32
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::Over(_) => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = dt.max(0.0);
    state.time += dt;

    if check_session_end(state) {
        return;
    }

    update_level(state, dt);

    let input = if input.autopilot {
        autopilot(state, input)
    } else {
        input.clone()
    };

    // Player
    let field = state.field;
    state.player.update_power_ups(dt);
    state.player.steer(input.turn(), input.throttle(), dt, &field);
    let count = state.player.shoot(input.fire, dt, &field);
    if count > 0 {
        state.events.push(GameEvent::PlayerShot { count });
    }

    // Bullets
    state.player.update_bullets(dt, &field);
    let target = state.player.pos;
    for bullet in &mut state.enemy_bullets {
        if bullet.update(dt, target, &field) {
            state.events.push(GameEvent::Explosion { pos: bullet.pos });
        }
    }

    spawn_enemies(state);
    update_enemies(state, dt);
    resolve_collisions(state);
    prune(state);

    for collectible in &mut state.collectibles {
        collectible.update(dt);
    }

    check_session_end(state);
}

/// Lose on zero health, win once the score passes the final threshold
fn check_session_end(state: &mut GameState) -> bool {
    if !state.player.is_alive() {
        state.finish(Outcome::Lose);
    } else if current_level(&state.levels, state.score) == Standing::Won {
        state.finish(Outcome::Win);
    }
    state.is_over()
}

/// Track the current level; grant its bonus once and run its banner
fn update_level(state: &mut GameState, dt: f32) {
    let Standing::Level(index) = current_level(&state.levels, state.score) else {
        return;
    };

    if index != state.level_index {
        state.level_index = index;
        let id = state.levels[index].id;
        log::info!("Level {} reached at score {}", id, state.score);
        state.events.push(GameEvent::LevelUp { level: id });
    }

    let level = &mut state.levels[index];
    if level.apply_bonus(&mut state.player) {
        log::debug!("Level {} bonus applied: {:?}", level.id, level.bonus);
    }
    level.advance_banner(dt);
}

/// Top up to the level's enemy cap, one spawn per frame
fn spawn_enemies(state: &mut GameState) {
    let live = state.enemies.iter().filter(|e| !e.destroyed).count();
    if live >= state.level().max_enemies {
        return;
    }

    let kind = pick_enemy_kind(&state.levels, state.score, &mut state.rng);
    let enemy = Enemy::spawn(kind, &state.field, &mut state.rng);
    state.enemies.push(enemy);
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let field = state.field;
    let player_pos = state.player.pos;

    for enemy in state.enemies.iter_mut().filter(|e| !e.destroyed) {
        enemy.steer(dt, player_pos);
        if enemy.attack(dt, player_pos, &field, &mut state.rng, &mut state.enemy_bullets) {
            state.events.push(GameEvent::EnemyShot { kind: enemy.kind });
        }
        enemy.check_range(&field, &mut state.rng);
    }

    // A lower cap after a level change sheds the newest non-boss enemies
    let cap = state.level().max_enemies;
    let mut excess = state
        .enemies
        .iter()
        .filter(|e| !e.destroyed)
        .count()
        .saturating_sub(cap);
    for enemy in state.enemies.iter_mut().rev() {
        if excess == 0 {
            break;
        }
        if !enemy.destroyed && !enemy.kind.is_boss() {
            enemy.force_out_of_range();
            excess -= 1;
        }
    }
}

fn resolve_collisions(state: &mut GameState) {
    for hit in resolve_ship_contacts(&mut state.player, &mut state.enemies) {
        if !hit.ignored {
            state.events.push(GameEvent::ShipCollision { pos: hit.point });
        }
    }

    for hit in resolve_bullets_vs_enemies(&mut state.player.bullets, &mut state.enemies) {
        state.events.push(GameEvent::BulletHit {
            pos: hit.point,
            target: HitTarget::Enemy,
        });
    }

    if let Some(hit) = resolve_bullets_vs_player(&mut state.player, &mut state.enemy_bullets)
        && !hit.ignored
    {
        state.events.push(GameEvent::BulletHit {
            pos: hit.point,
            target: HitTarget::Player,
        });
    }

    if let Some(pickup) = resolve_player_vs_collectibles(&mut state.player, &mut state.collectibles)
    {
        state.add_score(pickup.score_bonus);
        state.events.push(GameEvent::CollectiblePicked {
            kind: pickup.kind,
            pos: pickup.point,
        });
    }
}

/// Award combat kills, roll drops, then drop everything finished
fn prune(state: &mut GameState) {
    let level = state.level().clone();

    for enemy in state.enemies.iter().filter(|e| e.awards_score()) {
        state.score = state.score.saturating_add(u64::from(enemy.points));
        state.events.push(GameEvent::EnemyDestroyed {
            kind: enemy.kind,
            pos: enemy.pos,
            points: enemy.points,
        });
        if roll_drop(&level, &mut state.rng) {
            let drop = Collectible::random(enemy.pos, &state.field, &mut state.rng);
            log::debug!("{:?} dropped at ({:.0}, {:.0})", drop.kind, drop.pos.x, drop.pos.y);
            state.collectibles.push(drop);
        }
    }

    state.enemies.retain(|e| !e.destroyed);
    state.player.bullets.retain(|b| !b.is_spent());
    state.enemy_bullets.retain(|b| !b.is_spent());
    state.collectibles.retain(|c| !c.collected);
}

fn nearest(from: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| {
        a.distance(from)
            .partial_cmp(&b.distance(from))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Demo pilot: face the nearest enemy (or pickup when no enemy is around),
/// hold a standoff distance, keep firing
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let player = &state.player;
    let enemy = nearest(
        player.pos,
        state.enemies.iter().filter(|e| !e.destroyed).map(|e| e.pos),
    );
    let pickup = nearest(player.pos, state.collectibles.iter().map(|c| c.pos));
    let target = enemy.or(pickup).unwrap_or(state.field.center());
    let distance = player.pos.distance(target);

    let error = wrap_degrees(angle_toward(player.pos, target) - player.rotation);
    let (standoff, too_close) = if enemy.is_some() {
        (AUTOPILOT_STANDOFF, AUTOPILOT_TOO_CLOSE)
    } else {
        (AUTOPILOT_ARRIVED, 0.0)
    };

    TickInput {
        rotate_left: error < -AUTOPILOT_AIM_SLACK,
        rotate_right: error > AUTOPILOT_AIM_SLACK,
        thrust: distance > standoff,
        reverse: distance < too_close,
        fire: enemy.is_some(),
        ..input.clone()
    }
}
