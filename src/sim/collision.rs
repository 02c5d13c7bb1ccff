//! Collision detection and response between live entities
//!
//! Ships collide as rotated triangles, bullets and pickups as small circles,
//! and detonated energy bullets as a fixed square blast box. Each resolver
//! applies its damage/effects in place and reports what happened so the
//! caller can raise events.

use glam::Vec2;

use super::bullet::Bullet;
use super::collectible::{Collectible, CollectibleKind};
use super::enemy::Enemy;
use super::intersect::{circle_triangle, rect_triangle, triangles_intersect};
use super::player::Player;
use super::shapes::Triangle;

/// Damage both ships take when they touch
pub const CONTACT_DAMAGE: i32 = 10;

/// Anything with a triangular collision hull
pub trait Hull {
    fn hull(&self) -> Triangle;
}

impl Hull for Player {
    fn hull(&self) -> Triangle {
        self.triangle()
    }
}

impl Hull for Enemy {
    fn hull(&self) -> Triangle {
        self.triangle()
    }
}

/// Result of a damaging contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Where the contact happened
    pub point: Vec2,
    pub damage: i32,
    /// The target was invisible and took nothing
    pub ignored: bool,
}

/// Result of picking up a collectible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub kind: CollectibleKind,
    pub point: Vec2,
    pub score_bonus: u64,
}

/// Triangle-vs-triangle test between two ships
pub fn ships_collide(a: &impl Hull, b: &impl Hull) -> bool {
    triangles_intersect(&a.hull(), &b.hull())
}

/// Player bullets against enemies. Each bullet damages at most one enemy.
pub fn resolve_bullets_vs_enemies(bullets: &mut [Bullet], enemies: &mut [Enemy]) -> Vec<Hit> {
    let mut hits = Vec::new();

    for bullet in bullets.iter_mut().filter(|b| !b.destroyed) {
        let (center, radius) = (bullet.pos, bullet.radius());
        let target = enemies
            .iter_mut()
            .filter(|e| !e.destroyed)
            .find(|e| circle_triangle(center, radius, &e.triangle()));

        if let Some(enemy) = target {
            enemy.take_damage(bullet.damage);
            bullet.hit();
            hits.push(Hit {
                point: center,
                damage: bullet.damage,
                ignored: false,
            });
        }
    }

    hits
}

/// Enemy bullets against the player. At most one bullet connects per frame.
///
/// Detonated energy bullets hit through their blast box for 1.5x damage,
/// once; everything else is a circle test and is consumed on contact. An
/// invisible player still stops the scan but takes nothing.
pub fn resolve_bullets_vs_player(player: &mut Player, bullets: &mut [Bullet]) -> Option<Hit> {
    let hull = player.triangle();
    let invisible = player.is_invisible();

    for bullet in bullets.iter_mut().filter(|b| !b.destroyed) {
        if let Some(blast) = bullet.blast_rect() {
            // Spent blasts keep animating but can no longer hurt
            if bullet.damage == 0 || !rect_triangle(&blast, &hull) {
                continue;
            }
            let damage = bullet.damage * 3 / 2;
            // Stays live while the player is invisible
            if !invisible {
                player.take_damage(damage);
                bullet.damage = 0;
            }
            return Some(Hit {
                point: blast.center(),
                damage,
                ignored: invisible,
            });
        }

        if circle_triangle(bullet.pos, bullet.radius(), &hull) {
            bullet.hit();
            if !invisible {
                player.take_damage(bullet.damage);
            }
            return Some(Hit {
                point: bullet.pos,
                damage: bullet.damage,
                ignored: invisible,
            });
        }
    }

    None
}

/// The player picks up at most one collectible per frame
pub fn resolve_player_vs_collectibles(
    player: &mut Player,
    collectibles: &mut [Collectible],
) -> Option<Pickup> {
    let hull = player.triangle();
    let item = collectibles
        .iter_mut()
        .filter(|c| !c.collected)
        .find(|c| circle_triangle(c.pos, c.radius(), &hull))?;

    let score_bonus = item.collect(player);
    Some(Pickup {
        kind: item.kind,
        point: item.pos,
        score_bonus,
    })
}

/// Ship-vs-ship contact damage, edge-triggered per enemy.
///
/// An enemy's latch is set on the first overlapping frame and cleared on the
/// first frame the pair is apart, so a continuous overlap deals damage once.
pub fn resolve_ship_contacts(player: &mut Player, enemies: &mut [Enemy]) -> Vec<Hit> {
    let mut hits = Vec::new();
    let invisible = player.is_invisible();
    player.in_contact = false;

    for enemy in enemies.iter_mut().filter(|e| !e.destroyed) {
        if !ships_collide(&*player, &*enemy) {
            enemy.in_contact = false;
            continue;
        }

        player.in_contact = true;
        if enemy.in_contact {
            continue;
        }
        enemy.in_contact = true;

        if !invisible {
            player.take_damage(CONTACT_DAMAGE);
            enemy.take_damage(CONTACT_DAMAGE);
        }
        hits.push(Hit {
            point: (player.pos + enemy.pos) / 2.0,
            damage: CONTACT_DAMAGE,
            ignored: invisible,
        });
    }

    hits
}
