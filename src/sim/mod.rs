//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering,
//! audio and platform code:
//! - Time advances only through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Entities carry kind tags, never asset handles

pub mod bullet;
pub mod collectible;
pub mod collision;
pub mod enemy;
pub mod intersect;
pub mod level;
pub mod player;
pub mod playfield;
pub mod shapes;
pub mod state;
pub mod tick;

pub use bullet::{Bullet, BulletKind, Guidance};
pub use collectible::{Collectible, CollectibleKind};
pub use collision::{
    Hit, Hull, Pickup, resolve_bullets_vs_enemies, resolve_bullets_vs_player,
    resolve_player_vs_collectibles, resolve_ship_contacts, ships_collide,
};
pub use enemy::{Enemy, EnemyKind, Tactic};
pub use intersect::{
    circle_touches_segment, circle_triangle, rect_triangle, segments_intersect,
    triangles_intersect,
};
pub use level::{Level, LevelBonus, Standing, current_level, default_levels};
pub use player::{Player, PowerUp};
pub use playfield::Playfield;
pub use shapes::{Rect, Triangle};
pub use state::{GameEvent, GamePhase, GameState, HitTarget, Outcome};
pub use tick::{TickInput, tick};
