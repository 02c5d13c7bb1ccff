//! Spacewar - simulation core for a 2D arcade space-combat game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, progression)
//! - `view`: Draw list and HUD snapshot handed to a renderer
//! - `audio`: Sound cues derived from simulation events
//! - `scores`: Append-only log of finished sessions
//! - `settings`: Runtime configuration
//!
//! Angles are in degrees, measured clockwise from "up" in screen space
//! (x grows right, y grows down), matching how ships are drawn.

pub mod audio;
pub mod scores;
pub mod settings;
pub mod sim;
pub mod view;

pub use scores::{ScoreLog, SessionRecord};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Resolution that entity sizes are authored against
    pub const REFERENCE_WIDTH: f32 = 1920.0;
    pub const REFERENCE_HEIGHT: f32 = 1080.0;

    /// Default playfield (reference resolution scaled down by 1.5)
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;

    /// Frame rate the per-frame tuning values were authored at
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Bullets outside the playfield by more than this are destroyed
    pub const BULLET_MARGIN: f32 = 50.0;
    /// Enemies outside the playfield by more than this are out of range
    pub const ENEMY_MARGIN: f32 = 150.0;

    /// Largest frame time a host should feed the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Rotate `point` around `center` by `angle` degrees
#[inline]
pub fn rotate_point(point: Vec2, center: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.to_radians().sin_cos();
    let d = point - center;
    Vec2::new(cos * d.x - sin * d.y + center.x, sin * d.x + cos * d.y + center.y)
}

/// Linear interpolation. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Unit direction a ship rotated by `angle` degrees is facing
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Vec2::new(sin, -cos)
}

/// Rotation angle (degrees) that faces along `dir`
#[inline]
pub fn heading_angle(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x).to_degrees() + 90.0
}

/// Rotation angle (degrees) that points from `from` toward `to`
#[inline]
pub fn angle_toward(from: Vec2, to: Vec2) -> f32 {
    heading_angle((to - from).normalize_or_zero())
}

/// Normalize an angle to [-180, 180)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Blend `current` toward `target` by `t` along the shortest arc
pub fn approach_angle(current: f32, target: f32, t: f32) -> f32 {
    let delta = wrap_degrees(target - current);
    current + delta * t
}
