//! Playfield bounds
//!
//! The visible simulation area. Entity sizes are authored at the reference
//! resolution and scaled to the actual playfield.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, REFERENCE_HEIGHT, REFERENCE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Scale a reference-resolution size to this playfield
    pub fn scale(&self, reference_width: f32, reference_height: f32) -> Vec2 {
        Vec2::new(
            (reference_width * self.width / REFERENCE_WIDTH).round(),
            (reference_height * self.height / REFERENCE_HEIGHT).round(),
        )
    }

    /// True if `pos` lies within the playfield grown by `margin` on every side
    pub fn contains(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }

    /// Clamp a position onto the playfield (no wraparound)
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_default_playfield() {
        let field = Playfield::default();
        assert_eq!(field.scale(1920.0, 1080.0), Vec2::new(1280.0, 720.0));
        assert_eq!(field.scale(77.0, 70.0), Vec2::new(51.0, 47.0));
    }

    #[test]
    fn test_contains_with_margin() {
        let field = Playfield::new(100.0, 50.0);
        assert!(field.contains(Vec2::new(-50.0, 0.0), 50.0));
        assert!(!field.contains(Vec2::new(-50.1, 0.0), 50.0));
        assert!(field.contains(Vec2::new(150.0, 100.0), 50.0));
        assert!(!field.contains(Vec2::new(150.0, 100.5), 50.0));
    }

    #[test]
    fn test_clamp() {
        let field = Playfield::new(100.0, 50.0);
        assert_eq!(field.clamp(Vec2::new(-5.0, 70.0)), Vec2::new(0.0, 50.0));
        assert_eq!(field.clamp(Vec2::new(30.0, 20.0)), Vec2::new(30.0, 20.0));
    }
}
