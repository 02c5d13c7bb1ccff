//! Collision shapes for ships, blasts and pickups
//!
//! Ships collide as an isosceles triangle inscribed in their bounding box:
//! - nose: top-center of the box
//! - rear corners: bottom-left and bottom-right of the box
//!
//! The triangle is rotated with the ship around the box center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rotate_point;

/// Denominators smaller than this are treated as degenerate geometry
pub const GEOMETRY_EPSILON: f32 = 1e-6;

/// Axis-aligned rectangle (top-left origin, y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Rectangle of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Corners in order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.min,
            Vec2::new(max.x, self.min.y),
            max,
            Vec2::new(self.min.x, max.y),
        ]
    }

    /// The four edges, walking the corners clockwise
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let [tl, tr, br, bl] = self.corners();
        [(tl, tr), (tr, br), (br, bl), (bl, tl)]
    }

    /// Boundary-inclusive point test
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}

/// A triangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Collision triangle for a ship whose box is centered on `center`
    pub fn ship(center: Vec2, size: Vec2, rotation: f32) -> Self {
        let half = size / 2.0;
        let nose = Vec2::new(center.x, center.y - half.y);
        let rear_left = Vec2::new(center.x - half.x, center.y + half.y);
        let rear_right = Vec2::new(center.x + half.x, center.y + half.y);
        Self {
            a: rotate_point(nose, center, rotation),
            b: rotate_point(rear_left, center, rotation),
            c: rotate_point(rear_right, center, rotation),
        }
    }

    pub fn vertices(&self) -> [Vec2; 3] {
        [self.a, self.b, self.c]
    }

    /// Edges a→b, b→c, c→a
    pub fn edges(&self) -> [(Vec2, Vec2); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    pub fn centroid(&self) -> Vec2 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Twice the signed area; zero for degenerate triangles
    pub fn doubled_area(&self) -> f32 {
        (self.b - self.a).perp_dot(self.c - self.a)
    }

    pub fn is_degenerate(&self) -> bool {
        self.doubled_area().abs() < GEOMETRY_EPSILON
    }

    /// Barycentric point test, boundary inclusive.
    ///
    /// Degenerate triangles contain nothing.
    pub fn contains_point(&self, p: Vec2) -> bool {
        let (a, b, c) = (self.a, self.b, self.c);
        let denominator = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        if denominator.abs() < GEOMETRY_EPSILON {
            return false;
        }

        let alpha = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denominator;
        let beta = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denominator;
        let gamma = 1.0 - alpha - beta;

        alpha >= 0.0 && beta >= 0.0 && gamma >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_ship_triangle_unrotated() {
        let tri = Triangle::ship(Vec2::new(100.0, 100.0), Vec2::new(40.0, 60.0), 0.0);
        assert!(close(tri.a, Vec2::new(100.0, 70.0)));
        assert!(close(tri.b, Vec2::new(80.0, 130.0)));
        assert!(close(tri.c, Vec2::new(120.0, 130.0)));
    }

    #[test]
    fn test_ship_triangle_nose_follows_rotation() {
        // Rotated 90° clockwise, the nose points right
        let tri = Triangle::ship(Vec2::new(0.0, 0.0), Vec2::new(40.0, 60.0), 90.0);
        assert!(close(tri.a, Vec2::new(30.0, 0.0)), "nose at {:?}", tri.a);
    }

    #[test]
    fn test_contains_centroid_and_rejects_far_point() {
        let tri = Triangle::ship(Vec2::new(50.0, 50.0), Vec2::new(20.0, 30.0), 37.0);
        assert!(tri.contains_point(tri.centroid()));
        assert!(!tri.contains_point(Vec2::new(5000.0, -5000.0)));
    }

    #[test]
    fn test_contains_vertices_boundary_inclusive() {
        let tri = Triangle::new(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0));
        assert!(tri.contains_point(Vec2::ZERO));
        assert!(tri.contains_point(Vec2::new(5.0, 0.0)));
        assert!(!tri.contains_point(Vec2::new(6.0, 6.0)));
    }

    #[test]
    fn test_degenerate_triangle_contains_nothing() {
        let tri = Triangle::new(Vec2::ZERO, Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(tri.is_degenerate());
        assert!(!tri.contains_point(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_rect_corners_and_contains() {
        let rect = Rect::from_center(Vec2::new(0.0, 0.0), Vec2::new(128.0, 128.0));
        assert_eq!(rect.corners()[0], Vec2::new(-64.0, -64.0));
        assert_eq!(rect.corners()[2], Vec2::new(64.0, 64.0));
        assert!(rect.contains_point(Vec2::new(64.0, -64.0)));
        assert!(!rect.contains_point(Vec2::new(64.1, 0.0)));
        assert_eq!(rect.center(), Vec2::ZERO);
    }
}
