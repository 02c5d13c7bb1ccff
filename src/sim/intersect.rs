//! Exact intersection tests between segments, circles, rectangles and triangles
//!
//! Touching or collinear contact counts as "no intersection" for segment pairs.
//! Degenerate inputs (zero-length segments, zero-area triangles) never intersect.

use glam::Vec2;

use super::shapes::{GEOMETRY_EPSILON, Rect, Triangle};

/// Orientation of the turn a→b→c (sign of the cross product)
#[inline]
fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.y - a.y) * (c.x - b.x) - (b.x - a.x) * (c.y - b.y)
}

/// Proper segment intersection: each segment's endpoints lie strictly on
/// opposite sides of the other segment
pub fn segments_intersect(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);
    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

/// Circle vs segment: distance from the center to the closest point on the
/// segment is within the radius
pub fn circle_touches_segment(center: Vec2, radius: f32, start: Vec2, end: Vec2) -> bool {
    let line = end - start;
    let length = line.length();
    if length < GEOMETRY_EPSILON {
        return false;
    }

    let dir = line / length;
    let projection = (center - start).dot(dir).clamp(0.0, length);
    let closest = start + dir * projection;
    center.distance(closest) <= radius
}

/// Circle vs triangle: touches an edge, or the center is inside
pub fn circle_triangle(center: Vec2, radius: f32, tri: &Triangle) -> bool {
    if tri.is_degenerate() {
        return false;
    }

    tri.edges()
        .iter()
        .any(|&(a, b)| circle_touches_segment(center, radius, a, b))
        || tri.contains_point(center)
}

/// Rectangle vs triangle: a corner inside the triangle, crossing edges, or
/// the triangle fully inside the rectangle
pub fn rect_triangle(rect: &Rect, tri: &Triangle) -> bool {
    if tri.is_degenerate() {
        return false;
    }

    if rect.corners().iter().any(|&corner| tri.contains_point(corner)) {
        return true;
    }

    let tri_edges = tri.edges();
    let crossing = rect.edges().iter().any(|&(r0, r1)| {
        tri_edges
            .iter()
            .any(|&(t0, t1)| segments_intersect(r0, r1, t0, t1))
    });
    if crossing {
        return true;
    }

    tri.vertices().iter().all(|&v| rect.contains_point(v))
}

/// Triangle vs triangle: any pair of edges crossing, or any vertex of one
/// inside the other (covers full containment)
pub fn triangles_intersect(t1: &Triangle, t2: &Triangle) -> bool {
    if t1.is_degenerate() || t2.is_degenerate() {
        return false;
    }

    let e2 = t2.edges();
    let crossing = t1.edges().iter().any(|&(p1, q1)| {
        e2.iter()
            .any(|&(p2, q2)| segments_intersect(p1, q1, p2, q2))
    });
    if crossing {
        return true;
    }

    t1.vertices().iter().any(|&v| t2.contains_point(v))
        || t2.vertices().iter().any(|&v| t1.contains_point(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tri(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Triangle {
        Triangle::new(Vec2::new(a.0, a.1), Vec2::new(b.0, b.1), Vec2::new(c.0, c.1))
    }

    #[test]
    fn test_segments_crossing() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        ));
    }

    #[test]
    fn test_segments_disjoint() {
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(6.0, 3.0),
        ));
    }

    #[test]
    fn test_segments_touching_is_not_intersecting() {
        // T-junction: endpoint of the second segment lies on the first
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 5.0),
        ));
        // Collinear overlap
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(15.0, 0.0),
        ));
    }

    #[test]
    fn test_zero_length_segment_never_intersects() {
        let p = Vec2::new(5.0, 5.0);
        assert!(!segments_intersect(p, p, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)));
        assert!(!circle_touches_segment(p, 100.0, p, p));
    }

    #[test]
    fn test_circle_touches_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(circle_touches_segment(Vec2::new(5.0, 2.0), 2.0, a, b));
        assert!(!circle_touches_segment(Vec2::new(5.0, 2.5), 2.0, a, b));
        // Past the end: distance measured to the endpoint
        assert!(circle_touches_segment(Vec2::new(11.0, 0.0), 1.5, a, b));
        assert!(!circle_touches_segment(Vec2::new(13.0, 0.0), 1.5, a, b));
    }

    #[test]
    fn test_circle_triangle_center_inside() {
        let t = tri((0.0, 0.0), (100.0, 0.0), (0.0, 100.0));
        // Small circle deep inside touches no edge but still hits
        assert!(circle_triangle(Vec2::new(20.0, 20.0), 1.0, &t));
        assert!(!circle_triangle(Vec2::new(80.0, 80.0), 1.0, &t));
        assert!(circle_triangle(Vec2::new(52.0, 52.0), 3.0, &t));
    }

    #[test]
    fn test_circle_vs_degenerate_triangle() {
        let t = tri((0.0, 0.0), (10.0, 10.0), (20.0, 20.0));
        assert!(!circle_triangle(Vec2::new(10.0, 10.0), 50.0, &t));
    }

    #[test]
    fn test_rect_triangle_corner_inside() {
        let t = tri((0.0, 0.0), (100.0, 0.0), (0.0, 100.0));
        let rect = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(200.0, 200.0));
        assert!(rect_triangle(&rect, &t));
    }

    #[test]
    fn test_rect_triangle_edges_cross() {
        // Thin triangle spearing through a rect with no vertex inside it
        let t = tri((-50.0, 4.0), (150.0, 5.0), (-50.0, 6.0));
        let rect = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 10.0));
        assert!(rect_triangle(&rect, &t));
    }

    #[test]
    fn test_rect_triangle_triangle_inside_rect() {
        let t = tri((40.0, 40.0), (60.0, 40.0), (50.0, 60.0));
        let rect = Rect::from_center(Vec2::new(50.0, 50.0), Vec2::new(128.0, 128.0));
        assert!(rect_triangle(&rect, &t));
    }

    #[test]
    fn test_rect_triangle_apart() {
        let t = tri((0.0, 0.0), (10.0, 0.0), (0.0, 10.0));
        let rect = Rect::new(Vec2::new(50.0, 50.0), Vec2::new(10.0, 10.0));
        assert!(!rect_triangle(&rect, &t));
    }

    #[test]
    fn test_triangles_full_containment() {
        // No edges cross, one sits wholly inside the other
        let outer = tri((0.0, 0.0), (100.0, 0.0), (0.0, 100.0));
        let inner = tri((10.0, 10.0), (20.0, 10.0), (10.0, 20.0));
        assert!(triangles_intersect(&outer, &inner));
        assert!(triangles_intersect(&inner, &outer));
    }

    #[test]
    fn test_triangles_apart() {
        let a = tri((0.0, 0.0), (10.0, 0.0), (0.0, 10.0));
        let b = tri((20.0, 20.0), (30.0, 20.0), (20.0, 30.0));
        assert!(!triangles_intersect(&a, &b));
    }

    proptest! {
        #[test]
        fn segment_test_is_symmetric(
            coords in prop::array::uniform8(-100.0f32..100.0),
        ) {
            let [a, b, c, d, e, f, g, h] = coords;
            let (p1, q1) = (Vec2::new(a, b), Vec2::new(c, d));
            let (p2, q2) = (Vec2::new(e, f), Vec2::new(g, h));
            prop_assert_eq!(
                segments_intersect(p1, q1, p2, q2),
                segments_intersect(p2, q2, p1, q1)
            );
        }
    }
}
