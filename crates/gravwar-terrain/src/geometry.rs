//! 2D intersection primitives used by the surface queries.

use glam::Vec2;

use gravwar_core::types::Circle;

/// Twice the triangle area below which a triangle counts as degenerate.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Distances along a ray to the two boundary crossings of a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// First crossing. Zero when the ray starts inside the circle.
    pub near: f32,
    /// Second crossing.
    pub far: f32,
}

impl RayHit {
    /// Length of the ray segment inside the circle.
    pub fn chord(&self) -> f32 {
        self.far - self.near
    }
}

/// Cast a ray from `origin` along the unit vector `dir` against `circle`.
///
/// Returns `None` when the ray misses or the circle lies entirely behind
/// the origin.
pub fn ray_circle(origin: Vec2, dir: Vec2, circle: &Circle) -> Option<RayHit> {
    let m = origin - circle.center;
    let b = m.dot(dir);
    let c = m.length_squared() - circle.radius * circle.radius;

    // Origin outside and pointing away.
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let far = -b + root;
    if far < 0.0 {
        return None;
    }
    let near = (-b - root).max(0.0);
    Some(RayHit { near, far })
}

/// Whether the triangle `a b c` has (almost) no area.
pub fn is_degenerate(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (b - a).perp_dot(c - a).abs() <= DEGENERATE_EPSILON || a == b || b == c || a == c
}

/// Closest point to `p` on the segment `a b`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Whether `p` lies inside or on the triangle `a b c` (either winding).
pub fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Circle vs. triangle overlap test. Callers skip degenerate triangles.
pub fn circle_intersects_triangle(circle: &Circle, a: Vec2, b: Vec2, c: Vec2) -> bool {
    if point_in_triangle(circle.center, a, b, c) {
        return true;
    }
    let r_sq = circle.radius * circle.radius;
    [(a, b), (b, c), (c, a)].iter().any(|&(p, q)| {
        closest_point_on_segment(circle.center, p, q).distance_squared(circle.center) <= r_sq
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_from_outside_hits_both_sides() {
        let circle = Circle::new(Vec2::new(10.0, 0.0), 2.0);
        let hit = ray_circle(Vec2::ZERO, Vec2::X, &circle).unwrap();
        assert!((hit.near - 8.0).abs() < 1e-4);
        assert!((hit.far - 12.0).abs() < 1e-4);
        assert!((hit.chord() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_from_inside_starts_at_zero() {
        let circle = Circle::new(Vec2::new(1.0, 0.0), 5.0);
        let hit = ray_circle(Vec2::ZERO, Vec2::X, &circle).unwrap();
        assert_eq!(hit.near, 0.0);
        assert!((hit.far - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_misses() {
        let circle = Circle::new(Vec2::new(10.0, 5.0), 2.0);
        assert!(ray_circle(Vec2::ZERO, Vec2::X, &circle).is_none());

        // Behind the origin.
        let behind = Circle::new(Vec2::new(-10.0, 0.0), 2.0);
        assert!(ray_circle(Vec2::ZERO, Vec2::X, &behind).is_none());
    }

    #[test]
    fn test_degenerate_triangles() {
        assert!(is_degenerate(Vec2::ZERO, Vec2::ZERO, Vec2::X));
        assert!(is_degenerate(Vec2::ZERO, Vec2::X, Vec2::new(2.0, 0.0)));
        assert!(!is_degenerate(Vec2::ZERO, Vec2::X, Vec2::Y));
    }

    #[test]
    fn test_circle_triangle_overlap() {
        let (a, b, c) = (Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0));

        // Center inside.
        assert!(circle_intersects_triangle(
            &Circle::new(Vec2::new(2.0, 2.0), 0.1),
            a,
            b,
            c
        ));
        // Touching the hypotenuse from outside.
        assert!(circle_intersects_triangle(
            &Circle::new(Vec2::new(6.0, 6.0), 1.5),
            a,
            b,
            c
        ));
        // Clear of every edge.
        assert!(!circle_intersects_triangle(
            &Circle::new(Vec2::new(8.0, 8.0), 1.0),
            a,
            b,
            c
        ));
    }
}
