//! Stateless 2D geometry: predicates, intersections, triangle centres and closest points.
//!
//! Everything here is `f32` with absolute tolerance [`EPSILON`](crate::core::config::EPSILON).
//! Degenerate inputs (parallel lines, zero-area triangles) yield `None` rather than a sentinel.

use crate::core::prelude::*;
use crate::util::gg_float;

pub mod ellipse;
pub mod polygon;
pub mod raycast;
pub mod support;

pub fn is_collinear(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (a - b).cross(a - c).abs() < EPSILON
}

/// Inclusive at both ends.
pub fn judge_range(val: f32, low: f32, high: f32) -> bool {
    low <= val && val <= high
}

/// Checks whether `target` lies within the bounding rectangle of `a` and `b`, widened by
/// [`EPSILON`] on every side. Combined with [`is_collinear`], this places a point on a segment.
pub fn is_fuzzy_collinear(a: Vec2, b: Vec2, target: Vec2) -> bool {
    let bounds = Rect::from_coords(a, b);
    judge_range(target.x, bounds.left() - EPSILON, bounds.right() + EPSILON)
        && judge_range(target.y, bounds.bottom() - EPSILON, bounds.top() + EPSILON)
}

/// # Examples
/// ```
/// use glongge_narrowphase::geom;
/// use glongge_narrowphase::util::linalg::Vec2;
///
/// let a = Vec2::zero();
/// let b = Vec2 { x: 4.0, y: 0.0 };
/// assert!(geom::is_point_on_segment(a, b, Vec2 { x: 2.0, y: 0.0 }));
/// assert!(!geom::is_point_on_segment(a, b, Vec2 { x: 2.0, y: 1.0 }));
/// ```
pub fn is_point_on_segment(a: Vec2, b: Vec2, target: Vec2) -> bool {
    is_collinear(a, b, target) && is_fuzzy_collinear(a, b, target)
}

/// Checks whether `reference` and `target` lie on the same side of the line through `e1` and
/// `e2`. A point within [`EPSILON`] of the line has its own "side", so a point on the line is
/// only on the same side as another point on the line.
pub fn is_point_on_same_side(e1: Vec2, e2: Vec2, reference: Vec2, target: Vec2) -> bool {
    let edge = e1 - e2;
    gg_float::sign_eps(edge.cross(reference - e1)) == gg_float::sign_eps(edge.cross(target - e1))
}

/// Checks whether the origin lies inside or on the triangle `abc`, for either winding.
pub fn is_triangle_contain_origin(a: Vec2, b: Vec2, c: Vec2) -> bool {
    let ra = (b - a).cross(-a);
    let rb = (c - b).cross(-b);
    let rc = (a - c).cross(-c);
    (ra >= 0.0 && rb >= 0.0 && rc >= 0.0) || (ra <= 0.0 && rb <= 0.0 && rc <= 0.0)
}

/// Intersects the segments `ab` and `cd`.
///
/// Returns the crossing point for a proper crossing, or the shared endpoint when an endpoint of
/// one segment lies on the other. Parallel segments (including collinear, overlapping ones) have
/// no single intersection point and return `None`. The result does not depend on which segment
/// is passed first.
pub fn line_segment_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    let ab = b - a;
    let cd = d - c;
    let denominator = cd.cross(ab);
    if denominator.abs() < EPSILON {
        return None;
    }

    let d1 = ab.cross(c - a);
    let d2 = ab.cross(d - a);
    let d3 = cd.cross(a - c);
    let d4 = cd.cross(b - c);
    if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
        return Some(c + (d1 / denominator) * cd);
    }

    [(a, b, c), (a, b, d), (c, d, a), (c, d, b)]
        .into_iter()
        .find(|&(u, v, p)| is_point_on_segment(u, v, p))
        .map(|(_, _, p)| p)
}

/// Intersects the infinite lines through `ab` and `cd`; `None` if they are parallel.
pub fn line_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    let line_a = b - a;
    let line_b = d - c;
    let denominator = line_b.cross(line_a);
    if denominator.abs() < EPSILON {
        return None;
    }
    let t = line_a.cross(c - a) / denominator;
    Some(c + t * line_b)
}

pub fn triangle_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (a - b).cross(a - c).abs() / 2.0
}

pub fn triangle_centroid(a: Vec2, b: Vec2, c: Vec2) -> Vec2 {
    (a + b + c) / 3.0
}

/// The point equidistant from all three vertices, found by solving
/// ```text
/// | 2(b - a) |       | |b|² - |a|² |
/// | 2(c - b) | * p = | |c|² - |b|² |
/// ```
/// `None` for a degenerate triangle.
pub fn triangle_circum_center(a: Vec2, b: Vec2, c: Vec2) -> Option<Vec2> {
    if triangle_area(a, b, c) < EPSILON {
        return None;
    }
    let ab = (b - a) * 2.0;
    let bc = (c - b) * 2.0;
    let system = Mat2x2::new(ab.x, ab.y, bc.x, bc.y).inverse()?;
    let rhs = Vec2 {
        x: b.len_squared() - a.len_squared(),
        y: c.len_squared() - b.len_squared(),
    };
    Some(system * rhs)
}

/// The centre of the incircle: the vertices weighted by the lengths of their opposite sides.
/// `None` for a degenerate triangle.
pub fn triangle_inscribed_center(a: Vec2, b: Vec2, c: Vec2) -> Option<Vec2> {
    if triangle_area(a, b, c) < EPSILON {
        return None;
    }
    let ab = a.dist(b);
    let bc = b.dist(c);
    let ca = c.dist(a);
    Some((c * ab + a * bc + b * ca) / (ab + bc + ca))
}

/// Returns the circumcircle as `(centre, radius)`.
pub fn calc_circum_center(a: Vec2, b: Vec2, c: Vec2) -> Option<(Vec2, f32)> {
    let centre = triangle_circum_center(a, b, c)?;
    Some((centre, centre.dist(a)))
}

/// Returns the incircle as `(centre, radius)`.
pub fn calc_inscribed_center(a: Vec2, b: Vec2, c: Vec2) -> Option<(Vec2, f32)> {
    let centre = triangle_inscribed_center(a, b, c)?;
    let perimeter = a.dist(b) + b.dist(c) + c.dist(a);
    Some((centre, 2.0 * triangle_area(a, b, c) / perimeter))
}

/// Returns the point of segment `ab` nearest to `p`.
///
/// A segment shorter than [`EPSILON`] is treated as the point `a`. Applying this to its own
/// result returns the same point.
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    if ab.len() < EPSILON {
        return a;
    }
    let nearer_endpoint = || if p.dist_squared(a) <= p.dist_squared(b) { a } else { b };
    if is_collinear(a, b, p) {
        return if is_fuzzy_collinear(a, b, p) {
            p
        } else {
            nearer_endpoint()
        };
    }
    let t = (p - a).dot(ab) / ab.len_squared();
    if judge_range(t, 0.0, 1.0) {
        a + t * ab
    } else {
        nearer_endpoint()
    }
}

/// Rotates `p` counter-clockwise about `centre`.
pub fn rotate(p: Vec2, centre: Vec2, radians: f32) -> Vec2 {
    Mat2x2::rotation(radians) * (p - centre) + centre
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f32::consts::FRAC_PI_2;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    #[test]
    fn point_on_segment() {
        assert!(is_point_on_segment(v(0.0, 0.0), v(4.0, 0.0), v(2.0, 0.0)));
        assert!(!is_point_on_segment(v(0.0, 0.0), v(4.0, 0.0), v(2.0, 1.0)));
        assert!(!is_point_on_segment(v(0.0, 0.0), v(4.0, 0.0), v(5.0, 0.0)));
        assert!(is_point_on_segment(v(0.0, 0.0), v(4.0, 0.0), v(4.0, 0.0)));
        assert!(is_point_on_segment(v(1.0, 1.0), v(-1.0, -1.0), v(0.5, 0.5)));
    }

    #[test]
    fn same_side() {
        let (e1, e2) = (v(0.0, 0.0), v(1.0, 0.0));
        assert!(is_point_on_same_side(e1, e2, v(0.0, 1.0), v(5.0, 3.0)));
        assert!(!is_point_on_same_side(e1, e2, v(0.0, 1.0), v(5.0, -3.0)));
        assert!(!is_point_on_same_side(e1, e2, v(0.0, 1.0), v(5.0, 0.0)));
    }

    #[test]
    fn triangle_contains_origin() {
        assert!(is_triangle_contain_origin(v(-1.0, -1.0), v(1.0, -1.0), v(0.0, 1.0)));
        assert!(is_triangle_contain_origin(v(0.0, 1.0), v(1.0, -1.0), v(-1.0, -1.0)));
        assert!(is_triangle_contain_origin(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)));
        assert!(!is_triangle_contain_origin(v(1.0, 1.0), v(2.0, 1.0), v(1.0, 2.0)));
    }

    #[test]
    fn segments_crossing() {
        let p = line_segment_intersection(v(-1.0, 0.0), v(1.0, 0.0), v(0.0, -1.0), v(0.0, 1.0));
        assert_eq!(p, Some(v(0.0, 0.0)));
        let p = line_segment_intersection(v(0.0, 0.0), v(4.0, 4.0), v(0.0, 4.0), v(4.0, 0.0));
        assert_eq!(p, Some(v(2.0, 2.0)));
        let p = line_segment_intersection(v(0.0, 0.0), v(1.0, 0.0), v(2.0, -1.0), v(2.0, 1.0));
        assert_eq!(p, None);
    }

    #[test]
    fn segments_touching() {
        // T-junction: c lies on ab.
        let p = line_segment_intersection(v(-1.0, 0.0), v(1.0, 0.0), v(0.5, 0.0), v(0.5, 2.0));
        assert_eq!(p, Some(v(0.5, 0.0)));
        // Shared endpoint.
        let p = line_segment_intersection(v(0.0, 0.0), v(1.0, 1.0), v(1.0, 1.0), v(2.0, 0.0));
        assert_eq!(p, Some(v(1.0, 1.0)));
    }

    #[test]
    fn segments_parallel_or_collinear() {
        let p = line_segment_intersection(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0), v(1.0, 1.0));
        assert_eq!(p, None);
        let p = line_segment_intersection(v(0.0, 0.0), v(2.0, 0.0), v(1.0, 0.0), v(3.0, 0.0));
        assert_eq!(p, None);
    }

    #[test]
    fn segment_intersection_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut point = || v(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        for _ in 0..500 {
            let (a, b, c, d) = (point(), point(), point(), point());
            match (
                line_segment_intersection(a, b, c, d),
                line_segment_intersection(c, d, a, b),
            ) {
                (None, None) => {}
                (Some(p), Some(q)) => assert!(p.dist(q) < 1e-3, "{p} vs. {q}"),
                (p, q) => panic!("asymmetric: {p:?} vs. {q:?}"),
            }
        }
    }

    #[test]
    fn lines_intersect_unless_parallel() {
        assert_eq!(
            line_intersection(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0), v(1.0, 1.0)),
            None
        );
        assert_eq!(
            line_intersection(v(0.0, 0.0), v(1.0, 0.0), v(3.0, 1.0), v(3.0, 2.0)),
            Some(v(3.0, 0.0))
        );
        assert_eq!(
            line_intersection(v(0.0, 0.0), v(1.0, 1.0), v(0.0, 2.0), v(1.0, 1.0)),
            Some(v(1.0, 1.0))
        );
    }

    #[test]
    fn right_triangle_circles() {
        let (a, b, c) = (v(0.0, 0.0), v(4.0, 0.0), v(0.0, 3.0));
        assert_eq!(triangle_area(a, b, c), 6.0);
        assert_eq!(triangle_centroid(a, b, c), v(4.0 / 3.0, 1.0));

        let (centre, radius) = calc_circum_center(a, b, c).unwrap();
        assert_eq!(centre, v(2.0, 1.5));
        assert!((radius - 2.5).abs() < EPSILON);

        let (centre, radius) = calc_inscribed_center(a, b, c).unwrap();
        assert_eq!(centre, v(1.0, 1.0));
        assert!((radius - 1.0).abs() < EPSILON);
    }

    #[test]
    fn degenerate_triangle_has_no_circles() {
        let (a, b, c) = (v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0));
        assert_eq!(triangle_circum_center(a, b, c), None);
        assert_eq!(calc_inscribed_center(a, b, c), None);
    }

    #[test]
    fn closest_point_cases() {
        let (a, b) = (v(0.0, 0.0), v(4.0, 0.0));
        assert_eq!(closest_point_on_segment(a, b, v(1.0, 3.0)), v(1.0, 0.0));
        assert_eq!(closest_point_on_segment(a, b, v(-2.0, 3.0)), a);
        assert_eq!(closest_point_on_segment(a, b, v(7.0, -1.0)), b);
        assert_eq!(closest_point_on_segment(a, b, v(6.0, 0.0)), b);
        assert_eq!(closest_point_on_segment(a, b, v(3.0, 0.0)), v(3.0, 0.0));
        assert_eq!(closest_point_on_segment(a, a, v(3.0, 3.0)), a);
    }

    #[test]
    fn closest_point_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut point = || v(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        for _ in 0..200 {
            let (a, b, p) = (point(), point(), point());
            let q = closest_point_on_segment(a, b, p);
            assert!(closest_point_on_segment(a, b, q).dist(q) < 1e-4);
        }
    }

    #[test]
    fn rotate_about_centre() {
        let p = rotate(v(2.0, 1.0), v(1.0, 1.0), FRAC_PI_2);
        assert_eq!(p, v(1.0, 2.0));
    }
}
