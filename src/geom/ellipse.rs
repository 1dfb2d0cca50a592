//! Closest-point queries against an origin-centred, axis-aligned ellipse `x²/a² + y²/b² = 1`.

use crate::core::prelude::*;
use crate::geom;
use crate::warn_every_seconds;

/// Returns the point of the ellipse with semi-axes `a` (along x) and `b` (along y) nearest to
/// `p`, or `None` if either semi-axis is within [`EPSILON`] of zero.
///
/// Points on an axis are answered in closed form. Otherwise this bisects on x within the
/// quadrant of `p`, steering by the sign of `tangent · (p - candidate)`, and stops once that
/// residual is within [`EPSILON`] or after [`MAX_ELLIPSE_ITERATIONS`] steps (returning the best
/// candidate seen). Intended for points outside the ellipse.
///
/// # Examples
/// ```
/// use glongge_narrowphase::geom::ellipse;
/// use glongge_narrowphase::util::linalg::Vec2;
///
/// let nearest = ellipse::closest_point(2.0, 1.0, Vec2 { x: 0.0, y: 5.0 });
/// assert_eq!(nearest, Some(Vec2 { x: 0.0, y: 1.0 }));
/// ```
pub fn closest_point(a: f32, b: f32, p: Vec2) -> Option<Vec2> {
    if a.abs() < EPSILON || b.abs() < EPSILON {
        return None;
    }
    if p.x.abs() < EPSILON {
        let y = if p.y >= 0.0 { b } else { -b };
        return Some(Vec2 { x: 0.0, y });
    }
    if p.y.abs() < EPSILON {
        let x = if p.x >= 0.0 { a } else { -a };
        return Some(Vec2 { x, y: 0.0 });
    }

    let sgn = p.y.signum();
    let on_ellipse = |x: f32| Vec2 {
        x,
        y: sgn * (b * b - (b / a).powi(2) * x * x).max(0.0).sqrt(),
    };
    // The tangent is oriented towards increasing x along this half of the ellipse.
    let residual = |t0: Vec2| {
        let tangent = sgn
            * Vec2 {
                x: t0.y / (b * b),
                y: -t0.x / (a * a),
            };
        tangent.dot(p - t0)
    };

    let (mut x_left, mut x_right) = if p.x > 0.0 { (0.0, a) } else { (-a, 0.0) };
    let mut best: Option<(f32, Vec2)> = None;
    for _ in 0..MAX_ELLIPSE_ITERATIONS {
        let x0 = (x_left + x_right) / 2.0;
        let t0 = on_ellipse(x0);
        let res = residual(t0);
        if res.abs() < EPSILON {
            return Some(t0);
        }
        if best.map_or(true, |(best_res, _)| res.abs() < best_res) {
            best = Some((res.abs(), t0));
        }
        if res > 0.0 {
            x_left = x0;
        } else {
            x_right = x0;
        }
    }
    warn_every_seconds!(
        LOG_REPEAT_INTERVAL_SECS,
        "ellipse::closest_point({a}, {b}, {p}): no convergence after {MAX_ELLIPSE_ITERATIONS} steps"
    );
    best.map(|(_, t0)| t0)
}

/// Returns `(point_on_ellipse, point_on_segment)` realising the shortest distance between the
/// ellipse with semi-axes `a`, `b` and the segment `cd`, which is assumed not to cut the ellipse.
/// `None` if either semi-axis is within [`EPSILON`] of zero.
pub fn closest_points_to_segment(a: f32, b: f32, c: Vec2, d: Vec2) -> Option<(Vec2, Vec2)> {
    if a.abs() < EPSILON || b.abs() < EPSILON {
        return None;
    }
    let straddles = |u: f32, v: f32| !(u > 0.0 && v > 0.0 || u < 0.0 && v < 0.0);

    if (c.y - d.y).abs() < EPSILON {
        if straddles(c.x, d.x) {
            let y = if c.y > 0.0 { b } else { -b };
            return Some((Vec2 { x: 0.0, y }, Vec2 { x: 0.0, y: c.y }));
        }
        let x = if c.x.abs() < d.x.abs() { c.x } else { d.x };
        let on_segment = Vec2 { x, y: c.y };
        return Some((closest_point(a, b, on_segment)?, on_segment));
    }
    if (c.x - d.x).abs() < EPSILON {
        if straddles(c.y, d.y) {
            let x = if c.x > 0.0 { a } else { -a };
            return Some((Vec2 { x, y: 0.0 }, Vec2 { x: c.x, y: 0.0 }));
        }
        let y = if c.y.abs() < d.y.abs() { c.y } else { d.y };
        let on_segment = Vec2 { x: c.x, y };
        return Some((closest_point(a, b, on_segment)?, on_segment));
    }

    // Tangent points for slope k satisfy x² = k²a⁴ / (b² + a²k²).
    let k = (d.y - c.y) / (d.x - c.x);
    let (a2, b2, k2) = (a * a, b * b, k * k);
    let fx = (k2 * a2 * a2 / (b2 + a2 * k2)).sqrt();
    let fy = (b2 * (1.0 - fx * fx / a2)).max(0.0).sqrt();

    // Orient the segment so that the ellipse centre is on its left; the nearest candidate is
    // then the one furthest to the right.
    let dir = (d - c).normed();
    let dir = if dir.cross(-c) < 0.0 { -dir } else { dir };
    let f = [(fx, fy), (-fx, fy), (-fx, -fy), (fx, -fy)]
        .into_iter()
        .map(|(x, y)| Vec2 { x, y })
        .min_by(|u, v| dir.cross(*u - c).total_cmp(&dir.cross(*v - c)))?;

    let f_proj = c + dir * dir.dot(f - c);
    if geom::is_fuzzy_collinear(c, d, f_proj) {
        return Some((f, f_proj));
    }
    let from_c = closest_point(a, b, c)?;
    let from_d = closest_point(a, b, d)?;
    if c.dist_squared(from_c) > d.dist_squared(from_d) {
        Some((from_d, d))
    } else {
        Some((from_c, c))
    }
}
