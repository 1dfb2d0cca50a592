use crate::core::prelude::*;
use crate::geom;

/// Casts a ray from `start` along `direction` (a vector, not a target point) against segment
/// `cd`. Returns the hit point, or `None` on a miss or if the ray is parallel to the segment.
///
/// # Examples
/// ```
/// use glongge_narrowphase::geom::raycast;
/// use glongge_narrowphase::util::linalg::Vec2;
///
/// let hit = raycast::raycast(
///     Vec2::zero(),
///     Vec2::right(),
///     Vec2 { x: 2.0, y: -1.0 },
///     Vec2 { x: 2.0, y: 1.0 },
/// );
/// assert_eq!(hit, Some(Vec2 { x: 2.0, y: 0.0 }));
/// ```
pub fn raycast(start: Vec2, direction: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    let edge = d - c;
    let denominator = direction.cross(edge);
    if denominator.abs() < EPSILON {
        return None;
    }
    let to_segment = c - start;
    let t = to_segment.cross(edge) / denominator;
    let u = to_segment.cross(direction) / denominator;
    if t >= 0.0 && geom::judge_range(u, 0.0, 1.0) {
        Some(start + t * direction)
    } else {
        None
    }
}

fn slab(origin: f32, direction: f32, low: f32, high: f32) -> (f32, f32) {
    let t_low = (low - origin) / direction;
    let t_high = (high - origin) / direction;
    (t_low.min(t_high), t_low.max(t_high))
}

/// Casts a ray against an axis-aligned box using the slab method.
///
/// Returns `(entry, exit)`. If `start` is inside the box, the entry point is `start` itself.
/// `None` for a zero direction, a miss, or a box entirely behind the ray.
pub fn raycast_aabb(start: Vec2, direction: Vec2, aabb: &Rect) -> Option<(Vec2, Vec2)> {
    let x_fixed = direction.x.abs() < EPSILON;
    let y_fixed = direction.y.abs() < EPSILON;
    let (t_enter, t_exit) = match (x_fixed, y_fixed) {
        (true, true) => return None,
        (true, false) => {
            if !geom::judge_range(start.x, aabb.left(), aabb.right()) {
                return None;
            }
            slab(start.y, direction.y, aabb.bottom(), aabb.top())
        }
        (false, true) => {
            if !geom::judge_range(start.y, aabb.bottom(), aabb.top()) {
                return None;
            }
            slab(start.x, direction.x, aabb.left(), aabb.right())
        }
        (false, false) => {
            let (tx_enter, tx_exit) = slab(start.x, direction.x, aabb.left(), aabb.right());
            let (ty_enter, ty_exit) = slab(start.y, direction.y, aabb.bottom(), aabb.top());
            (tx_enter.max(ty_enter), tx_exit.min(ty_exit))
        }
    };
    if t_enter > t_exit || t_exit < 0.0 {
        return None;
    }
    let t_enter = t_enter.max(0.0);
    Some((start + t_enter * direction, start + t_exit * direction))
}

pub fn is_point_on_aabb(p: Vec2, aabb: &Rect) -> bool {
    aabb.contains_point(p)
}
