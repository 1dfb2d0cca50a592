use crate::core::prelude::*;
use crate::geom;
use crate::util::gg_float;

/// Convex hull by Graham scan.
///
/// The pivot is the lowest point (smallest y, then smallest x); the remaining points are sorted
/// counter-clockwise around it, nearer points first on ties. Returns an open, counter-clockwise
/// polygon without repeated or collinear vertices. Fewer than three distinct points are returned
/// deduplicated, in sorted order.
///
/// # Examples
/// ```
/// use glongge_narrowphase::geom::polygon;
/// use glongge_narrowphase::util::linalg::Vec2;
///
/// let hull = polygon::graham_scan(&[
///     Vec2 { x: 0.0, y: 0.0 },
///     Vec2 { x: 1.0, y: 1.0 },
///     Vec2 { x: 2.0, y: 0.0 },
///     Vec2 { x: 1.0, y: 0.2 },
///     Vec2 { x: 1.0, y: -1.0 },
/// ]);
/// assert_eq!(hull.len(), 4);
/// assert_eq!(hull[0], Vec2 { x: 1.0, y: -1.0 });
/// ```
pub fn graham_scan(points: &[Vec2]) -> Vec<Vec2> {
    // Exact keys only: the tolerant `Vec2` equality is not a total order.
    let mut points = points
        .iter()
        .copied()
        .sorted_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
        .dedup()
        .collect_vec();
    if points.len() < 3 {
        return points;
    }

    let Some(pivot_index) = points
        .iter()
        .position_min_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
    else {
        return points;
    };
    let pivot = points.swap_remove(pivot_index);
    let by_orientation = points
        .into_iter()
        .map(|p| ((p - pivot).angle(), pivot.dist_squared(p), p))
        .sorted_by(|(angle_u, dist_u, _), (angle_v, dist_v, _)| {
            angle_u.total_cmp(angle_v).then(dist_u.total_cmp(dist_v))
        })
        .map(|(_, _, p)| p);

    let mut hull = vec![pivot];
    'next_vertex: for vertex in by_orientation {
        while hull.len() >= 2 {
            let last = hull[hull.len() - 1];
            let snd_last = hull[hull.len() - 2];
            let edge = last - snd_last;
            let turn = edge.cross(vertex - snd_last);
            if turn > EPSILON {
                break;
            }
            // Nearly collinear and short of `last`: `vertex` adds nothing to the hull.
            if turn >= -EPSILON && (vertex - snd_last).dot(edge) < edge.len_squared() {
                continue 'next_vertex;
            }
            hull.pop();
        }
        hull.push(vertex);
    }
    hull
}

/// Checks that every turn of the open polygon has the same orientation. Turns within
/// [`EPSILON`] of straight are ignored; a polygon with no real turn at all is not convex.
pub fn is_convex(vertices: &[Vec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let turns = vertices
        .iter()
        .circular_tuple_windows()
        .map(|(&u, &v, &w)| gg_float::sign_eps((v - u).cross(w - v)))
        .filter(|&turn| turn != 0)
        .collect_vec();
    !turns.is_empty() && turns.iter().all_equal()
}

/// Area-weighted centroid of an open polygon, for either winding. `None` for fewer than three
/// vertices or zero area.
pub fn mass_centre(vertices: &[Vec2]) -> Option<Vec2> {
    if vertices.len() < 3 {
        return None;
    }
    let (area, x, y) = vertices
        .iter()
        .circular_tuple_windows()
        .map(|(&u, &v)| {
            let area = u.cross(v);
            (area, (u.x + v.x) * area, (u.y + v.y) * area)
        })
        .fold((0.0, 0.0, 0.0), |(a0, x0, y0), (a1, x1, y1)| {
            (a0 + a1, x0 + x1, y0 + y1)
        });
    if area.abs() < EPSILON {
        return None;
    }
    // `area` is twice the signed area.
    Some(Vec2 {
        x: x / (3.0 * area),
        y: y / (3.0 * area),
    })
}

// Inside the half-plane bounded by the line e1-e2 that contains `interior`, or on the line.
fn is_inside_edge(e1: Vec2, e2: Vec2, interior: Vec2, p: Vec2) -> bool {
    geom::is_point_on_same_side(e1, e2, interior, p)
        || gg_float::sign_eps((e1 - e2).cross(p - e1)) == 0
}

/// Inclusive point-in-convex-polygon test, for either winding.
pub fn contains_point(vertices: &[Vec2], p: Vec2) -> bool {
    vertices.len() >= 3
        && vertices
            .iter()
            .circular_tuple_windows()
            .all(|(&e1, &e2, &interior)| is_inside_edge(e1, e2, interior, p))
}

/// Sutherland-Hodgman clipping of `subject` against the convex polygon `clip_region`.
///
/// Each clip edge `(clip[i], clip[i + 1])` keeps the half-plane containing `clip[i + 2]`; points
/// on the edge line are kept. Both polygons are open; the result is open and may be empty.
pub fn sutherland_hodgman(subject: &[Vec2], clip_region: &[Vec2]) -> Vec<Vec2> {
    let n = clip_region.len();
    if n < 3 {
        return Vec::new();
    }
    let mut output = subject.to_vec();
    for i in 0..n {
        if output.is_empty() {
            break;
        }
        let e1 = clip_region[i];
        let e2 = clip_region[(i + 1) % n];
        let interior = clip_region[(i + 2) % n];
        let is_inside = |p: Vec2| is_inside_edge(e1, e2, interior, p);

        let input = std::mem::take(&mut output);
        for (j, &current) in input.iter().enumerate() {
            let previous = input[(j + input.len() - 1) % input.len()];
            match (is_inside(previous), is_inside(current)) {
                (true, true) => output.push(current),
                (false, true) => {
                    if let Some(p) = geom::line_intersection(previous, current, e1, e2) {
                        output.push(p);
                    }
                    output.push(current);
                }
                (true, false) => {
                    if let Some(p) = geom::line_intersection(previous, current, e1, e2) {
                        output.push(p);
                    }
                }
                (false, false) => {}
            }
        }
    }
    output
}
