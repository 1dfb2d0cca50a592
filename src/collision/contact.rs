//! Contact manifolds by reference/incident edge clipping.
//!
//! Given two overlapping shapes and the collision normal (pointing from `b` towards `a`), each
//! shape contributes the edge of its outline that faces the other. The edge more perpendicular to
//! the normal becomes the reference edge; the other, the incident edge, is clipped against the
//! reference edge's side planes and front plane. What survives is paired with the nearest points
//! of the reference edge, giving at most two contact point pairs.

use crate::core::prelude::*;
use crate::geom;
use crate::shape::{Shape, ShapeError, ShapePrimitive};
use crate::util::gg_float::GgFloat;
use serde::{Deserialize, Serialize};

/// A world-space edge of a shape outline, with its outward unit normal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipEdge {
    pub p1: Vec2,
    pub p2: Vec2,
    pub normal: Vec2,
}

impl ClipEdge {
    pub fn direction(&self) -> Vec2 {
        self.p2 - self.p1
    }

    // How closely the edge runs along `normal`: 0 when perpendicular, 1 when parallel.
    fn alignment(&self, normal: Vec2) -> f32 {
        self.direction().normed().dot(normal).abs()
    }
}

/// Matched contact points, one on each shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointPair {
    pub point_on_a: Vec2,
    pub point_on_b: Vec2,
}

/// Builds contact manifolds. The support query picks the extreme vertex each clip edge is built
/// around.
///
/// # Examples
/// ```
/// use glongge_narrowphase::collision::contact::ContactGenerator;
/// use glongge_narrowphase::shape::{Polygon, ShapePrimitive};
/// use glongge_narrowphase::util::linalg::{Transform, Vec2};
///
/// let a = ShapePrimitive::new(
///     Polygon::rectangle(1.0, 1.0)?,
///     Transform::with_centre(Vec2 { x: 0.5, y: 0.0 }),
/// );
/// let b = ShapePrimitive::new(Polygon::rectangle(1.0, 1.0)?, Transform::default());
/// let pairs = ContactGenerator::new().generate(&a, &b, Vec2::right())?;
/// assert_eq!(pairs.len(), 2);
/// # Ok::<(), glongge_narrowphase::shape::ShapeError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ContactGenerator<S: SupportQuery = FarthestPoint> {
    support: S,
}

impl ContactGenerator<FarthestPoint> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SupportQuery> ContactGenerator<S> {
    pub fn with_support_query(support: S) -> Self {
        Self { support }
    }

    /// World-space vertices of the outline a clip edge can come from: the inner box of a
    /// capsule, a polygon's vertices, an edge's endpoints, or a sector's apex and arc ends.
    /// A capsule as wide as it is tall is a disc and has no such outline.
    pub fn dump_vertices(&self, primitive: &ShapePrimitive) -> Result<Vec<Vec2>, ShapeError> {
        let local = match &primitive.shape {
            Shape::Capsule(capsule) if capsule.has_edge() => capsule.box_vertices().to_vec(),
            Shape::Polygon(polygon) => polygon.vertices().to_vec(),
            Shape::Edge(edge) => vec![edge.start(), edge.end()],
            Shape::Sector(sector) => sector.vertices().to_vec(),
            shape @ (Shape::Point(_)
            | Shape::Circle(_)
            | Shape::Ellipse(_)
            | Shape::Capsule(_)) => {
                return Err(ShapeError::Edgeless(shape.name()));
            }
        };
        let world = local
            .into_iter()
            .map(|vertex| primitive.to_world(vertex))
            .collect_vec();
        if world.iter().all(GgFloat::is_finite) {
            Ok(world)
        } else {
            Err(ShapeError::NonFinite("world-space vertex"))
        }
    }

    /// Picks whichever edge adjacent to `vertices[pivot]` is less aligned with `normal`, and
    /// orients its normal away from the rest of the outline, or along `normal` if every vertex
    /// lies on the edge's line. `None` for fewer than three vertices or an out-of-range pivot.
    pub fn find_clip_edge(
        &self,
        vertices: &[Vec2],
        pivot: usize,
        normal: Vec2,
    ) -> Option<ClipEdge> {
        let n = vertices.len();
        if n < 3 || pivot >= n {
            return None;
        }
        let prev = vertices[(pivot + n - 1) % n];
        let current = vertices[pivot];
        let next = vertices[(pivot + 1) % n];

        let alignment = |from: Vec2, to: Vec2| {
            let direction = to - from;
            if direction.len() < EPSILON {
                f32::INFINITY
            } else {
                direction.normed().dot(normal).abs()
            }
        };
        let (p1, p2, mut interior) = if alignment(prev, current) <= alignment(current, next) {
            (prev, current, next)
        } else {
            (current, next, prev)
        };
        if geom::is_collinear(p1, p2, interior) {
            interior = vertices.iter().copied().sum::<Vec2>() / n as f32;
        }

        let mut edge_normal = (p2 - p1).orthog().normed();
        let faces_inward = if geom::is_collinear(p1, p2, interior) {
            // The whole outline lies on the edge's line: face the search direction.
            edge_normal.dot(normal) < 0.0
        } else {
            geom::is_point_on_same_side(p1, p2, interior, p1 + edge_normal)
        };
        if faces_inward {
            edge_normal = -edge_normal;
        }
        Some(ClipEdge {
            p1,
            p2,
            normal: edge_normal,
        })
    }

    /// The clip edge of `primitive` facing along `normal`, given its world-space `vertices`.
    /// An [`Edge`](crate::shape::Edge) is its own clip edge, keeping its fixed normal.
    pub fn dump_clip_edge(
        &self,
        primitive: &ShapePrimitive,
        vertices: &[Vec2],
        normal: Vec2,
    ) -> Option<ClipEdge> {
        if let Shape::Edge(edge) = &primitive.shape {
            let &[p1, p2] = vertices else {
                return None;
            };
            return Some(ClipEdge {
                p1,
                p2,
                normal: primitive.transform.apply_direction(edge.normal()),
            });
        }
        let (_, pivot) = self.support.farthest_point(vertices, normal)?;
        self.find_clip_edge(vertices, pivot, normal)
    }

    /// Finds the clip edges of `a` (facing `-normal`) and `b` (facing `normal`). If either shape
    /// has no straight edges, neither edge is returned.
    pub fn recognize(
        &self,
        a: &ShapePrimitive,
        b: &ShapePrimitive,
        normal: Vec2,
    ) -> Result<(Option<ClipEdge>, Option<ClipEdge>), ShapeError> {
        if !a.shape.has_edge() || !b.shape.has_edge() {
            trace!(
                "recognize(): no clip edges for {} vs. {}",
                a.shape.name(),
                b.shape.name()
            );
            return Ok((None, None));
        }
        let vertices_a = self.dump_vertices(a)?;
        let vertices_b = self.dump_vertices(b)?;
        let edge_a = self.dump_clip_edge(a, &vertices_a, -normal);
        let edge_b = self.dump_clip_edge(b, &vertices_b, normal);
        trace!("recognize(): {edge_a:?} vs. {edge_b:?}");
        Ok((edge_a, edge_b))
    }

    /// Clips the incident edge against the reference edge and pairs up the surviving points.
    /// Returns at most two pairs, and none if either edge is missing.
    pub fn clip(
        &self,
        edge_a: Option<ClipEdge>,
        edge_b: Option<ClipEdge>,
        normal: Vec2,
    ) -> Vec<PointPair> {
        let (Some(edge_a), Some(edge_b)) = (edge_a, edge_b) else {
            return Vec::new();
        };
        let swapped = edge_b.alignment(normal) < edge_a.alignment(normal) - EPSILON;
        let (reference, incident) = if swapped {
            (edge_b, edge_a)
        } else {
            (edge_a, edge_b)
        };
        if reference.direction().len() < EPSILON {
            return Vec::new();
        }

        let Some((i1, i2)) = clip_to_side_planes(&reference, incident.p1, incident.p2) else {
            trace!("clip(): incident edge beside reference edge");
            return Vec::new();
        };
        let incident_points = clip_to_front_plane(&reference, i1, i2);

        let pairs = incident_points
            .into_iter()
            .map(|p| {
                let on_reference = geom::closest_point_on_segment(reference.p1, reference.p2, p);
                if swapped {
                    PointPair {
                        point_on_a: p,
                        point_on_b: on_reference,
                    }
                } else {
                    PointPair {
                        point_on_a: on_reference,
                        point_on_b: p,
                    }
                }
            })
            .collect_vec();
        check_le!(pairs.len(), 2);
        trace!("clip(): swapped={swapped}, {pairs:?}");
        pairs
    }

    /// [`recognize`](Self::recognize) followed by [`clip`](Self::clip).
    pub fn generate(
        &self,
        a: &ShapePrimitive,
        b: &ShapePrimitive,
        normal: Vec2,
    ) -> Result<Vec<PointPair>, ShapeError> {
        let (edge_a, edge_b) = self.recognize(a, b, normal)?;
        Ok(self.clip(edge_a, edge_b, normal))
    }
}

// Side planes run through each reference endpoint along the reference normal; the region between
// them is kept. `None` if the incident edge lies entirely outside either plane.
fn clip_to_side_planes(reference: &ClipEdge, mut i1: Vec2, mut i2: Vec2) -> Option<(Vec2, Vec2)> {
    for (from, to) in [(reference.p1, reference.p2), (reference.p2, reference.p1)] {
        let is_inside = |p: Vec2| (p - from).dot(to - from) >= -EPSILON;
        let side_plane = from + reference.normal;
        match (is_inside(i1), is_inside(i2)) {
            (true, true) => {}
            (false, false) => return None,
            (false, true) => i1 = geom::line_intersection(from, side_plane, i1, i2)?,
            (true, false) => i2 = geom::line_intersection(from, side_plane, i1, i2)?,
        }
    }
    Some((i1, i2))
}

// Points on the normal side of the reference edge are not touching it. One such point is pulled
// back onto the reference line; if both are, nothing is left.
fn clip_to_front_plane(reference: &ClipEdge, i1: Vec2, i2: Vec2) -> Vec<Vec2> {
    let outward = reference.p1 + reference.normal;
    let is_separated = |p: Vec2| geom::is_point_on_same_side(reference.p1, reference.p2, outward, p);
    let to_reference_line =
        |p: Vec2| geom::line_intersection(reference.p1, reference.p2, i1, i2).unwrap_or(p);
    match (is_separated(i1), is_separated(i2)) {
        (false, false) => vec![i1, i2],
        (true, true) => Vec::new(),
        (true, false) => vec![to_reference_line(i1), i2],
        (false, true) => vec![i1, to_reference_line(i2)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Capsule, Circle, Edge, Ellipse, Polygon, Sector};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::Cell;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    fn square_at(centre: Vec2, size: f32) -> ShapePrimitive {
        ShapePrimitive::new(
            Polygon::rectangle(size, size).unwrap(),
            Transform::with_centre(centre),
        )
    }

    fn pair(point_on_a: Vec2, point_on_b: Vec2) -> PointPair {
        PointPair {
            point_on_a,
            point_on_b,
        }
    }

    fn assert_same_pairs(actual: &[PointPair], expected: &[PointPair]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs. {expected:?}");
        for p in expected {
            assert!(
                actual.iter().any(|q| q.point_on_a.dist(p.point_on_a) < 1e-4
                    && q.point_on_b.dist(p.point_on_b) < 1e-4),
                "missing {p:?} in {actual:?}"
            );
        }
    }

    #[test]
    fn overlapping_unit_squares() {
        let a = square_at(v(0.5, 0.0), 1.0);
        let b = square_at(v(0.0, 0.0), 1.0);
        let generator = ContactGenerator::new();
        let pairs = generator.generate(&a, &b, v(1.0, 0.0)).unwrap();
        assert_eq!(
            pairs,
            vec![
                pair(v(0.0, -0.5), v(0.5, -0.5)),
                pair(v(0.0, 0.5), v(0.5, 0.5)),
            ]
        );
    }

    #[test]
    fn edge_against_square_face() {
        let a = ShapePrimitive::new(
            Edge::new(v(-2.0, 0.0), v(2.0, 0.0)).unwrap(),
            Transform::default(),
        );
        let b = square_at(v(0.0, -0.4), 1.0);
        let generator = ContactGenerator::new();

        let (edge_a, edge_b) = generator.recognize(&a, &b, v(0.0, 1.0)).unwrap();
        let edge_a = edge_a.unwrap();
        assert_eq!((edge_a.p1, edge_a.p2), (v(-2.0, 0.0), v(2.0, 0.0)));
        assert_eq!(edge_a.normal, v(0.0, -1.0));
        assert_eq!(edge_b.unwrap().normal, v(0.0, 1.0));

        let pairs = generator.clip(Some(edge_a), edge_b, v(0.0, 1.0));
        assert_same_pairs(
            &pairs,
            &[
                pair(v(0.5, 0.0), v(0.5, 0.1)),
                pair(v(-0.5, 0.0), v(-0.5, 0.1)),
            ],
        );
    }

    #[test]
    fn incident_clipped_to_reference_width() {
        let a = square_at(v(0.0, 0.9), 1.0);
        let b = ShapePrimitive::new(Polygon::rectangle(4.0, 1.0).unwrap(), Transform::default());
        let pairs = ContactGenerator::new()
            .generate(&a, &b, v(0.0, 1.0))
            .unwrap();
        assert_same_pairs(
            &pairs,
            &[
                pair(v(0.5, 0.4), v(0.5, 0.5)),
                pair(v(-0.5, 0.4), v(-0.5, 0.5)),
            ],
        );
    }

    #[test]
    fn tilted_edge_becomes_incident() {
        let a = ShapePrimitive::new(
            Polygon::rectangle(1.0, 1.0).unwrap(),
            Transform::new(v(0.0, 0.85), 0.1),
        );
        let b = ShapePrimitive::new(Polygon::rectangle(4.0, 1.0).unwrap(), Transform::default());
        let pairs = ContactGenerator::new()
            .generate(&a, &b, v(0.0, 1.0))
            .unwrap();
        assert_eq!(pairs.len(), 2);
        for PointPair {
            point_on_a,
            point_on_b,
        } in pairs
        {
            // b's top face is the reference: its points are projections of a's corners.
            assert!((point_on_b.y - 0.5).abs() < 1e-4);
            assert!((point_on_a.x - point_on_b.x).abs() < 1e-4);
            assert!(point_on_a.y < 0.5);
            assert!(a.contains(point_on_a));
        }
    }

    #[test]
    fn rotated_placements() {
        let angle = 0.3;
        let a = ShapePrimitive::new(
            Polygon::rectangle(1.0, 1.0).unwrap(),
            Transform::new(v(0.5, 0.0).rotated(angle), angle),
        );
        let b = ShapePrimitive::new(
            Polygon::rectangle(1.0, 1.0).unwrap(),
            Transform::with_rotation(angle),
        );
        let pairs = ContactGenerator::new()
            .generate(&a, &b, v(1.0, 0.0).rotated(angle))
            .unwrap();
        let expected = [
            pair(v(0.0, -0.5), v(0.5, -0.5)),
            pair(v(0.0, 0.5), v(0.5, 0.5)),
        ]
        .map(|p| pair(p.point_on_a.rotated(angle), p.point_on_b.rotated(angle)));
        assert_same_pairs(&pairs, &expected);
    }

    #[test]
    fn edgeless_shapes_short_circuit() {
        let circle = ShapePrimitive::new(Circle::new(1.0).unwrap(), Transform::default());
        let ellipse = ShapePrimitive::new(Ellipse::new(2.0, 1.0).unwrap(), Transform::default());
        let square = square_at(v(1.0, 0.0), 1.0);
        let generator = ContactGenerator::new();
        assert_eq!(
            generator.recognize(&square, &circle, v(1.0, 0.0)),
            Ok((None, None))
        );
        assert_eq!(
            generator.recognize(&ellipse, &square, v(1.0, 0.0)),
            Ok((None, None))
        );
        assert!(generator.generate(&circle, &square, v(1.0, 0.0)).unwrap().is_empty());
        assert_eq!(
            generator.dump_vertices(&circle),
            Err(ShapeError::Edgeless("circle"))
        );
    }

    #[test]
    fn non_finite_placement_is_rejected() {
        let square = ShapePrimitive::new(
            Polygon::rectangle(1.0, 1.0).unwrap(),
            Transform::with_centre(v(f32::NAN, 0.0)),
        );
        let other = square_at(Vec2::zero(), 1.0);
        let generator = ContactGenerator::new();
        assert!(matches!(
            generator.dump_vertices(&square),
            Err(ShapeError::NonFinite(_))
        ));
        assert!(generator.generate(&square, &other, v(1.0, 0.0)).is_err());
    }

    #[test]
    fn dump_vertices_of_each_outline() {
        let generator = ContactGenerator::new();
        let capsule = ShapePrimitive::new(
            Capsule::new(4.0, 2.0).unwrap(),
            Transform::with_centre(v(0.0, 10.0)),
        );
        assert_eq!(
            generator.dump_vertices(&capsule).unwrap(),
            vec![v(-1.0, 11.0), v(-1.0, 9.0), v(1.0, 9.0), v(1.0, 11.0)]
        );

        let sector = ShapePrimitive::new(
            Sector::new(0.0, FRAC_PI_2, 2.0).unwrap(),
            Transform::new(v(1.0, 1.0), PI),
        );
        assert_eq!(
            generator.dump_vertices(&sector).unwrap(),
            vec![v(1.0, 1.0), v(-1.0, 1.0), v(1.0, -1.0)]
        );

        let edge = ShapePrimitive::new(
            Edge::new(v(0.0, 0.0), v(1.0, 0.0)).unwrap(),
            Transform::with_rotation(FRAC_PI_2),
        );
        assert_eq!(
            generator.dump_vertices(&edge).unwrap(),
            vec![v(0.0, 0.0), v(0.0, 1.0)]
        );
    }

    #[test]
    fn find_clip_edge_orients_normal_outwards() {
        let generator = ContactGenerator::new();
        let square = [v(-1.0, -1.0), v(1.0, -1.0), v(1.0, 1.0), v(-1.0, 1.0)];
        let clockwise = [square[3], square[2], square[1], square[0]];

        let edge = generator.find_clip_edge(&square, 2, v(1.0, 0.1)).unwrap();
        assert_eq!((edge.p1, edge.p2), (v(1.0, -1.0), v(1.0, 1.0)));
        assert_eq!(edge.normal, v(1.0, 0.0));

        let edge = generator.find_clip_edge(&clockwise, 1, v(1.0, 0.1)).unwrap();
        assert_eq!((edge.p1, edge.p2), (v(1.0, 1.0), v(1.0, -1.0)));
        assert_eq!(edge.normal, v(1.0, 0.0));

        let edge = generator.find_clip_edge(&square, 2, v(0.1, 1.0)).unwrap();
        assert_eq!((edge.p1, edge.p2), (v(1.0, 1.0), v(-1.0, 1.0)));
        assert_eq!(edge.normal, v(0.0, 1.0));

        assert_eq!(generator.find_clip_edge(&square[..2], 0, v(1.0, 0.0)), None);
        assert_eq!(generator.find_clip_edge(&square, 4, v(1.0, 0.0)), None);
    }

    #[test]
    fn sector_edge_faces_normal() {
        let generator = ContactGenerator::new();
        let sector = ShapePrimitive::new(
            Sector::new(0.0, FRAC_PI_2, 2.0).unwrap(),
            Transform::default(),
        );
        let vertices = generator.dump_vertices(&sector).unwrap();
        let edge = generator
            .dump_clip_edge(&sector, &vertices, v(0.1, -1.0))
            .unwrap();
        assert_eq!((edge.p1, edge.p2), (v(0.0, 0.0), v(2.0, 0.0)));
        assert_eq!(edge.normal, v(0.0, -1.0));
    }

    fn floor() -> ShapePrimitive {
        ShapePrimitive::new(Polygon::rectangle(4.0, 1.0).unwrap(), Transform::default())
    }

    fn assert_penetrating(pairs: &[PointPair], normal: Vec2, depth: f32) {
        for p in pairs {
            let separation = (p.point_on_a - p.point_on_b).dot(normal);
            assert!((separation + depth).abs() < 1e-4, "{p:?}: separation {separation}");
        }
    }

    #[test]
    fn capsule_resting_on_floor() {
        let capsule = ShapePrimitive::new(
            Capsule::new(3.0, 1.0).unwrap(),
            Transform::with_centre(v(0.0, 0.9)),
        );
        let pairs = ContactGenerator::new()
            .generate(&capsule, &floor(), v(0.0, 1.0))
            .unwrap();
        assert_same_pairs(
            &pairs,
            &[
                pair(v(1.0, 0.4), v(1.0, 0.5)),
                pair(v(-1.0, 0.4), v(-1.0, 0.5)),
            ],
        );
        assert_penetrating(&pairs, v(0.0, 1.0), 0.1);
    }

    #[test]
    fn half_disc_resting_on_floor() {
        let half_disc = ShapePrimitive::new(
            Sector::new(0.0, PI, 1.0).unwrap(),
            Transform::with_centre(v(0.0, 0.4)),
        );
        let generator = ContactGenerator::new();
        let (edge_a, edge_b) = generator.recognize(&half_disc, &floor(), v(0.0, 1.0)).unwrap();
        assert_eq!(edge_a.unwrap().normal, v(0.0, -1.0));
        assert_eq!(edge_b.unwrap().normal, v(0.0, 1.0));

        let pairs = generator.clip(edge_a, edge_b, v(0.0, 1.0));
        assert_eq!(pairs.len(), 2);
        assert_penetrating(&pairs, v(0.0, 1.0), 0.1);
        for p in pairs {
            assert!((-1.0 - 1e-4..=1.0 + 1e-4).contains(&p.point_on_a.x));
            assert!((p.point_on_a.x - p.point_on_b.x).abs() < 1e-4);
        }
    }

    #[test]
    fn square_capsule_is_a_disc() {
        let capsule = ShapePrimitive::new(
            Capsule::new(1.0, 1.0).unwrap(),
            Transform::with_centre(v(0.0, 0.9)),
        );
        let generator = ContactGenerator::new();
        assert_eq!(
            generator.recognize(&capsule, &floor(), v(0.0, 1.0)),
            Ok((None, None))
        );
        assert!(generator
            .generate(&capsule, &floor(), v(0.0, 1.0))
            .unwrap()
            .is_empty());
        assert_eq!(
            generator.dump_vertices(&capsule),
            Err(ShapeError::Edgeless("capsule"))
        );
    }

    #[test]
    fn collinear_outline_faces_search_direction() {
        let generator = ContactGenerator::new();
        let flat = [v(0.0, 0.0), v(1.0, 0.0), v(-1.0, 0.0)];
        let edge = generator.find_clip_edge(&flat, 0, v(0.0, -1.0)).unwrap();
        assert_eq!((edge.p1, edge.p2), (v(-1.0, 0.0), v(0.0, 0.0)));
        assert_eq!(edge.normal, v(0.0, -1.0));
        let edge = generator.find_clip_edge(&flat, 0, v(0.0, 1.0)).unwrap();
        assert_eq!(edge.normal, v(0.0, 1.0));
    }

    #[test]
    fn clip_without_edges_is_empty() {
        let generator = ContactGenerator::new();
        let edge = ClipEdge {
            p1: v(-1.0, 0.0),
            p2: v(1.0, 0.0),
            normal: v(0.0, -1.0),
        };
        assert!(generator.clip(None, Some(edge), v(0.0, 1.0)).is_empty());
        assert!(generator.clip(Some(edge), None, v(0.0, 1.0)).is_empty());
        assert!(generator.clip(None, None, v(0.0, 1.0)).is_empty());
    }

    #[test]
    fn clip_front_plane() {
        let generator = ContactGenerator::new();
        let reference = ClipEdge {
            p1: v(-1.0, 0.0),
            p2: v(1.0, 0.0),
            normal: v(0.0, -1.0),
        };
        let separated = ClipEdge {
            p1: v(-0.5, -0.2),
            p2: v(0.5, -0.2),
            normal: v(0.0, 1.0),
        };
        assert!(generator
            .clip(Some(reference), Some(separated), v(0.0, 1.0))
            .is_empty());

        let crossing = ClipEdge {
            p1: v(-0.5, -0.2),
            p2: v(0.5, 0.2),
            normal: v(-0.4, 1.0).normed(),
        };
        let pairs = generator.clip(Some(reference), Some(crossing), v(0.0, 1.0));
        assert_eq!(
            pairs,
            vec![
                pair(v(0.0, 0.0), v(0.0, 0.0)),
                pair(v(0.5, 0.0), v(0.5, 0.2)),
            ]
        );
    }

    #[test]
    fn clip_side_planes() {
        let generator = ContactGenerator::new();
        let reference = ClipEdge {
            p1: v(-1.0, 0.0),
            p2: v(1.0, 0.0),
            normal: v(0.0, -1.0),
        };
        let beside = ClipEdge {
            p1: v(2.0, 0.1),
            p2: v(3.0, 0.1),
            normal: v(0.0, 1.0),
        };
        assert!(generator
            .clip(Some(reference), Some(beside), v(0.0, 1.0))
            .is_empty());

        let degenerate = ClipEdge {
            p1: v(0.0, 0.0),
            p2: v(0.0, 0.0),
            normal: v(0.0, -1.0),
        };
        let incident = ClipEdge {
            p1: v(-0.5, 0.1),
            p2: v(0.5, 0.1),
            normal: v(0.0, 1.0),
        };
        assert!(generator
            .clip(Some(degenerate), Some(incident), v(0.0, 1.0))
            .is_empty());
    }

    #[test]
    fn random_overlaps_respect_side_planes() {
        let mut rng = StdRng::seed_from_u64(1234);
        let generator = ContactGenerator::new();
        for _ in 0..200 {
            let size_a = rng.gen_range(0.5..2.0);
            let size_b = rng.gen_range(0.5..2.0);
            let a = ShapePrimitive::new(
                Polygon::rectangle(size_a, rng.gen_range(0.5..2.0)).unwrap(),
                Transform::new(
                    v(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)),
                    rng.gen_range(-PI..PI),
                ),
            );
            let b = ShapePrimitive::new(
                Polygon::rectangle(size_b, rng.gen_range(0.5..2.0)).unwrap(),
                Transform::with_rotation(rng.gen_range(-PI..PI)),
            );
            let normal = Vec2::from_angle(rng.gen_range(-PI..PI));

            let (edge_a, edge_b) = generator.recognize(&a, &b, normal).unwrap();
            let (edge_a, edge_b) = (edge_a.unwrap(), edge_b.unwrap());
            let pairs = generator.clip(Some(edge_a), Some(edge_b), normal);
            assert!(pairs.len() <= 2);

            let swapped = edge_b.alignment(normal) < edge_a.alignment(normal) - EPSILON;
            let reference = if swapped { edge_b } else { edge_a };
            let along = reference.direction();
            for p in pairs {
                let (on_reference, incident) = if swapped {
                    (p.point_on_b, p.point_on_a)
                } else {
                    (p.point_on_a, p.point_on_b)
                };
                let t = (incident - reference.p1).dot(along) / along.len_squared();
                assert!((-1e-3..=1.0 + 1e-3).contains(&t), "{incident} outside side planes");
                assert!(
                    geom::closest_point_on_segment(reference.p1, reference.p2, on_reference)
                        .dist(on_reference)
                        < 1e-3
                );
            }
        }
    }

    #[test]
    fn custom_support_query() {
        let calls = Cell::new(0);
        let generator = ContactGenerator::with_support_query(
            |vertices: &[Vec2], direction: Vec2| -> Option<(Vec2, usize)> {
                calls.set(calls.get() + 1);
                crate::collision::support::farthest_point(vertices, direction)
            },
        );
        let a = square_at(v(0.5, 0.0), 1.0);
        let b = square_at(v(0.0, 0.0), 1.0);
        let pairs = generator.generate(&a, &b, v(1.0, 0.0)).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(calls.get(), 2);
    }
}
