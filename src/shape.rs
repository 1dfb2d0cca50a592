//! Validated convex shapes in their local frame, and their placement in the world.
//!
//! Every shape is centred on its local origin except [`Point`], [`Edge`] and [`Sector`] (whose
//! apex is the origin). Constructors reject malformed input with a [`ShapeError`]; once built, a
//! shape is immutable.

use crate::collision::support::farthest_point;
use crate::core::prelude::*;
use crate::geom;
use crate::geom::polygon;
use crate::util::gg_float::GgFloat;
use std::f32::consts::TAU;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("polygon vertices are not convex")]
    NonConvex,
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
    #[error("edge endpoints coincide at {0}")]
    DegenerateEdge(Vec2),
    #[error("{what} must be positive, got {value}")]
    NonPositiveExtent { what: &'static str, value: f32 },
    #[error("sector span must be in (0, 2π], got {0}")]
    InvalidSpan(f32),
    #[error("{0} has no edges")]
    Edgeless(&'static str),
}

fn check_finite<T: GgFloat>(what: &'static str, value: &T) -> Result<(), ShapeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ShapeError::NonFinite(what))
    }
}

fn check_positive(what: &'static str, value: f32) -> Result<f32, ShapeError> {
    check_finite(what, &value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::NonPositiveExtent { what, value })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pos: Vec2,
}

impl Point {
    pub fn new(pos: Vec2) -> Result<Self, ShapeError> {
        check_finite("point", &pos)?;
        Ok(Self { pos })
    }
    pub fn pos(&self) -> Vec2 {
        self.pos
    }
    pub fn centre(&self) -> Vec2 {
        self.pos
    }
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos == point
    }
    pub fn scaled(&self, factor: f32) -> Result<Self, ShapeError> {
        Self::new(self.pos * factor)
    }
    pub fn support(&self, _direction: Vec2) -> Vec2 {
        self.pos
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Result<Self, ShapeError> {
        Ok(Self {
            radius: check_positive("circle radius", radius)?,
        })
    }
    pub fn radius(&self) -> f32 {
        self.radius
    }
    pub fn centre(&self) -> Vec2 {
        Vec2::zero()
    }
    pub fn contains(&self, point: Vec2) -> bool {
        point.len_squared() <= self.radius * self.radius
    }
    pub fn scaled(&self, factor: f32) -> Result<Self, ShapeError> {
        Self::new(self.radius * factor)
    }
    pub fn support(&self, direction: Vec2) -> Vec2 {
        direction.normed() * self.radius
    }
}

/// An axis-aligned ellipse with full extents `width` (along x) and `height` (along y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    width: f32,
    height: f32,
}

impl Ellipse {
    pub fn new(width: f32, height: f32) -> Result<Self, ShapeError> {
        Ok(Self {
            width: check_positive("ellipse width", width)?,
            height: check_positive("ellipse height", height)?,
        })
    }
    pub fn width(&self) -> f32 {
        self.width
    }
    pub fn height(&self) -> f32 {
        self.height
    }
    /// Semi-axis along x.
    pub fn a(&self) -> f32 {
        self.width / 2.0
    }
    /// Semi-axis along y.
    pub fn b(&self) -> f32 {
        self.height / 2.0
    }
    /// Distance from the centre to either focus, which lie on the longer axis.
    pub fn c(&self) -> f32 {
        (self.a() * self.a() - self.b() * self.b()).abs().sqrt()
    }
    pub fn centre(&self) -> Vec2 {
        Vec2::zero()
    }
    pub fn contains(&self, point: Vec2) -> bool {
        let (a, b) = (self.a(), self.b());
        point.x * point.x / (a * a) + point.y * point.y / (b * b) <= 1.0
    }
    pub fn scaled(&self, factor: f32) -> Result<Self, ShapeError> {
        Self::new(self.width * factor, self.height * factor)
    }
    pub fn support(&self, direction: Vec2) -> Vec2 {
        geom::support::ellipse(self.a(), self.b(), direction)
    }
    /// Nearest point on the boundary to an outside `point`.
    pub fn closest_point(&self, point: Vec2) -> Option<Vec2> {
        geom::ellipse::closest_point(self.a(), self.b(), point)
    }
}

/// A stadium: a rectangle with two semicircular caps on its shorter sides. `width` and `height`
/// are the full extents including the caps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    width: f32,
    height: f32,
}

impl Capsule {
    pub fn new(width: f32, height: f32) -> Result<Self, ShapeError> {
        Ok(Self {
            width: check_positive("capsule width", width)?,
            height: check_positive("capsule height", height)?,
        })
    }
    pub fn width(&self) -> f32 {
        self.width
    }
    pub fn height(&self) -> f32 {
        self.height
    }
    pub fn radius(&self) -> f32 {
        self.width.min(self.height) / 2.0
    }
    /// Whether the caps are joined by straight sides; a capsule as wide as it is tall is a disc.
    pub fn has_edge(&self) -> bool {
        (self.width - self.height).abs() >= EPSILON
    }

    // The segment joining the centres of the two caps.
    fn spine(&self) -> (Vec2, Vec2) {
        let r = self.radius();
        let half_spine = if self.width > self.height {
            Vec2 {
                x: self.width / 2.0 - r,
                y: 0.0,
            }
        } else {
            Vec2 {
                x: 0.0,
                y: self.height / 2.0 - r,
            }
        };
        (-half_spine, half_spine)
    }

    /// The rectangle between the caps, counter-clockwise from its top-left corner.
    pub fn box_vertices(&self) -> [Vec2; 4] {
        let r = self.radius();
        let top_left = if self.width > self.height {
            Vec2 {
                x: r - self.width / 2.0,
                y: r,
            }
        } else {
            Vec2 {
                x: -r,
                y: self.height / 2.0 - r,
            }
        };
        let bottom_left = Vec2 {
            x: top_left.x,
            y: -top_left.y,
        };
        [top_left, bottom_left, -top_left, -bottom_left]
    }

    pub fn centre(&self) -> Vec2 {
        Vec2::zero()
    }
    pub fn contains(&self, point: Vec2) -> bool {
        let (from, to) = self.spine();
        geom::closest_point_on_segment(from, to, point).dist(point) <= self.radius() + EPSILON
    }
    pub fn scaled(&self, factor: f32) -> Result<Self, ShapeError> {
        Self::new(self.width * factor, self.height * factor)
    }
    pub fn support(&self, direction: Vec2) -> Vec2 {
        geom::support::capsule(self.width, self.height, direction)
    }
}

/// A convex polygon, stored as an open vertex list re-centred on its mass centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    /// # Examples
    /// ```
    /// use glongge_narrowphase::shape::{Polygon, ShapeError};
    /// use glongge_narrowphase::util::linalg::Vec2;
    ///
    /// let triangle = Polygon::new(vec![
    ///     Vec2 { x: 0.0, y: 0.0 },
    ///     Vec2 { x: 3.0, y: 0.0 },
    ///     Vec2 { x: 0.0, y: 3.0 },
    /// ])?;
    /// assert_eq!(triangle.vertices()[0], Vec2 { x: -1.0, y: -1.0 });
    /// # Ok::<(), ShapeError>(())
    /// ```
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        if vertices.len() < 3 {
            return Err(ShapeError::TooFewVertices(vertices.len()));
        }
        for vertex in &vertices {
            check_finite("polygon vertex", vertex)?;
        }
        if !polygon::is_convex(&vertices) {
            return Err(ShapeError::NonConvex);
        }
        let centre = polygon::mass_centre(&vertices).ok_or(ShapeError::NonConvex)?;
        Ok(Self {
            vertices: vertices.into_iter().map(|v| v - centre).collect(),
        })
    }

    /// An axis-aligned rectangle centred on the origin, counter-clockwise from its bottom-left
    /// corner.
    pub fn rectangle(width: f32, height: f32) -> Result<Self, ShapeError> {
        let half_widths = Vec2 {
            x: check_positive("rectangle width", width)? / 2.0,
            y: check_positive("rectangle height", height)? / 2.0,
        };
        Self::new(Rect::new(Vec2::zero(), half_widths).corners_ccw().to_vec())
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }
    pub fn centre(&self) -> Vec2 {
        polygon::mass_centre(&self.vertices).unwrap_or_default()
    }
    pub fn contains(&self, point: Vec2) -> bool {
        polygon::contains_point(&self.vertices, point)
    }
    pub fn scaled(&self, factor: f32) -> Result<Self, ShapeError> {
        check_positive("scale factor", factor)?;
        Self::new(self.vertices.iter().map(|&v| v * factor).collect())
    }
    pub fn support(&self, direction: Vec2) -> Vec2 {
        farthest_point(&self.vertices, direction).map_or(Vec2::zero(), |(p, _)| p)
    }
}

/// A line segment with a fixed normal, `(end - start).orthog().normed()`: it points to the right
/// of the direction of travel from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    start: Vec2,
    end: Vec2,
    normal: Vec2,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2) -> Result<Self, ShapeError> {
        check_finite("edge start", &start)?;
        check_finite("edge end", &end)?;
        if (end - start).len() < EPSILON {
            return Err(ShapeError::DegenerateEdge(start));
        }
        Ok(Self {
            start,
            end,
            normal: (end - start).orthog().normed(),
        })
    }
    pub fn start(&self) -> Vec2 {
        self.start
    }
    pub fn end(&self) -> Vec2 {
        self.end
    }
    pub fn normal(&self) -> Vec2 {
        self.normal
    }
    pub fn centre(&self) -> Vec2 {
        (self.start + self.end) / 2.0
    }
    pub fn contains(&self, point: Vec2) -> bool {
        geom::is_point_on_segment(self.start, self.end, point)
    }
    pub fn scaled(&self, factor: f32) -> Result<Self, ShapeError> {
        Self::new(self.start * factor, self.end * factor)
    }
    pub fn support(&self, direction: Vec2) -> Vec2 {
        if self.end.dot(direction) > self.start.dot(direction) {
            self.end
        } else {
            self.start
        }
    }
}

/// A circular sector with its apex at the origin, spanning `span` radians counter-clockwise from
/// the angle `start`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sector {
    start: f32,
    span: f32,
    radius: f32,
}

impl Sector {
    pub fn new(start: f32, span: f32, radius: f32) -> Result<Self, ShapeError> {
        check_finite("sector start", &start)?;
        check_finite("sector span", &span)?;
        if span <= 0.0 || span > TAU + EPSILON {
            return Err(ShapeError::InvalidSpan(span));
        }
        Ok(Self {
            start,
            span,
            radius: check_positive("sector radius", radius)?,
        })
    }
    pub fn start(&self) -> f32 {
        self.start
    }
    pub fn span(&self) -> f32 {
        self.span
    }
    pub fn radius(&self) -> f32 {
        self.radius
    }
    /// The apex followed by the two ends of the arc.
    pub fn vertices(&self) -> [Vec2; 3] {
        [
            Vec2::zero(),
            self.radius * Vec2::from_angle(self.start),
            self.radius * Vec2::from_angle(self.start + self.span),
        ]
    }
    pub fn area(&self) -> f32 {
        self.span * self.radius * self.radius / 2.0
    }
    /// The centroid, on the bisector at `4r·sin(span/2) / (3·span)` from the apex.
    pub fn centre(&self) -> Vec2 {
        let bisector = Vec2::from_angle(self.start + self.span / 2.0);
        bisector * (4.0 * self.radius * (self.span / 2.0).sin() / (3.0 * self.span))
    }
    pub fn contains(&self, point: Vec2) -> bool {
        if point.len() > self.radius + EPSILON {
            return false;
        }
        point.len() < EPSILON || geom::support::is_angle_in_arc(point.angle(), self.start, self.span)
    }
    pub fn scaled(&self, factor: f32) -> Result<Self, ShapeError> {
        Self::new(self.start, self.span, self.radius * factor)
    }
    pub fn support(&self, direction: Vec2) -> Vec2 {
        geom::support::sector(self.start, self.span, self.radius, direction)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Point(Point),
    Circle(Circle),
    Ellipse(Ellipse),
    Capsule(Capsule),
    Polygon(Polygon),
    Edge(Edge),
    Sector(Sector),
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Point(_) => "point",
            Shape::Circle(_) => "circle",
            Shape::Ellipse(_) => "ellipse",
            Shape::Capsule(_) => "capsule",
            Shape::Polygon(_) => "polygon",
            Shape::Edge(_) => "edge",
            Shape::Sector(_) => "sector",
        }
    }

    /// Whether the outline has straight edges a contact can be clipped against.
    pub fn has_edge(&self) -> bool {
        match self {
            Shape::Point(_) | Shape::Circle(_) | Shape::Ellipse(_) => false,
            Shape::Capsule(capsule) => capsule.has_edge(),
            Shape::Polygon(_) | Shape::Edge(_) | Shape::Sector(_) => true,
        }
    }

    pub fn centre(&self) -> Vec2 {
        match self {
            Shape::Point(s) => s.centre(),
            Shape::Circle(s) => s.centre(),
            Shape::Ellipse(s) => s.centre(),
            Shape::Capsule(s) => s.centre(),
            Shape::Polygon(s) => s.centre(),
            Shape::Edge(s) => s.centre(),
            Shape::Sector(s) => s.centre(),
        }
    }

    /// Inclusive containment test in the shape's local frame.
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            Shape::Point(s) => s.contains(point),
            Shape::Circle(s) => s.contains(point),
            Shape::Ellipse(s) => s.contains(point),
            Shape::Capsule(s) => s.contains(point),
            Shape::Polygon(s) => s.contains(point),
            Shape::Edge(s) => s.contains(point),
            Shape::Sector(s) => s.contains(point),
        }
    }

    pub fn scaled(&self, factor: f32) -> Result<Shape, ShapeError> {
        Ok(match self {
            Shape::Point(s) => s.scaled(factor)?.into(),
            Shape::Circle(s) => s.scaled(factor)?.into(),
            Shape::Ellipse(s) => s.scaled(factor)?.into(),
            Shape::Capsule(s) => s.scaled(factor)?.into(),
            Shape::Polygon(s) => s.scaled(factor)?.into(),
            Shape::Edge(s) => s.scaled(factor)?.into(),
            Shape::Sector(s) => s.scaled(factor)?.into(),
        })
    }

    /// The point of the shape furthest along `direction`, in the local frame.
    pub fn support(&self, direction: Vec2) -> Vec2 {
        match self {
            Shape::Point(s) => s.support(direction),
            Shape::Circle(s) => s.support(direction),
            Shape::Ellipse(s) => s.support(direction),
            Shape::Capsule(s) => s.support(direction),
            Shape::Polygon(s) => s.support(direction),
            Shape::Edge(s) => s.support(direction),
            Shape::Sector(s) => s.support(direction),
        }
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),+) => {
        $(
            impl From<$variant> for Shape {
                fn from(value: $variant) -> Self {
                    Shape::$variant(value)
                }
            }
        )+
    };
}
impl_from_shape!(Point, Circle, Ellipse, Capsule, Polygon, Edge, Sector);

/// A shape placed in the world by a [`Transform`].
#[derive(Clone, Debug, PartialEq)]
pub struct ShapePrimitive {
    pub shape: Shape,
    pub transform: Transform,
}

impl ShapePrimitive {
    pub fn new(shape: impl Into<Shape>, transform: Transform) -> Self {
        Self {
            shape: shape.into(),
            transform,
        }
    }

    pub fn to_world(&self, local: Vec2) -> Vec2 {
        self.transform.apply(local)
    }
    pub fn to_local(&self, world: Vec2) -> Vec2 {
        self.transform.unapply(world)
    }

    pub fn centre(&self) -> Vec2 {
        self.to_world(self.shape.centre())
    }
    pub fn contains(&self, world: Vec2) -> bool {
        self.shape.contains(self.to_local(world))
    }
    /// World-space support point for a world-space direction.
    pub fn support(&self, direction: Vec2) -> Vec2 {
        let local_direction = self.transform.unapply_direction(direction);
        self.to_world(self.shape.support(local_direction))
    }
}
