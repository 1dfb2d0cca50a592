#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::gg_float;
use crate::util::gg_float::GgFloat;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A 2D vector using 32-bit floating point coordinates, used uniformly as a point, a
/// displacement and a direction.
///
/// The narrow phase works in a y-up frame: [`Vec2::up()`] is `(0, 1)` and positive rotations are
/// counter-clockwise.
///
/// # Examples
///
/// ```
/// use glongge_narrowphase::util::linalg::Vec2;
///
/// let v1 = Vec2 { x: 3.0, y: 4.0 };
/// let v2 = Vec2 { x: 1.0, y: 2.0 };
/// assert_eq!(v1 + v2, Vec2 { x: 4.0, y: 6.0 });
/// assert_eq!(v1.cross(v2), 2.0);
/// ```
///
/// # Equality and ordering
/// Two vectors are equal if their components differ by less than
/// [`EPSILON`](crate::core::config::EPSILON). Non-finite vectors fall back to exact comparison.
///
/// The tolerance makes equality non-transitive, so `Vec2` is neither `Ord` nor `Hash`; sort
/// point sets with an explicit [`total_cmp`](f32::total_cmp) key instead.
#[derive(Default, Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        if self.is_finite() || other.is_finite() {
            (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
        } else {
            self.x == other.x && self.y == other.y
        }
    }
}
impl Eq for Vec2 {}

impl Vec2 {
    /// Unit vector along the positive x-axis.
    #[must_use]
    pub fn right() -> Vec2 {
        Vec2 { x: 1.0, y: 0.0 }
    }
    /// Unit vector along the positive y-axis.
    #[must_use]
    pub fn up() -> Vec2 {
        Vec2 { x: 0.0, y: 1.0 }
    }
    /// Unit vector along the negative x-axis.
    #[must_use]
    pub fn left() -> Vec2 {
        Vec2 { x: -1.0, y: 0.0 }
    }
    /// Unit vector along the negative y-axis.
    #[must_use]
    pub fn down() -> Vec2 {
        Vec2 { x: 0.0, y: -1.0 }
    }
    #[must_use]
    pub fn one() -> Vec2 {
        Vec2 { x: 1.0, y: 1.0 }
    }
    #[must_use]
    pub fn zero() -> Vec2 {
        Vec2 { x: 0.0, y: 0.0 }
    }
    #[must_use]
    pub fn splat(v: f32) -> Vec2 {
        Vec2 { x: v, y: v }
    }

    /// Returns the unit vector at `radians` counter-clockwise from [`Vec2::right()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use glongge_narrowphase::util::linalg::Vec2;
    /// let v = Vec2::from_angle(std::f32::consts::FRAC_PI_2);
    /// assert_eq!(v, Vec2::up());
    /// ```
    #[must_use]
    pub fn from_angle(radians: f32) -> Vec2 {
        Vec2 {
            x: radians.cos(),
            y: radians.sin(),
        }
    }

    /// Returns the squared length of the vector.
    ///
    /// Use this instead of [`len`](Vec2::len) when comparing lengths to avoid the square root.
    #[must_use]
    pub fn len_squared(&self) -> f32 {
        self.dot(*self)
    }

    #[must_use]
    pub fn len(&self) -> f32 {
        self.len_squared().sqrt()
    }

    /// Returns a unit vector in the same direction as this vector.
    ///
    /// A zero-length vector is returned as the zero vector rather than dividing by zero, and
    /// negative zero components are normalised to positive zero.
    #[must_use]
    pub fn normed(&self) -> Vec2 {
        let mut rv = match self.len() {
            0.0 => Vec2::zero(),
            len => *self / len,
        };
        rv.x = gg_float::force_positive_zero(rv.x);
        rv.y = gg_float::force_positive_zero(rv.y);
        rv
    }

    #[must_use]
    pub fn abs(&self) -> Vec2 {
        Vec2 {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Returns this vector rotated counter-clockwise by `radians`.
    ///
    /// # Examples
    ///
    /// ```
    /// use glongge_narrowphase::util::linalg::Vec2;
    /// let rotated = Vec2::right().rotated(std::f32::consts::FRAC_PI_2);
    /// assert!(rotated.almost_eq(Vec2::up()));
    /// ```
    #[must_use]
    pub fn rotated(&self, radians: f32) -> Vec2 {
        Mat2x2::rotation(radians) * *self
    }

    /// Returns a perpendicular vector: this vector rotated 90 degrees clockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use glongge_narrowphase::util::linalg::Vec2;
    /// let v = Vec2 { x: 3.0, y: 2.0 };
    /// assert_eq!(v.orthog(), Vec2 { x: 2.0, y: -3.0 });
    /// assert_eq!(v.dot(v.orthog()), 0.0);
    /// ```
    #[must_use]
    pub fn orthog(&self) -> Vec2 {
        Vec2 {
            x: self.y,
            y: -self.x,
        }
    }

    #[must_use]
    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product of two vectors.
    ///
    /// The result is the signed area of the parallelogram spanned by the two vectors: positive if
    /// `other` is counter-clockwise from `self`, negative if clockwise, and zero if they are
    /// parallel.
    ///
    /// # Examples
    ///
    /// ```
    /// use glongge_narrowphase::util::linalg::Vec2;
    /// let v1 = Vec2 { x: 2.0, y: 0.0 };
    /// let v2 = Vec2 { x: 0.0, y: 3.0 };
    /// assert_eq!(v1.cross(v2), 6.0);
    /// assert_eq!(v2.cross(v1), -6.0);
    /// ```
    #[must_use]
    pub fn cross(&self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Returns the polar angle of the vector, `atan2(y, x)`, in `(-π, π]`.
    #[must_use]
    pub fn angle(&self) -> f32 {
        f32::atan2(self.y, self.x)
    }

    #[must_use]
    pub fn dist(&self, other: Vec2) -> f32 {
        (other - *self).len()
    }

    #[must_use]
    pub fn dist_squared(&self, other: Vec2) -> f32 {
        (other - *self).len_squared()
    }

    /// Checks whether the distance between the two vectors is less than
    /// [`EPSILON`](crate::core::config::EPSILON).
    pub fn almost_eq(&self, rhs: Vec2) -> bool {
        (*self - rhs).len() < EPSILON
    }
}

impl Zero for Vec2 {
    fn zero() -> Self {
        Vec2::zero()
    }

    fn is_zero(&self) -> bool {
        self.almost_eq(Self::zero())
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "vec({0:.2$}, {1:.2$})", self.x, self.y, p),
            None => write!(f, "vec({}, {})", self.x, self.y),
        }
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl AddAssign<Vec2> for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub<Vec2> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
impl SubAssign<Vec2> for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Sum<Vec2> for Vec2 {
    fn sum<I: Iterator<Item = Vec2>>(iter: I) -> Self {
        iter.fold(Vec2::zero(), Vec2::add)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Self::Output {
        rhs * self
    }
}
impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self * rhs.x,
            y: self * rhs.y,
        }
    }
}
impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Self::Output {
        Vec2 {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}
impl DivAssign<f32> for Vec2 {
    fn div_assign(&mut self, rhs: f32) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Vec2 {
            x: -self.x,
            y: -self.y,
        }
    }
}
impl Neg for &Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        -*self
    }
}

/// A 2x2 matrix, laid out as:
/// ```text
/// | xx xy |
/// | yx yy |
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Mat2x2 {
    pub xx: f32,
    pub xy: f32,
    pub yx: f32,
    pub yy: f32,
}

impl Mat2x2 {
    pub fn new(xx: f32, xy: f32, yx: f32, yy: f32) -> Mat2x2 {
        Mat2x2 { xx, xy, yx, yy }
    }

    pub fn one() -> Mat2x2 {
        Mat2x2::new(1.0, 0.0, 0.0, 1.0)
    }

    pub fn zero() -> Mat2x2 {
        Mat2x2::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Creates a counter-clockwise rotation matrix:
    /// ```text
    /// | cos(θ)  -sin(θ) |
    /// | sin(θ)   cos(θ) |
    /// ```
    pub fn rotation(radians: f32) -> Mat2x2 {
        let (sin, cos) = radians.sin_cos();
        Mat2x2::new(cos, -sin, sin, cos)
    }

    #[must_use]
    pub fn det(&self) -> f32 {
        self.xx * self.yy - self.xy * self.yx
    }

    /// Returns the inverse, or `None` if the matrix is singular (determinant within
    /// [`EPSILON`](crate::core::config::EPSILON) of zero).
    #[must_use]
    pub fn inverse(&self) -> Option<Mat2x2> {
        let det = self.det();
        if det.abs() < EPSILON {
            None
        } else {
            Some(Mat2x2::new(self.yy, -self.xy, -self.yx, self.xx) / det)
        }
    }

    pub fn transposed(&self) -> Mat2x2 {
        Mat2x2::new(self.xx, self.yx, self.xy, self.yy)
    }

    #[must_use]
    pub fn almost_eq(&self, rhs: Mat2x2) -> bool {
        [
            self.xx - rhs.xx,
            self.xy - rhs.xy,
            self.yx - rhs.yx,
            self.yy - rhs.yy,
        ]
        .into_iter()
        .all(|d| d.abs() < EPSILON)
    }
}

impl Div<f32> for Mat2x2 {
    type Output = Mat2x2;

    fn div(self, rhs: f32) -> Self::Output {
        Mat2x2::new(self.xx / rhs, self.xy / rhs, self.yx / rhs, self.yy / rhs)
    }
}

impl Mul<Vec2> for Mat2x2 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.xx * rhs.x + self.xy * rhs.y,
            y: self.yx * rhs.x + self.yy * rhs.y,
        }
    }
}

impl Mul<Mat2x2> for Mat2x2 {
    type Output = Mat2x2;

    fn mul(self, rhs: Mat2x2) -> Self::Output {
        Mat2x2::new(
            self.xx * rhs.xx + self.xy * rhs.yx,
            self.xx * rhs.xy + self.xy * rhs.yy,
            self.yx * rhs.xx + self.yy * rhs.yx,
            self.yx * rhs.xy + self.yy * rhs.yy,
        )
    }
}

/// Something with an axis-aligned bounding box. In the y-up frame, `bottom()` is the smallest y
/// and `top()` the largest.
pub trait AxisAlignedExtent {
    fn extent(&self) -> Vec2;
    fn centre(&self) -> Vec2;

    fn half_widths(&self) -> Vec2 {
        self.extent() / 2.0
    }
    fn min_corner(&self) -> Vec2 {
        self.centre() - self.half_widths()
    }
    fn max_corner(&self) -> Vec2 {
        self.centre() + self.half_widths()
    }

    fn left(&self) -> f32 {
        self.min_corner().x
    }
    fn right(&self) -> f32 {
        self.max_corner().x
    }
    fn bottom(&self) -> f32 {
        self.min_corner().y
    }
    fn top(&self) -> f32 {
        self.max_corner().y
    }

    /// The four corners, counter-clockwise from the bottom-left.
    fn corners_ccw(&self) -> [Vec2; 4] {
        let min = self.min_corner();
        let max = self.max_corner();
        [
            min,
            Vec2 { x: max.x, y: min.y },
            max,
            Vec2 { x: min.x, y: max.y },
        ]
    }

    /// Inclusive: points on the boundary are contained.
    fn contains_point(&self, pos: Vec2) -> bool {
        (self.left()..=self.right()).contains(&pos.x)
            && (self.bottom()..=self.top()).contains(&pos.y)
    }
}

/// An axis-aligned rectangle stored as its centre and (non-negative) half-widths.
///
/// # Examples
///
/// ```
/// use glongge_narrowphase::util::linalg::{AxisAlignedExtent, Rect, Vec2};
///
/// let rect = Rect::from_coords(Vec2 { x: -1.0, y: -2.0 }, Vec2 { x: 3.0, y: 4.0 });
/// assert_eq!(rect.centre(), Vec2 { x: 1.0, y: 1.0 });
/// assert_eq!(rect.extent(), Vec2 { x: 4.0, y: 6.0 });
/// assert!(rect.contains_point(Vec2 { x: 3.0, y: 0.0 }));
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    centre: Vec2,
    half_widths: Vec2,
}

impl Rect {
    pub fn new(centre: Vec2, half_widths: Vec2) -> Self {
        Self {
            centre,
            half_widths: half_widths.abs(),
        }
    }
    /// Creates a rectangle from any two opposite corners.
    pub fn from_coords(a: Vec2, b: Vec2) -> Self {
        let min = Vec2 {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
        };
        let max = Vec2 {
            x: a.x.max(b.x),
            y: a.y.max(b.y),
        };
        let half_widths = (max - min) / 2.0;
        Self {
            centre: min + half_widths,
            half_widths,
        }
    }
}

impl AxisAlignedExtent for Rect {
    fn extent(&self) -> Vec2 {
        self.half_widths * 2.0
    }
    fn centre(&self) -> Vec2 {
        self.centre
    }
}

/// The placement of a shape: a rotation about the local origin followed by a translation.
///
/// # Examples
///
/// ```
/// use glongge_narrowphase::util::linalg::{Transform, Vec2};
///
/// let transform = Transform::new(Vec2 { x: 10.0, y: 0.0 }, std::f32::consts::FRAC_PI_2);
/// assert!(transform.apply(Vec2::right()).almost_eq(Vec2 { x: 10.0, y: 1.0 }));
/// assert!(transform.unapply(Vec2 { x: 10.0, y: 1.0 }).almost_eq(Vec2::right()));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub centre: Vec2,
    pub rotation: f32,
}

impl Transform {
    #[must_use]
    pub fn new(centre: Vec2, rotation: f32) -> Self {
        Self { centre, rotation }
    }
    #[must_use]
    pub fn with_centre(centre: Vec2) -> Self {
        Self {
            centre,
            ..Default::default()
        }
    }
    #[must_use]
    pub fn with_rotation(rotation: f32) -> Self {
        Self {
            rotation,
            ..Default::default()
        }
    }

    /// Maps a local-space point to world space.
    #[must_use]
    pub fn apply(&self, local: Vec2) -> Vec2 {
        Mat2x2::rotation(self.rotation) * local + self.centre
    }
    /// Maps a local-space direction to world space (rotation only).
    #[must_use]
    pub fn apply_direction(&self, local: Vec2) -> Vec2 {
        Mat2x2::rotation(self.rotation) * local
    }
    /// Maps a world-space point back to local space.
    #[must_use]
    pub fn unapply(&self, world: Vec2) -> Vec2 {
        Mat2x2::rotation(self.rotation).transposed() * (world - self.centre)
    }
    /// Maps a world-space direction back to local space.
    #[must_use]
    pub fn unapply_direction(&self, world: Vec2) -> Vec2 {
        Mat2x2::rotation(self.rotation).transposed() * world
    }
}
