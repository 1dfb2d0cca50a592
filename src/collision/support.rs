use crate::core::prelude::*;
use crate::util::gg_iter::GgFloatIter;

/// Picks the extreme vertex of an outline along a direction. The contact generator uses this to
/// find the vertex its clip edge is built around; callers with their own GJK-style routine can
/// plug it in here.
pub trait SupportQuery {
    /// Returns the vertex furthest along `direction` together with its index, or `None` if
    /// `vertices` is empty.
    fn farthest_point(&self, vertices: &[Vec2], direction: Vec2) -> Option<(Vec2, usize)>;
}

/// The default [`SupportQuery`]: a linear scan keeping the first of any tied vertices.
#[derive(Clone, Copy, Debug, Default)]
pub struct FarthestPoint;

impl SupportQuery for FarthestPoint {
    fn farthest_point(&self, vertices: &[Vec2], direction: Vec2) -> Option<(Vec2, usize)> {
        farthest_point(vertices, direction)
    }
}

impl<F> SupportQuery for F
where
    F: Fn(&[Vec2], Vec2) -> Option<(Vec2, usize)>,
{
    fn farthest_point(&self, vertices: &[Vec2], direction: Vec2) -> Option<(Vec2, usize)> {
        self(vertices, direction)
    }
}

pub fn farthest_point(vertices: &[Vec2], direction: Vec2) -> Option<(Vec2, usize)> {
    let index = vertices
        .iter()
        .map(|vertex| vertex.dot(direction))
        .position_max_f32()?;
    Some((vertices[index], index))
}
