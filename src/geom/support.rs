//! Support functions: the point of a shape (in its local frame) furthest along a direction.

use crate::core::prelude::*;
use crate::util::gg_iter::GgFloatIter;
use std::f32::consts::TAU;

/// Support point of the ellipse with semi-axes `a` (along x) and `b` (along y). Directions along
/// an axis are answered exactly; a zero direction yields `(0, b)`.
pub fn ellipse(a: f32, b: f32, direction: Vec2) -> Vec2 {
    if direction.x.abs() < EPSILON {
        let y = if direction.y >= 0.0 { b } else { -b };
        Vec2 { x: 0.0, y }
    } else if direction.y.abs() < EPSILON {
        let x = if direction.x >= 0.0 { a } else { -a };
        Vec2 { x, y: 0.0 }
    } else {
        let scaled = Vec2 {
            x: a * a * direction.x,
            y: b * b * direction.y,
        };
        scaled / (a * a * direction.x * direction.x + b * b * direction.y * direction.y).sqrt()
    }
}

/// Support point of a capsule with the given full `width` and `height`, centred on the origin.
/// The long axis is x when `width > height`, otherwise y.
pub fn capsule(width: f32, height: f32, direction: Vec2) -> Vec2 {
    let direction = direction.normed();
    if width > height {
        let radius = height / 2.0;
        let offset = if direction.x >= 0.0 {
            width / 2.0 - radius
        } else {
            radius - width / 2.0
        };
        direction * radius + Vec2 { x: offset, y: 0.0 }
    } else {
        let radius = width / 2.0;
        let offset = if direction.y >= 0.0 {
            height / 2.0 - radius
        } else {
            radius - height / 2.0
        };
        direction * radius + Vec2 { x: 0.0, y: offset }
    }
}

/// Maps an angle into `[0, 2π)`.
pub fn normalise_angle(radians: f32) -> f32 {
    let rv = radians.rem_euclid(TAU);
    // rem_euclid() can round up to exactly TAU for tiny negative inputs.
    if rv >= TAU {
        0.0
    } else {
        rv
    }
}

/// Checks whether `theta` lies on the arc running `span` radians counter-clockwise from `start`,
/// ends included. Arcs that wrap past angle zero are handled.
pub fn is_angle_in_arc(theta: f32, start: f32, span: f32) -> bool {
    if span >= TAU - EPSILON {
        return true;
    }
    let start_angle = normalise_angle(start);
    let end_angle = normalise_angle(start + span);
    let theta = normalise_angle(theta);
    if start_angle <= end_angle {
        start_angle <= theta && theta <= end_angle
    } else {
        theta >= start_angle || theta <= end_angle
    }
}

/// Support point of the sector with its apex at the origin, spanning `span` radians
/// counter-clockwise from `start`.
///
/// Arcs that wrap past angle zero are handled. A direction pointing into the arc hits the arc;
/// otherwise the best of the two arc endpoints and the apex is chosen. A span of a full turn or
/// more behaves as a disc.
///
/// # Examples
/// ```
/// use glongge_narrowphase::geom::support;
/// use glongge_narrowphase::util::linalg::Vec2;
///
/// // A sector from 350° round to 30°, pointing at 10°.
/// let p = support::sector(350f32.to_radians(), 40f32.to_radians(), 1.0,
///                         Vec2::from_angle(10f32.to_radians()));
/// assert!(p.almost_eq(Vec2::from_angle(10f32.to_radians())));
/// ```
pub fn sector(start: f32, span: f32, radius: f32, direction: Vec2) -> Vec2 {
    if span >= TAU - EPSILON {
        return radius * direction.normed();
    }
    let arc_start = radius * Vec2::from_angle(start);
    if span.abs() < EPSILON {
        return if arc_start.dot(direction) > 0.0 {
            arc_start
        } else {
            Vec2::zero()
        };
    }

    let theta = direction.angle();
    if is_angle_in_arc(theta, start, span) {
        return radius * Vec2::from_angle(theta);
    }

    let candidates = [arc_start, radius * Vec2::from_angle(start + span), Vec2::zero()];
    candidates
        .iter()
        .map(|p| p.dot(direction))
        .position_max_f32()
        .map_or(Vec2::zero(), |i| candidates[i])
}
