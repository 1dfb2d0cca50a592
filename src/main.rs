use anyhow::{Context, Result};
use glongge_narrowphase::core::prelude::*;
use glongge_narrowphase::shape::{Capsule, Circle, Edge, Polygon, Sector};
use glongge_narrowphase::util::setup_log;
use std::f32::consts::FRAC_PI_2;

struct Scenario {
    name: &'static str,
    a: ShapePrimitive,
    b: ShapePrimitive,
    // Points from b towards a.
    normal: Vec2,
}

fn scenarios() -> Result<Vec<Scenario>> {
    Ok(vec![
        Scenario {
            name: "overlapping squares",
            a: ShapePrimitive::new(
                Polygon::rectangle(1.0, 1.0)?,
                Transform::with_centre(Vec2 { x: 0.5, y: 0.0 }),
            ),
            b: ShapePrimitive::new(Polygon::rectangle(1.0, 1.0)?, Transform::default()),
            normal: Vec2::right(),
        },
        Scenario {
            name: "ground edge on a box",
            a: ShapePrimitive::new(
                Edge::new(Vec2 { x: -2.0, y: 0.0 }, Vec2 { x: 2.0, y: 0.0 })?,
                Transform::default(),
            ),
            b: ShapePrimitive::new(
                Polygon::rectangle(1.0, 1.0)?,
                Transform::with_centre(Vec2 { x: 0.0, y: -0.4 }),
            ),
            normal: Vec2::up(),
        },
        Scenario {
            name: "tilted box on a plank",
            a: ShapePrimitive::new(
                Polygon::rectangle(1.0, 1.0)?,
                Transform::new(Vec2 { x: 0.0, y: 0.85 }, 0.1),
            ),
            b: ShapePrimitive::new(Polygon::rectangle(4.0, 1.0)?, Transform::default()),
            normal: Vec2::up(),
        },
        Scenario {
            name: "capsule resting on a sector",
            a: ShapePrimitive::new(
                Capsule::new(3.0, 1.0)?,
                Transform::with_centre(Vec2 { x: 1.0, y: 0.45 }),
            ),
            b: ShapePrimitive::new(Sector::new(-FRAC_PI_2, FRAC_PI_2, 2.0)?, Transform::default()),
            normal: Vec2::up(),
        },
        Scenario {
            name: "circle against a box",
            a: ShapePrimitive::new(Circle::new(0.5)?, Transform::with_centre(Vec2::up())),
            b: ShapePrimitive::new(Polygon::rectangle(1.0, 1.0)?, Transform::default()),
            normal: Vec2::up(),
        },
    ])
}

fn main() -> Result<()> {
    setup_log()?;
    let generator = ContactGenerator::new();
    for scenario in scenarios()? {
        let pairs = generator
            .generate(&scenario.a, &scenario.b, scenario.normal)
            .with_context(|| format!("scenario: {}", scenario.name))?;
        info!("{}: {} contact(s)", scenario.name, pairs.len());
        for PointPair {
            point_on_a,
            point_on_b,
        } in pairs
        {
            info!(
                "  a: {point_on_a:.3}, b: {point_on_b:.3}, separation: {:.3}",
                (point_on_a - point_on_b).dot(scenario.normal)
            );
        }
    }
    Ok(())
}
