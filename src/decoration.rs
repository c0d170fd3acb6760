//! Leaf and flower clusters.
//!
//! Decorations are terminal: they hang off the turtle's current parent, never
//! become parents themselves, and never move the turtle.

use crate::config::{DecorationConfig, FlowerPlacement};
use crate::rng::SplitMix64;
use crate::tree::{Segment, SegmentKind};
use crate::turtle::TurtleState;
use glam::{Quat, Vec3};

/// Outward tilt of radially placed petals, in degrees.
const RADIAL_PETAL_TILT: f32 = 30.0;

/// Emits `leaf_count` leaves radiating from the turtle position.
///
/// Leaf `i` points along `left` rotated around `heading` by `360 / count * i`
/// degrees plus up to `leaf_angle_jitter` degrees of noise, and is lifted a
/// little along `up`.
pub fn leaf_cluster(
    turtle: &TurtleState,
    base_step: f32,
    config: &DecorationConfig,
    rng: &mut SplitMix64,
) -> Vec<Segment> {
    let count = config.leaf_count;
    let size = base_step * config.leaf_size_ratio;
    let lift = turtle.up * size * config.leaf_lift;

    (0..count)
        .map(|i| {
            let jitter = rng.next_signed() * config.leaf_angle_jitter;
            let angle = (360.0 / count as f32 * i as f32 + jitter).to_radians();
            let dir = Quat::from_axis_angle(turtle.heading, angle) * turtle.left;
            Segment {
                a: turtle.position,
                b: turtle.position + dir * size + lift,
                parent: turtle.parent,
                depth: turtle.depth,
                branch_start: false,
                kind: SegmentKind::Leaf,
            }
        })
        .collect()
}

/// Emits `petal_count` petals.
///
/// With [`FlowerPlacement::AlongSegment`] the petals sit on the last half of
/// `anchor`, spread from `t = 0.5` toward its tip. Without an anchor (no chain
/// segment drawn yet) or with [`FlowerPlacement::Radial`], they form a ring at
/// the turtle position.
pub fn flower_cluster(
    turtle: &TurtleState,
    anchor: Option<&Segment>,
    config: &DecorationConfig,
) -> Vec<Segment> {
    let count = config.petal_count;
    let petal = |a: Vec3, b: Vec3| Segment {
        a,
        b,
        parent: turtle.parent,
        depth: turtle.depth,
        branch_start: false,
        kind: SegmentKind::Flower,
    };

    match (config.flower_placement, anchor) {
        (FlowerPlacement::AlongSegment, Some(anchor)) => (0..count)
            .map(|i| {
                let t = 0.5 + 0.5 * i as f32 / count as f32;
                let base = anchor.point_at(t);
                let dir = tilted_ring_direction(anchor.direction(), i, count, config.petal_tilt);
                petal(base, base + dir * config.petal_size)
            })
            .collect(),
        (FlowerPlacement::AlongSegment, None) => {
            tracing::trace!("flower cluster without a chain segment, placing radially");
            radial_petals(turtle, config).map(|(a, b)| petal(a, b)).collect()
        }
        (FlowerPlacement::Radial, _) => {
            radial_petals(turtle, config).map(|(a, b)| petal(a, b)).collect()
        }
    }
}

fn radial_petals<'a>(
    turtle: &'a TurtleState,
    config: &'a DecorationConfig,
) -> impl Iterator<Item = (Vec3, Vec3)> + 'a {
    let count = config.petal_count;
    (0..count).map(move |i| {
        let angle = (360.0 / count as f32 * i as f32).to_radians();
        let radial = Quat::from_axis_angle(turtle.heading, angle) * turtle.left;
        let tilt_axis = radial.cross(turtle.heading).normalize_or(turtle.up);
        let dir = Quat::from_axis_angle(tilt_axis, RADIAL_PETAL_TILT.to_radians()) * radial;
        (turtle.position, turtle.position + dir * config.petal_size)
    })
}

/// Direction `i` of `count` evenly spaced around `axis`, blended toward world
/// up by `tilt`.
fn tilted_ring_direction(axis: Vec3, i: u32, count: u32, tilt: f32) -> Vec3 {
    let axis = axis.normalize_or(Vec3::Y);
    let right = axis
        .cross(Vec3::Y)
        .try_normalize()
        .unwrap_or_else(|| axis.any_orthonormal_vector());
    let forward = right.cross(axis).normalize_or(Vec3::Z);

    let angle = std::f32::consts::TAU * i as f32 / count as f32;
    let ring = right * angle.cos() + forward * angle.sin();
    (ring * (1.0 - tilt) + Vec3::Y * tilt).normalize_or(Vec3::Y)
}
