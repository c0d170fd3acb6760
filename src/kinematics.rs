//! Forward-kinematics re-posing of a [`SegmentTree`].
//!
//! Each segment gets a local transform from a [`LocalMotion`]; its world
//! transform is its parent's world transform composed with that local one.
//! Parents always precede children, so one left-to-right pass suffices.
//! The base tree is never modified: every call returns a fresh pose.

use crate::tree::{Segment, SegmentId, SegmentTree};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Endpoints of one segment after posing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PosedSegment {
    pub a: Vec3,
    pub b: Vec3,
}

/// Source of per-segment local transforms.
pub trait LocalMotion {
    /// Local transform of segment `index` at `time`, expressed in the base
    /// pose's world space.
    fn local_transform(&self, index: SegmentId, segment: &Segment, time: f32) -> Mat4;
}

/// Identity motion. Posing with it reproduces the base tree.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rest;

impl LocalMotion for Rest {
    fn local_transform(&self, _index: SegmentId, _segment: &Segment, _time: f32) -> Mat4 {
        Mat4::IDENTITY
    }
}

/// Oscillating rotation of every segment about its own start point.
///
/// The angle is `amplitude * sin(frequency * time + index * phase_step)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sway {
    /// Peak angle in radians.
    pub amplitude: f32,
    pub frequency: f32,
    /// Phase offset between consecutive segments, in radians.
    pub phase_step: f32,
    /// Rotation axis in world space.
    pub axis: Vec3,
}

impl Default for Sway {
    fn default() -> Self {
        Self {
            amplitude: 0.1,
            frequency: 1.0,
            phase_step: 0.15,
            axis: Vec3::Z,
        }
    }
}

impl Sway {
    pub fn angle(&self, index: SegmentId, time: f32) -> f32 {
        self.amplitude * (self.frequency * time + index as f32 * self.phase_step).sin()
    }
}

impl LocalMotion for Sway {
    fn local_transform(&self, index: SegmentId, segment: &Segment, time: f32) -> Mat4 {
        let angle = self.angle(index, time);
        let axis = self.axis.normalize_or(Vec3::Z);
        Mat4::from_translation(segment.a)
            * Mat4::from_axis_angle(axis, angle)
            * Mat4::from_translation(-segment.a)
    }
}

/// Displaces a single segment, dragging its whole subtree along.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Impulse {
    pub target: SegmentId,
    pub offset: Vec3,
}

impl LocalMotion for Impulse {
    fn local_transform(&self, index: SegmentId, _segment: &Segment, _time: f32) -> Mat4 {
        if index == self.target {
            Mat4::from_translation(self.offset)
        } else {
            Mat4::IDENTITY
        }
    }
}

/// World transform of every segment at `time`, indexed by segment id.
///
/// A parent id that does not point backwards is treated as absent.
pub fn world_transforms(tree: &SegmentTree, time: f32, motion: &impl LocalMotion) -> Vec<Mat4> {
    let mut world: Vec<Mat4> = Vec::with_capacity(tree.len());
    for (i, segment) in tree.iter().enumerate() {
        let local = motion.local_transform(i as SegmentId, segment, time);
        let parent = segment
            .parent
            .and_then(|p| world.get(p as usize))
            .copied()
            .unwrap_or(Mat4::IDENTITY);
        world.push(parent * local);
    }
    world
}

/// Poses every segment of `tree` at `time`.
///
/// The result has the same length and order as the tree. Calling twice with
/// the same arguments gives identical output.
pub fn propagate(tree: &SegmentTree, time: f32, motion: &impl LocalMotion) -> Vec<PosedSegment> {
    let _span = tracing::trace_span!("propagate", segments = tree.len(), time).entered();
    world_transforms(tree, time, motion)
        .iter()
        .zip(tree)
        .map(|(world, segment)| PosedSegment {
            a: world.transform_point3(segment.a),
            b: world.transform_point3(segment.b),
        })
        .collect()
}
