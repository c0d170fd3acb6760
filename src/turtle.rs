//! Turtle state and operations for tree interpretation.

use crate::tree::SegmentId;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The state of the drawing turtle.
///
/// Tracks position, an orthonormal right-handed frame, and the topological
/// context (which segment the next one continues from). The type is `Copy` so
/// a branch push always stores an independent snapshot; no vector is ever
/// shared between stack entries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current world-space position of the cursor.
    pub position: Vec3,
    /// Direction of travel.
    pub heading: Vec3,
    pub left: Vec3,
    pub up: Vec3,
    /// The segment the next chain segment attaches to, if any.
    pub parent: Option<SegmentId>,
    /// Branch nesting level.
    pub depth: u32,
}

impl Default for TurtleState {
    /// Origin, growing along +Y, with left = -X and up = +Z.
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            heading: Vec3::Y,
            left: Vec3::NEG_X,
            up: Vec3::Z,
            parent: None,
            depth: 0,
        }
    }
}

impl TurtleState {
    /// Rotates heading and left around up by `angle` radians (`+`/`-`).
    pub fn yaw(&mut self, angle: f32) {
        let rot = Quat::from_axis_angle(self.up, angle);
        self.heading = rot * self.heading;
        self.left = rot * self.left;
        self.orthonormalize();
    }

    /// Rotates heading and up around left by `angle` radians (`&`/`^`).
    pub fn pitch(&mut self, angle: f32) {
        let rot = Quat::from_axis_angle(self.left, angle);
        self.heading = rot * self.heading;
        self.up = rot * self.up;
        self.orthonormalize();
    }

    /// Rotates left and up around heading by `angle` radians (`\`/`/`).
    pub fn roll(&mut self, angle: f32) {
        let rot = Quat::from_axis_angle(self.heading, angle);
        self.left = rot * self.left;
        self.up = rot * self.up;
        self.orthonormalize();
    }

    /// Rebuilds an exact orthonormal frame from heading and up.
    ///
    /// Incremental rotations drift over long strings; re-deriving after each
    /// one keeps the error bounded by a single rotation.
    pub fn orthonormalize(&mut self) {
        self.heading = self.heading.normalize_or(Vec3::Y);
        self.left = self.up.cross(self.heading).normalize_or(Vec3::NEG_X);
        self.up = self.heading.cross(self.left).normalize_or(Vec3::Z);
    }

    /// Moves the cursor `distance` along heading.
    pub fn advance(&mut self, distance: f32) {
        self.position += self.heading * distance;
    }
}

/// Operations that can be bound to a symbol.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TurtleOp {
    /// Advance and emit a chain segment (`F`, `G`).
    Draw,
    /// Rotate around up (`+`/`-`). The value is the sign applied to the angle.
    Yaw(f32),
    /// Rotate around left (`&`/`^`).
    Pitch(f32),
    /// Rotate around heading (`\` / `/`).
    Roll(f32),
    /// Emit a leaf cluster at the cursor (`L`).
    Leaves,
    /// Emit a flower cluster on the last chain segment (`H`).
    Flowers,
    /// Save the full turtle state onto the stack (`[`).
    Push,
    /// Restore the most recently pushed turtle state (`]`).
    Pop,
    /// No-op; the symbol has no registered meaning.
    Ignore,
}
