//! Flattening of segment trees into GPU-ready buffers.
//!
//! Layout, per segment:
//!
//! * positions: `ax, ay, az, bx, by, bz` as `f32` (stride [`POSITION_STRIDE`])
//! * metadata: `parent, depth-or-category, branch_start, variation` as `u32`
//!   (stride [`META_STRIDE`])
//!
//! Buffers are rebuilt from scratch on every call and never patched in place.
//! Animated poses go into their own position buffer via [`pack_pose`].

use crate::kinematics::PosedSegment;
use crate::rng::SplitMix64;
use crate::tree::SegmentTree;
use glam::Vec3;

pub const POSITION_STRIDE: usize = 6;
pub const META_STRIDE: usize = 4;

/// Parent slot value for root segments.
pub const NO_PARENT: u32 = u32::MAX;

/// Number of distinct category values written in multi-collection mode.
/// Deeper segments share the last category.
pub const CATEGORY_LEVELS: u32 = 4;

/// One metadata record, decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentMeta {
    pub parent: Option<u32>,
    /// Depth in single-collection mode, category in multi-collection mode.
    pub level: u32,
    pub branch_start: bool,
    pub variation: u32,
}

/// Flat buffers for one or more segment trees.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedBuffers {
    pub positions: Vec<f32>,
    pub metadata: Vec<u32>,
    /// Prefix sums of per-collection segment counts, present when packed with
    /// [`pack_many`].
    pub category_bounds: Option<Vec<u32>>,
}

impl PackedBuffers {
    pub fn segment_count(&self) -> usize {
        self.positions.len() / POSITION_STRIDE
    }

    /// Endpoints of segment `index`.
    pub fn position_of(&self, index: usize) -> Option<(Vec3, Vec3)> {
        let start = index.checked_mul(POSITION_STRIDE)?;
        let r = self.positions.get(start..start.checked_add(POSITION_STRIDE)?)?;
        Some((Vec3::new(r[0], r[1], r[2]), Vec3::new(r[3], r[4], r[5])))
    }

    /// Metadata of segment `index`.
    pub fn meta_of(&self, index: usize) -> Option<SegmentMeta> {
        let start = index.checked_mul(META_STRIDE)?;
        let r = self.metadata.get(start..start.checked_add(META_STRIDE)?)?;
        Some(SegmentMeta {
            parent: (r[0] != NO_PARENT).then_some(r[0]),
            level: r[1],
            branch_start: r[2] != 0,
            variation: r[3],
        })
    }

    /// Source collection of flat segment `index`, if packed with [`pack_many`].
    pub fn collection_of(&self, index: usize) -> Option<usize> {
        collection_of(self.category_bounds.as_deref()?, index)
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn metadata_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.metadata)
    }

    fn append(&mut self, tree: &SegmentTree, multi: bool, rng: &mut SplitMix64) {
        self.positions.reserve(tree.len() * POSITION_STRIDE);
        self.metadata.reserve(tree.len() * META_STRIDE);
        for segment in tree {
            self.positions.extend_from_slice(&segment.a.to_array());
            self.positions.extend_from_slice(&segment.b.to_array());

            let level = if multi {
                segment.depth.min(CATEGORY_LEVELS - 1)
            } else {
                segment.depth
            };
            self.metadata.extend_from_slice(&[
                segment.parent.unwrap_or(NO_PARENT),
                level,
                segment.branch_start as u32,
                rng.next_u32(),
            ]);
        }
    }
}

/// Packs a single tree. Metadata carries raw depth; there are no bounds.
pub fn pack(tree: &SegmentTree, seed: u64) -> PackedBuffers {
    let mut packed = PackedBuffers::default();
    packed.append(tree, false, &mut SplitMix64::new(seed));
    tracing::debug!(segments = packed.segment_count(), "packed tree");
    packed
}

/// Packs several trees back to back.
///
/// Metadata carries a depth category capped at [`CATEGORY_LEVELS`]`- 1`, and
/// parent ids stay local to their own tree. `category_bounds` holds
/// `collections + 1` prefix sums starting at 0.
pub fn pack_many(trees: &[SegmentTree], seed: u64) -> PackedBuffers {
    let mut rng = SplitMix64::new(seed);
    let mut packed = PackedBuffers::default();
    let mut bounds = Vec::with_capacity(trees.len() + 1);
    bounds.push(0u32);
    for tree in trees {
        packed.append(tree, true, &mut rng);
        bounds.push(packed.segment_count() as u32);
    }
    tracing::debug!(
        collections = trees.len(),
        segments = packed.segment_count(),
        "packed trees"
    );
    packed.category_bounds = Some(bounds);
    packed
}

/// Finds the collection `k` with `bounds[k] <= index < bounds[k + 1]`.
pub fn collection_of(bounds: &[u32], index: usize) -> Option<usize> {
    let index = u32::try_from(index).ok()?;
    let last = *bounds.last()?;
    if index >= last {
        return None;
    }
    // First bound strictly greater than index, minus one.
    bounds.partition_point(|&b| b <= index).checked_sub(1)
}

/// Bounds prefixed with their own length, ready for a storage buffer whose
/// shader needs to know how many entries follow.
pub fn bounds_header(bounds: &[u32]) -> Vec<u32> {
    let mut header = Vec::with_capacity(bounds.len() + 1);
    header.push(bounds.len() as u32);
    header.extend_from_slice(bounds);
    header
}

/// Position buffer for an animated pose, same layout as [`PackedBuffers::positions`].
pub fn pack_pose(pose: &[PosedSegment]) -> Vec<f32> {
    let mut positions = Vec::with_capacity(pose.len() * POSITION_STRIDE);
    for p in pose {
        positions.extend_from_slice(&p.a.to_array());
        positions.extend_from_slice(&p.b.to_array());
    }
    positions
}
