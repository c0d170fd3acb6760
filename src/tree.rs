use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Index of a segment within its [`SegmentTree`].
pub type SegmentId = u32;

/// What a segment represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Part of a branch chain. Only these can be parents.
    Branch,
    Leaf,
    Flower,
}

/// A single line segment of the generated structure.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub a: Vec3,
    /// End point.
    pub b: Vec3,
    /// The segment whose end point `a` continues from. `None` for roots.
    pub parent: Option<SegmentId>,
    /// Branch nesting level at emission.
    pub depth: u32,
    /// First chain segment drawn after a branch pop. A shading discontinuity,
    /// not a structural one.
    pub branch_start: bool,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn direction(&self) -> Vec3 {
        self.b - self.a
    }

    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Point at parameter `t` from `a` (`t = 0`) to `b` (`t = 1`).
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.a.lerp(self.b, t)
    }
}

/// The ordered output of one generation run.
///
/// The tree is implicit: each segment names its parent by index, and parents
/// always appear before their children, so any tree-order computation is a
/// single forward pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentTree {
    segments: Vec<Segment>,
}

impl SegmentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment and returns its id.
    pub(crate) fn push(&mut self, segment: Segment) -> SegmentId {
        debug_assert!(
            segment
                .parent
                .is_none_or(|p| (p as usize) < self.segments.len())
        );
        let id = self.segments.len() as SegmentId;
        self.segments.push(segment);
        id
    }

    pub(crate) fn extend(&mut self, segments: impl IntoIterator<Item = Segment>) {
        for segment in segments {
            self.push(segment);
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id as usize)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn count_kind(&self, kind: SegmentKind) -> usize {
        self.segments.iter().filter(|s| s.kind == kind).count()
    }

    /// Returns `true` if every parent id points strictly backwards.
    pub fn check_parent_order(&self) -> bool {
        self.segments
            .iter()
            .enumerate()
            .all(|(i, s)| s.parent.is_none_or(|p| (p as usize) < i))
    }

    /// Ids of segments without a parent, in emission order.
    pub fn roots(&self) -> Vec<SegmentId> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.parent.is_none())
            .map(|(i, _)| i as SegmentId)
            .collect()
    }

    /// Groups children by parent id in one pass. Entry `i` lists the children
    /// of segment `i` in emission order.
    pub fn children_index(&self) -> Vec<Vec<SegmentId>> {
        let mut children = vec![Vec::new(); self.segments.len()];
        for (i, segment) in self.segments.iter().enumerate() {
            if let Some(parent) = segment.parent
                && let Some(list) = children.get_mut(parent as usize)
            {
                list.push(i as SegmentId);
            }
        }
        children
    }

    /// Splits the tree into root-to-tip paths.
    ///
    /// Each path is walked from a root; a new chain begins whenever a segment
    /// carries `branch_start`, and every tip closes the chain that reached it.
    /// Shared prefixes are repeated in each path that passes through them.
    pub fn chains(&self) -> Vec<Vec<SegmentId>> {
        let children = self.children_index();
        let mut chains = Vec::new();
        let mut pending: Vec<(SegmentId, Vec<SegmentId>)> = self
            .roots()
            .into_iter()
            .rev()
            .map(|root| (root, Vec::new()))
            .collect();

        while let Some((id, mut chain)) = pending.pop() {
            if self.segments[id as usize].branch_start && !chain.is_empty() {
                chains.push(std::mem::take(&mut chain));
            }
            chain.push(id);

            let kids = &children[id as usize];
            if kids.is_empty() {
                chains.push(chain);
                continue;
            }
            for &child in kids.iter().rev() {
                pending.push((child, chain.clone()));
            }
        }
        chains
    }
}

impl<'a> IntoIterator for &'a SegmentTree {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
