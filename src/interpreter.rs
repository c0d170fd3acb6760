//! Interpreter that converts an expanded L-System string into a [`SegmentTree`].
//!
//! The entry point is [`TreeInterpreter`]. Configure it with a [`TreeConfig`],
//! register symbol-to-operation mappings via [`TreeInterpreter::set_op`] or
//! [`TreeInterpreter::populate_standard_symbols`], then call
//! [`TreeInterpreter::build_tree`] with the output of
//! [`rewrite`](crate::grammar::rewrite).

use crate::config::TreeConfig;
use crate::decoration::{flower_cluster, leaf_cluster};
use crate::rng::SplitMix64;
use crate::tree::{Segment, SegmentId, SegmentKind, SegmentTree};
use crate::turtle::{TurtleOp, TurtleState};
use std::collections::HashMap;

/// Interprets L-System output to build a [`SegmentTree`].
pub struct TreeInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: TreeConfig,
}

impl TreeInterpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before calling
    /// [`build_tree`](Self::build_tree).
    pub fn new(config: TreeConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Creates an interpreter with the standard symbol table already registered.
    pub fn standard(config: TreeConfig) -> Self {
        let mut interpreter = Self::new(config);
        interpreter.populate_standard_symbols();
        interpreter
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    pub fn with_map(mut self, map: HashMap<char, TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// Registers the conventional symbol-to-operation mappings.
    ///
    /// | Symbol | Operation |
    /// |---|---|
    /// | `F`, `G` | draw |
    /// | `+` / `-` | yaw |
    /// | `&` / `^` | pitch |
    /// | `\` / `/` | roll |
    /// | `[` / `]` | push / pop |
    /// | `L` | leaf cluster |
    /// | `H` | flower cluster |
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            // Geometry
            ('F', TurtleOp::Draw),
            ('G', TurtleOp::Draw),
            // Spatial
            ('+', TurtleOp::Yaw(1.0)),
            ('-', TurtleOp::Yaw(-1.0)),
            ('&', TurtleOp::Pitch(1.0)),
            ('^', TurtleOp::Pitch(-1.0)),
            ('\\', TurtleOp::Roll(1.0)),
            ('/', TurtleOp::Roll(-1.0)),
            // Decorations
            ('L', TurtleOp::Leaves),
            ('H', TurtleOp::Flowers),
            // Flow
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];

        for (symbol, op) in mappings {
            self.set_op(symbol, op);
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Length of the next chain segment.
    ///
    /// `base * reduction^depth * decay^index`, scaled by a jitter factor drawn
    /// uniformly from `1 ± random_factor / 2`.
    fn step_length(&self, depth: u32, index: u32, rng: &mut SplitMix64) -> f32 {
        let c = &self.config;
        let length = c.step_length
            * c.branch_reduction.powi(depth as i32)
            * c.segment_decay.powi(index as i32);
        let jitter = if c.random_factor > 0.0 {
            (1.0 + c.random_factor * (rng.next_f32() - 0.5)).max(0.0)
        } else {
            1.0
        };
        length * jitter
    }

    /// Interprets `symbols` and returns the resulting [`SegmentTree`].
    ///
    /// Walks every character in order, dispatching each to its registered
    /// [`TurtleOp`]. The turtle starts at the origin heading `+Y`. Characters
    /// with no registered mapping are ignored.
    ///
    /// # Push / Pop
    ///
    /// `[` saves a copy of the turtle state and descends one level. `]` restores
    /// the latest copy and flags the next chain segment as a branch start. A `]`
    /// with nothing to restore does nothing. Pushes beyond `max_stack_depth` are
    /// silently dropped together with their matching `]`, so the branch simply
    /// continues inline.
    pub fn build_tree(&self, symbols: &str) -> SegmentTree {
        let mut tree = SegmentTree::new();
        let mut rng = SplitMix64::new(self.config.seed);
        let mut turtle = TurtleState::default();
        let mut stack: Vec<TurtleState> = Vec::new();
        // Pushes dropped at the depth limit; their pops must not touch the stack.
        let mut overflow: usize = 0;
        let angle = self.config.angle.to_radians();

        // Chain segments drawn in the current branch.
        let mut branch_index: u32 = 0;
        let mut last_chain: Option<SegmentId> = None;
        let mut pending_branch_start = false;

        for symbol in symbols.chars() {
            let op = self.op_map.get(&symbol).unwrap_or(&TurtleOp::Ignore);

            match op {
                // --- GEOMETRY ---
                TurtleOp::Draw => {
                    let length = self.step_length(turtle.depth, branch_index, &mut rng);
                    let start = turtle.position;
                    turtle.advance(length);
                    let id = tree.push(Segment {
                        a: start,
                        b: turtle.position,
                        parent: turtle.parent,
                        depth: turtle.depth,
                        branch_start: pending_branch_start,
                        kind: SegmentKind::Branch,
                    });
                    pending_branch_start = false;
                    turtle.parent = Some(id);
                    last_chain = Some(id);
                    branch_index += 1;
                }

                // --- SPATIAL ---
                TurtleOp::Yaw(s) => turtle.yaw(angle * s),
                TurtleOp::Pitch(s) => turtle.pitch(angle * s),
                TurtleOp::Roll(s) => turtle.roll(angle * s),

                // --- DECORATION ---
                TurtleOp::Leaves => {
                    let leaves = leaf_cluster(
                        &turtle,
                        self.config.step_length,
                        &self.config.decorations,
                        &mut rng,
                    );
                    tree.extend(leaves);
                }
                TurtleOp::Flowers => {
                    let anchor = last_chain.and_then(|id| tree.get(id)).copied();
                    let petals =
                        flower_cluster(&turtle, anchor.as_ref(), &self.config.decorations);
                    tree.extend(petals);
                }

                // --- FLOW ---
                TurtleOp::Push => {
                    if stack.len() < self.config.max_stack_depth {
                        stack.push(turtle);
                        turtle.depth += 1;
                        branch_index = 0;
                    } else {
                        overflow += 1;
                        tracing::trace!(depth = stack.len(), "branch push dropped");
                    }
                }
                TurtleOp::Pop if overflow > 0 => overflow -= 1,
                TurtleOp::Pop => match stack.pop() {
                    Some(saved) => {
                        turtle = saved;
                        branch_index = 0;
                        pending_branch_start = true;
                    }
                    None => tracing::trace!("unmatched branch pop ignored"),
                },
                TurtleOp::Ignore => {}
            }
        }

        tree
    }
}
