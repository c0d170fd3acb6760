//! Generation parameters.
//!
//! A [`TreeConfig`] carries everything a single generation run needs: the
//! grammar, the turtle's angle and step model, the seed for jitter, and the
//! decoration sizes. Both structs deserialize from partial documents; missing
//! fields fall back to [`Default`].

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where flower petals are anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowerPlacement {
    /// Spread along the last half of the most recent chain segment.
    #[default]
    AlongSegment,
    /// A ring around the turtle position, tilted out of the heading plane.
    Radial,
}

/// Sizes and counts for leaf (`L`) and flower (`H`) clusters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    /// Leaves emitted per `L`.
    pub leaf_count: u32,
    /// Leaf length as a fraction of the base step length.
    pub leaf_size_ratio: f32,
    /// Offset along the turtle's up vector, as a fraction of leaf length.
    pub leaf_lift: f32,
    /// Maximum angular jitter (degrees) applied to each leaf around the heading.
    pub leaf_angle_jitter: f32,
    /// Petals emitted per `H`.
    pub petal_count: u32,
    /// Absolute petal length.
    pub petal_size: f32,
    /// Blend of the petal direction toward world up, in `[0, 1]`.
    pub petal_tilt: f32,
    pub flower_placement: FlowerPlacement,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            leaf_count: 4,
            leaf_size_ratio: 0.3,
            leaf_lift: 0.3,
            leaf_angle_jitter: 15.0,
            petal_count: 6,
            petal_size: 0.2,
            petal_tilt: 0.5,
            flower_placement: FlowerPlacement::AlongSegment,
        }
    }
}

/// Configuration for one generated structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Initial symbol string.
    pub axiom: String,
    /// Production rules, one replacement string per symbol.
    pub rules: BTreeMap<char, String>,
    /// Number of rewriting rounds.
    pub iterations: u32,
    /// Turn angle for `+ - & ^ \ /`, in degrees.
    pub angle: f32,
    /// Length of a depth-0, first-in-branch segment before jitter.
    pub step_length: f32,
    /// Length multiplier applied once per nesting level.
    pub branch_reduction: f32,
    /// Length multiplier applied once per segment already drawn in the branch.
    pub segment_decay: f32,
    /// Width of the uniform step-length jitter band. `0.0` disables jitter.
    pub random_factor: f32,
    /// Seed for every random draw made during generation.
    pub seed: u64,
    /// Pushes beyond this depth are dropped.
    pub max_stack_depth: usize,
    pub decorations: DecorationConfig,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            axiom: String::new(),
            rules: BTreeMap::new(),
            iterations: 0,
            angle: 25.0,
            step_length: 1.0,
            branch_reduction: 0.8,
            segment_decay: 0.85,
            random_factor: 0.0,
            seed: 0,
            max_stack_depth: 1024,
            decorations: DecorationConfig::default(),
        }
    }
}

impl TreeConfig {
    /// Creates a config with the given axiom and default parameters.
    pub fn new(axiom: impl Into<String>) -> Self {
        Self {
            axiom: axiom.into(),
            ..Default::default()
        }
    }

    /// Adds (or replaces) a production rule.
    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        self.rules.insert(symbol, replacement.into());
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_angle(mut self, degrees: f32) -> Self {
        self.angle = degrees;
        self
    }

    pub fn with_step_length(mut self, step_length: f32) -> Self {
        self.step_length = step_length;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Disables every length-shaping factor so each `F` advances exactly `step_length`.
    pub fn with_uniform_steps(mut self) -> Self {
        self.branch_reduction = 1.0;
        self.segment_decay = 1.0;
        self.random_factor = 0.0;
        self
    }

    /// Rejects parameter combinations that would produce non-finite geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.step_length.is_finite() || self.step_length < 0.0 {
            return Err(ConfigError::InvalidStepLength(self.step_length));
        }
        if !self.angle.is_finite() {
            return Err(ConfigError::InvalidAngle(self.angle));
        }
        for (name, value) in [
            ("branch reduction", self.branch_reduction),
            ("segment decay", self.segment_decay),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidFactor { name, value });
            }
        }
        if !self.random_factor.is_finite() || self.random_factor < 0.0 {
            return Err(ConfigError::InvalidRandomFactor(self.random_factor));
        }
        if self.max_stack_depth == 0 {
            return Err(ConfigError::ZeroStackDepth);
        }
        self.decorations.validate()
    }
}

impl DecorationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("leaf size ratio", self.leaf_size_ratio),
            ("leaf lift", self.leaf_lift),
            ("leaf angle jitter", self.leaf_angle_jitter),
            ("petal size", self.petal_size),
            ("petal tilt", self.petal_tilt),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDecoration { name, value });
            }
        }
        if self.petal_tilt > 1.0 {
            return Err(ConfigError::InvalidDecoration {
                name: "petal tilt",
                value: self.petal_tilt,
            });
        }
        Ok(())
    }
}
