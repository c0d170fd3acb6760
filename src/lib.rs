//! # symbios-arbor
//!
//! Procedural tree generation for real-time renderers. An L-System grammar is
//! expanded into a symbol string, a 3D turtle walks that string and emits a
//! parent-indexed [`SegmentTree`], an optional forward-kinematics pass re-poses
//! the tree each frame, and the packer flattens it into the position and
//! metadata buffers a GPU instancing pass consumes.
//!
//! ```
//! use symbios_arbor::{TreeConfig, generate, pack};
//!
//! let config = TreeConfig::new("F")
//!     .with_rule('F', "F[+F]F[-F]F")
//!     .with_iterations(2);
//! let tree = generate(&config).unwrap();
//! let buffers = pack(&tree, 0);
//! assert_eq!(buffers.positions.len(), tree.len() * 6);
//! ```

pub mod config;
pub mod decoration;
pub mod error;
pub mod generate;
pub mod grammar;
pub mod interpreter;
pub mod kinematics;
pub mod packer;
pub mod rng;
pub mod tree;
pub mod turtle;

pub use config::*;
pub use error::*;
pub use generate::*;
pub use grammar::*;
pub use interpreter::*;
pub use kinematics::*;
pub use packer::*;
pub use rng::*;
pub use tree::*;
pub use turtle::*;
