//! Errors raised while validating a [`TreeConfig`](crate::config::TreeConfig).
//!
//! Generation itself never fails: anything that would be a runtime error
//! (unknown symbols, unmatched `]`, frame drift) is recovered locally. Bad
//! numeric parameters are rejected here, before a walk begins.

/// Errors from configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("step length must be finite and non-negative, got {0}")]
    InvalidStepLength(f32),

    #[error("turn angle must be finite, got {0}")]
    InvalidAngle(f32),

    #[error("{name} must be finite and greater than zero, got {value}")]
    InvalidFactor { name: &'static str, value: f32 },

    #[error("random factor must be finite and non-negative, got {0}")]
    InvalidRandomFactor(f32),

    #[error("decoration {name} must be finite and non-negative, got {value}")]
    InvalidDecoration { name: &'static str, value: f32 },

    #[error("max stack depth must be at least 1")]
    ZeroStackDepth,
}
