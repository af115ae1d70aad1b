//! Error types for landscape generation

use thiserror::Error;

/// Everything that can stop a generation run.
///
/// A failed run yields no segments; callers decide whether to retry with
/// different bounds or fall back to a default layout.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid bounds: width {max_width}, height {max_height} (both must be positive)")]
    InvalidBounds { max_width: f64, max_height: f64 },

    #[error("no eligible landscape: every shape has zero effective weight")]
    NoEligibleLandscape,

    #[error("anchor {anchor} of landscape '{landscape}' is unreachable: {reason}")]
    UnreachableAnchor {
        landscape: String,
        anchor: usize,
        reason: String,
    },

    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("config IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenerationError>;
