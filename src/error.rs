//! Error types for pruning and target loading.

use crate::prune::TargetKind;

/// All errors that can occur while configuring or running a prune pass.
#[derive(thiserror::Error, Debug)]
pub enum PruneError {
    /// Malformed or duplicate target set, rejected before any scanning.
    #[error("Config error: {0}")]
    Config(String),

    /// A targeted block never reached its closing line.
    #[error("Unterminated {kind} block `{name}` starting at line {}", .start + 1)]
    UnterminatedBlock {
        name: String,
        kind: TargetKind,
        start: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PruneError {
    pub fn config(msg: impl Into<String>) -> Self {
        PruneError::Config(msg.into())
    }
}

/// Convenience result type.
pub type PruneResult<T> = Result<T, PruneError>;
