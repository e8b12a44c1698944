//! brace-prune: remove named brace-delimited declarations and object entries from source text
//! while leaving every other line byte-for-byte intact.

pub mod config;
pub mod document;
pub mod error;
pub mod prune;

pub use config::{resolve_targets_path, PruneConfig};
pub use document::{Document, Line};
pub use error::{PruneError, PruneResult};
pub use prune::{
    prune, prune_text, BlockSyntax, PruneOutcome, PruneSession, Removal, RemovalReport,
    RemovalTarget, TargetKind,
};
