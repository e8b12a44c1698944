mod braces;
mod machine;
mod matcher;
mod session;
mod types;

pub use braces::brace_delta;
pub use machine::{run_machine, OpenBlock, PruningStateMachine, ScanState};
pub use matcher::{is_identifier, NameMatcher};
pub use session::{prune, prune_text, PruneOutcome, PruneSession};
pub use types::{BlockSyntax, Removal, RemovalReport, RemovalTarget, TargetKind};
