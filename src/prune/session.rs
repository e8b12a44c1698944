use std::collections::HashSet;

use tracing::{info, warn};

use super::machine::run_machine;
use super::matcher::{is_identifier, NameMatcher};
use super::types::{BlockSyntax, RemovalReport, RemovalTarget};
use crate::document::Document;
use crate::error::{PruneError, PruneResult};

/// Result of a successful prune pass.
#[derive(Debug, Clone)]
pub struct PruneOutcome {
    pub document: Document,
    pub report: RemovalReport,
}

impl PruneOutcome {
    pub fn text(&self) -> String {
        self.document.render()
    }
}

/// A validated target set, reusable across documents.
#[derive(Debug, Clone)]
pub struct PruneSession {
    targets: Vec<RemovalTarget>,
    matcher: NameMatcher,
}

fn validate(targets: &[RemovalTarget], syntax: &BlockSyntax) -> PruneResult<()> {
    if syntax.keywords.is_empty() {
        return Err(PruneError::config("block keyword list is empty"));
    }
    for word in syntax.keywords.iter().chain(&syntax.modifiers) {
        if !is_identifier(word) {
            return Err(PruneError::config(format!(
                "`{word}` is not a valid keyword"
            )));
        }
    }

    let mut seen = HashSet::with_capacity(targets.len());
    for t in targets {
        if !is_identifier(&t.name) {
            return Err(PruneError::config(format!(
                "{} target `{}` is not an identifier",
                t.kind, t.name
            )));
        }
        if !seen.insert((t.name.as_str(), t.kind)) {
            return Err(PruneError::config(format!(
                "duplicate {} target `{}`",
                t.kind, t.name
            )));
        }
    }
    Ok(())
}

impl PruneSession {
    pub fn new(targets: Vec<RemovalTarget>) -> PruneResult<Self> {
        Self::with_syntax(targets, BlockSyntax::default())
    }

    pub fn with_syntax(targets: Vec<RemovalTarget>, syntax: BlockSyntax) -> PruneResult<Self> {
        validate(&targets, &syntax)?;
        let matcher = NameMatcher::new(&targets, syntax);
        Ok(Self { targets, matcher })
    }

    pub fn targets(&self) -> &[RemovalTarget] {
        &self.targets
    }

    /// Prune one document. On error nothing is returned, so no partial output can leak.
    pub fn run(&self, document: &Document) -> PruneResult<PruneOutcome> {
        let (pruned, report) = run_machine(&self.matcher, document)?;

        for t in &self.targets {
            if !report.contains(&t.name, t.kind) {
                warn!(name = %t.name, kind = %t.kind, "target not found in document");
            }
        }
        info!(
            blocks = report.len(),
            lines_removed = report.lines_removed(),
            lines_kept = pruned.len(),
            "prune pass complete"
        );

        Ok(PruneOutcome {
            document: pruned,
            report,
        })
    }

    pub fn run_text(&self, text: &str) -> PruneResult<PruneOutcome> {
        self.run(&Document::parse(text))
    }
}

/// One-shot prune with default block syntax.
pub fn prune(
    document: &Document,
    targets: &[RemovalTarget],
) -> PruneResult<(Document, RemovalReport)> {
    let outcome = PruneSession::new(targets.to_vec())?.run(document)?;
    Ok((outcome.document, outcome.report))
}

/// Like [`prune`], on raw text.
pub fn prune_text(text: &str, targets: &[RemovalTarget]) -> PruneResult<(String, RemovalReport)> {
    let outcome = PruneSession::new(targets.to_vec())?.run_text(text)?;
    Ok((outcome.text(), outcome.report))
}
