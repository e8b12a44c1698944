use tracing::debug;

use super::braces::brace_delta;
use super::matcher::NameMatcher;
use super::types::{Removal, RemovalReport, TargetKind};
use crate::document::{Document, Line, LineSink};
use crate::error::{PruneError, PruneResult};

/// Block currently being skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBlock {
    pub name: String,
    pub kind: TargetKind,
    pub start: usize,
    pub leading_comment: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    Normal,
    SkippingBlock { depth: i32, block: OpenBlock },
}

fn is_line_comment(line: &Line) -> bool {
    line.content()
        .trim_start_matches('\u{feff}')
        .trim_start()
        .starts_with("//")
}

/// Single-pass keep/drop walker over a document.
pub struct PruningStateMachine<'m> {
    matcher: &'m NameMatcher,
    state: ScanState,
    output: LineSink,
    report: RemovalReport,
    // `//` line held back until we know whether a method entry follows it.
    pending_comment: Option<Line>,
}

impl<'m> PruningStateMachine<'m> {
    pub fn new(matcher: &'m NameMatcher, capacity: usize) -> Self {
        Self {
            matcher,
            state: ScanState::Normal,
            output: LineSink::with_capacity(capacity),
            report: RemovalReport::default(),
            pending_comment: None,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Feed one line.
    pub fn step(&mut self, line: &Line) {
        let ScanState::SkippingBlock { depth, block } = &mut self.state else {
            self.step_normal(line);
            return;
        };
        *depth += brace_delta(line.content());
        if *depth == 0 && block.kind.is_closer(line.content().trim()) {
            let block = block.clone();
            self.close(block, line.index);
        }
    }

    fn step_normal(&mut self, line: &Line) {
        let matcher = self.matcher;
        let Some((name, kind)) = matcher.classify(line.content()) else {
            self.flush_pending();
            if is_line_comment(line) {
                self.pending_comment = Some(line.clone());
            } else {
                self.output.push(line);
            }
            return;
        };

        let absorbed = match self.pending_comment.take() {
            Some(comment) if kind == TargetKind::MethodEntry => Some(comment.index),
            Some(comment) => {
                self.output.push(&comment);
                None
            }
            None => None,
        };
        let block = OpenBlock {
            name: name.to_string(),
            kind,
            start: absorbed.unwrap_or(line.index),
            leading_comment: absorbed.is_some(),
        };

        let d = brace_delta(line.content());
        if d <= 0 {
            self.close(block, line.index);
        } else {
            debug!(
                name = %block.name,
                kind = %kind,
                line = line.index + 1,
                depth = d,
                "skipping block"
            );
            self.state = ScanState::SkippingBlock { depth: d, block };
        }
    }

    fn flush_pending(&mut self) {
        if let Some(comment) = self.pending_comment.take() {
            self.output.push(&comment);
        }
    }

    fn close(&mut self, block: OpenBlock, end: usize) {
        debug!(
            name = %block.name,
            kind = %block.kind,
            start = block.start + 1,
            end = end + 1,
            "removed block"
        );
        self.report.push(Removal {
            name: block.name,
            kind: block.kind,
            start: block.start,
            end,
            leading_comment: block.leading_comment,
        });
        self.state = ScanState::Normal;
    }

    /// End of input. Fails if a block is still open.
    pub fn finish(mut self) -> PruneResult<(Document, RemovalReport)> {
        if let ScanState::SkippingBlock { block, .. } = self.state {
            return Err(PruneError::UnterminatedBlock {
                name: block.name,
                kind: block.kind,
                start: block.start,
            });
        }
        self.flush_pending();
        Ok((self.output.into_document(), self.report))
    }
}

/// Run the state machine over a whole document.
pub fn run_machine(
    matcher: &NameMatcher,
    document: &Document,
) -> PruneResult<(Document, RemovalReport)> {
    let mut machine = PruningStateMachine::new(matcher, document.len());
    for line in document {
        machine.step(line);
    }
    machine.finish()
}
