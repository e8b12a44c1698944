use std::fmt;

use serde::{Deserialize, Serialize};

/// Which line-shape heuristic a target is matched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// `interface Name {` ... `}`
    InterfaceBlock,
    /// `name: ...` inside an object literal, closed by `},`
    MethodEntry,
    /// `name?: Type;` member line inside a declaration
    FieldLine,
}

impl TargetKind {
    /// Does the trimmed line close a block of this kind?
    pub fn is_closer(self, trimmed: &str) -> bool {
        match self {
            TargetKind::InterfaceBlock => trimmed == "}",
            TargetKind::MethodEntry => trimmed == "},",
            TargetKind::FieldLine => matches!(trimmed, "}" | "}," | "};"),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetKind::InterfaceBlock => "interface",
            TargetKind::MethodEntry => "method",
            TargetKind::FieldLine => "field",
        };
        f.write_str(s)
    }
}

/// A (name, kind) pair the caller wants removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemovalTarget {
    pub name: String,
    pub kind: TargetKind,
}

impl RemovalTarget {
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TargetKind::InterfaceBlock)
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new(name, TargetKind::MethodEntry)
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self::new(name, TargetKind::FieldLine)
    }
}

/// Keywords and modifiers recognized on interface-block opener lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockSyntax {
    pub keywords: Vec<String>,
    pub modifiers: Vec<String>,
}

impl Default for BlockSyntax {
    fn default() -> Self {
        Self {
            keywords: vec!["interface".to_string()],
            modifiers: vec!["export".to_string(), "declare".to_string()],
        }
    }
}

/// One removed block. Indices are 0-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    pub name: String,
    pub kind: TargetKind,
    pub start: usize,
    pub end: usize,
    /// The `//` line directly above a method entry was removed with it.
    pub leading_comment: bool,
}

impl Removal {
    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Ordered record of everything a prune pass removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalReport {
    pub removals: Vec<Removal>,
}

impl RemovalReport {
    pub fn push(&mut self, removal: Removal) {
        self.removals.push(removal);
    }

    pub fn is_empty(&self) -> bool {
        self.removals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.removals.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Removal> {
        self.removals.iter()
    }

    /// Total number of input lines dropped.
    pub fn lines_removed(&self) -> usize {
        self.removals.iter().map(Removal::line_count).sum()
    }

    pub fn contains(&self, name: &str, kind: TargetKind) -> bool {
        self.removals
            .iter()
            .any(|r| r.kind == kind && r.name == name)
    }
}
