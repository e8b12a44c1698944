use std::collections::HashSet;

use super::types::{BlockSyntax, RemovalTarget, TargetKind};

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

/// True if `s` is a whole identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_char),
        _ => false,
    }
}

/// Split the longest leading identifier off `s`.
fn split_identifier(s: &str) -> Option<(&str, &str)> {
    let first = s.chars().next()?;
    if !is_ident_start(first) {
        return None;
    }
    let end = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
    Some(s.split_at(end))
}

/// Strip `word` followed by at least one whitespace character.
fn strip_word<'a>(s: &'a str, word: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(word)?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Decides whether a line opens one of the configured removal targets.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    syntax: BlockSyntax,
    interfaces: HashSet<String>,
    methods: HashSet<String>,
    fields: HashSet<String>,
}

impl NameMatcher {
    pub fn new(targets: &[RemovalTarget], syntax: BlockSyntax) -> Self {
        let mut matcher = Self {
            syntax,
            interfaces: HashSet::new(),
            methods: HashSet::new(),
            fields: HashSet::new(),
        };
        for t in targets {
            let set = match t.kind {
                TargetKind::InterfaceBlock => &mut matcher.interfaces,
                TargetKind::MethodEntry => &mut matcher.methods,
                TargetKind::FieldLine => &mut matcher.fields,
            };
            set.insert(t.name.clone());
        }
        matcher
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty() && self.methods.is_empty() && self.fields.is_empty()
    }

    /// Classify a line. Shapes are tried in order: interface opener, method entry, field line.
    pub fn classify(&self, line: &str) -> Option<(&str, TargetKind)> {
        if self.is_empty() {
            return None;
        }
        let trimmed = line.trim_start_matches('\u{feff}').trim();

        if let Some(name) = self.interface_opener(trimmed) {
            return Some((name, TargetKind::InterfaceBlock));
        }

        let (ident, rest) = split_identifier(trimmed)?;
        if rest.starts_with(':') {
            if let Some(name) = self.methods.get(ident) {
                return Some((name.as_str(), TargetKind::MethodEntry));
            }
        }
        if rest.starts_with(':') || rest.starts_with("?:") {
            if let Some(name) = self.fields.get(ident) {
                return Some((name.as_str(), TargetKind::FieldLine));
            }
        }
        None
    }

    fn interface_opener(&self, trimmed: &str) -> Option<&str> {
        if self.interfaces.is_empty() {
            return None;
        }
        let mut rest = trimmed;
        while let Some(after) = self
            .syntax
            .modifiers
            .iter()
            .find_map(|m| strip_word(rest, m))
        {
            rest = after;
        }
        let after_kw = self
            .syntax
            .keywords
            .iter()
            .find_map(|kw| strip_word(rest, kw))?;
        let (ident, _) = split_identifier(after_kw)?;
        self.interfaces.get(ident).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(targets: &[RemovalTarget]) -> NameMatcher {
        NameMatcher::new(targets, BlockSyntax::default())
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("getStudents"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("$store"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fa"));
        assert!(!is_identifier("bad name"));
        assert!(!is_identifier("a-b"));
    }

    #[test]
    fn interface_opener_matches_exact_name() {
        let m = matcher(&[RemovalTarget::interface("User")]);
        assert_eq!(
            m.classify("interface User {"),
            Some(("User", TargetKind::InterfaceBlock))
        );
        assert_eq!(m.classify("interface UserUpdate {"), None);
        assert_eq!(m.classify("interface Users {"), None);
        assert_eq!(m.classify("interfaceUser {"), None);
    }

    #[test]
    fn interface_opener_accepts_modifiers_and_extends() {
        let m = matcher(&[RemovalTarget::interface("BulkStudentStatusChangePayload")]);
        assert!(m
            .classify("interface BulkStudentStatusChangePayload extends BulkStudentOperationPayload {")
            .is_some());
        assert!(m
            .classify("export interface BulkStudentStatusChangePayload {")
            .is_some());
        assert!(m
            .classify("export declare interface BulkStudentStatusChangePayload {")
            .is_some());
        assert!(m
            .classify("type BulkStudentStatusChangePayload = {")
            .is_none());
    }

    #[test]
    fn custom_keywords() {
        let syntax = BlockSyntax {
            keywords: vec!["type".into(), "enum".into()],
            modifiers: vec![],
        };
        let m = NameMatcher::new(&[RemovalTarget::interface("Role")], syntax);
        assert!(m.classify("enum Role {").is_some());
        assert!(m.classify("interface Role {").is_none());
        assert!(m.classify("export enum Role {").is_none());
    }

    #[test]
    fn method_entry_needs_colon_right_after_name() {
        let m = matcher(&[RemovalTarget::method("getStudents")]);
        assert_eq!(
            m.classify("  getStudents: async (): Promise<ApiResponse<any>> => {"),
            Some(("getStudents", TargetKind::MethodEntry))
        );
        assert_eq!(m.classify("  getStudentsCount: async () => {"), None);
        assert_eq!(m.classify("  // getStudents: old"), None);
        assert_eq!(m.classify("  getStudents(): void {"), None);
        assert_eq!(m.classify("  getStudents?: number;"), None);
    }

    #[test]
    fn field_line_accepts_optional_marker() {
        let m = matcher(&[RemovalTarget::field("studentId")]);
        assert_eq!(
            m.classify("  studentId?: string; // Added for BroSis users"),
            Some(("studentId", TargetKind::FieldLine))
        );
        assert_eq!(
            m.classify("  studentId: string;"),
            Some(("studentId", TargetKind::FieldLine))
        );
        assert_eq!(m.classify("  studentIds: number[];"), None);
    }

    #[test]
    fn method_wins_over_field_for_same_name() {
        let m = matcher(&[RemovalTarget::field("x"), RemovalTarget::method("x")]);
        assert_eq!(m.classify("x: 1,"), Some(("x", TargetKind::MethodEntry)));
        assert_eq!(m.classify("x?: number;"), Some(("x", TargetKind::FieldLine)));
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let m = matcher(&[RemovalTarget::interface("Drop"), RemovalTarget::method("foo")]);
        assert_eq!(
            m.classify("\u{feff}interface Drop {"),
            Some(("Drop", TargetKind::InterfaceBlock))
        );
        assert_eq!(
            m.classify("\u{feff}foo: 1,"),
            Some(("foo", TargetKind::MethodEntry))
        );
    }

    #[test]
    fn empty_matcher_matches_nothing() {
        let m = matcher(&[]);
        assert!(m.is_empty());
        assert_eq!(m.classify("interface Anything {"), None);
        assert_eq!(m.classify("anything: 1,"), None);
    }
}
