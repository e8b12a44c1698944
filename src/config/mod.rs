//! Target-set loading and path resolution.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PruneError, PruneResult};
use crate::prune::{BlockSyntax, PruneSession, RemovalTarget, TargetKind};

/// Env var naming a default targets file.
pub const TARGETS_ENV: &str = "BRACE_PRUNE_TARGETS";

/// Targets file picked up from the working directory when nothing else is given.
pub const DEFAULT_TARGETS_FILE: &str = ".brace-prune.json";

/// Everything one prune session needs besides the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneConfig {
    #[serde(default)]
    pub targets: Vec<RemovalTarget>,
    #[serde(default)]
    pub syntax: BlockSyntax,
}

impl PruneConfig {
    pub fn from_json(text: &str) -> PruneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a targets file; `.json` is parsed as JSON, anything else as a plain list.
    pub fn load(path: &Path) -> PruneResult<Self> {
        let text = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&text)
        } else {
            Ok(Self {
                targets: parse_target_list(&text)?,
                syntax: BlockSyntax::default(),
            })
        }
    }

    pub fn extend_targets(&mut self, kind: TargetKind, names: &[String]) {
        self.targets
            .extend(names.iter().map(|n| RemovalTarget::new(n.clone(), kind)));
    }

    /// Validate and build a session.
    pub fn into_session(self) -> PruneResult<PruneSession> {
        PruneSession::with_syntax(self.targets, self.syntax)
    }
}

fn parse_kind(word: &str) -> Option<TargetKind> {
    match word.to_lowercase().as_str() {
        "interface" | "block" => Some(TargetKind::InterfaceBlock),
        "method" | "entry" => Some(TargetKind::MethodEntry),
        "field" => Some(TargetKind::FieldLine),
        _ => None,
    }
}

/// Parse a plain targets list: `<kind> <name>...` per line, `#` starts a comment line.
pub fn parse_target_list(text: &str) -> PruneResult<Vec<RemovalTarget>> {
    let mut targets = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let t = line.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        let words = shlex::split(t)
            .ok_or_else(|| PruneError::config(format!("line {}: unbalanced quotes", i + 1)))?;
        let Some((kind_word, names)) = words.split_first() else {
            continue;
        };
        let kind = parse_kind(kind_word).ok_or_else(|| {
            PruneError::config(format!("line {}: unknown target kind `{kind_word}`", i + 1))
        })?;
        if names.is_empty() {
            return Err(PruneError::config(format!(
                "line {}: `{kind_word}` needs at least one name",
                i + 1
            )));
        }
        targets.extend(names.iter().map(|n| RemovalTarget::new(n.clone(), kind)));
    }
    Ok(targets)
}

/// Resolve the targets file path.
///
/// The working-directory default is only consulted when `allow_cwd_default` is set.
pub fn resolve_targets_path(explicit: Option<&str>, allow_cwd_default: bool) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    if let Ok(env_path) = std::env::var(TARGETS_ENV) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    let cwd_default = PathBuf::from(DEFAULT_TARGETS_FILE);
    if allow_cwd_default && cwd_default.exists() {
        return Some(cwd_default);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn json_config_with_syntax() {
        let cfg = PruneConfig::from_json(
            r#"{
                "targets": [
                    {"name": "getStudents", "kind": "method_entry"},
                    {"name": "BulkStudentOperationPayload", "kind": "interface_block"},
                    {"name": "studentId", "kind": "field_line"}
                ],
                "syntax": {"keywords": ["interface", "type"]}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.targets.len(), 3);
        assert_eq!(cfg.targets[1], RemovalTarget::interface("BulkStudentOperationPayload"));
        assert_eq!(cfg.syntax.keywords, vec!["interface", "type"]);
        // modifiers fall back to defaults
        assert_eq!(cfg.syntax.modifiers, BlockSyntax::default().modifiers);
    }

    #[test]
    fn json_config_rejects_unknown_kind() {
        let err = PruneConfig::from_json(r#"{"targets":[{"name":"x","kind":"class"}]}"#)
            .unwrap_err();
        assert!(matches!(err, PruneError::Json(_)));
    }

    #[test]
    fn plain_list_parsing() {
        let text = "# student cleanup\nmethod getStudents createStudent\n\ninterface 'BulkStudentOperationPayload'\nfield studentId\n";
        let targets = parse_target_list(text).unwrap();
        assert_eq!(
            targets,
            vec![
                RemovalTarget::method("getStudents"),
                RemovalTarget::method("createStudent"),
                RemovalTarget::interface("BulkStudentOperationPayload"),
                RemovalTarget::field("studentId"),
            ]
        );
    }

    #[test]
    fn plain_list_errors() {
        assert!(parse_target_list("widget Foo").is_err());
        assert!(parse_target_list("method").is_err());
        assert!(parse_target_list("method \"unclosed").is_err());
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("targets.json");
        fs::write(&json, r#"{"targets":[{"name":"a","kind":"method_entry"}]}"#).unwrap();
        assert_eq!(
            PruneConfig::load(&json).unwrap().targets,
            vec![RemovalTarget::method("a")]
        );

        let list = dir.path().join("targets.txt");
        let mut f = fs::File::create(&list).unwrap();
        writeln!(f, "block A").unwrap();
        assert_eq!(
            PruneConfig::load(&list).unwrap().targets,
            vec![RemovalTarget::interface("A")]
        );

        let missing = dir.path().join("nope.json");
        assert!(matches!(
            PruneConfig::load(&missing).unwrap_err(),
            PruneError::Io(_)
        ));
    }

    #[test]
    fn extend_and_build_session() {
        let mut cfg = PruneConfig::default();
        cfg.extend_targets(TargetKind::MethodEntry, &["a".to_string(), "b".to_string()]);
        cfg.extend_targets(TargetKind::MethodEntry, &["a".to_string()]);
        assert!(matches!(
            cfg.into_session().unwrap_err(),
            PruneError::Config(_)
        ));
    }

    #[test]
    fn cwd_default_needs_opt_in() {
        // only meaningful when the env var is unset and no default file sits in the test cwd
        if std::env::var_os(TARGETS_ENV).is_none() && !Path::new(DEFAULT_TARGETS_FILE).exists() {
            assert_eq!(resolve_targets_path(None, true), None);
            assert_eq!(resolve_targets_path(None, false), None);
        }
    }

    #[test]
    fn explicit_path_wins() {
        assert_eq!(
            resolve_targets_path(Some("custom.txt"), false),
            Some(PathBuf::from("custom.txt"))
        );
    }
}
