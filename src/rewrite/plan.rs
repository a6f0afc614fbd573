//! Rewrite plans - the substitution tables a run applies
//!
//! A plan lists files, and for each file an ordered list of exact
//! substring replacements plus an optional guarded import insertion.
//!
//! Plans are plain JSON:
//!
//! ```json
//! {
//!   "name": "pagination-calls",
//!   "description": "...",
//!   "files": [
//!     {
//!       "path": "my-user/src/app/home/home.ts",
//!       "replacements": [{ "from": "getAllProducts()", "to": "getAllProductsNoPagination()" }],
//!       "import": { "after": "...", "line": "...", "marker": "environment" }
//!     }
//!   ]
//! }
//! ```
//!
//! A bare array of file entries is accepted too; the plan is then named
//! after the file it was loaded from.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::rewrite::error::PlanError;

/// One exact substring pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Insert `line` after the first occurrence of `after`, unless `marker`
/// already appears in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRule {
    /// Existing line the new one is placed after
    pub after: String,

    /// Line to insert
    pub line: String,

    /// Token whose presence means the file is already migrated
    pub marker: String,
}

/// Substitutions for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRule {
    /// Path relative to the run root, '/' separated
    pub path: String,

    #[serde(default)]
    pub replacements: Vec<Replacement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import: Option<ImportRule>,
}

impl FileRule {
    pub fn new(path: impl Into<String>, replacements: Vec<Replacement>) -> Self {
        Self {
            path: path.into(),
            replacements,
            import: None,
        }
    }

    pub fn with_import(mut self, import: ImportRule) -> Self {
        self.import = Some(import);
        self
    }
}

/// A named list of file rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub files: Vec<FileRule>,
}

impl Plan {
    /// Reject plans that could never do anything sensible
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.files.is_empty() {
            return Err(PlanError::Invalid(format!(
                "plan '{}' lists no files",
                self.name
            )));
        }

        for (index, rule) in self.files.iter().enumerate() {
            if rule.path.trim().is_empty() {
                return Err(PlanError::Invalid(format!(
                    "file entry {} has an empty path",
                    index + 1
                )));
            }

            if rule.replacements.is_empty() && rule.import.is_none() {
                return Err(PlanError::Invalid(format!(
                    "{}: no replacements and no import rule",
                    rule.path
                )));
            }

            if rule.replacements.iter().any(|r| r.from.is_empty()) {
                return Err(PlanError::Invalid(format!(
                    "{}: replacement with an empty 'from' string",
                    rule.path
                )));
            }

            if let Some(import) = &rule.import {
                if import.after.is_empty() || import.line.is_empty() || import.marker.is_empty() {
                    return Err(PlanError::Invalid(format!(
                        "{}: import rule needs non-empty 'after', 'line' and 'marker'",
                        rule.path
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Parse and validate a plan from JSON text
pub fn load_from_str(json: &str, fallback_name: &str) -> Result<Plan, PlanError> {
    let plan = if json.trim_start().starts_with('[') {
        let files: Vec<FileRule> = serde_json::from_str(json)?;
        Plan {
            name: fallback_name.to_string(),
            description: String::new(),
            files,
        }
    } else {
        serde_json::from_str(json)?
    };

    plan.validate()?;
    Ok(plan)
}

/// Read, parse and validate a plan file
pub fn load_from_path(path: &Path) -> Result<Plan, PlanError> {
    let json = fs::read_to_string(path).map_err(|source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let fallback = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("plan");

    load_from_str(&json, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const OBJECT_PLAN: &str = r#"{
        "name": "rename",
        "description": "rename a call",
        "files": [
            {
                "path": "src/a.ts",
                "replacements": [{ "from": "foo()", "to": "bar()" }]
            }
        ]
    }"#;

    #[test]
    fn test_load_object_plan() {
        let plan = load_from_str(OBJECT_PLAN, "unused").unwrap();
        assert_eq!(plan.name, "rename");
        assert_eq!(plan.files.len(), 1);
        assert_eq!(plan.files[0].replacements[0], Replacement::new("foo()", "bar()"));
        assert!(plan.files[0].import.is_none());
    }

    #[test]
    fn test_load_array_plan_uses_fallback_name() {
        let json = r#"[
            {
                "path": "src/a.ts",
                "replacements": [{ "from": "x", "to": "y" }],
                "import": { "after": "import a;", "line": "import b;", "marker": "b" }
            }
        ]"#;
        let plan = load_from_str(json, "migrate").unwrap();
        assert_eq!(plan.name, "migrate");
        assert!(plan.description.is_empty());
        let import = plan.files[0].import.as_ref().unwrap();
        assert_eq!(import.marker, "b");
    }

    #[test]
    fn test_reject_empty_files() {
        let err = load_from_str(r#"{"name":"x","files":[]}"#, "x").unwrap_err();
        assert!(matches!(err, PlanError::Invalid(_)));
    }

    #[test]
    fn test_reject_empty_from() {
        let json = r#"[{"path":"a.ts","replacements":[{"from":"","to":"y"}]}]"#;
        let err = load_from_str(json, "x").unwrap_err();
        assert!(err.to_string().contains("empty 'from'"));
    }

    #[test]
    fn test_reject_rule_without_work() {
        let json = r#"[{"path":"a.ts"}]"#;
        let err = load_from_str(json, "x").unwrap_err();
        assert!(err.to_string().contains("no replacements"));
    }

    #[test]
    fn test_reject_incomplete_import() {
        let json = r#"[{"path":"a.ts","import":{"after":"import a;","line":"","marker":"b"}}]"#;
        let err = load_from_str(json, "x").unwrap_err();
        assert!(matches!(err, PlanError::Invalid(_)));
    }

    #[test]
    fn test_reject_malformed_json() {
        let err = load_from_str("{ not json", "x").unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
    }

    #[test]
    fn test_load_from_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("calls.json");
        fs::write(
            &path,
            r#"[{"path":"a.ts","replacements":[{"from":"a","to":"b"}]}]"#,
        )
        .unwrap();

        let plan = load_from_path(&path).unwrap();
        assert_eq!(plan.name, "calls");
    }

    #[test]
    fn test_load_from_missing_path() {
        let temp = tempdir().unwrap();
        let err = load_from_path(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PlanError::Io { .. }));
    }

    #[test]
    fn test_plan_serializes_without_empty_import() {
        let plan = Plan {
            name: "p".to_string(),
            description: String::new(),
            files: vec![FileRule::new("a.ts", vec![Replacement::new("a", "b")])],
        };
        let json = serde_json::to_string(&plan).unwrap();
        assert!(!json.contains("import"));
        let back = load_from_str(&json, "ignored").unwrap();
        assert_eq!(back, plan);
    }
}
