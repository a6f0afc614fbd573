//! Guarded literal rewriting
//!
//! The whole tool reduces to one operation: read a file, splice in an import
//! line if it is missing, replace every literal occurrence of each `from`
//! with its `to`, and write the file back only when the text changed.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::core::model::{ItemError, Meta, ResultItem, SourceMode};
use crate::core::paths::resolve;
use crate::core::util::{count_occurrences, hash_bytes};
use crate::rewrite::error::RewriteError;
use crate::rewrite::plan::{FileRule, ImportRule, Plan};

/// Outcome of rewriting a piece of text in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,

    /// Total literal occurrences replaced
    pub replacements: usize,

    /// Occurrences per replacement, in rule order
    pub per_rule: Vec<usize>,

    pub import_inserted: bool,

    changed: bool,
}

impl Rewrite {
    pub fn changed(&self) -> bool {
        self.changed
    }
}

/// Splice the import line after the first occurrence of its anchor line.
///
/// The marker is checked against `content` as given, so callers must run this
/// before any replacement that might introduce the marker. The new line takes
/// the line ending that follows the anchor (`\r\n` or `\n`).
fn insert_import(content: &str, import: &ImportRule) -> Option<String> {
    if content.contains(&import.marker) {
        return None;
    }

    let end = content.find(&import.after)? + import.after.len();
    let (head, tail) = content.split_at(end);
    let newline = if tail.starts_with("\r\n") { "\r\n" } else { "\n" };

    let mut spliced = String::with_capacity(content.len() + newline.len() + import.line.len());
    spliced.push_str(head);
    spliced.push_str(newline);
    spliced.push_str(&import.line);
    spliced.push_str(tail);
    Some(spliced)
}

/// Apply a file rule to text without touching the filesystem
pub fn rewrite_text(content: &str, rule: &FileRule) -> Rewrite {
    let mut text = content.to_string();
    let mut import_inserted = false;

    if let Some(import) = &rule.import {
        match insert_import(&text, import) {
            Some(spliced) => {
                text = spliced;
                import_inserted = true;
            }
            None => tracing::debug!(path = %rule.path, "import not inserted"),
        }
    }

    let mut per_rule = Vec::with_capacity(rule.replacements.len());
    for replacement in &rule.replacements {
        let count = count_occurrences(&text, &replacement.from);
        if count > 0 {
            text = text.replace(&replacement.from, &replacement.to);
        }
        per_rule.push(count);
    }

    let changed = text != content;
    Rewrite {
        text,
        replacements: per_rule.iter().sum(),
        per_rule,
        import_inserted,
        changed,
    }
}

/// What happened to a file that was read successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Updated,
    Unchanged,
    WouldUpdate,
}

#[derive(Debug, Clone)]
pub struct Applied {
    pub status: Status,
    pub replacements: usize,
    pub import_inserted: bool,

    /// Size and hash of the content now (or, in a dry run, that would be) on disk
    pub size: u64,
    pub hash: String,
}

/// Per-file outcome of a plan run
#[derive(Debug)]
pub struct FileOutcome {
    pub path: String,
    pub result: Result<Applied, RewriteError>,
}

impl FileOutcome {
    pub fn to_result_item(&self, source_mode: SourceMode) -> ResultItem {
        match &self.result {
            Ok(applied) => {
                let item = match applied.status {
                    Status::Updated => ResultItem::updated(&self.path, source_mode),
                    Status::Unchanged => ResultItem::unchanged(&self.path, source_mode),
                    Status::WouldUpdate => ResultItem::preview(&self.path, source_mode),
                };
                item.with_meta(Meta {
                    size: Some(applied.size),
                    hash: Some(applied.hash.clone()),
                    replacements: applied.replacements,
                    import_inserted: applied.import_inserted,
                })
            }
            Err(e) => ResultItem::error(
                Some(self.path.clone()),
                ItemError::new(e.code(), e.to_string()),
                source_mode,
            ),
        }
    }
}

/// Rewrite one file in place
pub fn apply_file(root: &Path, rule: &FileRule, dry_run: bool) -> Result<Applied, RewriteError> {
    let path = resolve(root, &rule.path);

    let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => RewriteError::NotFound(path.clone()),
        _ => RewriteError::Read {
            path: path.clone(),
            source,
        },
    })?;

    let rewrite = rewrite_text(&content, rule);

    let status = match (rewrite.changed(), dry_run) {
        (false, _) => Status::Unchanged,
        (true, true) => Status::WouldUpdate,
        (true, false) => {
            fs::write(&path, &rewrite.text).map_err(|source| RewriteError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(
                path = %rule.path,
                bytes = rewrite.text.len(),
                replacements = rewrite.replacements,
                per_rule = ?rewrite.per_rule,
                "file written"
            );
            Status::Updated
        }
    };

    Ok(Applied {
        status,
        replacements: rewrite.replacements,
        import_inserted: rewrite.import_inserted,
        size: rewrite.text.len() as u64,
        hash: hash_bytes(rewrite.text.as_bytes()),
    })
}

/// Run every file rule in order. A failing file never stops the run.
pub fn apply_plan(root: &Path, plan: &Plan, dry_run: bool) -> Vec<FileOutcome> {
    tracing::debug!(plan = %plan.name, files = plan.files.len(), dry_run, "applying plan");

    plan.files
        .iter()
        .map(|rule| {
            let result = apply_file(root, rule, dry_run);
            if let Err(e) = &result {
                tracing::warn!(path = %rule.path, error = %e, "file skipped");
            }
            FileOutcome {
                path: rule.path.clone(),
                result,
            }
        })
        .collect()
}
