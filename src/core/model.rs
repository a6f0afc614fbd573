//! Unified Result Model
//!
//! Every command maps its outcomes to this model before rendering output.

use serde::{Deserialize, Serialize};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// File was rewritten
    Updated,
    /// File needed no change and was left untouched
    Unchanged,
    /// Dry run: file would be rewritten
    Preview,
    /// A rewrite plan description
    Plan,
    Error,
}

/// Where the substitution table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    Builtin,
    PlanFile,
    Adhoc,
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Size of the resulting content in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// XXH3 hash of the resulting content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Number of literal occurrences replaced
    #[serde(default)]
    pub replacements: usize,

    /// Whether an import line was spliced in
    #[serde(default)]
    pub import_inserted: bool,
}

/// Error information for a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl ItemError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Path relative to root, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Short human-readable note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Structured payload (plan listings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// How the substitution table was obtained
    pub source_mode: SourceMode,

    /// Metadata
    pub meta: Meta,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl ResultItem {
    fn base(kind: Kind, path: Option<String>, source_mode: SourceMode) -> Self {
        Self {
            kind,
            path,
            excerpt: None,
            data: None,
            source_mode,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a result for a rewritten file
    pub fn updated(path: impl Into<String>, source_mode: SourceMode) -> Self {
        Self::base(Kind::Updated, Some(path.into()), source_mode)
    }

    /// Create a result for a file left untouched
    pub fn unchanged(path: impl Into<String>, source_mode: SourceMode) -> Self {
        Self::base(Kind::Unchanged, Some(path.into()), source_mode)
    }

    /// Create a dry-run result for a file that would be rewritten
    pub fn preview(path: impl Into<String>, source_mode: SourceMode) -> Self {
        Self::base(Kind::Preview, Some(path.into()), source_mode)
    }

    /// Create a plan listing entry
    pub fn plan(name: &str, description: &str, files: usize) -> Self {
        let mut item = Self::base(Kind::Plan, None, SourceMode::Builtin);
        item.excerpt = Some(description.to_string());
        item.data = Some(serde_json::json!({ "name": name, "files": files }));
        item
    }

    /// Create a new error result
    pub fn error(path: Option<String>, error: ItemError, source_mode: SourceMode) -> Self {
        let mut item = Self::base(Kind::Error, path, source_mode);
        item.errors.push(error);
        item
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[allow(dead_code)]
    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    /// Number of items of the given kind
    pub fn count(&self, kind: Kind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
