//! Renderer module
//!
//! Renders ResultSet to different output formats: text, jsonl, json, md

use colored::Colorize;
use std::io::Write;

use crate::core::model::{Kind, ResultItem, ResultSet};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    /// Suppress the trailing summary line in text mode
    pub quiet: bool,
    /// Nothing was written; the summary says so
    pub dry_run: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            quiet: false,
            dry_run: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[cfg(test)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(result_set),
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(
        &self,
        result_set: &ResultSet,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(result_set);
        if output.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", output)
    }

    /// Render as human-readable status lines
    fn render_text(&self, result_set: &ResultSet) -> String {
        let mut lines: Vec<String> = result_set.items.iter().map(status_line).collect();

        let has_outcomes = result_set.items.iter().any(|item| item.kind != Kind::Plan);
        if has_outcomes && !self.config.quiet {
            lines.push(String::new());
            lines.push(summary_line(result_set, self.config.dry_run));
        }

        lines.join("\n")
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        let sections = [
            (Kind::Error, "Errors"),
            (Kind::Updated, "Updated"),
            (Kind::Preview, "Would Update"),
            (Kind::Unchanged, "Unchanged"),
            (Kind::Plan, "Plans"),
        ];

        for (kind, title) in sections {
            let items: Vec<&ResultItem> =
                result_set.items.iter().filter(|i| i.kind == kind).collect();
            if items.is_empty() {
                continue;
            }

            output.push_str(&format!("## {}\n\n", title));
            for item in items {
                output.push_str(&markdown_line(item));
                output.push('\n');
            }
            output.push('\n');
        }

        output
    }
}

fn detail(item: &ResultItem) -> String {
    let mut detail = format!(
        "{} replacement{}",
        item.meta.replacements,
        if item.meta.replacements == 1 { "" } else { "s" }
    );
    if item.meta.import_inserted {
        detail.push_str(", import added");
    }
    detail
}

fn plan_fields(item: &ResultItem) -> (String, u64) {
    let name = item
        .data
        .as_ref()
        .and_then(|d| d.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("?")
        .to_string();
    let files = item
        .data
        .as_ref()
        .and_then(|d| d.get("files"))
        .and_then(|n| n.as_u64())
        .unwrap_or(0);
    (name, files)
}

fn error_message(item: &ResultItem) -> String {
    item.errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// One status line per item, in the style of the original maintenance scripts
fn status_line(item: &ResultItem) -> String {
    let path = item.path.as_deref().unwrap_or("-");
    match item.kind {
        Kind::Updated => format!(
            "{} {} ({})",
            "✅ Updated:".green(),
            path,
            detail(item)
        ),
        Kind::Preview => format!(
            "{} {} ({})",
            "🔍 Would update:".cyan(),
            path,
            detail(item)
        ),
        Kind::Unchanged => format!("{} {}", "⏭️  Skipped (no changes):".yellow(), path),
        Kind::Error => format!("{} {}: {}", "❌ Error:".red(), path, error_message(item)),
        Kind::Plan => {
            let (name, files) = plan_fields(item);
            format!(
                "{}  {} ({} files)",
                name.as_str().bold(),
                item.excerpt.as_deref().unwrap_or(""),
                files
            )
        }
    }
}

fn markdown_line(item: &ResultItem) -> String {
    let path = item.path.as_deref().unwrap_or("-");
    match item.kind {
        Kind::Updated | Kind::Preview => format!("- `{}` ({})", path, detail(item)),
        Kind::Unchanged => format!("- `{}`", path),
        Kind::Error => {
            let codes = item
                .errors
                .iter()
                .map(|e| format!("**{}**: {}", e.code, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            format!("- `{}`: {}", path, codes)
        }
        Kind::Plan => {
            let (name, files) = plan_fields(item);
            format!(
                "- **{}**: {} ({} files)",
                name,
                item.excerpt.as_deref().unwrap_or(""),
                files
            )
        }
    }
}

/// Summary line printed after a text-mode run
fn summary_line(result_set: &ResultSet, dry_run: bool) -> String {
    let updated = result_set.count(Kind::Updated);
    let preview = result_set.count(Kind::Preview);
    let unchanged = result_set.count(Kind::Unchanged);
    let failed = result_set.count(Kind::Error);

    if dry_run {
        format!(
            "Dry run: {} would update, {} unchanged, {} failed",
            preview, unchanged, failed
        )
    } else {
        format!(
            "Done: {} updated, {} unchanged, {} failed",
            updated, unchanged, failed
        )
    }
}
