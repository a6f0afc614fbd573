//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::render::{OutputFormat, RenderConfig};

/// resub - guarded literal substitutions across a fixed set of source files.
#[derive(Parser, Debug)]
#[command(name = "resub")]
#[command(
    author,
    version,
    about,
    long_about = r#"resub applies tables of exact substring replacements to a fixed list of
files, optionally inserting one import line when it is missing.

A file is written back only if its text changed. A file that cannot be read
or written is reported and the run moves on to the next file.

Output formats:
- text: one status line per file plus a summary (default)
- jsonl: one JSON object per line
- json: a single JSON array
- md: human-friendly Markdown

Examples:
    resub plans
    resub apply pagination-calls --root d:/Vgreen
    resub apply --plan-file migrate.json --dry-run
    resub replace --from "getAllProducts()" --to "getAllProductsNoPagination()" src/app/home/home.ts
"#
)]
pub struct Cli {
    /// Root directory that plan paths are relative to.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        env = "RESUB_ROOT",
        long_help = "Root directory for all operations (defaults to the current directory).\n\n\
File paths inside a plan and positional `replace` files are resolved against\n\
it, and paths in results are reported relative to it. The --plan-file path\n\
itself is resolved against the current directory."
    )]
    pub root: PathBuf,

    /// Output format (text/jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        env = "RESUB_FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default)\n\
- jsonl\n\
- json\n\
- md (markdown)"
    )]
    pub format: String,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no summary line, only errors logged to stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in plans.
    Plans,

    /// Print a built-in plan as JSON.
    #[command(
        long_about = "Print a built-in plan in the JSON plan-file format.\n\n\
Use the output as a starting point for your own --plan-file.\n\n\
Example:\n\
  resub show admin-services > services.json\n"
    )]
    Show {
        /// Built-in plan name.
        #[arg(value_name = "PLAN")]
        name: String,
    },

    /// Apply a built-in plan or a JSON plan file.
    #[command(
        long_about = r#"Apply every file rule of a plan, in order.

For each file: the import line is inserted when its anchor line is present
and its marker is absent, then every literal occurrence of each `from` is
replaced with its `to`. Unchanged files are never rewritten.

Examples:
    resub apply admin-components
    resub apply --plan-file plan.json --dry-run
"#
    )]
    Apply {
        /// Built-in plan name.
        #[arg(value_name = "PLAN", required_unless_present = "plan_file")]
        name: Option<String>,

        /// Load the plan from a JSON file instead.
        #[arg(long, value_name = "FILE", conflicts_with = "name")]
        plan_file: Option<PathBuf>,

        /// Report what would change without writing anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Replace one literal string in the given files.
    #[command(
        long_about = "Replace every literal occurrence of --from with --to in each FILE.\n\n\
Files are relative to ROOT unless absolute.\n\n\
Example:\n\
  resub replace --from \"getAllProducts()\" --to \"getAllProductsNoPagination()\" a.ts b.ts\n"
    )]
    Replace {
        /// Exact text to replace.
        #[arg(long, value_name = "OLD")]
        from: String,

        /// Replacement text.
        #[arg(long, value_name = "NEW")]
        to: String,

        /// Files to rewrite.
        #[arg(value_name = "FILE", required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Report what would change without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_else(|e| {
        tracing::warn!("{}, falling back to text", e);
        OutputFormat::Text
    });
    let render_config = RenderConfig::new(format)
        .with_pretty(cli.pretty)
        .with_quiet(cli.quiet);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let root = cli.root.canonicalize().unwrap_or(cli.root);

    match cli.command {
        Commands::Plans => crate::rewrite::api::run_plans(render_config),

        Commands::Show { name } => crate::rewrite::api::run_show(&name),

        Commands::Apply {
            name,
            plan_file,
            dry_run,
        } => crate::rewrite::api::run_apply(
            &root,
            name.as_deref(),
            plan_file.as_deref(),
            dry_run,
            render_config,
        ),

        Commands::Replace {
            from,
            to,
            files,
            dry_run,
        } => crate::rewrite::api::run_replace(&root, &from, &to, &files, dry_run, render_config),
    }
}
