//! resub - guarded literal substitutions across a fixed set of source files
//!
//! resub provides:
//! - Built-in rewrite plans (call renames, API base URL migration)
//! - JSON plan files for custom substitution tables
//! - Ad-hoc single-pair replacement over explicit files
//! - Unified output format (text/jsonl/json/md)

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod rewrite;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    crate::core::logging::init(cli.verbose, cli.quiet);
    cli::run(cli)
}
