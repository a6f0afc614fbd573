//! Rewrite API - plans, show, apply, replace operations

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::core::model::{ResultItem, ResultSet, SourceMode};
use crate::core::paths::display_path;
use crate::core::render::{RenderConfig, Renderer};
use crate::rewrite::builtin;
use crate::rewrite::engine::apply_plan;
use crate::rewrite::error::PlanError;
use crate::rewrite::plan::{load_from_path, FileRule, Plan, Replacement};

fn print(result_set: &ResultSet, config: RenderConfig) -> Result<()> {
    let renderer = Renderer::with_config(config);
    renderer
        .render_to(result_set, std::io::stdout().lock())
        .context("Failed to write output")
}

/// Listing of the built-in plans
pub fn list_plans() -> ResultSet {
    builtin::all()
        .iter()
        .map(|plan| ResultItem::plan(&plan.name, &plan.description, plan.files.len()))
        .collect()
}

/// Run a plan and map every file outcome to a result item
pub fn apply_to_result_set(
    root: &Path,
    plan: &Plan,
    source_mode: SourceMode,
    dry_run: bool,
) -> ResultSet {
    apply_plan(root, plan, dry_run)
        .iter()
        .map(|outcome| outcome.to_result_item(source_mode))
        .collect()
}

/// Pick the plan to run: a built-in by name or a JSON plan file
pub fn resolve_plan(name: Option<&str>, plan_file: Option<&Path>) -> Result<(Plan, SourceMode)> {
    match (name, plan_file) {
        (Some(_), Some(_)) => bail!("Give either a plan name or --plan-file, not both"),
        (None, None) => bail!("No plan given (run `resub plans` to list built-in plans)"),
        (Some(name), None) => {
            let plan = builtin::find(name).ok_or_else(|| PlanError::UnknownPlan(name.to_string()))?;
            Ok((plan, SourceMode::Builtin))
        }
        (None, Some(path)) => {
            let plan = load_from_path(path)
                .with_context(|| format!("Failed to load plan file: {}", path.display()))?;
            Ok((plan, SourceMode::PlanFile))
        }
    }
}

/// Build a single-pair plan over explicit files
pub fn adhoc_plan(root: &Path, from: &str, to: &str, files: &[PathBuf]) -> Result<Plan> {
    let plan = Plan {
        name: "replace".to_string(),
        description: format!("{} -> {}", from, to),
        files: files
            .iter()
            .map(|file| {
                FileRule::new(
                    display_path(file, root),
                    vec![Replacement::new(from, to)],
                )
            })
            .collect(),
    };
    plan.validate()?;
    Ok(plan)
}

/// Run the plans command
pub fn run_plans(config: RenderConfig) -> Result<()> {
    print(&list_plans(), config)
}

/// Run the show command: print a built-in plan as a JSON plan file
pub fn run_show(name: &str) -> Result<()> {
    let plan = builtin::find(name).ok_or_else(|| PlanError::UnknownPlan(name.to_string()))?;
    let json = serde_json::to_string_pretty(&plan)?;
    println!("{}", json);
    Ok(())
}

/// Run the apply command
pub fn run_apply(
    root: &Path,
    name: Option<&str>,
    plan_file: Option<&Path>,
    dry_run: bool,
    config: RenderConfig,
) -> Result<()> {
    let (plan, source_mode) = resolve_plan(name, plan_file)?;
    tracing::info!(plan = %plan.name, root = %root.display(), "running plan");

    let result_set = apply_to_result_set(root, &plan, source_mode, dry_run);
    print(&result_set, config.with_dry_run(dry_run))
}

/// Run the replace command
pub fn run_replace(
    root: &Path,
    from: &str,
    to: &str,
    files: &[PathBuf],
    dry_run: bool,
    config: RenderConfig,
) -> Result<()> {
    let plan = adhoc_plan(root, from, to, files)?;
    let result_set = apply_to_result_set(root, &plan, SourceMode::Adhoc, dry_run);
    print(&result_set, config.with_dry_run(dry_run))
}
