//! `buildline run` - Execute a single task by name
//!
//! Resolves the descriptor into its task plan, finds the named task, and
//! executes its node against the process toolchain. Watch tasks block
//! until interrupted.

use anyhow::{Context, Result};
use std::path::Path;

use buildline::exec::execute;
use buildline::infrastructure::ProcessToolchain;
use buildline::task::factory::create_tasks;

/// Execute the named task from a descriptor's plan
///
/// Returns `Err(anyhow::Error)` if the task does not exist or if its
/// execution fails.
pub fn run_task(file: &Path, task_name: &str, root: Option<&Path>) -> Result<()> {
    let project = super::load_project(file, root)?;
    let tasks = create_tasks(&project);

    let task = tasks
        .iter()
        .find(|task| task.name == task_name)
        .with_context(|| {
            let names: Vec<&str> = tasks.iter().map(|task| task.name.as_str()).collect();
            format!(
                "Unknown task '{}'. Available tasks: {}",
                task_name,
                names.join(", ")
            )
        })?;

    tracing::info!(task = %task.name, "executing");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let tools = ProcessToolchain::new();
    runtime
        .block_on(execute(&task.node, &tools))
        .with_context(|| format!("Task '{}' failed", task.name))?;

    Ok(())
}
