//! `buildline tasks` - List the tasks a descriptor produces
//!
//! Resolves the descriptor into its full task plan and prints one line per
//! task, in execution order. Watch variants are hidden unless requested.

use anyhow::Result;
use std::path::Path;

use buildline::task::factory::create_tasks;

/// Print the task plan for a descriptor
pub fn list_tasks(file: &Path, include_watch: bool) -> Result<()> {
    let project = super::load_project(file, None)?;
    let tasks = create_tasks(&project);

    let width = tasks
        .iter()
        .filter(|task| include_watch || !task.name.starts_with("watch-"))
        .map(|task| task.name.len())
        .max()
        .unwrap_or(0);

    for task in &tasks {
        if !include_watch && task.name.starts_with("watch-") {
            continue;
        }
        println!("{:width$}  {}", task.name, task.description);
    }

    Ok(())
}
