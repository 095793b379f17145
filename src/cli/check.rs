//! `buildline check` - Validate a project descriptor
//!
//! Loads the descriptor, runs schema and configuration validation, and
//! prints a short summary of what the project resolves to. Nothing is
//! executed.

use anyhow::Result;
use std::path::Path;

use buildline::task::factory::create_tasks;

/// Validate a descriptor file and print a summary of the resolved project
///
/// Returns `Ok(())` if the descriptor is structurally valid and complete,
/// `Err(anyhow::Error)` with the first validation failure otherwise.
pub fn check_descriptor(file: &Path) -> Result<()> {
    tracing::debug!("Validating descriptor: {}", file.display());

    let project = super::load_project(file, None)?;
    let tasks = create_tasks(&project);

    println!("OK: {}", file.display());
    println!("  name:     {}", project.name());
    println!("  version:  {}", project.version());
    println!("  type:     {}", project.project_type());
    println!("  language: {}", project.language());
    println!("  tasks:    {}", tasks.len());

    Ok(())
}
