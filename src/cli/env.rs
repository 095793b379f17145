//! `buildline env` - Report missing required environment variables
//!
//! Compares the descriptor's `requiredEnv` list against the current
//! process environment. Exits non-zero when anything is missing so the
//! command can gate CI steps.

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Check the current environment against the descriptor's requirements
pub fn report_env(file: &Path) -> Result<()> {
    let project = super::load_project(file, None)?;

    let snapshot: HashMap<String, String> = std::env::vars().collect();
    let missing = project.get_undefined_environment_variables(&snapshot);

    if missing.is_empty() {
        println!("All required environment variables are set");
        return Ok(());
    }

    for name in &missing {
        println!("missing: {name}");
    }
    anyhow::bail!("{} required environment variable(s) missing", missing.len());
}
