//! CLI tools for buildline
//!
//! Wraps the library behind a small set of descriptor-driven commands:
//! - `check`: Validate a project descriptor
//! - `tasks`: List the tasks a descriptor produces
//! - `run`: Execute a single task by name
//! - `env`: Report required environment variables that are missing

pub mod check;
pub mod env;
pub mod run;
pub mod tasks;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use buildline::project::{Project, ProjectDescriptor};

/// CLI arguments for buildline
#[derive(Parser, Debug)]
#[command(name = "buildline")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a project descriptor
    Check {
        /// Descriptor file (JSON or YAML)
        file: PathBuf,
    },

    /// List the tasks a descriptor produces
    Tasks {
        /// Descriptor file (JSON or YAML)
        file: PathBuf,
        /// Include watch variants
        #[arg(short, long)]
        watch: bool,
    },

    /// Execute a single task by name
    Run {
        /// Descriptor file (JSON or YAML)
        file: PathBuf,
        /// Task name, as printed by `tasks`
        task: String,
        /// Project root the task runs against (defaults to the
        /// descriptor's directory)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Report required environment variables missing from the environment
    Env {
        /// Descriptor file (JSON or YAML)
        file: PathBuf,
    },
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Check { file } => check::check_descriptor(&file),
        Command::Tasks { file, watch } => tasks::list_tasks(&file, watch),
        Command::Run { file, task, root } => run::run_task(&file, &task, root.as_deref()),
        Command::Env { file } => env::report_env(&file),
    }
}

/// Loads a descriptor file and builds the project it describes
///
/// YAML descriptors are detected by extension; everything else is parsed
/// as JSON. The project root defaults to the descriptor's directory.
pub(crate) fn load_project(file: &Path, root: Option<&Path>) -> Result<Project> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read descriptor: {}", file.display()))?;

    let extension = file
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    let value: serde_json::Value = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)
            .with_context(|| format!("Invalid YAML descriptor: {}", file.display()))?,
        _ => serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON descriptor: {}", file.display()))?,
    };

    let descriptor = ProjectDescriptor::from_value(value)?;

    let root_path = match root {
        Some(path) => path.to_path_buf(),
        None => file
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let project = Project::with_root_path(descriptor, &root_path.to_string_lossy())?;
    Ok(project)
}
