//! # Buildline - Declarative build tasks for npm-style projects
//!
//! Buildline turns a small project descriptor (name, version, type,
//! language, cloud and container metadata) into an ordered, executable
//! plan of build tasks: clean, format, lint, build, test, docs, package
//! and publish, plus file-watching variants of the rebuildable ones.
//!
//! ## Quick Start
//!
//! ```no_run
//! use buildline::project::{Project, ProjectDescriptor};
//! use buildline::task::factory::create_tasks;
//!
//! # fn main() -> anyhow::Result<()> {
//! let raw = serde_json::json!({
//!     "name": "@acme/widget",
//!     "version": "1.0.0",
//!     "description": "A widget",
//!     "buildMetadata": { "type": "lib", "language": "ts" }
//! });
//!
//! let descriptor = ProjectDescriptor::from_value(raw)?;
//! let project = Project::from_descriptor(descriptor)?;
//!
//! for task in create_tasks(&project) {
//!     println!("{task}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Typed descriptors**: Project type and language are closed enums,
//!   validated before any task exists
//! - **Per-type plans**: Each project type resolves to its own factory
//!   and task ordering
//! - **Composable nodes**: Tasks are trees of commands, copies, sequences,
//!   parallels, best-effort groups and watches
//! - **Pluggable execution**: Running and copying go through a single
//!   [`exec::Toolchain`] trait; the process-backed default lives in
//!   [`infrastructure`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod directory;
pub mod errors;
pub mod exec;
pub mod infrastructure;
pub mod project;
pub mod task;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use directory::Directory;
pub use errors::{InvalidArgumentError, LookupError, ProjectError, TaskError, ToolchainError};
pub use exec::{Toolchain, execute};
pub use infrastructure::{ProcessToolchain, init_logging};
pub use project::{
    BuildMetadata, Language, Project, ProjectDescriptor, ProjectType, DEFAULT_TARGET,
};
pub use task::{StdioMode, Task, TaskBuilder, TaskFactory, TaskNode, create_tasks, factory_for};

/// Version of the buildline crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
