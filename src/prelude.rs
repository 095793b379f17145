//! Prelude module for common imports

// Re-export the project model with full paths
pub use crate::directory::Directory;
pub use crate::errors::{
    InvalidArgumentError, LookupError, ProjectError, TaskError, ToolchainError,
};
pub use crate::project::descriptor::{
    AwsConfig, BuildMetadata, ContainerBuild, Language, ProjectDescriptor, ProjectType,
};
pub use crate::project::{ContainerDefinition, DEFAULT_TARGET, Project};

// Re-export task composition types
pub use crate::task::builder::{Task, TaskBuilder, aggregate_watch_paths, dedup_watch_paths};
pub use crate::task::factory::{TaskFactory, create_tasks, factory_for};
pub use crate::task::node::{StdioMode, TaskNode};

// Re-export execution types
pub use crate::exec::{Toolchain, execute};
pub use crate::infrastructure::{ProcessToolchain, init_logging};
