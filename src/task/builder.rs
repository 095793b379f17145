//! Task builder contract
//!
//! A [`TaskBuilder`] is a named, stateless unit that maps a [`Project`] to
//! one task-graph node plus the glob patterns whose changes should re-run
//! it. Composite builders delegate to child builders selected by project
//! variant and aggregate their watch paths.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use crate::project::Project;
use crate::task::node::TaskNode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A materialized, named action ready for an external runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, stable task name
    pub name: String,

    /// Human readable description
    pub description: String,

    /// The action graph to execute
    pub node: TaskNode,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task({}): {}", self.name, self.node)
    }
}

/// Maps a project to one action and its watch paths
///
/// Builders are stateless after construction; constructor arguments (for
/// example a container target name) are the only per-instance state.
pub trait TaskBuilder: Send + Sync {
    /// Unique, stable identifier of the produced task
    fn name(&self) -> &str;

    /// Human readable description of the produced task
    fn description(&self) -> &str;

    /// Creates the action graph for the given project
    fn create_node(&self, project: &Project) -> TaskNode;

    /// Glob patterns whose changes should re-run the action
    ///
    /// Defaults to empty: the action has no file dependency and derives no
    /// watch task.
    fn watch_paths(&self, _project: &Project) -> Vec<String> {
        Vec::new()
    }

    /// Materializes the action with name and description attached
    fn build_task(&self, project: &Project) -> Task {
        Task {
            name: self.name().to_string(),
            description: self.description().to_string(),
            node: self.create_node(project),
        }
    }
}

/// De-duplicates watch paths while preserving first-occurrence order
pub fn dedup_watch_paths(paths: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Collects and de-duplicates the watch paths of a set of child builders
pub fn aggregate_watch_paths(builders: &[Box<dyn TaskBuilder>], project: &Project) -> Vec<String> {
    dedup_watch_paths(
        builders
            .iter()
            .flat_map(|builder| builder.watch_paths(project))
            .collect(),
    )
}
