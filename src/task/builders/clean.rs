//! Clean task

use super::dir_path;
use crate::project::Project;
use crate::task::builder::TaskBuilder;
use crate::task::node::{StdioMode, TaskNode};

/// Deletes artifacts left over from previous builds
///
/// The base output directories are always cleaned; a typed language adds
/// its compiler cache and a cloud-deployed type adds the synthesized stack
/// output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanTask;

impl CleanTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TaskBuilder for CleanTask {
    fn name(&self) -> &str {
        "clean"
    }

    fn description(&self) -> &str {
        "Cleans out artifacts and temporary directories from previous builds"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        let mut dirs = vec!["coverage", "dist", "working", "logs", ".buildline"];
        if project.language().is_typed() {
            dirs.push(".tscache");
        }
        if project.project_type().is_cloud_deployed() {
            dirs.push("cdk.out");
        }

        let mut argv = vec!["rm".to_string(), "-rf".to_string()];
        argv.extend(dirs.iter().map(|dir| dir_path(project, dir)));

        TaskNode::command(argv, super::root_path(project), StdioMode::Inherit)
    }
}
