//! Format task

use super::{script_extensions, source_globs};
use crate::project::Project;
use crate::task::builder::TaskBuilder;
use crate::task::node::{StdioMode, TaskNode};

/// Formats project sources in place
///
/// Runs over the fixed source directories with `js` and `json` files; the
/// typed extension is added only for typed-language projects.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatTask;

impl FormatTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn globs(project: &Project) -> Vec<String> {
        let mut extensions = script_extensions(project);
        extensions.push("json");
        source_globs(project, &extensions)
    }
}

impl TaskBuilder for FormatTask {
    fn name(&self) -> &str {
        "format"
    }

    fn description(&self) -> &str {
        "Formats source files, scripts and configuration in place"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        let mut argv = vec![
            "npx".to_string(),
            "prettier".to_string(),
            "--write".to_string(),
        ];
        argv.extend(Self::globs(project));
        TaskNode::command(argv, super::root_path(project), StdioMode::Inherit)
    }

    fn watch_paths(&self, project: &Project) -> Vec<String> {
        Self::globs(project)
    }
}
