//! Build tasks

use super::{CopyFilesTask, NotSupportedTask, sequence_of, source_globs};
use crate::project::{Language, Project, ProjectType};
use crate::task::builder::{TaskBuilder, aggregate_watch_paths};
use crate::task::node::{StdioMode, TaskNode};

/// Compiles typed sources into the working tree
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildTsTask;

impl BuildTsTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TaskBuilder for BuildTsTask {
    fn name(&self) -> &str {
        "build-ts"
    }

    fn description(&self) -> &str {
        "Compiles typed sources into the working staging tree"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        TaskNode::command(
            vec![
                "npx".to_string(),
                "tsc".to_string(),
                "--project".to_string(),
                ".".to_string(),
            ],
            super::root_path(project),
            StdioMode::Inherit,
        )
    }

    fn watch_paths(&self, project: &Project) -> Vec<String> {
        source_globs(project, &["ts"])
    }
}

/// Bundles browser sources for distribution
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildUiTask;

impl BuildUiTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TaskBuilder for BuildUiTask {
    fn name(&self) -> &str {
        "build-ui"
    }

    fn description(&self) -> &str {
        "Bundles browser sources for distribution"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        TaskNode::command(
            vec![
                "npx".to_string(),
                "webpack".to_string(),
                "--mode".to_string(),
                "production".to_string(),
            ],
            super::root_path(project),
            StdioMode::Inherit,
        )
    }

    fn watch_paths(&self, project: &Project) -> Vec<String> {
        source_globs(project, &super::script_extensions(project))
    }
}

/// Variant-selecting build task
///
/// Selection: a ui project bundles; a container project has no build step;
/// otherwise a typed language compiles then stages static files, while an
/// untyped one stages only.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildTask;

impl BuildTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn sub_builders(project: &Project) -> Vec<Box<dyn TaskBuilder>> {
        match (project.project_type(), project.language()) {
            (ProjectType::Ui, _) => vec![Box::new(BuildUiTask::new())],
            (ProjectType::Container, _) => vec![Box::new(NotSupportedTask::new("build"))],
            (_, Language::Ts) => vec![
                Box::new(BuildTsTask::new()),
                Box::new(CopyFilesTask::new()),
            ],
            (_, Language::Js) => vec![Box::new(CopyFilesTask::new())],
        }
    }
}

impl TaskBuilder for BuildTask {
    fn name(&self) -> &str {
        "build"
    }

    fn description(&self) -> &str {
        "Builds the project into the working staging tree"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        let nodes = Self::sub_builders(project)
            .iter()
            .map(|builder| builder.create_node(project))
            .collect();
        sequence_of(nodes)
    }

    fn watch_paths(&self, project: &Project) -> Vec<String> {
        aggregate_watch_paths(&Self::sub_builders(project), project)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;

    #[test]
    fn test_typed_build_compiles_then_copies() {
        match BuildTask::new().create_node(&fixtures::ts_lib()) {
            TaskNode::Sequence { nodes } => {
                assert_eq!(nodes.len(), 2);
                assert!(matches!(nodes[0], TaskNode::Command { .. }));
                assert!(matches!(nodes[1], TaskNode::Copy { .. }));
            }
            other => panic!("expected sequence, got {other}"),
        }
    }

    #[test]
    fn test_untyped_build_copies_only() {
        let node = BuildTask::new().create_node(&fixtures::js_lib());
        assert!(matches!(node, TaskNode::Copy { .. }));
    }

    #[test]
    fn test_ui_build_bundles() {
        match BuildTask::new().create_node(&fixtures::ui_app()) {
            TaskNode::Command { argv, .. } => assert!(argv.contains(&"webpack".to_string())),
            other => panic!("expected command, got {other}"),
        }
    }

    #[test]
    fn test_container_build_is_not_supported() {
        let node = BuildTask::new().create_node(&fixtures::container_service());
        assert!(matches!(node, TaskNode::Warn { .. }));
    }

    #[test]
    fn test_composite_watch_paths_are_deduplicated() {
        let project = fixtures::ts_lib();
        let paths = BuildTask::new().watch_paths(&project);
        let mut unique = paths.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(paths.len(), unique.len());
        assert!(paths.iter().any(|p| p.ends_with("src/**/*.ts")));
    }

    #[test]
    fn test_container_build_has_no_watch_paths() {
        let paths = BuildTask::new().watch_paths(&fixtures::container_service());
        assert!(paths.is_empty());
    }
}
