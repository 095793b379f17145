//! Documentation tasks

use super::{NotSupportedTask, sequence_of, source_globs};
use crate::project::{Language, Project, ProjectType};
use crate::task::builder::{TaskBuilder, aggregate_watch_paths};
use crate::task::node::{StdioMode, TaskNode};

/// Generates API docs from typed sources
#[derive(Debug, Clone, Copy, Default)]
pub struct DocsTsTask;

impl DocsTsTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TaskBuilder for DocsTsTask {
    fn name(&self) -> &str {
        "docs-ts"
    }

    fn description(&self) -> &str {
        "Generates API documentation from typed sources"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        TaskNode::command(
            vec![
                "npx".to_string(),
                "typedoc".to_string(),
                "--out".to_string(),
                super::dir_path(project, "docs"),
                "src".to_string(),
            ],
            super::root_path(project),
            StdioMode::Inherit,
        )
    }

    fn watch_paths(&self, project: &Project) -> Vec<String> {
        source_globs(project, &["ts"])
    }
}

/// Generates API docs from plain JavaScript sources
#[derive(Debug, Clone, Copy, Default)]
pub struct DocsJsTask;

impl DocsJsTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TaskBuilder for DocsJsTask {
    fn name(&self) -> &str {
        "docs-js"
    }

    fn description(&self) -> &str {
        "Generates API documentation from JavaScript sources"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        TaskNode::command(
            vec![
                "npx".to_string(),
                "jsdoc".to_string(),
                "--recurse".to_string(),
                "--destination".to_string(),
                super::dir_path(project, "docs"),
                "src".to_string(),
            ],
            super::root_path(project),
            StdioMode::Inherit,
        )
    }

    fn watch_paths(&self, project: &Project) -> Vec<String> {
        source_globs(project, &["js"])
    }
}

/// Variant-selecting docs task
///
/// Container projects have no doc generator; every other type selects the
/// typed or untyped generator by language.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocsTask;

impl DocsTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn sub_builders(project: &Project) -> Vec<Box<dyn TaskBuilder>> {
        match (project.project_type(), project.language()) {
            (ProjectType::Container, _) => vec![Box::new(NotSupportedTask::new("docs"))],
            (_, Language::Ts) => vec![Box::new(DocsTsTask::new())],
            (_, Language::Js) => vec![Box::new(DocsJsTask::new())],
        }
    }
}

impl TaskBuilder for DocsTask {
    fn name(&self) -> &str {
        "docs"
    }

    fn description(&self) -> &str {
        "Generates project documentation"
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
    fn test_docs_selects_generator_by_language() {
        match DocsTask::new().create_node(&fixtures::ts_lib()) {
            TaskNode::Command { argv, .. } => assert!(argv.contains(&"typedoc".to_string())),
            other => panic!("expected command, got {other}"),
        }
        match DocsTask::new().create_node(&fixtures::js_lib()) {
            TaskNode::Command { argv, .. } => assert!(argv.contains(&"jsdoc".to_string())),
            other => panic!("expected command, got {other}"),
        }
    }

    #[test]
    fn test_docs_not_supported_for_container() {
        let node = DocsTask::new().create_node(&fixtures::container_service());
        assert!(matches!(node, TaskNode::Warn { .. }));
    }

    #[test]
    fn test_docs_watch_paths_follow_language() {
        let paths = DocsTask::new().watch_paths(&fixtures::ts_lib());
        assert!(paths.iter().all(|p| p.ends_with("**/*.ts")));
        assert!(DocsTask::new()
            .watch_paths(&fixtures::container_service())
            .is_empty());
    }
}
