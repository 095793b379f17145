//! Lint tasks

use super::{script_extensions, source_globs};
use crate::project::Project;
use crate::task::builder::TaskBuilder;
use crate::task::node::{StdioMode, TaskNode};

fn lint_globs(project: &Project) -> Vec<String> {
    source_globs(project, &script_extensions(project))
}

fn lint_node(project: &Project, fix: bool) -> TaskNode {
    let mut argv = vec!["npx".to_string(), "eslint".to_string()];
    if fix {
        argv.push("--fix".to_string());
    }
    argv.extend(lint_globs(project));
    TaskNode::command(argv, super::root_path(project), StdioMode::Inherit)
}

/// Checks source files against the lint rules
#[derive(Debug, Clone, Copy, Default)]
pub struct LintTask;

impl LintTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TaskBuilder for LintTask {
    fn name(&self) -> &str {
        "lint"
    }

    fn description(&self) -> &str {
        "Checks source files and scripts against the lint rules"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        lint_node(project, false)
    }

    fn watch_paths(&self, project: &Project) -> Vec<String> {
        lint_globs(project)
    }
}

/// Applies automatic lint fixes to source files
#[derive(Debug, Clone, Copy, Default)]
pub struct LintFixTask;

impl LintFixTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TaskBuilder for LintFixTask {
    fn name(&self) -> &str {
        "lint-fix"
    }

    fn description(&self) -> &str {
        "Applies automatic lint fixes to source files and scripts"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        lint_node(project, true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;

    #[test]
    fn test_lint_skips_json() {
        let globs = lint_globs(&fixtures::ts_lib());
        assert!(!globs.iter().any(|g| g.ends_with(".json")));
        assert!(globs.iter().any(|g| g.ends_with("src/**/*.ts")));
        assert!(globs.iter().any(|g| g.ends_with("src/**/*.js")));
    }

    #[test]
    fn test_lint_fix_adds_fix_flag() {
        match LintFixTask::new().create_node(&fixtures::js_lib()) {
            TaskNode::Command { argv, .. } => assert_eq!(&argv[..3], ["npx", "eslint", "--fix"]),
            other => panic!("expected command node, got {other}"),
        }
        match LintTask::new().create_node(&fixtures::js_lib()) {
            TaskNode::Command { argv, .. } => assert!(!argv.contains(&"--fix".to_string())),
            other => panic!("expected command node, got {other}"),
        }
    }

    #[test]
    fn test_lint_watch_paths() {
        let project = fixtures::js_lib();
        assert_eq!(LintTask::new().watch_paths(&project), lint_globs(&project));
        // The fix variant runs on demand only.
        assert!(LintFixTask::new().watch_paths(&project).is_empty());
    }
}
