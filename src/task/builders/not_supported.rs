//! Not-supported marker task

use crate::project::Project;
use crate::task::builder::TaskBuilder;
use crate::task::node::TaskNode;

/// Explicit marker for an intentionally absent action
///
/// The produced node only logs a warning; it never fails. Plans carry this
/// marker instead of silently omitting an action, so callers can invoke
/// every returned task without a type guard.
#[derive(Debug, Clone)]
pub struct NotSupportedTask {
    name: String,
    description: String,
}

impl NotSupportedTask {
    /// Creates a marker for the named action
    #[must_use]
    pub fn new(action: &str) -> Self {
        Self {
            name: action.to_string(),
            description: format!("Marks the '{action}' action as not supported"),
        }
    }
}

impl TaskBuilder for NotSupportedTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        TaskNode::warn(format!(
            "task '{}' is not supported for '{}' projects",
            self.name,
            project.project_type()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;

    #[test]
    fn test_not_supported_is_a_warning_leaf() {
        let node = NotSupportedTask::new("build").create_node(&fixtures::container_service());
        match node {
            TaskNode::Warn { message } => {
                assert!(message.contains("build"));
                assert!(message.contains("container"));
            }
            other => panic!("expected warn node, got {other}"),
        }
    }

    #[test]
    fn test_not_supported_has_no_watch_paths() {
        let task = NotSupportedTask::new("docs");
        assert!(task.watch_paths(&fixtures::container_service()).is_empty());
    }
}
