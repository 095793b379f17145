//! Publish tasks

use super::{default_cdk_target, dir_path, root_path};
use crate::project::{DEFAULT_TARGET, Project};
use crate::task::builder::TaskBuilder;
use crate::task::node::{StdioMode, TaskNode};

/// Publishes the packaged archive to the package registry
///
/// Publishing an already-released version is routine, so this variant is
/// best-effort: a failure is logged, not retried and not re-thrown.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishNpmTask;

impl PublishNpmTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TaskBuilder for PublishNpmTask {
    fn name(&self) -> &str {
        "publish"
    }

    fn description(&self) -> &str {
        "Publishes the packaged archive to the registry"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        TaskNode::best_effort(TaskNode::command(
            vec!["npm".to_string(), "publish".to_string()],
            dir_path(project, "working"),
            StdioMode::Inherit,
        ))
    }
}

/// Deploys a synthesized cloud stack for one target
#[derive(Debug, Clone)]
pub struct PublishAwsTask {
    target: Option<String>,
    name: String,
    best_effort: bool,
}

impl PublishAwsTask {
    /// Creates the generic, fail-fast builder for the default target
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: None,
            name: "publish".to_string(),
            best_effort: false,
        }
    }

    /// Creates a best-effort builder for an extra target
    #[must_use]
    pub fn for_target(target: &str) -> Self {
        Self {
            target: Some(target.to_string()),
            name: format!("publish-{target}"),
            best_effort: true,
        }
    }
}

impl Default for PublishAwsTask {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBuilder for PublishAwsTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Deploys the synthesized cloud stack"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        let target = match &self.target {
            Some(target) => Some(target.clone()),
            None => default_cdk_target(project),
        };

        let stack = target.and_then(|t| project.get_cdk_stack_definition(&t).ok());
        let Some(stack) = stack else {
            return TaskNode::warn(format!(
                "no cloud stack declared for task '{}'",
                self.name
            ));
        };

        let node = TaskNode::command(
            vec![
                "npx".to_string(),
                "cdk".to_string(),
                "deploy".to_string(),
                stack,
                "--require-approval".to_string(),
                "never".to_string(),
            ],
            root_path(project),
            StdioMode::Inherit,
        );

        if self.best_effort {
            TaskNode::best_effort(node)
        } else {
            node
        }
    }
}

/// Pushes a built container image for one target
#[derive(Debug, Clone)]
pub struct PublishContainerTask {
    target: String,
    name: String,
    best_effort: bool,
}

impl PublishContainerTask {
    /// Creates the generic, fail-fast builder for the `default` target
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            name: "publish".to_string(),
            best_effort: false,
        }
    }

    /// Creates a best-effort builder for an extra target
    #[must_use]
    pub fn for_target(target: &str) -> Self {
        Self {
            target: target.to_string(),
            name: format!("publish-{target}"),
            best_effort: true,
        }
    }

    /// Creates the explicit default-image publish appended to ui plans
    #[must_use]
    pub fn default_image() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            name: "publish-container".to_string(),
            best_effort: true,
        }
    }
}

impl Default for PublishContainerTask {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBuilder for PublishContainerTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Pushes the built container image to its registry"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        let Ok(definition) = project.get_container_definition(&self.target) else {
            return TaskNode::warn(format!(
                "container target '{}' is not declared; skipping '{}'",
                self.target, self.name
            ));
        };

        let versioned = format!("{}:{}", definition.repo, project.version());
        let latest = format!("{}:latest", definition.repo);
        let cwd = root_path(project);

        let docker = |args: Vec<String>| {
            TaskNode::command(
                std::iter::once("docker".to_string()).chain(args).collect(),
                cwd.clone(),
                StdioMode::Inherit,
            )
        };

        let node = TaskNode::sequence(vec![
            docker(vec!["tag".to_string(), versioned.clone(), latest.clone()]),
            docker(vec!["push".to_string(), versioned]),
            docker(vec!["push".to_string(), latest]),
        ]);

        if self.best_effort {
            TaskNode::best_effort(node)
        } else {
            node
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;

    #[test]
    fn test_publish_npm_is_best_effort() {
        let node = PublishNpmTask::new().create_node(&fixtures::ts_lib());
        match node {
            TaskNode::BestEffort { node } => {
                assert!(matches!(*node, TaskNode::Command { .. }));
            }
            other => panic!("expected best-effort wrapper, got {other}"),
        }
    }

    #[test]
    fn test_publish_aws_default_is_fail_fast() {
        let node = PublishAwsTask::new().create_node(&fixtures::aws_service());
        match node {
            TaskNode::Command { argv, .. } => {
                assert!(argv.contains(&"deploy".to_string()));
                assert!(argv.contains(&"cloud-svc-stack".to_string()));
            }
            other => panic!("expected command, got {other}"),
        }
    }

    #[test]
    fn test_publish_aws_extra_target_is_best_effort() {
        let task = PublishAwsTask::for_target("edge");
        assert_eq!(task.name(), "publish-edge");
        let node = task.create_node(&fixtures::aws_service());
        assert!(matches!(node, TaskNode::BestEffort { .. }));
    }

    #[test]
    fn test_publish_container_tags_and_pushes() {
        match PublishContainerTask::new().create_node(&fixtures::container_service()) {
            TaskNode::Sequence { nodes } => {
                assert_eq!(nodes.len(), 3);
                assert!(matches!(
                    &nodes[0],
                    TaskNode::Command { argv, .. } if argv[1] == "tag"
                ));
                assert!(matches!(
                    &nodes[1],
                    TaskNode::Command { argv, .. }
                        if argv.contains(&"registry/svc:2.0.0".to_string())
                ));
            }
            other => panic!("expected sequence, got {other}"),
        }
    }

    #[test]
    fn test_publish_container_extra_target_is_best_effort() {
        let task = PublishContainerTask::for_target("arm");
        assert_eq!(task.name(), "publish-arm");
        let node = task.create_node(&fixtures::container_service());
        assert!(matches!(node, TaskNode::BestEffort { .. }));
    }

    #[test]
    fn test_publish_container_missing_target_degrades_to_warning() {
        let node = PublishContainerTask::new().create_node(&fixtures::js_lib());
        assert!(matches!(node, TaskNode::Warn { .. }));
    }
}
