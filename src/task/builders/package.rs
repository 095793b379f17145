//! Package tasks

use super::{default_cdk_target, dir_path, root_path};
use crate::project::{DEFAULT_TARGET, Project};
use crate::task::builder::TaskBuilder;
use crate::task::node::{StdioMode, TaskNode};

/// Bundles the staged build into a package-manager archive
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageNpmTask;

impl PackageNpmTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TaskBuilder for PackageNpmTask {
    fn name(&self) -> &str {
        "package"
    }

    fn description(&self) -> &str {
        "Packages the staged build into a registry archive"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        TaskNode::command(
            vec![
                "npm".to_string(),
                "pack".to_string(),
                "--pack-destination".to_string(),
                dir_path(project, "dist"),
            ],
            dir_path(project, "working"),
            StdioMode::Inherit,
        )
    }
}

/// Synthesizes a cloud stack for one target
#[derive(Debug, Clone)]
pub struct PackageAwsTask {
    target: Option<String>,
    name: String,
}

impl PackageAwsTask {
    /// Creates the generic builder operating on the default target
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: None,
            name: "package".to_string(),
        }
    }

    /// Creates a builder for an explicit target
    #[must_use]
    pub fn for_target(target: &str) -> Self {
        Self {
            target: Some(target.to_string()),
            name: format!("package-{target}"),
        }
    }
}

impl Default for PackageAwsTask {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBuilder for PackageAwsTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Synthesizes the cloud stack for deployment"
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

        TaskNode::command(
            vec![
                "npx".to_string(),
                "cdk".to_string(),
                "synth".to_string(),
                stack,
                "--output".to_string(),
                dir_path(project, "cdk.out"),
            ],
            root_path(project),
            StdioMode::Inherit,
        )
    }
}

/// Builds a container image for one target
#[derive(Debug, Clone)]
pub struct PackageContainerTask {
    target: String,
    name: String,
}

impl PackageContainerTask {
    /// Creates the generic builder operating on the `default` target
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            name: "package".to_string(),
        }
    }

    /// Creates a builder for an explicit target
    #[must_use]
    pub fn for_target(target: &str) -> Self {
        Self {
            target: target.to_string(),
            name: format!("package-{target}"),
        }
    }
}

impl Default for PackageContainerTask {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBuilder for PackageContainerTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Builds the container image for the target"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        let Ok(definition) = project.get_container_definition(&self.target) else {
            return TaskNode::warn(format!(
                "container target '{}' is not declared; skipping '{}'",
                self.target, self.name
            ));
        };

        let mut argv = vec![
            "docker".to_string(),
            "build".to_string(),
            "--rm".to_string(),
            "--file".to_string(),
            definition.build_file,
            "--tag".to_string(),
            format!("{}:{}", definition.repo, project.version()),
        ];
        for (key, value) in &definition.build_args {
            argv.push("--build-arg".to_string());
            argv.push(format!("{key}={value}"));
        }
        for (id, env) in &definition.build_secrets {
            argv.push("--secret".to_string());
            argv.push(format!("id={id},env={env}"));
        }
        argv.push(".".to_string());

        TaskNode::command(argv, root_path(project), StdioMode::Inherit)
    }
}
