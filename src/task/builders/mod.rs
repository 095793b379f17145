//! Concrete task builders
//!
//! One builder per action variant; composite builders select their children
//! by project type, language and target cardinality.

pub mod build;
pub mod clean;
pub mod copy_files;
pub mod docs;
pub mod format;
pub mod lint;
pub mod not_supported;
pub mod package;
pub mod publish;

pub use build::{BuildTask, BuildTsTask, BuildUiTask};
pub use clean::CleanTask;
pub use copy_files::CopyFilesTask;
pub use docs::{DocsJsTask, DocsTask, DocsTsTask};
pub use format::FormatTask;
pub use lint::{LintFixTask, LintTask};
pub use not_supported::NotSupportedTask;
pub use package::{PackageAwsTask, PackageContainerTask, PackageNpmTask};
pub use publish::{PublishAwsTask, PublishContainerTask, PublishNpmTask};
pub use test::{TestTask, TestType};

use crate::project::{DEFAULT_TARGET, Project};
use crate::task::node::TaskNode;
use std::path::MAIN_SEPARATOR;

/// Directories scanned by the source-dependent builders
pub(crate) const SOURCE_DIRS: [&str; 4] = ["src", "test", "infra", "scripts"];

/// Absolute globs for the source dirs, one per (dir, extension) pair
pub(crate) fn source_globs(project: &Project, extensions: &[&str]) -> Vec<String> {
    SOURCE_DIRS
        .iter()
        .filter_map(|dir| project.dir(dir).ok())
        .flat_map(|dir| {
            extensions
                .iter()
                .map(|ext| dir.get_all_files_glob(Some(ext)))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Script extensions for the project language: `js`, plus `ts` when typed
pub(crate) fn script_extensions(project: &Project) -> Vec<&'static str> {
    let mut extensions = vec!["js"];
    if project.language().is_typed() {
        extensions.push("ts");
    }
    extensions
}

/// Absolute path of a skeleton directory, without the trailing separator
///
/// The skeleton is fixed at construction; a non-skeleton path falls back
/// to the lexical join, which yields the same value for any child of the
/// root.
pub(crate) fn dir_path(project: &Project, path: &str) -> String {
    match project.dir(path) {
        Ok(dir) => dir
            .absolute_path()
            .trim_end_matches(MAIN_SEPARATOR)
            .to_string(),
        Err(_) => format!("{}{}", project.root_dir().absolute_path(), path),
    }
}

/// Absolute path of the project root, without the trailing separator
pub(crate) fn root_path(project: &Project) -> String {
    project
        .root_dir()
        .absolute_path()
        .trim_end_matches(MAIN_SEPARATOR)
        .to_string()
}

/// Collapses a child list into one node, unwrapping a single child
pub(crate) fn sequence_of(mut nodes: Vec<TaskNode>) -> TaskNode {
    if nodes.len() == 1 {
        nodes.pop().unwrap_or_else(|| TaskNode::warn("empty task"))
    } else {
        TaskNode::sequence(nodes)
    }
}

/// Resolves the cloud target the generic package/publish pair operates on:
/// the `default` key when declared, otherwise the first declared key
pub(crate) fn default_cdk_target(project: &Project) -> Option<String> {
    let targets = project.get_cdk_targets();
    if targets.iter().any(|t| t == DEFAULT_TARGET) {
        Some(DEFAULT_TARGET.to_string())
    } else {
        targets.into_iter().next()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::project::{Project, ProjectDescriptor};
    use serde_json::{Value, json};

    pub(crate) fn project(value: Value) -> Project {
        let descriptor = ProjectDescriptor::from_value(value).unwrap();
        Project::from_descriptor(descriptor).unwrap()
    }

    pub(crate) fn ts_lib() -> Project {
        project(json!({
            "name": "@scope/my-lib",
            "description": "A library",
            "version": "1.0.0",
            "buildMetadata": { "type": "lib", "language": "ts" },
        }))
    }

    pub(crate) fn js_lib() -> Project {
        project(json!({
            "name": "plain-lib",
            "description": "A js library",
            "version": "1.0.0",
            "buildMetadata": { "type": "lib", "language": "js" },
        }))
    }

    pub(crate) fn container_service() -> Project {
        project(json!({
            "name": "svc",
            "description": "A container service",
            "version": "2.0.0",
            "buildMetadata": {
                "type": "container",
                "language": "js",
                "container": {
                    "default": { "repo": "registry/svc" },
                    "arm": { "repo": "registry/svc-arm", "buildFile": "Dockerfile.arm" },
                },
            },
        }))
    }

    pub(crate) fn aws_service() -> Project {
        project(json!({
            "name": "cloud-svc",
            "description": "An aws service",
            "version": "0.9.0",
            "buildMetadata": {
                "type": "aws-microservice",
                "language": "ts",
                "aws": { "stacks": { "default": "cloud-svc-stack", "edge": "cloud-svc-edge" } },
            },
        }))
    }

    pub(crate) fn ui_app() -> Project {
        project(json!({
            "name": "web-app",
            "description": "A ui",
            "version": "1.2.3",
            "buildMetadata": { "type": "ui", "language": "ts" },
        }))
    }
}
