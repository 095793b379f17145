//! Task factories
//!
//! One factory per project type, each returning a fixed, ordered list of
//! task builders. `create_tasks` materializes the full plan: every primary
//! action in builder order, followed by one watch action per builder with a
//! non-empty watch-path set, in the same relative order.

#![allow(clippy::must_use_candidate)]

use crate::project::{DEFAULT_TARGET, Project, ProjectType};
use crate::task::builder::{Task, TaskBuilder, dedup_watch_paths};
use crate::task::builders::{
    BuildTask, CleanTask, DocsTask, FormatTask, LintFixTask, LintTask, NotSupportedTask,
    PackageAwsTask, PackageContainerTask, PackageNpmTask, PublishAwsTask, PublishContainerTask,
    PublishNpmTask, TestTask, TestType,
};
use crate::task::builders::default_cdk_target;
use crate::task::node::TaskNode;

/// Produces the ordered builder list for one project type
pub trait TaskFactory: Send + Sync {
    /// Returns the builders for the project, in execution order
    fn builders(&self, project: &Project) -> Vec<Box<dyn TaskBuilder>>;
}

/// The prefix shared by every project type
fn common_builders() -> Vec<Box<dyn TaskBuilder>> {
    vec![
        Box::new(CleanTask::new()),
        Box::new(FormatTask::new()),
        Box::new(LintTask::new()),
        Box::new(LintFixTask::new()),
        Box::new(BuildTask::new()),
    ]
}

/// One extra package/publish pair per container target beyond `default`
fn extra_container_builders(project: &Project) -> Vec<Box<dyn TaskBuilder>> {
    project
        .get_container_targets()
        .into_iter()
        .filter(|target| target != DEFAULT_TARGET)
        .flat_map(|target| {
            let pair: Vec<Box<dyn TaskBuilder>> = vec![
                Box::new(PackageContainerTask::for_target(&target)),
                Box::new(PublishContainerTask::for_target(&target)),
            ];
            pair
        })
        .collect()
}

/// One extra package/publish pair per cloud target beyond the generic one
fn extra_cdk_builders(project: &Project) -> Vec<Box<dyn TaskBuilder>> {
    let generic = default_cdk_target(project);
    project
        .get_cdk_targets()
        .into_iter()
        .filter(|target| Some(target) != generic.as_ref())
        .flat_map(|target| {
            let pair: Vec<Box<dyn TaskBuilder>> = vec![
                Box::new(PackageAwsTask::for_target(&target)),
                Box::new(PublishAwsTask::for_target(&target)),
            ];
            pair
        })
        .collect()
}

/// Factory for `lib` projects
pub struct LibTaskFactory;

impl TaskFactory for LibTaskFactory {
    fn builders(&self, _project: &Project) -> Vec<Box<dyn TaskBuilder>> {
        let mut builders = common_builders();
        builders.push(Box::new(TestTask::new(TestType::Unit)));
        builders.push(Box::new(DocsTask::new()));
        builders.push(Box::new(PackageNpmTask::new()));
        builders.push(Box::new(PublishNpmTask::new()));
        builders
    }
}

/// Factory for `cli` projects
///
/// Ships through the container registry when any container target is
/// declared, otherwise through the package manager.
pub struct CliTaskFactory;

impl TaskFactory for CliTaskFactory {
    fn builders(&self, project: &Project) -> Vec<Box<dyn TaskBuilder>> {
        let mut builders = common_builders();
        builders.push(Box::new(TestTask::new(TestType::Unit)));
        builders.push(Box::new(DocsTask::new()));
        if project.has_container_targets() {
            builders.push(Box::new(PackageContainerTask::new()));
            builders.push(Box::new(PublishContainerTask::new()));
            builders.extend(extra_container_builders(project));
        } else {
            builders.push(Box::new(PackageNpmTask::new()));
            builders.push(Box::new(PublishNpmTask::new()));
        }
        builders
    }
}

/// Factory for `api` projects
pub struct ApiTaskFactory;

impl TaskFactory for ApiTaskFactory {
    fn builders(&self, project: &Project) -> Vec<Box<dyn TaskBuilder>> {
        let mut builders = common_builders();
        builders.push(Box::new(TestTask::new(TestType::Unit)));
        builders.push(Box::new(TestTask::new(TestType::Api)));
        builders.push(Box::new(DocsTask::new()));
        if project.has_container_targets() {
            builders.push(Box::new(PackageContainerTask::new()));
            builders.push(Box::new(PublishContainerTask::new()));
            builders.extend(extra_container_builders(project));
        } else {
            builders.push(Box::new(NotSupportedTask::new("package")));
            builders.push(Box::new(NotSupportedTask::new("publish")));
        }
        builders
    }
}

/// Factory for `aws-microservice` projects
pub struct AwsMicroserviceTaskFactory;

impl TaskFactory for AwsMicroserviceTaskFactory {
    fn builders(&self, project: &Project) -> Vec<Box<dyn TaskBuilder>> {
        let mut builders = common_builders();
        builders.push(Box::new(TestTask::new(TestType::Unit)));
        builders.push(Box::new(TestTask::new(TestType::Api)));
        builders.push(Box::new(DocsTask::new()));
        builders.push(Box::new(PackageAwsTask::new()));
        builders.push(Box::new(PublishAwsTask::new()));
        builders.extend(extra_cdk_builders(project));
        builders
    }
}

/// Factory for `container` projects
///
/// Build, test and docs resolve to the not-supported marker through their
/// composite selection; packaging and publishing go through the registry.
pub struct ContainerTaskFactory;

impl TaskFactory for ContainerTaskFactory {
    fn builders(&self, project: &Project) -> Vec<Box<dyn TaskBuilder>> {
        let mut builders = common_builders();
        builders.push(Box::new(NotSupportedTask::new("test-unit")));
        builders.push(Box::new(DocsTask::new()));
        builders.push(Box::new(PackageContainerTask::new()));
        builders.push(Box::new(PublishContainerTask::new()));
        builders.extend(extra_container_builders(project));
        builders
    }
}

/// Factory for `ui` projects
///
/// Packaging is not supported; publishing carries the explicit marker plus
/// the explicit default-image container publish.
pub struct UiTaskFactory;

impl TaskFactory for UiTaskFactory {
    fn builders(&self, _project: &Project) -> Vec<Box<dyn TaskBuilder>> {
        let mut builders = common_builders();
        builders.push(Box::new(TestTask::new(TestType::Unit)));
        builders.push(Box::new(DocsTask::new()));
        builders.push(Box::new(NotSupportedTask::new("package")));
        builders.push(Box::new(NotSupportedTask::new("publish")));
        builders.push(Box::new(PublishContainerTask::default_image()));
        builders
    }
}

/// Resolves the factory for a project type
///
/// The match is exhaustive over the closed enum: an unrecognized type
/// cannot reach this point, it is rejected during descriptor validation.
pub fn factory_for(project_type: ProjectType) -> Box<dyn TaskFactory> {
    match project_type {
        ProjectType::Lib => Box::new(LibTaskFactory),
        ProjectType::Cli => Box::new(CliTaskFactory),
        ProjectType::Api => Box::new(ApiTaskFactory),
        ProjectType::AwsMicroservice => Box::new(AwsMicroserviceTaskFactory),
        ProjectType::Container => Box::new(ContainerTaskFactory),
        ProjectType::Ui => Box::new(UiTaskFactory),
    }
}

/// Materializes the complete ordered plan for a project
///
/// Primary tasks come first in builder order; every builder with a
/// non-empty watch-path set then contributes one watch task, in the same
/// relative order.
pub fn create_tasks(project: &Project) -> Vec<Task> {
    let builders = factory_for(project.project_type()).builders(project);

    let mut tasks: Vec<Task> = builders
        .iter()
        .map(|builder| builder.build_task(project))
        .collect();

    for builder in &builders {
        let paths = dedup_watch_paths(builder.watch_paths(project));
        if paths.is_empty() {
            continue;
        }
        tasks.push(Task {
            name: format!("watch-{}", builder.name()),
            description: format!("Watches source files and re-runs '{}' on change", builder.name()),
            node: TaskNode::watch(paths, builder.create_node(project)),
        });
    }

    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::builders::fixtures;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn names(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_lib_plan_order() {
        let tasks = create_tasks(&fixtures::ts_lib());
        let primary: Vec<&str> = names(&tasks)
            .into_iter()
            .filter(|n| !n.starts_with("watch-"))
            .collect();
        assert_eq!(
            primary,
            vec![
                "clean", "format", "lint", "lint-fix", "build", "test-unit", "docs", "package",
                "publish",
            ]
        );
    }

    #[test]
    fn test_watch_tasks_follow_primaries_in_builder_order() {
        let tasks = create_tasks(&fixtures::ts_lib());
        let watch_start = tasks
            .iter()
            .position(|t| t.name.starts_with("watch-"))
            .unwrap();

        assert!(tasks[watch_start..].iter().all(|t| t.name.starts_with("watch-")));
        assert_eq!(
            names(&tasks[watch_start..]),
            vec![
                "watch-format",
                "watch-lint",
                "watch-build",
                "watch-test-unit",
                "watch-docs",
            ]
        );
    }

    #[test]
    fn test_builders_without_watch_paths_yield_no_watch_task() {
        let tasks = create_tasks(&fixtures::ts_lib());
        assert!(!tasks.iter().any(|t| t.name == "watch-clean"));
        assert!(!tasks.iter().any(|t| t.name == "watch-package"));
        assert!(!tasks.iter().any(|t| t.name == "watch-publish"));
    }

    #[test]
    fn test_watch_task_wraps_builder_node() {
        let tasks = create_tasks(&fixtures::ts_lib());
        let watch = tasks.iter().find(|t| t.name == "watch-build").unwrap();
        assert!(matches!(watch.node, TaskNode::Watch { ref globs, .. } if !globs.is_empty()));
    }

    #[test]
    fn test_container_plan_selects_registry_variant() {
        let tasks = create_tasks(&fixtures::container_service());
        let package = tasks.iter().find(|t| t.name == "package").unwrap();
        match &package.node {
            TaskNode::Command { argv, .. } => assert_eq!(argv[0], "docker"),
            other => panic!("expected docker command, got {other}"),
        }
        // Never the package-manager variant.
        assert!(!tasks.iter().any(|t| matches!(
            &t.node,
            TaskNode::Command { argv, .. } if argv.first().map(String::as_str) == Some("npm")
        )));
    }

    #[test]
    fn test_extra_container_targets_synthesize_one_pair() {
        let tasks = create_tasks(&fixtures::container_service());
        let names = names(&tasks);
        assert!(names.contains(&"package-arm"));
        assert!(names.contains(&"publish-arm"));
        assert!(!names.contains(&"package-default"));
        assert!(!names.contains(&"publish-default"));
    }

    #[test]
    fn test_aws_plan_has_cloud_pair_and_extras() {
        let tasks = create_tasks(&fixtures::aws_service());
        let names = names(&tasks);
        assert!(names.contains(&"package"));
        assert!(names.contains(&"publish"));
        assert!(names.contains(&"package-edge"));
        assert!(names.contains(&"publish-edge"));
        assert!(names.contains(&"test-api"));
    }

    #[test]
    fn test_cli_without_containers_uses_package_manager() {
        let project = fixtures::project(json!({
            "name": "tool",
            "description": "a cli",
            "version": "1.0.0",
            "buildMetadata": { "type": "cli", "language": "ts" },
        }));
        let tasks = create_tasks(&project);
        let package = tasks.iter().find(|t| t.name == "package").unwrap();
        match &package.node {
            TaskNode::Command { argv, .. } => assert_eq!(argv[0], "npm"),
            other => panic!("expected npm command, got {other}"),
        }
    }

    #[test]
    fn test_cli_with_containers_uses_registry() {
        let project = fixtures::project(json!({
            "name": "tool",
            "description": "a cli",
            "version": "1.0.0",
            "buildMetadata": {
                "type": "cli",
                "language": "ts",
                "container": { "default": { "repo": "registry/tool" } },
            },
        }));
        let tasks = create_tasks(&project);
        let package = tasks.iter().find(|t| t.name == "package").unwrap();
        match &package.node {
            TaskNode::Command { argv, .. } => assert_eq!(argv[0], "docker"),
            other => panic!("expected docker command, got {other}"),
        }
    }

    #[test]
    fn test_ui_plan_marks_package_and_adds_container_publish() {
        let tasks = create_tasks(&fixtures::ui_app());
        let package = tasks.iter().find(|t| t.name == "package").unwrap();
        assert!(matches!(package.node, TaskNode::Warn { .. }));
        assert!(tasks.iter().any(|t| t.name == "publish-container"));
    }

    #[test]
    fn test_container_plan_marks_build_docs_and_tests() {
        let tasks = create_tasks(&fixtures::container_service());
        for name in ["build", "test-unit", "docs"] {
            let task = tasks.iter().find(|t| t.name == name).unwrap();
            assert!(
                matches!(task.node, TaskNode::Warn { .. }),
                "expected '{name}' to be a warning leaf"
            );
        }
    }

    #[test]
    fn test_task_names_are_unique() {
        for project in [
            fixtures::ts_lib(),
            fixtures::js_lib(),
            fixtures::container_service(),
            fixtures::aws_service(),
            fixtures::ui_app(),
        ] {
            let tasks = create_tasks(&project);
            let mut names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
            let before = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(before, names.len(), "duplicate task name for {project}");
        }
    }
}
