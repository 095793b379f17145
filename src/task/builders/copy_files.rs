//! Copy-files task

use super::SOURCE_DIRS;
use crate::project::Project;
use crate::task::builder::TaskBuilder;
use crate::task::node::TaskNode;

/// Stages static files into the `working` tree
///
/// Scans the source directories for `json` files plus every
/// project-declared static pattern, and adds the fixed top-level extras
/// (license, readme, env file, rc file, per-container build files).
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyFilesTask;

impl CopyFilesTask {
    /// Creates the builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn patterns(project: &Project) -> Vec<String> {
        let mut extensions = vec!["json".to_string()];
        extensions.extend(project.static_file_patterns());

        let mut patterns: Vec<String> = SOURCE_DIRS
            .iter()
            .flat_map(|dir| {
                extensions
                    .iter()
                    .map(|ext| format!("{dir}/**/*.{ext}"))
                    .collect::<Vec<_>>()
            })
            .collect();

        patterns.push("LICENSE".to_string());
        patterns.push("README.md".to_string());
        patterns.push(".env".to_string());
        patterns.push(project.config_file_name().to_string());

        for target in project.get_container_targets() {
            if let Ok(definition) = project.get_container_definition(&target) {
                patterns.push(definition.build_file);
            }
        }

        patterns
    }
}

impl TaskBuilder for CopyFilesTask {
    fn name(&self) -> &str {
        "copy-files"
    }

    fn description(&self) -> &str {
        "Copies static files into the working staging tree"
    }

    fn create_node(&self, project: &Project) -> TaskNode {
        TaskNode::copy(
            Self::patterns(project),
            super::root_path(project),
            super::dir_path(project, "working"),
        )
    }

    fn watch_paths(&self, project: &Project) -> Vec<String> {
        let root_glob = project.root_dir().glob_path().to_string();
        Self::patterns(project)
            .into_iter()
            .map(|pattern| format!("{root_glob}{pattern}"))
            .collect()
    }
}
