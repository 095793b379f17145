//! Task graph nodes
//!
//! A task materializes to a tree of [`TaskNode`] values: command, copy and
//! warning leaves, sequential and parallel composites, plus the best-effort
//! and watch wrappers. Nodes are pure data; executing them is a separate
//! concern.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How an invoked tool's stdio is wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StdioMode {
    /// Stream through the parent's stdio
    #[default]
    Inherit,
    /// Capture output
    Piped,
    /// Discard output
    Null,
}

/// A node in the emitted task graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TaskNode {
    /// Invoke an external tool
    Command {
        /// Program and arguments
        argv: Vec<String>,
        /// Working directory for the invocation
        cwd: PathBuf,
        /// Stdio wiring
        stdio: StdioMode,
    },

    /// Stage files matching glob patterns into a destination directory
    Copy {
        /// Glob patterns relative to `base_dir`
        patterns: Vec<String>,
        /// Directory the patterns are resolved against
        base_dir: PathBuf,
        /// Destination directory; relative structure is preserved
        dest_dir: PathBuf,
    },

    /// Log a warning and succeed
    ///
    /// The explicit marker for an intentionally absent action; it is never
    /// silently omitted from a plan.
    Warn {
        /// Warning to log when the node runs
        message: String,
    },

    /// Run children strictly in order, stopping at the first failure
    Sequence {
        /// Ordered children
        nodes: Vec<TaskNode>,
    },

    /// Run children with no ordering; completes once all children complete
    Parallel {
        /// Unordered children
        nodes: Vec<TaskNode>,
    },

    /// Run the child, log its failure and report success regardless
    BestEffort {
        /// Wrapped child
        node: Box<TaskNode>,
    },

    /// Re-run the child on every change to a watched path
    Watch {
        /// Glob patterns selecting the watched files
        globs: Vec<String>,
        /// Action to re-arm
        node: Box<TaskNode>,
    },
}

impl TaskNode {
    /// Creates a command leaf
    pub fn command(argv: Vec<String>, cwd: impl Into<PathBuf>, stdio: StdioMode) -> Self {
        Self::Command {
            argv,
            cwd: cwd.into(),
            stdio,
        }
    }

    /// Creates a copy leaf
    pub fn copy(
        patterns: Vec<String>,
        base_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        Self::Copy {
            patterns,
            base_dir: base_dir.into(),
            dest_dir: dest_dir.into(),
        }
    }

    /// Creates a warning leaf
    pub fn warn(message: impl Into<String>) -> Self {
        Self::Warn {
            message: message.into(),
        }
    }

    /// Creates an ordered composite
    pub fn sequence(nodes: Vec<TaskNode>) -> Self {
        Self::Sequence { nodes }
    }

    /// Creates an unordered composite
    pub fn parallel(nodes: Vec<TaskNode>) -> Self {
        Self::Parallel { nodes }
    }

    /// Wraps a node so its failure is logged instead of propagated
    pub fn best_effort(node: TaskNode) -> Self {
        Self::BestEffort {
            node: Box::new(node),
        }
    }

    /// Wraps a node so it re-runs on changes to the watched globs
    pub fn watch(globs: Vec<String>, node: TaskNode) -> Self {
        Self::Watch {
            globs,
            node: Box::new(node),
        }
    }

    /// Returns the number of leaves in this subtree
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Command { .. } | Self::Copy { .. } | Self::Warn { .. } => 1,
            Self::Sequence { nodes } | Self::Parallel { nodes } => {
                nodes.iter().map(TaskNode::leaf_count).sum()
            }
            Self::BestEffort { node } | Self::Watch { node, .. } => node.leaf_count(),
        }
    }
}

impl fmt::Display for TaskNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command { argv, .. } => write!(f, "command({})", argv.join(" ")),
            Self::Copy { patterns, .. } => write!(f, "copy({} patterns)", patterns.len()),
            Self::Warn { message } => write!(f, "warn({message})"),
            Self::Sequence { nodes } => write!(f, "sequence({} nodes)", nodes.len()),
            Self::Parallel { nodes } => write!(f, "parallel({} nodes)", nodes.len()),
            Self::BestEffort { node } => write!(f, "best-effort({node})"),
            Self::Watch { globs, node } => write!(f, "watch({} globs, {node})", globs.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo() -> TaskNode {
        TaskNode::command(
            vec!["echo".to_string(), "hi".to_string()],
            "/tmp",
            StdioMode::Inherit,
        )
    }

    #[test]
    fn test_command_display() {
        assert_eq!(echo().to_string(), "command(echo hi)");
    }

    #[test]
    fn test_leaf_count_over_composites() {
        let node = TaskNode::sequence(vec![
            echo(),
            TaskNode::parallel(vec![echo(), TaskNode::warn("skipped")]),
            TaskNode::best_effort(echo()),
        ]);
        assert_eq!(node.leaf_count(), 4);
    }

    #[test]
    fn test_watch_wraps_inner_node() {
        let node = TaskNode::watch(vec!["/p/**/*.ts".to_string()], echo());
        assert!(matches!(node, TaskNode::Watch { ref globs, .. } if globs.len() == 1));
        assert_eq!(node.leaf_count(), 1);
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_value(TaskNode::warn("absent")).unwrap();
        assert_eq!(json["kind"], "warn");
        assert_eq!(json["message"], "absent");

        let best = serde_json::to_value(TaskNode::best_effort(TaskNode::warn("x"))).unwrap();
        assert_eq!(best["kind"], "best-effort");
    }
}
