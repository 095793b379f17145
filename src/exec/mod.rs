//! Task execution
//!
//! The core composes task graphs; running them is delegated to exactly two
//! external collaborator operations, expressed here as the [`Toolchain`]
//! trait. [`execute`] realizes the node semantics: sequences run children
//! strictly in order, parallels impose no order and never cancel siblings,
//! best-effort nodes log failure and continue, watch nodes re-arm forever.

pub mod watch;

use crate::errors::{TaskError, ToolchainError};
use crate::task::node::{StdioMode, TaskNode};
use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use std::path::Path;

/// External collaborator operations leaf actions depend on
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Invokes an external tool and waits for completion
    async fn run(
        &self,
        argv: &[String],
        cwd: &Path,
        stdio: StdioMode,
    ) -> Result<(), ToolchainError>;

    /// Copies files matching `patterns` (relative to `base_dir`) into
    /// `dest_dir`, preserving relative structure
    async fn copy(
        &self,
        patterns: &[String],
        base_dir: &Path,
        dest_dir: &Path,
    ) -> Result<(), ToolchainError>;
}

/// Executes a task node against a toolchain
pub fn execute<'a>(
    node: &'a TaskNode,
    tools: &'a dyn Toolchain,
) -> BoxFuture<'a, Result<(), TaskError>> {
    async move {
        match node {
            TaskNode::Command { argv, cwd, stdio } => {
                tracing::debug!(command = %argv.join(" "), "running command");
                tools.run(argv, cwd, *stdio).await.map_err(TaskError::from)
            }

            TaskNode::Copy {
                patterns,
                base_dir,
                dest_dir,
            } => {
                tracing::debug!(patterns = patterns.len(), "staging files");
                tools
                    .copy(patterns, base_dir, dest_dir)
                    .await
                    .map_err(TaskError::from)
            }

            TaskNode::Warn { message } => {
                tracing::warn!("{message}");
                Ok(())
            }

            TaskNode::Sequence { nodes } => {
                for child in nodes {
                    execute(child, tools).await?;
                }
                Ok(())
            }

            TaskNode::Parallel { nodes } => {
                // Every child runs to completion; a failing child does not
                // cancel its siblings.
                let results = join_all(nodes.iter().map(|child| execute(child, tools))).await;
                for result in results {
                    result?;
                }
                Ok(())
            }

            TaskNode::BestEffort { node } => {
                if let Err(err) = execute(node, tools).await {
                    tracing::warn!(error = %err, "best-effort step failed; continuing");
                }
                Ok(())
            }

            TaskNode::Watch { globs, node } => watch::watch_and_rerun(globs, node, tools).await,
        }
    }
    .boxed()
}
