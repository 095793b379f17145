//! Process-backed toolchain
//!
//! The default implementation of the two collaborator operations: external
//! tools are spawned as child processes, staging copies are resolved with
//! glob patterns against the local filesystem.

use crate::errors::ToolchainError;
use crate::exec::Toolchain;
use crate::task::node::StdioMode;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Runs tools as local child processes and copies files on the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessToolchain;

impl ProcessToolchain {
    /// Creates the toolchain
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Toolchain for ProcessToolchain {
    async fn run(
        &self,
        argv: &[String],
        cwd: &Path,
        stdio: StdioMode,
    ) -> Result<(), ToolchainError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| ToolchainError::Io("empty argv".to_string()))?;

        let mut command = Command::new(program);
        command.args(args).current_dir(cwd);

        let status = match stdio {
            StdioMode::Inherit => command.status().await?,
            StdioMode::Null => {
                command.stdout(Stdio::null()).stderr(Stdio::null());
                command.status().await?
            }
            StdioMode::Piped => {
                let output = command.output().await?;
                if !output.stdout.is_empty() {
                    tracing::debug!(stdout = %String::from_utf8_lossy(&output.stdout), "captured output");
                }
                if !output.stderr.is_empty() {
                    tracing::debug!(stderr = %String::from_utf8_lossy(&output.stderr), "captured output");
                }
                output.status
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(ToolchainError::CommandFailed {
                command: argv.join(" "),
                code: status.code().unwrap_or(-1),
            })
        }
    }

    async fn copy(
        &self,
        patterns: &[String],
        base_dir: &Path,
        dest_dir: &Path,
    ) -> Result<(), ToolchainError> {
        for pattern in patterns {
            let full_pattern = base_dir.join(pattern).to_string_lossy().into_owned();
            let matches =
                glob::glob(&full_pattern).map_err(|err| ToolchainError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: err.to_string(),
                })?;

            for entry in matches {
                let path = entry.map_err(|err| ToolchainError::Io(err.to_string()))?;
                if !path.is_file() {
                    continue;
                }

                let relative = path.strip_prefix(base_dir).unwrap_or(&path);
                let destination = dest_dir.join(relative);
                if let Some(parent) = destination.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::copy(&path, &destination).await?;
                tracing::debug!(from = %path.display(), to = %destination.display(), "copied");
            }
        }
        Ok(())
    }
}
