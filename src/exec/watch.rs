//! Watch loop
//!
//! Re-arms a task node on filesystem change. Exactly one run is in flight
//! at a time; whatever the run's outcome, the loop logs it and re-arms.
//! Events raised while a run is in progress are coalesced into at most one
//! follow-up run.

use crate::errors::TaskError;
use crate::exec::{Toolchain, execute};
use crate::task::node::TaskNode;
use notify::{Event, RecursiveMode, Watcher};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Runs `node` once per change to any path matching `globs`; never returns
/// while the watcher is healthy
pub(crate) async fn watch_and_rerun(
    globs: &[String],
    node: &TaskNode,
    tools: &dyn Toolchain,
) -> Result<(), TaskError> {
    let patterns: Vec<glob::Pattern> = globs
        .iter()
        .filter_map(|g| match glob::Pattern::new(g) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                tracing::warn!(glob = %g, error = %err, "ignoring invalid watch glob");
                None
            }
        })
        .collect();
    if patterns.is_empty() {
        return Err(TaskError::Watcher("no valid watch globs".to_string()));
    }

    let (tx, mut rx) = mpsc::channel::<PathBuf>(64);
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        if let Ok(event) = res {
            for path in event.paths {
                let _ = tx.blocking_send(path);
            }
        }
    })
    .map_err(|err| TaskError::Watcher(err.to_string()))?;

    let mut watching = 0usize;
    for root in watch_roots(globs) {
        match watcher.watch(&root, RecursiveMode::Recursive) {
            Ok(()) => watching += 1,
            Err(err) => {
                tracing::warn!(root = %root.display(), error = %err, "cannot watch root");
            }
        }
    }
    if watching == 0 {
        return Err(TaskError::Watcher("no watchable roots".to_string()));
    }

    tracing::info!(globs = globs.len(), "watching for changes");

    while let Some(path) = rx.recv().await {
        if !patterns.iter().any(|pattern| pattern.matches_path(&path)) {
            continue;
        }

        tracing::info!(path = %path.display(), "change detected, re-running");
        match execute(node, tools).await {
            Ok(()) => tracing::info!("run complete, re-arming"),
            Err(err) => tracing::warn!(error = %err, "run failed, re-arming"),
        }

        // Changes made during the run (including by the run itself) would
        // otherwise retrigger immediately.
        while rx.try_recv().is_ok() {}
    }

    Ok(())
}

/// Derives the directories to register with the watcher from glob patterns
///
/// Each pattern contributes its longest literal directory prefix; nested
/// duplicates collapse into their ancestor.
pub(crate) fn watch_roots(globs: &[String]) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();

    for glob in globs {
        let literal_end = glob
            .find(['*', '?', '['])
            .unwrap_or(glob.len());
        let prefix = &glob[..literal_end];
        let dir = match prefix.rfind('/') {
            Some(idx) => &prefix[..=idx],
            None => "./",
        };
        let root = PathBuf::from(dir);

        if roots.iter().any(|existing| root.starts_with(existing)) {
            continue;
        }
        roots.retain(|existing| !existing.starts_with(&root));
        roots.push(root);
    }

    roots
}
