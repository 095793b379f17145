//! Directory tree modeling
//!
//! Models a filesystem directory tree without touching the disk: nodes are
//! constructed declaratively, traversed parent-first, and queried for
//! glob patterns. Paths never need to exist.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use crate::errors::{InvalidArgumentError, LookupError};
use serde_json::Value;
use std::fmt;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// A node in a directory tree
///
/// Each node carries its name, its path relative to the tree root, its
/// absolute path, and a forward-slash glob form of the absolute path. All
/// path forms are terminated with a separator. Children keep insertion
/// order; the tree is append-only during construction and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    name: String,
    rel_path: String,
    abs_path: String,
    glob_path: String,
    children: Vec<Directory>,
}

impl Directory {
    /// Creates a root directory node from a path
    ///
    /// Relative paths are absolutized lexically against the current working
    /// directory; no path is required to exist on disk.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::EmptyPath`] if `path` is empty.
    pub fn new(path: &str) -> Result<Self, InvalidArgumentError> {
        if path.is_empty() {
            return Err(InvalidArgumentError::EmptyPath);
        }

        let abs = absolutize(path);
        let name = abs
            .file_name()
            .map_or_else(|| path_to_string(&abs), |n| n.to_string_lossy().into_owned());

        let rel_path = ensure_trailing_separator(path);
        let abs_path = ensure_trailing_separator(&path_to_string(&abs));
        let glob_path = to_glob(&abs_path);

        Ok(Self {
            name,
            rel_path,
            abs_path,
            glob_path,
            children: Vec::new(),
        })
    }

    /// Builds a directory tree from a nested JSON mapping
    ///
    /// Every key of `spec` becomes a child of the node; mapping values are
    /// recursed into, while any non-mapping value (array, string, number,
    /// boolean, null) marks a leaf. Child order follows key insertion
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if `root_path` is empty or any key is not a valid
    /// child name.
    pub fn create_tree(root_path: &str, spec: &Value) -> Result<Self, InvalidArgumentError> {
        let mut root = Self::new(root_path)?;
        append_children(&mut root, spec)?;
        Ok(root)
    }

    /// Visits every node of the tree in pre-order
    ///
    /// The callback receives each node together with its depth; the root is
    /// visited first at depth 0, and every parent strictly before its
    /// children.
    pub fn traverse<F>(&self, visit: &mut F)
    where
        F: FnMut(&Directory, usize),
    {
        self.traverse_at(visit, 0);
    }

    fn traverse_at<F>(&self, visit: &mut F, depth: usize)
    where
        F: FnMut(&Directory, usize),
    {
        visit(self, depth);
        for child in &self.children {
            child.traverse_at(visit, depth + 1);
        }
    }

    /// Appends a child directory and returns a mutable reference to it
    ///
    /// Duplicate sibling names are allowed: appending an existing name adds
    /// a second node rather than merging or failing.
    ///
    /// # Errors
    ///
    /// Fails if `name` is empty or contains a path separator.
    pub fn add_child(&mut self, name: &str) -> Result<&mut Directory, InvalidArgumentError> {
        if name.is_empty() {
            return Err(InvalidArgumentError::EmptyChildName);
        }
        if name.contains('/') || name.contains('\\') {
            return Err(InvalidArgumentError::SeparatorInChildName {
                name: name.to_string(),
            });
        }

        let child = Directory {
            name: name.to_string(),
            rel_path: format!("{}{}{}", self.rel_path, name, MAIN_SEPARATOR),
            abs_path: format!("{}{}{}", self.abs_path, name, MAIN_SEPARATOR),
            glob_path: format!("{}{}/", self.glob_path, name),
            children: Vec::new(),
        };

        self.children.push(child);
        // Just pushed, so the list is non-empty.
        Ok(self.children.last_mut().unwrap())
    }

    /// Looks up a descendant by `/`-delimited relative path
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if any segment of `path` does not
    /// name a child at that level.
    pub fn get_child(&self, path: &str) -> Result<&Directory, LookupError> {
        let mut current = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .children
                .iter()
                .find(|c| c.name == segment)
                .ok_or_else(|| {
                    LookupError::NotFound(format!("child '{segment}' of '{}'", current.name))
                })?;
        }
        Ok(current)
    }

    /// Returns a glob matching every file under this directory
    ///
    /// With no extension the result is `<absolutePath>**/*`; with an
    /// extension it is `<absolutePath>**/*.<extension>`. The result is
    /// always `/`-separated regardless of the host platform.
    pub fn get_all_files_glob(&self, extension: Option<&str>) -> String {
        match extension {
            Some(ext) => format!("{}**/*.{ext}", self.glob_path),
            None => format!("{}**/*", self.glob_path),
        }
    }

    /// Returns the directory name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the relative path, separator-terminated
    pub fn path(&self) -> &str {
        &self.rel_path
    }

    /// Returns the absolute path, separator-terminated
    pub fn absolute_path(&self) -> &str {
        &self.abs_path
    }

    /// Returns the `/`-separated absolute path used for glob derivation
    pub fn glob_path(&self) -> &str {
        &self.glob_path
    }

    /// Returns the children in insertion order
    pub fn children(&self) -> &[Directory] {
        &self.children
    }

    /// Returns the total number of nodes in the tree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Directory::node_count).sum::<usize>()
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Directory({}): {} children", self.name, self.children.len())
    }
}

fn append_children(node: &mut Directory, spec: &Value) -> Result<(), InvalidArgumentError> {
    if let Value::Object(map) = spec {
        for (key, value) in map {
            let child = node.add_child(key)?;
            append_children(child, value)?;
        }
    }
    Ok(())
}

/// Lexically resolves a path against the current working directory
fn absolutize(path: &str) -> PathBuf {
    let p = Path::new(path);
    let joined = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(p)
    };

    // Resolve `.` and `..` without touching the filesystem.
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn ensure_trailing_separator(path: &str) -> String {
    if path.ends_with('/') || path.ends_with('\\') {
        path.to_string()
    } else {
        format!("{path}{MAIN_SEPARATOR}")
    }
}

fn to_glob(path: &str) -> String {
    path.replace('\\', "/")
}
