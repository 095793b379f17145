//! Error types for the buildline domain

use thiserror::Error;

/// Errors raised while validating and constructing a project
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// Descriptor field violates the schema
    #[error("Schema validation failed at '{field_path}': {message}")]
    SchemaValidation {
        /// Dotted path of the offending field.
        field_path: String,
        /// Description of the violation.
        message: String,
    },

    /// Descriptor is structurally valid but semantically incomplete
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ProjectError {
    /// Creates a schema validation error for the given field path
    pub fn schema(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaValidation {
            field_path: field_path.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by directory and target lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Requested child or target does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Errors raised when a public operation receives an invalid argument
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgumentError {
    /// Directory child name is empty
    #[error("Child name cannot be empty")]
    EmptyChildName,

    /// Directory child name contains a path separator
    #[error("Child name cannot contain a path separator: '{name}'")]
    SeparatorInChildName {
        /// The invalid name.
        name: String,
    },

    /// Directory path is empty
    #[error("Directory path cannot be empty")]
    EmptyPath,
}

/// Errors raised while executing an emitted task
#[derive(Error, Debug)]
pub enum TaskError {
    /// External tool invocation failed
    #[error("Tool invocation failed: {0}")]
    Toolchain(#[from] ToolchainError),

    /// Watch infrastructure failed to start
    #[error("Watcher error: {0}")]
    Watcher(String),
}

/// Errors surfaced by the external toolchain collaborators
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// Command exited with a non-zero status
    #[error("Command '{command}' exited with status {code}")]
    CommandFailed {
        /// The command that was run.
        command: String,
        /// Exit code reported by the process.
        code: i32,
    },

    /// Command could not be spawned or copy could not be performed
    #[error("IO error: {0}")]
    Io(String),

    /// Glob pattern passed to the copy collaborator is malformed
    #[error("Invalid copy pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The malformed pattern.
        pattern: String,
        /// Parser message.
        message: String,
    },
}

impl From<std::io::Error> for ToolchainError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display_includes_field_path() {
        let err = ProjectError::schema("buildMetadata.type", "unknown value");
        assert_eq!(
            err.to_string(),
            "Schema validation failed at 'buildMetadata.type': unknown value"
        );
    }

    #[test]
    fn test_lookup_error_display() {
        let err = LookupError::NotFound("child 'src'".to_string());
        assert!(err.to_string().contains("src"));
    }

    #[test]
    fn test_toolchain_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ToolchainError::from(io);
        assert!(matches!(err, ToolchainError::Io(_)));
    }
}
