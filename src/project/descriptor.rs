//! Raw project descriptor schema
//!
//! This module defines the serde model for the user-supplied descriptor
//! document and the schema checks applied before a [`Project`] is
//! constructed from it.
//!
//! [`Project`]: crate::project::Project

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use crate::errors::ProjectError;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pattern every target key and environment variable name must match
static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_-]*$").expect("valid identifier regex"));

/// Closed set of supported project types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    /// Reusable library published to a package registry
    Lib,
    /// Command line tool
    Cli,
    /// HTTP API service
    Api,
    /// Service deployed as one or more AWS stacks
    AwsMicroservice,
    /// Standalone container image
    Container,
    /// Browser UI bundle
    Ui,
}

impl ProjectType {
    /// Returns true if the type deploys to a cloud stack
    pub fn is_cloud_deployed(self) -> bool {
        matches!(self, Self::AwsMicroservice)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Lib => "lib",
            Self::Cli => "cli",
            Self::Api => "api",
            Self::AwsMicroservice => "aws-microservice",
            Self::Container => "container",
            Self::Ui => "ui",
        };
        write!(f, "{label}")
    }
}

/// Closed set of supported implementation languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Plain JavaScript
    Js,
    /// TypeScript
    Ts,
}

impl Language {
    /// Returns true if the language carries a compile step and a type cache
    pub fn is_typed(self) -> bool {
        matches!(self, Self::Ts)
    }

    /// Source file extension for this language
    pub fn extension(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Ts => "ts",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Js => "js",
            Self::Ts => "ts",
        };
        write!(f, "{label}")
    }
}

/// AWS deployment configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsConfig {
    /// Deployable stacks, keyed by target name
    pub stacks: IndexMap<String, String>,
}

/// A single container build declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ContainerBuild {
    /// Image repository to tag the build with
    pub repo: String,

    /// Build file relative to the project root (default `Dockerfile`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_file: Option<String>,

    /// Build arguments passed to the container build
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub build_args: IndexMap<String, String>,

    /// Build secrets passed to the container build
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub build_secrets: IndexMap<String, String>,
}

/// Build metadata section of the descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct BuildMetadata {
    /// Project type
    #[serde(rename = "type")]
    pub project_type: ProjectType,

    /// Implementation language
    pub language: Language,

    /// Environment variables the project needs at run time
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_env: Vec<String>,

    /// Extra static file glob fragments copied into the staging tree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_file_patterns: Vec<String>,

    /// Static directories merged into the source and staging subtrees
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_dirs: Vec<String>,

    /// AWS deployment configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsConfig>,

    /// Container builds, keyed by target name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<IndexMap<String, ContainerBuild>>,
}

/// Raw user-supplied project descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ProjectDescriptor {
    /// Package name, optionally scoped (`@scope/name`)
    pub name: String,

    /// Human readable description; empty when omitted
    #[serde(default)]
    pub description: String,

    /// Semver version string
    pub version: String,

    /// Build metadata
    pub build_metadata: BuildMetadata,
}

impl ProjectDescriptor {
    /// Deserializes a descriptor from a JSON value
    ///
    /// # Errors
    ///
    /// Returns a schema validation error if the document does not match the
    /// descriptor shape, including any additional properties. The field
    /// path names the offending field when the parser reports one.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProjectError> {
        serde_json::from_value(value).map_err(|err| {
            let message = err.to_string();
            let field = quoted_field(&message).unwrap_or("descriptor").to_string();
            ProjectError::schema(field, message)
        })
    }

    /// Runs the structural checks the serde shape cannot express
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::SchemaValidation`] with the dotted path of
    /// the first offending field.
    pub fn validate(&self) -> Result<(), ProjectError> {
        if self.name.is_empty() {
            return Err(ProjectError::schema("name", "must not be empty"));
        }

        for (index, var) in self.build_metadata.required_env.iter().enumerate() {
            if !IDENTIFIER_PATTERN.is_match(var) {
                return Err(ProjectError::schema(
                    format!("buildMetadata.requiredEnv[{index}]"),
                    format!("'{var}' is not a valid environment variable name"),
                ));
            }
        }

        for dir in &self.build_metadata.static_dirs {
            if dir.is_empty() || dir.contains('/') || dir.contains('\\') {
                return Err(ProjectError::schema(
                    "buildMetadata.staticDirs",
                    format!("'{dir}' is not a valid directory name"),
                ));
            }
        }

        if let Some(aws) = &self.build_metadata.aws {
            for key in aws.stacks.keys() {
                if !IDENTIFIER_PATTERN.is_match(key) {
                    return Err(ProjectError::schema(
                        format!("buildMetadata.aws.stacks.{key}"),
                        "target key must be a valid identifier",
                    ));
                }
            }
        }

        if let Some(container) = &self.build_metadata.container {
            for (key, build) in container {
                if !IDENTIFIER_PATTERN.is_match(key) {
                    return Err(ProjectError::schema(
                        format!("buildMetadata.container.{key}"),
                        "target key must be a valid identifier",
                    ));
                }
                if build.repo.is_empty() {
                    return Err(ProjectError::schema(
                        format!("buildMetadata.container.{key}.repo"),
                        "must not be empty",
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Extracts the backtick-quoted field name serde embeds in shape errors
fn quoted_field(message: &str) -> Option<&str> {
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    Some(&message[start..start + len])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_descriptor() -> serde_json::Value {
        json!({
            "name": "@scope/my-lib",
            "description": "A test library",
            "version": "1.0.0",
            "buildMetadata": {
                "type": "lib",
                "language": "ts",
            },
        })
    }

    #[test]
    fn test_descriptor_parses_minimal_shape() {
        let descriptor = ProjectDescriptor::from_value(minimal_descriptor()).unwrap();
        assert_eq!(descriptor.name, "@scope/my-lib");
        assert_eq!(descriptor.build_metadata.project_type, ProjectType::Lib);
        assert_eq!(descriptor.build_metadata.language, Language::Ts);
        assert!(descriptor.build_metadata.required_env.is_empty());
        descriptor.validate().unwrap();
    }

    #[test]
    fn test_descriptor_parses_without_description() {
        let mut value = minimal_descriptor();
        value.as_object_mut().unwrap().remove("description");
        let descriptor = ProjectDescriptor::from_value(value).unwrap();
        assert_eq!(descriptor.description, "");
        descriptor.validate().unwrap();
    }

    #[test]
    fn test_descriptor_rejects_unknown_property() {
        let mut value = minimal_descriptor();
        value["unexpected"] = json!(true);
        assert!(ProjectDescriptor::from_value(value).is_err());
    }

    #[test]
    fn test_shape_error_names_the_offending_field() {
        let mut value = minimal_descriptor();
        value.as_object_mut().unwrap().remove("version");
        let err = ProjectDescriptor::from_value(value).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::SchemaValidation { ref field_path, .. } if field_path == "version"
        ));

        let mut value = minimal_descriptor();
        value["buildMetadata"]["bogus"] = json!("x");
        let err = ProjectDescriptor::from_value(value).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::SchemaValidation { ref field_path, .. } if field_path == "bogus"
        ));
    }

    #[test]
    fn test_shape_error_without_field_falls_back_to_descriptor() {
        let err = ProjectDescriptor::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::SchemaValidation { ref field_path, .. } if field_path == "descriptor"
        ));
    }

    #[test]
    fn test_descriptor_rejects_unknown_metadata_property() {
        let mut value = minimal_descriptor();
        value["buildMetadata"]["bogus"] = json!("x");
        assert!(ProjectDescriptor::from_value(value).is_err());
    }

    #[test]
    fn test_descriptor_rejects_unknown_type() {
        let mut value = minimal_descriptor();
        value["buildMetadata"]["type"] = json!("desktop");
        assert!(ProjectDescriptor::from_value(value).is_err());
    }

    #[test]
    fn test_descriptor_rejects_unknown_language() {
        let mut value = minimal_descriptor();
        value["buildMetadata"]["language"] = json!("python");
        assert!(ProjectDescriptor::from_value(value).is_err());
    }

    #[test]
    fn test_validate_rejects_invalid_env_name() {
        let mut value = minimal_descriptor();
        value["buildMetadata"]["requiredEnv"] = json!(["GOOD_VAR", "1BAD"]);
        let descriptor = ProjectDescriptor::from_value(value).unwrap();
        let err = descriptor.validate().unwrap_err();
        assert!(matches!(
            err,
            ProjectError::SchemaValidation { ref field_path, .. }
                if field_path == "buildMetadata.requiredEnv[1]"
        ));
    }

    #[test]
    fn test_validate_rejects_invalid_stack_key() {
        let mut value = minimal_descriptor();
        value["buildMetadata"]["aws"] = json!({ "stacks": { "bad key": "my-stack" } });
        let descriptor = ProjectDescriptor::from_value(value).unwrap();
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_container_repo() {
        let mut value = minimal_descriptor();
        value["buildMetadata"]["container"] = json!({ "default": { "repo": "" } });
        let descriptor = ProjectDescriptor::from_value(value).unwrap();
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn test_container_build_defaults() {
        let build: ContainerBuild =
            serde_json::from_value(json!({ "repo": "registry/app" })).unwrap();
        assert_eq!(build.build_file, None);
        assert!(build.build_args.is_empty());
        assert!(build.build_secrets.is_empty());
    }

    #[test]
    fn test_project_type_round_trip() {
        let value = serde_json::to_value(ProjectType::AwsMicroservice).unwrap();
        assert_eq!(value, json!("aws-microservice"));
        let parsed: ProjectType = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, ProjectType::AwsMicroservice);
        assert_eq!(parsed.to_string(), "aws-microservice");
    }

    #[test]
    fn test_language_helpers() {
        assert!(Language::Ts.is_typed());
        assert!(!Language::Js.is_typed());
        assert_eq!(Language::Ts.extension(), "ts");
    }
}
