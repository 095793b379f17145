//! Project model
//!
//! Validates a raw descriptor into a read-only [`Project`]: derived identity
//! fields, a canonical directory skeleton, and the cloud/container target
//! queries every task builder consumes.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

pub mod descriptor;

pub use descriptor::{
    AwsConfig, BuildMetadata, ContainerBuild, Language, ProjectDescriptor, ProjectType,
};

use crate::directory::Directory;
use crate::errors::{LookupError, ProjectError};
use indexmap::IndexMap;
use semver::Version;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::fmt;

/// Reserved key every container configuration must declare
pub const DEFAULT_TARGET: &str = "default";

/// A normalized container build definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDefinition {
    /// Target key this definition was declared under
    pub name: String,
    /// Image repository
    pub repo: String,
    /// Build file, defaulted to `Dockerfile`
    pub build_file: String,
    /// Build arguments
    pub build_args: IndexMap<String, String>,
    /// Build secrets
    pub build_secrets: IndexMap<String, String>,
}

/// A validated, read-only project
///
/// Constructed once from a [`ProjectDescriptor`]; no partially-valid
/// project is ever returned. Every getter that returns a collection
/// returns a defensive copy.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    unscoped_name: String,
    kebab_cased_name: String,
    config_file_name: String,
    description: String,
    version: Version,
    project_type: ProjectType,
    language: Language,
    required_env: Vec<String>,
    static_file_patterns: Vec<String>,
    static_dirs: Vec<String>,
    root_dir: Directory,
    cdk_targets: IndexMap<String, String>,
    container_targets: IndexMap<String, ContainerDefinition>,
}

impl Project {
    /// Builds a project from a descriptor, rooted at the current directory
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::SchemaValidation`] for malformed fields and
    /// [`ProjectError::Configuration`] for structurally valid but
    /// semantically incomplete descriptors.
    pub fn from_descriptor(descriptor: ProjectDescriptor) -> Result<Self, ProjectError> {
        Self::with_root_path(descriptor, ".")
    }

    /// Builds a project from a descriptor rooted at an explicit path
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Project::from_descriptor`].
    pub fn with_root_path(
        descriptor: ProjectDescriptor,
        root_path: &str,
    ) -> Result<Self, ProjectError> {
        descriptor.validate()?;

        let version = Version::parse(&descriptor.version).map_err(|err| {
            ProjectError::schema("version", format!("'{}': {err}", descriptor.version))
        })?;

        let metadata = &descriptor.build_metadata;

        if let Some(aws) = &metadata.aws {
            if aws.stacks.is_empty() {
                return Err(ProjectError::Configuration(
                    "aws configuration must declare at least one stack".to_string(),
                ));
            }
        } else if metadata.project_type.is_cloud_deployed() {
            return Err(ProjectError::Configuration(format!(
                "project type '{}' requires an aws configuration",
                metadata.project_type
            )));
        }

        if let Some(container) = &metadata.container {
            if container.is_empty() {
                return Err(ProjectError::Configuration(
                    "container configuration must declare at least one build".to_string(),
                ));
            }
            if !container.contains_key(DEFAULT_TARGET) {
                return Err(ProjectError::Configuration(format!(
                    "container configuration must declare a '{DEFAULT_TARGET}' build"
                )));
            }
        } else if metadata.project_type == ProjectType::Container {
            return Err(ProjectError::Configuration(
                "project type 'container' requires a container configuration".to_string(),
            ));
        }

        let unscoped_name = unscope(&descriptor.name);
        let kebab_cased_name = descriptor.name.trim_start_matches('@').replace('/', "-");
        let config_file_name = format!(".{}rc", camel_case(&unscoped_name));

        let root_dir = Directory::create_tree(root_path, &root_tree_spec(&metadata.static_dirs))
            .map_err(|err| ProjectError::Configuration(err.to_string()))?;

        let cdk_targets = metadata
            .aws
            .as_ref()
            .map(|aws| aws.stacks.clone())
            .unwrap_or_default();

        let container_targets = metadata
            .container
            .as_ref()
            .map(|container| {
                container
                    .iter()
                    .map(|(key, build)| (key.clone(), normalize_container(key, build)))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            name: descriptor.name,
            unscoped_name,
            kebab_cased_name,
            config_file_name,
            description: descriptor.description,
            version,
            project_type: metadata.project_type,
            language: metadata.language,
            required_env: metadata.required_env.clone(),
            static_file_patterns: metadata.static_file_patterns.clone(),
            static_dirs: metadata.static_dirs.clone(),
            root_dir,
            cdk_targets,
            container_targets,
        })
    }

    /// Returns the package name as declared
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name with any leading `@scope/` stripped
    pub fn unscoped_name(&self) -> &str {
        &self.unscoped_name
    }

    /// Returns the name with `@` stripped and `/` replaced by `-`
    pub fn kebab_cased_name(&self) -> &str {
        &self.kebab_cased_name
    }

    /// Returns the rc-file name derived from the unscoped name
    pub fn config_file_name(&self) -> &str {
        &self.config_file_name
    }

    /// Returns the project description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parsed semver version
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Returns the project type
    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    /// Returns the implementation language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Returns the declared required environment variable names
    pub fn required_env(&self) -> Vec<String> {
        self.required_env.clone()
    }

    /// Returns the declared static file glob fragments
    pub fn static_file_patterns(&self) -> Vec<String> {
        self.static_file_patterns.clone()
    }

    /// Returns the declared static directory names
    pub fn static_dirs(&self) -> Vec<String> {
        self.static_dirs.clone()
    }

    /// Returns the canonical directory skeleton
    pub fn root_dir(&self) -> &Directory {
        &self.root_dir
    }

    /// Returns a skeleton directory by `/`-delimited path
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if `path` does not name a
    /// canonical skeleton directory.
    pub fn dir(&self, path: &str) -> Result<&Directory, LookupError> {
        self.root_dir.get_child(path)
    }

    /// Returns the cloud stack target keys in declaration order
    pub fn get_cdk_targets(&self) -> Vec<String> {
        self.cdk_targets.keys().cloned().collect()
    }

    /// Returns the stack identifier for a cloud target
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] for an undeclared target.
    pub fn get_cdk_stack_definition(&self, target: &str) -> Result<String, LookupError> {
        self.cdk_targets
            .get(target)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(format!("cdk target '{target}'")))
    }

    /// Returns the container target keys in declaration order
    pub fn get_container_targets(&self) -> Vec<String> {
        self.container_targets.keys().cloned().collect()
    }

    /// Returns true if the project declares any container build
    pub fn has_container_targets(&self) -> bool {
        !self.container_targets.is_empty()
    }

    /// Returns the normalized definition for a container target
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] for an undeclared target.
    pub fn get_container_definition(
        &self,
        target: &str,
    ) -> Result<ContainerDefinition, LookupError> {
        self.container_targets
            .get(target)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(format!("container target '{target}'")))
    }

    /// Returns the required variables absent from an environment snapshot
    ///
    /// Pure set difference; neither the snapshot nor the project is
    /// mutated.
    pub fn get_undefined_environment_variables(
        &self,
        env: &HashMap<String, String>,
    ) -> Vec<String> {
        self.required_env
            .iter()
            .filter(|var| !env.contains_key(*var))
            .cloned()
            .collect()
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Project({}@{}): {}/{}",
            self.name, self.version, self.project_type, self.language
        )
    }
}

fn normalize_container(name: &str, build: &ContainerBuild) -> ContainerDefinition {
    ContainerDefinition {
        name: name.to_string(),
        repo: build.repo.clone(),
        build_file: build
            .build_file
            .clone()
            .unwrap_or_else(|| "Dockerfile".to_string()),
        build_args: build.build_args.clone(),
        build_secrets: build.build_secrets.clone(),
    }
}

fn unscope(name: &str) -> String {
    match name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((_, unscoped)) => unscoped.to_string(),
        None => name.to_string(),
    }
}

/// Converts a package name fragment to camelCase
fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut capitalize = false;
    for c in input.chars() {
        if c.is_alphanumeric() {
            if capitalize {
                out.extend(c.to_uppercase());
                capitalize = false;
            } else if out.is_empty() {
                out.extend(c.to_lowercase());
            } else {
                out.push(c);
            }
        } else {
            capitalize = !out.is_empty();
        }
    }
    out
}

/// The canonical skeleton: sources, tiered tests, infra and scripts, a
/// mirrored `working` staging tree, and the derived output directories.
fn root_tree_spec(static_dirs: &[String]) -> Value {
    let statics: Map<String, Value> = static_dirs
        .iter()
        .map(|dir| (dir.clone(), json!({})))
        .collect();

    json!({
        "src": statics.clone(),
        "test": { "unit": {}, "api": {}, "int": {} },
        "infra": {},
        "scripts": {},
        "working": {
            "src": statics,
            "test": { "unit": {}, "api": {}, "int": {} },
            "infra": {},
            "scripts": {},
        },
        "dist": {},
        "docs": {},
        "coverage": {},
        ".buildline": {},
        ".tscache": {},
        "logs": {},
        "cdk.out": {},
    })
}
