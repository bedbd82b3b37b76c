//! Configuration management for node-scaffold.
//!
//! Supports layered configuration: defaults → project → user → env

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the per-project configuration override
pub const PROJECT_CONFIG_FILE: &str = ".scaffold-node.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    #[serde(default)]
    pub artifacts: ArtifactPaths,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScaffoldConfig {
    /// Load configuration with hierarchy: defaults → project → user → env
    pub fn load(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (.scaffold-node.toml in project root)
        if let Some(root) = project_root {
            let project_config = root.join(PROJECT_CONFIG_FILE);
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        // 3. User config (~/.config/scaffold-node/config.toml)
        if let Some(config_dir) =
            directories::ProjectDirs::from("com", "node-scaffold", "scaffold-node")
        {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (SCAFFOLD_NODE__ARTIFACTS__CORE_REGISTRY, ...)
        builder = builder.add_source(
            Environment::with_prefix("SCAFFOLD_NODE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject layouts that cannot address an artifact
    pub fn validate(&self) -> Result<(), ConfigError> {
        let artifacts = &self.artifacts;
        let named = [
            ("artifacts.workflow_types", &artifacts.workflow_types),
            ("artifacts.core_registry", &artifacts.core_registry),
            ("artifacts.editor_registry", &artifacts.editor_registry),
            ("artifacts.definitions_dir", &artifacts.definitions_dir),
            ("artifacts.editors_dir", &artifacts.editors_dir),
        ];

        for (key, path) in named {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", key)));
            }
            if path.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "{} must be relative to the project root, got {}",
                    key,
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

/// Locations of the patched and generated artifacts, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// Document holding the `NodeType` union
    #[serde(default = "default_workflow_types")]
    pub workflow_types: PathBuf,
    /// Registry of action node types and core definitions
    #[serde(default = "default_core_registry")]
    pub core_registry: PathBuf,
    /// Registry of editor renderers
    #[serde(default = "default_editor_registry")]
    pub editor_registry: PathBuf,
    /// Directory receiving generated definition files
    #[serde(default = "default_definitions_dir")]
    pub definitions_dir: PathBuf,
    /// Directory receiving generated editor files
    #[serde(default = "default_editors_dir")]
    pub editors_dir: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            workflow_types: default_workflow_types(),
            core_registry: default_core_registry(),
            editor_registry: default_editor_registry(),
            definitions_dir: default_definitions_dir(),
            editors_dir: default_editors_dir(),
        }
    }
}

fn default_workflow_types() -> PathBuf {
    PathBuf::from("src/types/workflow.ts")
}

fn default_core_registry() -> PathBuf {
    PathBuf::from("src/features/workflow/nodes/coreRegistry.ts")
}

fn default_editor_registry() -> PathBuf {
    PathBuf::from("src/features/workflow/nodes/editorRegistry.ts")
}

fn default_definitions_dir() -> PathBuf {
    PathBuf::from("src/features/workflow/nodes/definitions")
}

fn default_editors_dir() -> PathBuf {
    PathBuf::from("src/features/workflow/nodes/editors")
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is unset
    #[serde(default = "default_filter")]
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ScaffoldConfig::default();
        assert_eq!(
            config.artifacts.workflow_types,
            PathBuf::from("src/types/workflow.ts")
        );
        assert_eq!(
            config.artifacts.editors_dir,
            PathBuf::from("src/features/workflow/nodes/editors")
        );
        assert_eq!(config.logging.default_filter, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_project_config_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            "[artifacts]\ncore_registry = \"web/registry/core.ts\"\n",
        )
        .unwrap();

        let config = ScaffoldConfig::load(Some(temp.path())).unwrap();
        assert_eq!(
            config.artifacts.core_registry,
            PathBuf::from("web/registry/core.ts")
        );
        assert_eq!(
            config.artifacts.workflow_types,
            PathBuf::from("src/types/workflow.ts")
        );
    }

    #[test]
    fn test_absolute_artifact_path_rejected() {
        let mut config = ScaffoldConfig::default();
        config.artifacts.editors_dir = std::env::temp_dir();

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
