//! Project entity representing the workflow application being scaffolded.

use super::NamingSpec;
use crate::config::ScaffoldConfig;
use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// Represents the application checkout whose artifacts get patched
#[derive(Debug, Clone)]
pub struct Project {
    /// Repository root path
    pub root_path: PathBuf,
    /// Document holding the `NodeType` union (absolute path)
    pub workflow_types: PathBuf,
    /// Core registry (absolute path)
    pub core_registry: PathBuf,
    /// Editor registry (absolute path)
    pub editor_registry: PathBuf,
    /// Directory for generated definitions (absolute path)
    pub definitions_dir: PathBuf,
    /// Directory for generated editors (absolute path)
    pub editors_dir: PathBuf,
    /// Loaded configuration
    pub config: ScaffoldConfig,
}

impl Project {
    /// Create a new Project from a root path and configuration
    pub fn new(root_path: PathBuf, config: ScaffoldConfig) -> Self {
        let artifacts = &config.artifacts;
        let workflow_types = root_path.join(&artifacts.workflow_types);
        let core_registry = root_path.join(&artifacts.core_registry);
        let editor_registry = root_path.join(&artifacts.editor_registry);
        let definitions_dir = root_path.join(&artifacts.definitions_dir);
        let editors_dir = root_path.join(&artifacts.editors_dir);

        Self {
            root_path,
            workflow_types,
            core_registry,
            editor_registry,
            definitions_dir,
            editors_dir,
            config,
        }
    }

    /// Resolve the project for a starting directory, loading layered configuration.
    ///
    /// With `explicit_root` the root is taken as given; otherwise it is discovered
    /// by walking up from `start` until the union document is found.
    pub fn open(start: &Path, explicit_root: Option<PathBuf>) -> Result<Self> {
        let root = match explicit_root {
            Some(root) => root,
            None => {
                let bootstrap = ScaffoldConfig::load(Some(start))?;
                Self::discover(start, &bootstrap.artifacts.workflow_types)
                    .ok_or_else(|| ScaffoldError::RootNotFound(start.to_path_buf()))?
            }
        };

        let config = ScaffoldConfig::load(Some(root.as_path()))?;
        tracing::info!("Using project root {:?}", root);
        Ok(Self::new(root, config))
    }

    /// Discover the project root by walking up from `start` until `marker` exists beneath it
    pub fn discover(start: &Path, marker: &Path) -> Option<PathBuf> {
        let mut current = start;
        loop {
            if current.join(marker).is_file() {
                return Some(current.to_path_buf());
            }

            // Move up to parent
            match current.parent() {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    /// Path of the generated definition file for a node
    pub fn definition_path(&self, naming: &NamingSpec) -> PathBuf {
        self.definitions_dir.join(&naming.definition_file)
    }

    /// Path of the generated editor file for a node
    pub fn editor_path(&self, naming: &NamingSpec) -> PathBuf {
        self.editors_dir.join(&naming.editor_file)
    }

    /// Express a path relative to the root for display
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root_path).unwrap_or(path)
    }
}
