//! Unified error types for the node-scaffold tool.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Failures while turning a description or override into names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("Unable to derive node type from description {description:?}: no usable words")]
    EmptyDerivation { description: String },

    #[error(
        "Invalid node type {value:?}: must start with a letter and contain only lowercase letters, digits, and underscores"
    )]
    InvalidIdentifier { value: String },

    #[error("\"{0}\" is reserved and cannot be used as an action node type")]
    ReservedIdentifier(String),
}

/// Failures locating a structural landmark while patching a document
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Unable to locate insertion anchor: {0}")]
    MissingAnchor(String),

    #[error("Unable to locate block marker: {0:?}")]
    MissingMarker(String),

    #[error("Unable to locate end of declaration starting with {0:?}")]
    MissingTerminator(String),

    #[error("Invalid anchor pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while planning or applying a scaffold
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error("{}: {source}", .artifact.display())]
    Patch {
        artifact: PathBuf,
        #[source]
        source: PatchError,
    },

    #[error("Node type \"{node_type}\" already exists in {}", .artifact.display())]
    DuplicateIdentifier { node_type: String, artifact: PathBuf },

    #[error("Generated node file already exists: {}; choose a different --type", .0.display())]
    PathCollision(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}{}", .failed.display(), written_suffix(.written))]
    PartialWrite {
        written: Vec<PathBuf>,
        failed: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to locate project root from {}", .0.display())]
    RootNotFound(PathBuf),
}

/// Taxonomy tag for a scaffold failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyDerivation,
    InvalidIdentifier,
    ReservedIdentifier,
    DuplicateIdentifier,
    PathCollision,
    MissingAnchor,
    MissingMarker,
    MissingTerminator,
    ArtifactRead,
    PartialWrite,
    RootNotFound,
}

impl ErrorKind {
    /// Stable kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyDerivation => "empty-derivation",
            Self::InvalidIdentifier => "invalid-identifier",
            Self::ReservedIdentifier => "reserved-identifier",
            Self::DuplicateIdentifier => "duplicate-identifier",
            Self::PathCollision => "path-collision",
            Self::MissingAnchor => "missing-anchor",
            Self::MissingMarker => "missing-marker",
            Self::MissingTerminator => "missing-terminator",
            Self::ArtifactRead => "artifact-read",
            Self::PartialWrite => "partial-write",
            Self::RootNotFound => "root-not-found",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl NamingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyDerivation { .. } => ErrorKind::EmptyDerivation,
            Self::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            Self::ReservedIdentifier(_) => ErrorKind::ReservedIdentifier,
        }
    }
}

impl PatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // A malformed pattern can never match, so it reports as a missing anchor
            Self::MissingAnchor(_) | Self::InvalidPattern { .. } => ErrorKind::MissingAnchor,
            Self::MissingMarker(_) => ErrorKind::MissingMarker,
            Self::MissingTerminator(_) => ErrorKind::MissingTerminator,
        }
    }
}

impl ScaffoldError {
    /// Taxonomy tag for this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Naming(e) => e.kind(),
            Self::Patch { source, .. } => source.kind(),
            Self::DuplicateIdentifier { .. } => ErrorKind::DuplicateIdentifier,
            Self::PathCollision(_) => ErrorKind::PathCollision,
            Self::ArtifactRead { .. } => ErrorKind::ArtifactRead,
            Self::PartialWrite { .. } => ErrorKind::PartialWrite,
            Self::RootNotFound(_) => ErrorKind::RootNotFound,
        }
    }

    /// Whether any artifact reached disk before the failure
    pub fn wrote_anything(&self) -> bool {
        matches!(self, Self::PartialWrite { written, .. } if !written.is_empty())
    }

    /// Paths committed to disk before the failure
    pub fn written_paths(&self) -> &[PathBuf] {
        match self {
            Self::PartialWrite { written, .. } => written,
            _ => &[],
        }
    }

    pub(crate) fn patch(artifact: &Path, source: PatchError) -> Self {
        Self::Patch {
            artifact: artifact.to_path_buf(),
            source,
        }
    }

    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        Self::ArtifactRead {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn written_suffix(written: &[PathBuf]) -> String {
    if written.is_empty() {
        return " (nothing was written)".to_string();
    }

    let paths: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
    format!(" (already written: {})", paths.join(", "))
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for naming operations
pub type NamingResult<T> = std::result::Result<T, NamingError>;

/// Result type alias for document patches
pub type PatchResult<T> = std::result::Result<T, PatchError>;

/// Result type alias for scaffold operations
pub type ScaffoldResult<T> = std::result::Result<T, ScaffoldError>;
