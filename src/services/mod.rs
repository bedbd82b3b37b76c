//! Services for node-scaffold.
//!
//! This module contains:
//! - patch: Idempotent line-anchored document patches
//! - registry: Anchors of the registry documents
//! - templates: Generated file contents
//! - store: Artifact storage (filesystem, dry-run, in-memory)
//! - ScaffoldService: Plan/apply orchestration

pub mod patch;
pub mod registry;
mod scaffold;
pub mod store;
pub mod templates;

pub use registry::RegistryArtifact;
pub use scaffold::ScaffoldService;
pub use store::{ArtifactStore, DryRunStore, FsStore, MemoryStore};
