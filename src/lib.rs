//! node-scaffold: Scaffold new workflow action node types
//!
//! This crate derives a canonical node type and its names from a free-text
//! description, then registers the node by patching the workflow
//! application's type union and registries in place.

pub mod config;
pub mod domain;
pub mod error;
pub mod services;

pub use config::ScaffoldConfig;
pub use domain::{NamingSpec, NodeType, Project, ScaffoldPlan};
pub use error::{AppError, ErrorKind, Result, ScaffoldError};
pub use services::ScaffoldService;
