//! Domain entities for node-scaffold.
//!
//! This module contains the core entities:
//! - NodeType / NamingSpec: A new action node and its derived names
//! - Project: The workflow application being patched
//! - ScaffoldPlan: The writes computed for one scaffold

mod naming;
mod plan;
mod project;

pub use naming::{NamingSpec, NodeType, MAX_NODE_TYPE_TOKENS, RESERVED_NODE_TYPE};
pub use plan::{PlanSummary, ScaffoldPlan, WriteKind, WriteOp, WriteReport};
pub use project::Project;
