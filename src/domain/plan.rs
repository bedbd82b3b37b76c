//! Planned and executed writes for a single scaffold.

use super::NamingSpec;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Whether a write creates a new file or replaces an existing artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteKind {
    Create,
    Update,
}

/// One file write computed during planning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOp {
    pub path: PathBuf,
    pub kind: WriteKind,
    /// Full text the file will hold after the write
    pub contents: String,
}

impl WriteOp {
    pub fn create(path: PathBuf, contents: String) -> Self {
        Self {
            path,
            kind: WriteKind::Create,
            contents,
        }
    }

    pub fn update(path: PathBuf, contents: String) -> Self {
        Self {
            path,
            kind: WriteKind::Update,
            contents,
        }
    }
}

/// Every write needed to scaffold one node, in execution order.
///
/// A plan only exists once all patches have been computed successfully, so
/// holding one means nothing is left that can fail short of I/O.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub naming: NamingSpec,
    pub writes: Vec<WriteOp>,
}

impl ScaffoldPlan {
    /// Look up the planned write for a path
    pub fn write_for(&self, path: &Path) -> Option<&WriteOp> {
        self.writes.iter().find(|op| op.path == path)
    }

    /// Serializable overview with paths relative to `root`
    pub fn summary(&self, root: &Path, dry_run: bool) -> PlanSummary {
        PlanSummary {
            node_type: self.naming.node_type.to_string(),
            label: self.naming.label.clone(),
            dry_run,
            writes: self
                .writes
                .iter()
                .map(|op| PlannedWrite {
                    path: op.path.strip_prefix(root).unwrap_or(&op.path).to_path_buf(),
                    kind: op.kind,
                })
                .collect(),
        }
    }
}

/// JSON-friendly view of a plan
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub node_type: String,
    pub label: String,
    pub dry_run: bool,
    pub writes: Vec<PlannedWrite>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedWrite {
    pub path: PathBuf,
    pub kind: WriteKind,
}

/// Outcome of applying a plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Paths written (or announced, for a dry run) in order
    pub written: Vec<PathBuf>,
}
