//! Scaffold service: plans and applies every write needed for a new node type.
//!
//! Scaffolding runs in two phases. `plan` reads the registry documents,
//! checks that the node type is absent from every artifact, and computes
//! all new file contents in memory. `apply` then writes the plan out
//! sequentially. Nothing touches disk until a plan exists, so every failure
//! except a failed write leaves the project untouched.

use crate::domain::{NamingSpec, Project, ScaffoldPlan, WriteOp, WriteReport};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::services::registry::RegistryArtifact;
use crate::services::store::ArtifactStore;
use crate::services::templates::{definition_content, editor_content};
use std::path::Path;

/// Service scaffolding action nodes into a project
pub struct ScaffoldService {
    project: Project,
}

impl ScaffoldService {
    /// Create a new ScaffoldService
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    /// Project this service writes into
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Compute every write for `naming` without modifying anything.
    ///
    /// The node type must be absent from all artifacts: neither generated file
    /// may exist and no registry may mention it. A partially registered node
    /// is rejected rather than completed.
    pub fn plan<S: ArtifactStore>(
        &self,
        naming: &NamingSpec,
        store: &S,
    ) -> ScaffoldResult<ScaffoldPlan> {
        let definition_path = self.project.definition_path(naming);
        let editor_path = self.project.editor_path(naming);

        for path in [&definition_path, &editor_path] {
            if store.exists(path) {
                return Err(ScaffoldError::PathCollision(path.clone()));
            }
        }

        let mut updates = Vec::with_capacity(RegistryArtifact::ALL.len());
        for artifact in RegistryArtifact::ALL {
            let path = artifact.path(&self.project);
            let text = store
                .read(path)
                .map_err(|source| ScaffoldError::read(path, source))?;

            let mentioned = artifact
                .mentions(&text, naming)
                .map_err(|source| ScaffoldError::patch(path, source))?;
            if mentioned {
                return Err(ScaffoldError::DuplicateIdentifier {
                    node_type: naming.node_type.to_string(),
                    artifact: path.to_path_buf(),
                });
            }

            updates.push((artifact, path, text));
        }

        let mut writes = vec![
            WriteOp::create(definition_path, definition_content(naming)),
            WriteOp::create(editor_path, editor_content(naming)),
        ];

        for (artifact, path, text) in updates {
            let patched = self.patch_artifact(artifact, path, &text, naming)?;
            writes.push(WriteOp::update(path.to_path_buf(), patched));
        }

        tracing::info!(
            "Planned {} writes for node type {}",
            writes.len(),
            naming.node_type
        );

        Ok(ScaffoldPlan {
            naming: naming.clone(),
            writes,
        })
    }

    fn patch_artifact(
        &self,
        artifact: RegistryArtifact,
        path: &Path,
        text: &str,
        naming: &NamingSpec,
    ) -> ScaffoldResult<String> {
        let patches = artifact
            .patches(naming)
            .map_err(|source| ScaffoldError::patch(path, source))?;

        let mut current = text.to_string();
        for patch in &patches {
            tracing::debug!("{}: {}", artifact, patch.describe());
            current = patch
                .apply(&current)
                .map_err(|source| ScaffoldError::patch(path, source))?;
        }
        Ok(current)
    }

    /// Execute a plan's writes in order.
    ///
    /// Writes are not transactional: if one fails, the returned error lists
    /// the paths already written.
    pub fn apply<S: ArtifactStore>(
        &self,
        plan: &ScaffoldPlan,
        store: &mut S,
    ) -> ScaffoldResult<WriteReport> {
        let mut report = WriteReport::default();

        for op in &plan.writes {
            if let Err(source) = store.write(&op.path, &op.contents) {
                tracing::warn!(
                    "Write of {:?} failed after {} successful writes",
                    op.path,
                    report.written.len()
                );
                return Err(ScaffoldError::PartialWrite {
                    written: report.written,
                    failed: op.path.clone(),
                    source,
                });
            }

            tracing::info!("Wrote {:?} ({:?})", op.path, op.kind);
            report.written.push(op.path.clone());
        }

        Ok(report)
    }

    /// Plan and apply in one step
    pub fn scaffold<S: ArtifactStore>(
        &self,
        naming: &NamingSpec,
        store: &mut S,
    ) -> ScaffoldResult<(ScaffoldPlan, WriteReport)> {
        let plan = self.plan(naming, store)?;
        let report = self.apply(&plan, store)?;
        Ok((plan, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScaffoldConfig;
    use crate::domain::WriteKind;
    use crate::error::ErrorKind;
    use crate::services::store::MemoryStore;
    use std::path::PathBuf;

    const WORKFLOW_TYPES: &str = include_str!("../../tests/fixtures/workflow.ts");
    const CORE_REGISTRY: &str = include_str!("../../tests/fixtures/coreRegistry.ts");
    const EDITOR_REGISTRY: &str = include_str!("../../tests/fixtures/editorRegistry.ts");

    fn service() -> ScaffoldService {
        ScaffoldService::new(Project::new(
            PathBuf::from("/app"),
            ScaffoldConfig::default(),
        ))
    }

    fn seeded_store(service: &ScaffoldService) -> MemoryStore {
        let project = service.project();
        let mut store = MemoryStore::new();
        store.insert(&project.workflow_types, WORKFLOW_TYPES);
        store.insert(&project.core_registry, CORE_REGISTRY);
        store.insert(&project.editor_registry, EDITOR_REGISTRY);
        store
    }

    fn slack() -> NamingSpec {
        NamingSpec::build("Send Slack Message", None, None).unwrap()
    }

    #[test]
    fn test_plan_orders_writes() {
        let service = service();
        let store = seeded_store(&service);
        let plan = service.plan(&slack(), &store).unwrap();

        let paths: Vec<&Path> = plan.writes.iter().map(|op| op.path.as_path()).collect();
        assert_eq!(
            paths,
            vec![
                Path::new("/app/src/features/workflow/nodes/definitions/sendSlackMessageDefinition.ts"),
                Path::new("/app/src/features/workflow/nodes/editors/sendSlackMessageEditor.tsx"),
                Path::new("/app/src/types/workflow.ts"),
                Path::new("/app/src/features/workflow/nodes/coreRegistry.ts"),
                Path::new("/app/src/features/workflow/nodes/editorRegistry.ts"),
            ]
        );
        assert_eq!(plan.writes[0].kind, WriteKind::Create);
        assert_eq!(plan.writes[4].kind, WriteKind::Update);
    }

    #[test]
    fn test_plan_does_not_write() {
        let service = service();
        let store = seeded_store(&service);
        let before = store.clone();
        service.plan(&slack(), &store).unwrap();

        let project = service.project();
        assert_eq!(
            store.get(&project.core_registry),
            before.get(&project.core_registry)
        );
    }

    #[test]
    fn test_scaffold_writes_everything() {
        let service = service();
        let mut store = seeded_store(&service);
        let naming = slack();

        let (plan, report) = service.scaffold(&naming, &mut store).unwrap();
        assert_eq!(report.written.len(), 5);

        let project = service.project();
        assert!(store
            .get(&project.workflow_types)
            .unwrap()
            .contains("  | \"send_slack_message\";"));
        assert_eq!(
            store.get(&project.definition_path(&naming)),
            Some(definition_content(&naming).as_str())
        );
        assert_eq!(
            store.get(&project.editor_registry),
            plan.write_for(&project.editor_registry)
                .map(|op| op.contents.as_str())
        );
    }

    #[test]
    fn test_duplicate_in_union_rejected() {
        let service = service();
        let mut store = seeded_store(&service);
        let before = store.clone();
        let naming = NamingSpec::build("Open URL", None, None).unwrap();

        let err = service.scaffold(&naming, &mut store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateIdentifier);
        assert!(!err.wrote_anything());
        assert_eq!(
            store.get(&service.project().workflow_types),
            before.get(&service.project().workflow_types)
        );
    }

    #[test]
    fn test_second_run_rejected_without_writes() {
        let service = service();
        let mut store = seeded_store(&service);
        let naming = slack();

        service.scaffold(&naming, &mut store).unwrap();
        let after_first = store.clone();

        // Generated files now exist, which is checked first
        let err = service.scaffold(&naming, &mut store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathCollision);
        let project = service.project();
        assert_eq!(
            store.get(&project.core_registry),
            after_first.get(&project.core_registry)
        );
    }

    #[test]
    fn test_registry_only_entry_rejected() {
        let service = service();
        let mut store = seeded_store(&service);
        let project = service.project();
        let stale = EDITOR_REGISTRY.replace(
            "};",
            "  send_slack_message: renderSendSlackMessageEditor,\n};",
        );
        store.insert(&project.editor_registry, stale);

        let err = service.plan(&slack(), &store).unwrap_err();
        match err {
            ScaffoldError::DuplicateIdentifier { artifact, .. } => {
                assert_eq!(artifact, project.editor_registry)
            }
            other => panic!("expected duplicate identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_existing_generated_file_rejected() {
        let service = service();
        let mut store = seeded_store(&service);
        let naming = slack();
        store.insert(service.project().editor_path(&naming), "// stale");

        let err = service.plan(&naming, &store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathCollision);
    }

    #[test]
    fn test_missing_anchor_aborts_before_writes() {
        let service = service();
        let mut store = seeded_store(&service);
        let project = service.project();
        store.insert(
            &project.editor_registry,
            EDITOR_REGISTRY.replace("actionNodeEditorRenderers", "renderers"),
        );
        let before = store.clone();

        let err = service.scaffold(&slack(), &mut store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingMarker);
        assert!(!store.exists(&project.definition_path(&slack())));
        assert_eq!(
            store.get(&project.workflow_types),
            before.get(&project.workflow_types)
        );
    }

    #[test]
    fn test_missing_artifact_is_read_error() {
        let service = service();
        let mut store = MemoryStore::new();
        store.insert(&service.project().workflow_types, WORKFLOW_TYPES);

        let err = service.plan(&slack(), &store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArtifactRead);
    }

    #[test]
    fn test_partial_write_reports_written_paths() {
        let service = service();
        let mut store = seeded_store(&service);
        let project = service.project();
        let naming = slack();
        store.set_read_only(&project.workflow_types);

        let err = service.scaffold(&naming, &mut store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PartialWrite);
        assert!(err.wrote_anything());
        assert_eq!(
            err.written_paths(),
            &[project.definition_path(&naming), project.editor_path(&naming)]
        );
        assert!(!store
            .get(&project.core_registry)
            .unwrap()
            .contains("sendSlackMessageDefinition"));
    }
}
