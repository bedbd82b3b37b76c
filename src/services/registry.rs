//! Anchors of the documents that register an action node.
//!
//! Each registry document gets a fixed list of patches derived from the
//! naming spec. The entry literals here must stay in sync with the names
//! produced by `NamingSpec`, since presence checks match them verbatim.

use crate::domain::{NamingSpec, Project};
use crate::error::PatchResult;
use crate::services::patch::{
    apply_all, AppendUnionAlternative, DocumentPatch, InsertAfterLastMatch, InsertInBlock,
};
use std::path::Path;

/// First line of the `NodeType` union declaration
pub const NODE_TYPE_UNION_HEADER: &str = "export type NodeType =";

const DEFINITION_IMPORT_PATTERN: &str =
    r#"import \{ [A-Za-z0-9]+Definition \} from "\./definitions/[A-Za-z0-9]+Definition";"#;

const EDITOR_IMPORT_PATTERN: &str =
    r#"import \{ render[A-Za-z0-9]+Editor \} from "\./editors/[A-Za-z0-9]+Editor";"#;

const ACTION_NODE_TYPES_START: &str = "export const ACTION_NODE_TYPES = [\n";
const ACTION_NODE_TYPES_END: &str = "] as const satisfies readonly ActionNodeType[];";

const CORE_DEFINITIONS_START: &str = "const actionNodeCoreDefinitions = [\n";
const CORE_DEFINITIONS_END: &str = "] as const satisfies readonly ActionNodeCoreDefinition[];";

const EDITOR_RENDERERS_START: &str =
    "export const actionNodeEditorRenderers: Record<ActionNodeType, ActionNodeEditorRenderer> = {\n";
const EDITOR_RENDERERS_END: &str = "};";

/// Existing documents patched to register a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryArtifact {
    /// The `NodeType` union
    WorkflowTypes,
    /// Type list and core definition list
    CoreRegistry,
    /// Editor renderer map
    EditorRegistry,
}

impl RegistryArtifact {
    /// All registry artifacts, in write order
    pub const ALL: [Self; 3] = [Self::WorkflowTypes, Self::CoreRegistry, Self::EditorRegistry];

    /// Location of this artifact within a project
    pub fn path<'a>(&self, project: &'a Project) -> &'a Path {
        match self {
            Self::WorkflowTypes => &project.workflow_types,
            Self::CoreRegistry => &project.core_registry,
            Self::EditorRegistry => &project.editor_registry,
        }
    }

    /// Display name for logs
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WorkflowTypes => "node type union",
            Self::CoreRegistry => "core registry",
            Self::EditorRegistry => "editor registry",
        }
    }

    /// Patches registering `naming` in this artifact, in application order
    pub fn patches(&self, naming: &NamingSpec) -> PatchResult<Vec<Box<dyn DocumentPatch>>> {
        let node_type = naming.node_type.as_str();

        let patches: Vec<Box<dyn DocumentPatch>> = match self {
            Self::WorkflowTypes => vec![Box::new(AppendUnionAlternative::new(
                NODE_TYPE_UNION_HEADER,
                naming.node_type.quoted(),
            ))],
            Self::CoreRegistry => vec![
                Box::new(InsertAfterLastMatch::new(
                    DEFINITION_IMPORT_PATTERN,
                    format!(
                        "import {{ {} }} from \"./definitions/{}\";",
                        naming.definition_const,
                        naming.definition_module()
                    ),
                )?),
                Box::new(InsertInBlock::new(
                    ACTION_NODE_TYPES_START,
                    ACTION_NODE_TYPES_END,
                    format!("  \"{}\",\n", node_type),
                )),
                Box::new(InsertInBlock::new(
                    CORE_DEFINITIONS_START,
                    CORE_DEFINITIONS_END,
                    format!("  {},\n", naming.definition_const),
                )),
            ],
            Self::EditorRegistry => vec![
                Box::new(InsertAfterLastMatch::new(
                    EDITOR_IMPORT_PATTERN,
                    format!(
                        "import {{ {} }} from \"./editors/{}\";",
                        naming.editor_const,
                        naming.editor_module()
                    ),
                )?),
                Box::new(InsertInBlock::new(
                    EDITOR_RENDERERS_START,
                    EDITOR_RENDERERS_END,
                    format!("  {}: {},\n", node_type, naming.editor_const),
                )),
            ],
        };

        Ok(patches)
    }

    /// Register `naming` in `text`, returning the patched document
    pub fn patch(&self, text: &str, naming: &NamingSpec) -> PatchResult<String> {
        apply_all(text, &self.patches(naming)?)
    }

    /// Whether any entry for `naming` is already present in `text`
    pub fn mentions(&self, text: &str, naming: &NamingSpec) -> PatchResult<bool> {
        Ok(self
            .patches(naming)?
            .iter()
            .any(|patch| patch.is_applied(text)))
    }
}

impl std::fmt::Display for RegistryArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatchError;

    const WORKFLOW_TYPES: &str = include_str!("../../tests/fixtures/workflow.ts");
    const CORE_REGISTRY: &str = include_str!("../../tests/fixtures/coreRegistry.ts");
    const EDITOR_REGISTRY: &str = include_str!("../../tests/fixtures/editorRegistry.ts");

    fn fixture(artifact: RegistryArtifact) -> &'static str {
        match artifact {
            RegistryArtifact::WorkflowTypes => WORKFLOW_TYPES,
            RegistryArtifact::CoreRegistry => CORE_REGISTRY,
            RegistryArtifact::EditorRegistry => EDITOR_REGISTRY,
        }
    }

    fn slack() -> NamingSpec {
        NamingSpec::build("Send Slack Message", None, None).unwrap()
    }

    #[test]
    fn test_union_gains_literal() {
        let patched = RegistryArtifact::WorkflowTypes
            .patch(WORKFLOW_TYPES, &slack())
            .unwrap();

        assert!(patched.contains("  | \"play_spotify_playlist\"\n  | \"send_slack_message\";\n"));
        assert!(!patched.contains("\"play_spotify_playlist\";"));
    }

    #[test]
    fn test_core_registry_entries() {
        let patched = RegistryArtifact::CoreRegistry
            .patch(CORE_REGISTRY, &slack())
            .unwrap();

        assert!(patched.contains(
            "import { playSpotifyPlaylistDefinition } from \"./definitions/playSpotifyPlaylistDefinition\";\n\
import { sendSlackMessageDefinition } from \"./definitions/sendSlackMessageDefinition\";\n"
        ));
        // Last type entry had no trailing separator
        assert!(patched.contains(
            "  \"open_folder_in_finder\",\n  \"send_slack_message\",\n] as const satisfies readonly ActionNodeType[];"
        ));
        assert!(patched.contains(
            "  openFolderInFinderDefinition,\n  sendSlackMessageDefinition,\n] as const satisfies readonly ActionNodeCoreDefinition[];"
        ));
    }

    #[test]
    fn test_editor_registry_entries() {
        let patched = RegistryArtifact::EditorRegistry
            .patch(EDITOR_REGISTRY, &slack())
            .unwrap();

        assert!(patched.contains(
            "import { renderSendSlackMessageEditor } from \"./editors/sendSlackMessageEditor\";\n"
        ));
        assert!(patched.contains(
            "  play_spotify_playlist: renderPlaySpotifyPlaylistEditor,\n  send_slack_message: renderSendSlackMessageEditor,\n};"
        ));
    }

    #[test]
    fn test_only_inserted_lines_change() {
        let naming = slack();
        for artifact in RegistryArtifact::ALL {
            let original = fixture(artifact);
            let patched = artifact.patch(original, &naming).unwrap();

            let before: Vec<&str> = original.lines().collect();
            let after: Vec<&str> = patched.lines().collect();
            let inserted = after.len() - before.len();
            let changed = after
                .iter()
                .filter(|line| !before.contains(*line))
                .count();

            // New entries, plus at most one existing line gaining or losing punctuation per block
            assert!(changed >= inserted, "{}: lines went missing", artifact);
            assert!(changed <= inserted * 2, "{}: unrelated lines changed", artifact);
        }
    }

    #[test]
    fn test_full_pipeline_is_idempotent() {
        let naming = slack();
        for artifact in RegistryArtifact::ALL {
            let original = fixture(artifact);
            let once = artifact.patch(original, &naming).unwrap();
            let twice = artifact.patch(&once, &naming).unwrap();

            assert_ne!(once, original, "{} should change on first run", artifact);
            assert_eq!(once, twice, "{} should be stable on second run", artifact);
        }
    }

    #[test]
    fn test_mentions() {
        let naming = slack();
        let existing = NamingSpec::build("Open URL", None, None).unwrap();

        for artifact in RegistryArtifact::ALL {
            let text = fixture(artifact);
            assert!(!artifact.mentions(text, &naming).unwrap());
            assert!(artifact.mentions(text, &existing).unwrap(), "{}", artifact);
        }
    }

    #[test]
    fn test_missing_block_reported() {
        let text = CORE_REGISTRY.replace(CORE_DEFINITIONS_START, "const renamed = [\n");
        let err = RegistryArtifact::CoreRegistry
            .patch(&text, &slack())
            .unwrap_err();

        assert!(matches!(err, PatchError::MissingMarker(m) if m == CORE_DEFINITIONS_START));
    }
}
