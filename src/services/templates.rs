//! Source templates for newly generated node files.

use crate::domain::NamingSpec;

/// Placeholder core definition for a new node type
pub fn definition_content(naming: &NamingSpec) -> String {
    format!(
        r#"import type {{ ActionNodeCoreDefinition }} from "../types";

export const {definition_const}: ActionNodeCoreDefinition<"{node_type}"> = {{
  type: "{node_type}",
  label: "{label}",
  createDefaultParams: () => ({{}}),
  summarize: () => "{label}"
}};
"#,
        definition_const = naming.definition_const,
        node_type = naming.node_type,
        label = escape_string_literal(&naming.label),
    )
}

/// Placeholder editor renderer for a new node type
pub fn editor_content(naming: &NamingSpec) -> String {
    format!(
        r#"import type {{ ActionNodeEditorRenderer }} from "../types";

export const {editor_const}: ActionNodeEditorRenderer = () => (
  <p className="node-editor-hint">No parameters for this node type.</p>
);
"#,
        editor_const = naming.editor_const,
    )
}

/// Escape a label for use inside a double-quoted string literal
fn escape_string_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_definition_content() {
        let naming = NamingSpec::build("Send Slack Message", None, None).unwrap();
        assert_snapshot!(definition_content(&naming), @r#"
import type { ActionNodeCoreDefinition } from "../types";

export const sendSlackMessageDefinition: ActionNodeCoreDefinition<"send_slack_message"> = {
  type: "send_slack_message",
  label: "Send Slack Message",
  createDefaultParams: () => ({}),
  summarize: () => "Send Slack Message"
};
"#);
    }

    #[test]
    fn test_editor_content() {
        let naming = NamingSpec::build("Open URL in browser", None, None).unwrap();
        assert_snapshot!(editor_content(&naming), @r#"
import type { ActionNodeEditorRenderer } from "../types";

export const renderOpenUrlBrowserEditor: ActionNodeEditorRenderer = () => (
  <p className="node-editor-hint">No parameters for this node type.</p>
);
"#);
    }

    #[test]
    fn test_label_quotes_are_escaped() {
        let naming =
            NamingSpec::build("Say hello", None, Some(r#"Say "hello""#)).unwrap();
        let content = definition_content(&naming);
        assert!(content.contains(r#"label: "Say \"hello\"","#));
    }
}
