//! Node type identifiers and the names derived from them.

use crate::error::{NamingError, NamingResult};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Words dropped when deriving a node type from a description
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "for", "from", "in", "into", "is", "it", "node", "of",
    "on", "or", "the", "to", "tool", "type", "workflow", "with",
];

/// Tokens rendered in full uppercase inside labels
const ACRONYMS: &[(&str, &str)] = &[("api", "API"), ("id", "ID"), ("url", "URL"), ("ui", "UI")];

/// Reserved for the workflow entry point
pub const RESERVED_NODE_TYPE: &str = "start";

/// Maximum number of description words kept in a derived node type
pub const MAX_NODE_TYPE_TOKENS: usize = 4;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]+").expect("word pattern is valid"));
static DISALLOWED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]+").expect("disallowed-run pattern is valid"));
static UNDERSCORE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("underscore pattern is valid"));
static CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("canonical pattern is valid"));

/// Canonical action node type identifier.
/// Format: lowercase snake_case starting with a letter (e.g., "send_slack_message")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeType(String);

impl NodeType {
    /// Parse an identifier that must already be canonical
    pub fn parse(s: &str) -> NamingResult<Self> {
        if !CANONICAL.is_match(s) || s.contains("__") {
            return Err(NamingError::InvalidIdentifier {
                value: s.to_string(),
            });
        }
        if s == RESERVED_NODE_TYPE {
            return Err(NamingError::ReservedIdentifier(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Normalize an explicit override into a canonical identifier
    pub fn sanitize(value: &str) -> NamingResult<Self> {
        let lowered = value.trim().to_lowercase();
        let replaced = DISALLOWED_RUN.replace_all(&lowered, "_");
        let collapsed = UNDERSCORE_RUN.replace_all(&replaced, "_");
        let normalized = collapsed.trim_matches('_');

        if !CANONICAL.is_match(normalized) {
            return Err(NamingError::InvalidIdentifier {
                value: value.to_string(),
            });
        }
        Self::parse(normalized)
    }

    /// Derive an identifier from a free-text description
    pub fn derive(description: &str) -> NamingResult<Self> {
        let lowered = description.to_lowercase();
        let tokens: Vec<&str> = WORD.find_iter(&lowered).map(|m| m.as_str()).collect();
        let meaningful: Vec<&str> = tokens
            .iter()
            .copied()
            .filter(|token| !STOPWORDS.contains(token))
            .collect();

        // A description made only of filler words has nothing usable to name the node after
        if meaningful.is_empty() {
            return Err(NamingError::EmptyDerivation {
                description: description.to_string(),
            });
        }

        let selected = &meaningful[..meaningful.len().min(MAX_NODE_TYPE_TOKENS)];
        tracing::debug!(?tokens, ?selected, "derived node type tokens");
        Self::sanitize(&selected.join("_"))
    }

    /// Resolve the identifier from an override if given, otherwise from the description
    pub fn resolve(description: &str, explicit: Option<&str>) -> NamingResult<Self> {
        match explicit {
            Some(value) => Self::sanitize(value),
            None => Self::derive(description),
        }
    }

    /// Get the identifier as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Quoted form used as a union literal (e.g., `"send_slack_message"`)
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }

    fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split('_').filter(|part| !part.is_empty())
    }

    /// PascalCase rendering (e.g., "SendSlackMessage")
    pub fn pascal_case(&self) -> String {
        self.words().map(capitalize_first).collect()
    }

    /// camelCase rendering (e.g., "sendSlackMessage")
    pub fn camel_case(&self) -> String {
        let pascal = self.pascal_case();
        let mut chars = pascal.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Human-readable label (e.g., "Open URL In Tab")
    pub fn title_label(&self) -> String {
        self.words()
            .map(|word| match ACRONYMS.iter().find(|(key, _)| *key == word) {
                Some((_, acronym)) => acronym.to_string(),
                None => title_case(word),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NodeType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Every name generated for one node type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingSpec {
    /// Free-text description the node was requested with
    pub description: String,
    pub node_type: NodeType,
    /// Display label shown in the editor
    pub label: String,
    pub definition_const: String,
    pub definition_file: String,
    pub editor_const: String,
    pub editor_file: String,
}

impl NamingSpec {
    /// Build names for a description, honouring optional type and label overrides
    pub fn build(
        description: &str,
        explicit_type: Option<&str>,
        explicit_label: Option<&str>,
    ) -> NamingResult<Self> {
        let node_type = NodeType::resolve(description, explicit_type)?;
        Ok(Self::for_node_type(description, node_type, explicit_label))
    }

    /// Build names for an already-canonical node type
    pub fn for_node_type(
        description: &str,
        node_type: NodeType,
        explicit_label: Option<&str>,
    ) -> Self {
        let label = match explicit_label.map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => node_type.title_label(),
        };

        let pascal = node_type.pascal_case();
        let camel = node_type.camel_case();

        Self {
            description: description.to_string(),
            label,
            definition_const: format!("{}Definition", camel),
            definition_file: format!("{}Definition.ts", camel),
            editor_const: format!("render{}Editor", pascal),
            editor_file: format!("{}Editor.tsx", camel),
            node_type,
        }
    }

    /// Import specifier of the definition module, without extension
    pub fn definition_module(&self) -> &str {
        self.definition_file
            .strip_suffix(".ts")
            .unwrap_or(&self.definition_file)
    }

    /// Import specifier of the editor module, without extension
    pub fn editor_module(&self) -> &str {
        self.editor_file
            .strip_suffix(".tsx")
            .unwrap_or(&self.editor_file)
    }
}
