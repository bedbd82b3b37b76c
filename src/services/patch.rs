//! Line-anchored text patches for hand-authored source documents.
//!
//! Patches locate their insertion point through narrow textual landmarks
//! (a regex-matched line, a pair of literal markers, a declaration header)
//! instead of parsing the document, so everything outside the inserted line
//! is preserved byte for byte. Every patch is idempotent: applying it to a
//! document that already holds its entry returns the document unchanged.

use crate::error::{PatchError, PatchResult};
use regex::Regex;

/// Separator terminating each entry of a delimited block
pub const LIST_SEPARATOR: char = ',';

/// A single idempotent edit to a document's text.
///
/// The orchestrator only talks to this trait, so a parser-backed
/// implementation can replace the textual anchors without touching it.
pub trait DocumentPatch {
    /// Return the patched text, or the input unchanged if the entry is already present
    fn apply(&self, text: &str) -> PatchResult<String>;

    /// Whether the entry this patch adds is already present in `text`
    fn is_applied(&self, text: &str) -> bool;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Apply patches in order, threading the text through each
pub fn apply_all(text: &str, patches: &[Box<dyn DocumentPatch>]) -> PatchResult<String> {
    let mut current = text.to_string();
    for patch in patches {
        current = patch.apply(&current)?;
    }
    Ok(current)
}

/// Insert a line after the last line matching a pattern
#[derive(Debug, Clone)]
pub struct InsertAfterLastMatch {
    pattern: String,
    anchor: Regex,
    line: String,
}

impl InsertAfterLastMatch {
    /// `pattern` must match a whole line; it is anchored at both ends
    pub fn new(pattern: &str, line: impl Into<String>) -> PatchResult<Self> {
        let anchor = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            PatchError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            anchor,
            line: line.into(),
        })
    }
}

impl DocumentPatch for InsertAfterLastMatch {
    fn apply(&self, text: &str) -> PatchResult<String> {
        insert_after_last_match(text, &self.anchor, &self.line)
            .map_err(|_| PatchError::MissingAnchor(self.pattern.clone()))
    }

    fn is_applied(&self, text: &str) -> bool {
        text.contains(&self.line)
    }

    fn describe(&self) -> String {
        format!("insert {:?} after last line matching {}", self.line, self.pattern)
    }
}

/// Insert an entry before the end marker of a delimited block
#[derive(Debug, Clone)]
pub struct InsertInBlock {
    start_marker: String,
    end_marker: String,
    entry: String,
}

impl InsertInBlock {
    pub fn new(
        start_marker: impl Into<String>,
        end_marker: impl Into<String>,
        entry: impl Into<String>,
    ) -> Self {
        Self {
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
            entry: entry.into(),
        }
    }
}

impl DocumentPatch for InsertInBlock {
    fn apply(&self, text: &str) -> PatchResult<String> {
        insert_in_block(text, &self.start_marker, &self.end_marker, &self.entry)
    }

    fn is_applied(&self, text: &str) -> bool {
        match locate_block(text, &self.start_marker, &self.end_marker) {
            Ok((start, end)) => block_contains(&text[start..end], &self.entry),
            Err(_) => false,
        }
    }

    fn describe(&self) -> String {
        format!(
            "insert {:?} into block {:?}",
            self.entry.trim(),
            self.start_marker.trim()
        )
    }
}

/// Append a quoted literal alternative to a multi-line union declaration
#[derive(Debug, Clone)]
pub struct AppendUnionAlternative {
    header: String,
    literal: String,
}

impl AppendUnionAlternative {
    /// `literal` is the alternative exactly as it appears in source, quotes included
    pub fn new(header: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            literal: literal.into(),
        }
    }
}

impl DocumentPatch for AppendUnionAlternative {
    fn apply(&self, text: &str) -> PatchResult<String> {
        append_union_alternative(text, &self.header, &self.literal)
    }

    fn is_applied(&self, text: &str) -> bool {
        text.contains(&self.literal)
    }

    fn describe(&self) -> String {
        format!("append {} to union {:?}", self.literal, self.header)
    }
}

/// Insert `new_line` immediately after the last line fully matched by `anchor`.
///
/// Lines are rejoined with `\n` and the result always ends with a newline.
pub fn insert_after_last_match(text: &str, anchor: &Regex, new_line: &str) -> PatchResult<String> {
    if text.contains(new_line) {
        return Ok(text.to_string());
    }

    let mut lines: Vec<&str> = text.lines().collect();
    let last_match = lines
        .iter()
        .rposition(|line| anchor.is_match(line))
        .ok_or_else(|| PatchError::MissingAnchor(anchor.as_str().to_string()))?;

    tracing::debug!(line = last_match + 1, "insertion anchor found");
    lines.insert(last_match + 1, new_line);

    let mut patched = lines.join("\n");
    patched.push('\n');
    Ok(patched)
}

/// Insert `entry` at the end of the block between `start_marker` and the next `end_marker`.
///
/// The last non-empty line of the block gains a trailing separator if it lacks one.
pub fn insert_in_block(
    text: &str,
    start_marker: &str,
    end_marker: &str,
    entry: &str,
) -> PatchResult<String> {
    let (start, end) = locate_block(text, start_marker, end_marker)?;
    let body = &text[start..end];

    if block_contains(body, entry) {
        return Ok(text.to_string());
    }

    let mut body = terminate_last_entry(body);
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    body.push_str(entry);

    let mut patched = String::with_capacity(text.len() + entry.len() + 2);
    patched.push_str(&text[..start]);
    patched.push_str(&body);
    patched.push_str(&text[end..]);
    Ok(patched)
}

/// Append `literal` as a new final alternative of the union starting at `header`.
///
/// The union ends on the first line after the header ending in `";`; that
/// line loses its `;` and the new alternative takes over the terminator.
pub fn append_union_alternative(text: &str, header: &str, literal: &str) -> PatchResult<String> {
    if text.contains(literal) {
        return Ok(text.to_string());
    }

    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    let start = lines
        .iter()
        .position(|line| line.starts_with(header))
        .ok_or_else(|| PatchError::MissingAnchor(header.to_string()))?;

    let end = lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| line.trim_end().ends_with("\";"))
        .map(|(index, _)| index)
        .ok_or_else(|| PatchError::MissingTerminator(header.to_string()))?;

    let closing = lines[end].trim_end();
    let reopened = closing[..closing.len() - 1].to_string();
    lines[end] = reopened;
    lines.insert(end + 1, format!("  | {};", literal));

    let mut patched = lines.join("\n");
    patched.push('\n');
    Ok(patched)
}

/// Byte range of the body between `start_marker` and the following `end_marker`
fn locate_block(text: &str, start_marker: &str, end_marker: &str) -> PatchResult<(usize, usize)> {
    let start = text
        .find(start_marker)
        .map(|index| index + start_marker.len())
        .ok_or_else(|| PatchError::MissingMarker(start_marker.to_string()))?;

    let end = text[start..]
        .find(end_marker)
        .map(|offset| start + offset)
        .ok_or_else(|| PatchError::MissingMarker(end_marker.to_string()))?;

    Ok((start, end))
}

fn block_contains(body: &str, entry: &str) -> bool {
    let wanted = entry.trim();
    body.lines().any(|line| line.trim() == wanted)
}

/// Give the last non-empty line a trailing separator, keeping its line ending
fn terminate_last_entry(body: &str) -> String {
    let mut lines: Vec<&str> = body.split_inclusive('\n').collect();
    let Some(index) = lines.iter().rposition(|line| !line.trim().is_empty()) else {
        return body.to_string();
    };

    let line = lines[index];
    if line.trim().ends_with(LIST_SEPARATOR) {
        return body.to_string();
    }

    let content = line.trim_end_matches(['\r', '\n']);
    let ending = &line[content.len()..];
    let terminated = format!("{}{}{}", content, LIST_SEPARATOR, ending);
    lines[index] = &terminated;
    lines.concat()
}
