//! Quick-fix construction and drift-free batch application.

use crate::types::{FixCandidate, TextEdit};

/// Label used when more than one diagnostic is selected.
const BATCH_TITLE: &str = "Reformat selected.";

/// A user-invokable action: one atomic set of edits, all expressed in the
/// original, unedited document's coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixAction {
    title: String,
    edits: Vec<TextEdit>,
}

impl FixAction {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }
}

/// Build the action for the selected candidate indices.
///
/// Indices that no longer exist are skipped (stale selection); a selection
/// with no surviving candidates yields no action. A single surviving
/// selection titles the action with its own message, a larger one gets the
/// generic batch label.
#[must_use]
pub fn build_fix_action(candidates: &[FixCandidate], selected: &[usize]) -> Option<FixAction> {
    let picked: Vec<&FixCandidate> = selected
        .iter()
        .filter_map(|&index| candidates.get(index))
        .collect();
    if picked.is_empty() {
        return None;
    }

    let title = if picked.len() == 1 {
        picked[0].diagnostic().message().to_string()
    } else {
        BATCH_TITLE.to_string()
    };
    let edits = picked
        .iter()
        .map(|candidate| {
            let replacement = candidate.replacement();
            TextEdit {
                offset: replacement.offset(),
                length: replacement.length(),
                new_text: replacement.text().to_string(),
            }
        })
        .collect();

    Some(FixAction { title, edits })
}

/// Apply a batch of edits expressed in the original document's offsets.
///
/// Edits are applied in descending offset order so an earlier edit can never
/// shift the span of a later one. Non-overlap is the producer's contract;
/// the formatter never emits overlapping replacements.
#[must_use]
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by_key(|edit| edit.offset);

    let mut result = text.to_string();
    for edit in ordered.iter().rev() {
        let start = edit.offset.min(result.len());
        let end = (edit.offset + edit.length).min(result.len());
        if !result.is_char_boundary(start) || !result.is_char_boundary(end) {
            tracing::warn!(offset = edit.offset, length = edit.length, "edit splits a character, skipping");
            continue;
        }
        result.replace_range(start..end, &edit.new_text);
    }
    result
}
