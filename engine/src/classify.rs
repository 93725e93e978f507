//! Heuristic classification of a replacement into a human-readable reason.
//!
//! The formatter reports raw text substitutions with no reason code. The
//! shape of the edit (pure insertion vs. pure deletion, whitespace-only vs.
//! structural token) is the only information available, so the message is
//! reconstructed from it. Rules are evaluated in a fixed priority order and
//! ties are broken by that order, not by any scoring.

const REMOVE_NEWLINES: &str = "Remove unnecessary new-line(s).";
const REMOVE_SPACING: &str = "Remove spacing.";
const ADD_SPACE: &str = "Add space.";
const ADD_NEWLINE: &str = "Add new line.";
const REMOVE_TRAILING: &str = "Remove trailing space(s).";
const REORGANIZE_INCLUDES: &str = "Reorganize #include-s.";
const MISSING_SPACING: &str = "Missing spacing.";
const REFORMAT: &str = "Re-format needed.";

fn starts_with_newline(s: &str) -> bool {
    s.starts_with('\n') || s.starts_with("\r\n")
}

/// Derive the message for a replacement.
///
/// `replacement` is the text being inserted, `length` the byte count of the
/// original span, and `replaced` the literal original text of that span.
/// Pure function: the same inputs always yield the same message.
///
/// When the replacement starts with a newline, the shared prefix between the
/// two sides is stripped and the rules re-evaluated once — a kept newline
/// whose trailing content differs, or a newline inserted ahead of existing
/// content. The `reduced` flag bounds this to a single extra pass.
#[must_use]
pub fn classify(replacement: &str, length: usize, replaced: &str) -> &'static str {
    let mut text = replacement;
    let mut len = length;
    let mut original = replaced;
    let mut reduced = false;

    loop {
        if text.is_empty() {
            return if starts_with_newline(original) {
                REMOVE_NEWLINES
            } else {
                REMOVE_SPACING
            };
        }

        if text == " " {
            return if len == 0 {
                ADD_SPACE
            } else if starts_with_newline(original) {
                REMOVE_NEWLINES
            } else {
                REMOVE_SPACING
            };
        }

        if starts_with_newline(text) {
            if len == 0 {
                return ADD_NEWLINE;
            }
            if original.starts_with(' ') {
                return REMOVE_TRAILING;
            }
            // Newline kept, only trailing content after it differs.
            if !reduced && text.starts_with(original) {
                text = &text[original.len()..];
                len = 0;
                original = "";
                reduced = true;
                continue;
            }
            // Newline inserted ahead of existing content.
            if !reduced && original.starts_with(text) {
                len = len.saturating_sub(original.len());
                original = &original[text.len()..];
                text = "";
                reduced = true;
                continue;
            }
        } else if text.starts_with("#include") {
            return REORGANIZE_INCLUDES;
        }

        if text.trim().is_empty() {
            if text.len() > len {
                return MISSING_SPACING;
            }
            if starts_with_newline(original) {
                return REMOVE_NEWLINES;
            }
        }

        return REFORMAT;
    }
}
