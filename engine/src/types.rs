//! Core data model: replacements, diagnostics, and the records pairing them.
//!
//! A [`Replacement`] is what the formatter asks for; a [`FormatDiagnostic`]
//! is what the user sees. The two are stored together as a [`FixCandidate`]
//! so a fix selection can never pair a diagnostic with a replacement from a
//! different check cycle.

use std::path::Path;

use crate::text::Range;

/// Source tag attached to every diagnostic this engine produces.
pub const DIAGNOSTIC_SOURCE: &str = "fmtcheck";

/// A single edit instruction from the formatter: delete `length` bytes
/// starting at `offset` in the original document, insert `text` instead.
///
/// Immutable once created; a whole new list supersedes it on the next check
/// cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    offset: usize,
    length: usize,
    text: String,
}

impl Replacement {
    #[must_use]
    pub fn new(offset: usize, length: usize, text: String) -> Self {
        Self {
            offset,
            length,
            text,
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// End of the replaced span in the original document.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Whether this replacement inserts text without deleting anything.
    #[must_use]
    pub fn is_insertion(&self) -> bool {
        self.length == 0
    }
}

/// Severity of a formatting diagnostic.
///
/// The checker only ever reports style deviations, never correctness
/// problems, so everything it emits is a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
}

impl Severity {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Warning => "warning",
        }
    }
}

/// A user-visible marker over a text range, carrying the classified reason
/// for one replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDiagnostic {
    range: Range,
    message: String,
    severity: Severity,
}

impl FormatDiagnostic {
    #[must_use]
    pub fn new(range: Range, message: String) -> Self {
        Self {
            range,
            message,
            severity: Severity::Warning,
        }
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Format as `path:line:col: severity: [source] message` (1-indexed for
    /// display).
    #[must_use]
    pub fn display_with_path(&self, path: &Path) -> String {
        format!(
            "{}:{}:{}: {}: [{}] {}",
            path.display(),
            self.range.start.line + 1,
            self.range.start.col + 1,
            self.severity.label(),
            DIAGNOSTIC_SOURCE,
            self.message,
        )
    }
}

/// A diagnostic paired with the replacement that resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixCandidate {
    diagnostic: FormatDiagnostic,
    replacement: Replacement,
}

impl FixCandidate {
    #[must_use]
    pub fn new(diagnostic: FormatDiagnostic, replacement: Replacement) -> Self {
        Self {
            diagnostic,
            replacement,
        }
    }

    #[must_use]
    pub fn diagnostic(&self) -> &FormatDiagnostic {
        &self.diagnostic
    }

    #[must_use]
    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }
}

/// A concrete edit over the original document, in byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub offset: usize,
    pub length: usize,
    pub new_text: String,
}
