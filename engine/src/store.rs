//! Per-document side-table of pending fix candidates.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::FixCandidate;

/// Owns every document's current candidate list.
///
/// One entry per document, overwritten wholesale on each successful check —
/// entries are never merged. The engine context object is the sole owner; no
/// other component keeps a copy across calls.
#[derive(Debug, Default)]
pub struct ReplacementStore {
    data: HashMap<PathBuf, Vec<FixCandidate>>,
}

impl ReplacementStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the document's entry with a fresh check cycle's candidates.
    /// A clean cycle (no candidates) removes the entry.
    pub fn publish(&mut self, path: PathBuf, candidates: Vec<FixCandidate>) {
        if candidates.is_empty() {
            self.data.remove(&path);
        } else {
            self.data.insert(path, candidates);
        }
    }

    /// Candidates from the most recently completed check, if any.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&[FixCandidate]> {
        self.data.get(path).map(Vec::as_slice)
    }

    /// Drop the document's entry (document closed).
    pub fn clear(&mut self, path: &Path) {
        self.data.remove(path);
    }

    /// Drop every document's entry (user "clear" command).
    pub fn clear_all(&mut self) {
        self.data.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{Position, Range};
    use crate::types::{FormatDiagnostic, Replacement};

    fn candidate(offset: usize, message: &str) -> FixCandidate {
        let range = Range {
            start: Position { line: 0, col: 0 },
            end: Position { line: 0, col: 1 },
        };
        FixCandidate::new(
            FormatDiagnostic::new(range, message.to_string()),
            Replacement::new(offset, 1, " ".to_string()),
        )
    }

    #[test]
    fn publish_then_get_round_trips() {
        let mut store = ReplacementStore::new();
        let path = PathBuf::from("a.cpp");
        let candidates = vec![candidate(3, "Remove spacing."), candidate(9, "Add space.")];
        store.publish(path.clone(), candidates.clone());
        assert_eq!(store.get(&path), Some(candidates.as_slice()));
    }

    #[test]
    fn publish_overwrites_previous_entry() {
        let mut store = ReplacementStore::new();
        let path = PathBuf::from("a.cpp");
        store.publish(path.clone(), vec![candidate(1, "Add space.")]);
        store.publish(path.clone(), vec![candidate(7, "Remove spacing.")]);

        let current = store.get(&path).unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].replacement().offset(), 7);
    }

    #[test]
    fn clean_publish_removes_entry() {
        let mut store = ReplacementStore::new();
        let path = PathBuf::from("a.cpp");
        store.publish(path.clone(), vec![candidate(1, "Add space.")]);
        store.publish(path.clone(), vec![]);
        assert!(store.get(&path).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn clear_drops_only_that_document() {
        let mut store = ReplacementStore::new();
        store.publish(PathBuf::from("a.cpp"), vec![candidate(1, "Add space.")]);
        store.publish(PathBuf::from("b.cpp"), vec![candidate(2, "Add space.")]);

        store.clear(Path::new("a.cpp"));
        assert!(store.get(Path::new("a.cpp")).is_none());
        assert!(store.get(Path::new("b.cpp")).is_some());
    }

    #[test]
    fn clear_all_empties_every_document() {
        let mut store = ReplacementStore::new();
        store.publish(PathBuf::from("a.cpp"), vec![candidate(1, "Add space.")]);
        store.publish(PathBuf::from("b.cpp"), vec![candidate(2, "Add space.")]);

        store.clear_all();
        assert!(store.is_empty());
    }
}
