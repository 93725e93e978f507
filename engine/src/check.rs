//! Check orchestration: tool invocation, classification, and publication.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::classify::classify;
use crate::config::CheckerConfig;
use crate::debounce::Debouncer;
use crate::fix::{FixAction, build_fix_action};
use crate::parser::parse_replacements;
use crate::store::ReplacementStore;
use crate::text::LineIndex;
use crate::tool::{FormatTool, ToolError};
use crate::types::{FixCandidate, FormatDiagnostic};

const DUE_CHANNEL_CAPACITY: usize = 16;

/// Context object owning the whole check pipeline for one host session.
///
/// Everything the design keeps out of ambient global scope lives here: the
/// per-document candidate store, the single debounce timer, and the tool
/// handle. All operations run on the host's event loop; the tool invocation
/// is the only suspension point.
pub struct CheckEngine {
    tool: FormatTool,
    store: ReplacementStore,
    debouncer: Debouncer,
    debounce_delay: Duration,
    due_tx: mpsc::Sender<PathBuf>,
    due_rx: mpsc::Receiver<PathBuf>,
}

impl CheckEngine {
    #[must_use]
    pub fn new(config: &CheckerConfig) -> Self {
        let (due_tx, due_rx) = mpsc::channel(DUE_CHANNEL_CAPACITY);
        Self {
            tool: FormatTool::new(config.executable.clone()),
            store: ReplacementStore::new(),
            debouncer: Debouncer::new(),
            debounce_delay: config.debounce_delay(),
            due_tx,
            due_rx,
        }
    }

    /// Run an immediate check of `text` as the current content of `path`.
    ///
    /// On success the store entry is overwritten with this cycle's
    /// candidates and the derived diagnostics are returned. On tool failure
    /// the previous entry stays visible and the error is surfaced to the
    /// caller.
    pub async fn check_document(
        &mut self,
        path: &Path,
        text: &str,
    ) -> Result<Vec<FormatDiagnostic>, ToolError> {
        let output = match self.tool.run(path, text).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "format check failed");
                return Err(e);
            }
        };

        let candidates = derive_candidates(text, &output);
        tracing::debug!(
            path = %path.display(),
            count = candidates.len(),
            "check complete"
        );

        let diagnostics = candidates
            .iter()
            .map(|candidate| candidate.diagnostic().clone())
            .collect();
        self.store.publish(path.to_path_buf(), candidates);
        Ok(diagnostics)
    }

    /// Request a debounced check of `path`.
    ///
    /// One global timer: a burst of requests collapses to a single due
    /// check for whichever document was requested last, regardless of
    /// document.
    pub fn schedule_check(&mut self, path: &Path) {
        let tx = self.due_tx.clone();
        let path = path.to_path_buf();
        self.debouncer.schedule(self.debounce_delay, async move {
            if tx.send(path).await.is_err() {
                tracing::debug!("due-check receiver dropped");
            }
        });
    }

    /// Next document whose debounce delay has elapsed, if any. Non-blocking.
    pub fn next_due(&mut self) -> Option<PathBuf> {
        self.due_rx.try_recv().ok()
    }

    /// The document was closed: forget its candidates.
    pub fn document_closed(&mut self, path: &Path) {
        self.store.clear(path);
    }

    /// Empty the side-table for every document and drop any pending check.
    pub fn clear_all(&mut self) {
        self.debouncer.cancel();
        self.store.clear_all();
    }

    /// Candidates from the most recently completed check of `path`.
    #[must_use]
    pub fn candidates(&self, path: &Path) -> Option<&[FixCandidate]> {
        self.store.get(path)
    }

    /// Build the quick-fix action for `selected` diagnostics of `path`.
    ///
    /// `None` when the store has no entry for the document — a stale
    /// reference degrades to a no-op rather than applying wrong-offset text.
    #[must_use]
    pub fn fix_action(&self, path: &Path, selected: &[usize]) -> Option<FixAction> {
        build_fix_action(self.store.get(path)?, selected)
    }
}

/// Turn one check cycle's tool output into paired candidates.
fn derive_candidates(text: &str, output: &str) -> Vec<FixCandidate> {
    let index = LineIndex::new(text);
    parse_replacements(output)
        .into_iter()
        .map(|replacement| {
            let start = replacement.offset().min(text.len());
            let end = replacement.end().min(text.len());
            let replaced = text.get(start..end).unwrap_or_default();
            let message = classify(replacement.text(), replacement.length(), replaced);
            let diagnostic = FormatDiagnostic::new(index.range(start, end), message.to_string());
            FixCandidate::new(diagnostic, replacement)
        })
        .collect()
}
