//! Formatting-deviation check engine.
//!
//! Feeds a document to an external clang-format-compatible formatter, turns
//! the replacements-XML stream it emits into classified diagnostics, keeps a
//! per-document table of pending fixes, and builds atomic batch edits that
//! resolve a selected subset of them.
//!
//! The pipeline, per check cycle:
//!
//! ```text
//! document text -> [formatter] -> replacement stream -> parser
//!               -> classifier -> paired (diagnostic, replacement) records
//!               -> store (keyed by document) -> fix actions on demand
//! ```
//!
//! [`CheckEngine`] is the single entry point for hosts; the individual
//! stages are public for direct use and testing.

pub mod classify;
pub mod config;
pub mod debounce;
pub mod fix;
pub mod parser;
pub mod store;
pub mod text;
pub mod tool;
pub mod types;

mod check;

pub use check::CheckEngine;
pub use config::{CheckerConfig, ConfigError};
pub use fix::{FixAction, apply_edits, build_fix_action};
pub use store::ReplacementStore;
pub use tool::{FormatTool, ToolError};
pub use types::{FixCandidate, FormatDiagnostic, Replacement, Severity, TextEdit};
