//! Invocation of the external formatter process.
//!
//! One spawn-and-wait call per check cycle: the full document text goes to
//! stdin, the replacements-XML stream comes back on stdout. A nonzero exit
//! surfaces the tool's stderr verbatim; no retries.

use std::path::Path;
use std::process::Stdio;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Fixed flag set: style comes from the project's `.clang-format` file and
/// the output is the replacements-XML stream rather than formatted text.
const TOOL_ARGS: [&str; 3] = [
    "--style=file",
    "--fallback-style=none",
    "--output-replacements-xml",
];

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("formatter '{command}' not found: {source}")]
    NotFound {
        command: String,
        #[source]
        source: which::Error,
    },
    #[error("failed to run formatter '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("formatter '{command}' exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Handle to the configured formatter executable.
#[derive(Debug, Clone)]
pub struct FormatTool {
    executable: String,
}

impl FormatTool {
    #[must_use]
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    fn io_error(&self, source: std::io::Error) -> ToolError {
        ToolError::Io {
            command: self.executable.clone(),
            source,
        }
    }

    /// Run the formatter over `text` as the content of `document`, returning
    /// its stdout.
    ///
    /// The working directory is the document's parent so the tool can find
    /// the project's `.clang-format`.
    pub async fn run(&self, document: &Path, text: &str) -> Result<String, ToolError> {
        let resolved = which::which(&self.executable).map_err(|source| ToolError::NotFound {
            command: self.executable.clone(),
            source,
        })?;

        let mut cmd = Command::new(&resolved);
        cmd.args(TOOL_ARGS)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = document.parent().filter(|d| !d.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }

        tracing::debug!(
            command = %self.executable,
            document = %document.display(),
            "invoking formatter"
        );

        let mut child = cmd.spawn().map_err(|source| self.io_error(source))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.io_error(std::io::Error::other("child stdin not captured")))?;
        // The tool reads all of stdin before writing output, so a plain
        // write-then-wait cannot deadlock.
        stdin
            .write_all(text.as_bytes())
            .await
            .map_err(|source| self.io_error(source))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| self.io_error(source))?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                command: self.executable.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
