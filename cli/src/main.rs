//! fmtcheck CLI — thin shell over the check engine.
//!
//! `check` runs the formatter once over each file and prints classified
//! diagnostics (or applies every suggested fix with `--fix`); `watch`
//! re-checks one file after each modification, debounced the same way an
//! editor integration debounces text-change events.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notify::{Event, EventKind, RecursiveMode, Watcher as _};
use tracing_subscriber::EnvFilter;

use fmtcheck_engine::{CheckEngine, CheckerConfig, apply_edits};

/// How often the watch loop drains due checks between filesystem events.
const WATCH_TICK: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(
    name = "fmtcheck",
    version,
    about = "Surface clang-format deviations as diagnostics with one-shot fixes"
)]
struct Cli {
    /// Formatter executable (overrides the config file).
    #[arg(long, global = true, value_name = "BIN")]
    executable: Option<String>,

    /// Path to a fmtcheck.toml config file.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CommandKind,
}

#[derive(Subcommand)]
enum CommandKind {
    /// Check files once and print diagnostics.
    Check {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Apply every suggested fix in place instead of printing.
        #[arg(long)]
        fix: bool,
    },
    /// Watch one file and re-check after each change, debounced.
    Watch {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<CheckerConfig> {
    let mut config = match &cli.config {
        Some(path) => CheckerConfig::load(path)?,
        None => CheckerConfig::default(),
    };
    if let Some(executable) = &cli.executable {
        config.executable.clone_from(executable);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;
    let mut engine = CheckEngine::new(&config);
    match cli.command {
        CommandKind::Check { files, fix } => run_check(&mut engine, &files, fix).await,
        CommandKind::Watch { file } => run_watch(&mut engine, &file).await,
    }
}

async fn run_check(engine: &mut CheckEngine, files: &[PathBuf], fix: bool) -> Result<ExitCode> {
    let mut remaining = 0usize;
    for file in files {
        let text = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("reading {}", file.display()))?;
        let diagnostics = engine.check_document(file, &text).await?;

        if fix {
            remaining += apply_all_fixes(engine, file, &text).await?;
        } else {
            for diagnostic in &diagnostics {
                println!("{}", diagnostic.display_with_path(file));
            }
            remaining += diagnostics.len();
        }
    }
    Ok(if remaining == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Apply every pending fix for `file` in place. Returns the count of
/// diagnostics left unresolved (zero unless the fix degraded to a no-op).
async fn apply_all_fixes(engine: &mut CheckEngine, file: &Path, text: &str) -> Result<usize> {
    let candidate_count = engine.candidates(file).map_or(0, <[_]>::len);
    if candidate_count == 0 {
        return Ok(0);
    }
    let selection: Vec<usize> = (0..candidate_count).collect();
    let Some(action) = engine.fix_action(file, &selection) else {
        return Ok(candidate_count);
    };

    let fixed = apply_edits(text, action.edits());
    tokio::fs::write(file, &fixed)
        .await
        .with_context(|| format!("writing {}", file.display()))?;
    println!("{}: applied {} fix(es)", file.display(), action.edits().len());

    // The edit supersedes the snapshot the candidates were built from.
    engine.document_closed(file);
    Ok(0)
}

async fn run_watch(engine: &mut CheckEngine, file: &Path) -> Result<ExitCode> {
    let file = std::fs::canonicalize(file)
        .with_context(|| format!("resolving {}", file.display()))?;

    let (fs_tx, mut fs_rx) = tokio::sync::mpsc::channel::<PathBuf>(32);
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        if let Ok(event) = res {
            if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                for path in event.paths {
                    let _ = fs_tx.blocking_send(path);
                }
            }
        }
    })
    .context("creating file watcher")?;
    watcher
        .watch(&file, RecursiveMode::NonRecursive)
        .with_context(|| format!("watching {}", file.display()))?;

    eprintln!("Watching {} (Ctrl+C to stop)...", file.display());
    // Initial check goes through the same debounced path as later edits.
    engine.schedule_check(&file);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = fs_rx.recv() => {
                match event {
                    Some(path) if path == file => engine.schedule_check(&file),
                    Some(_) => {}
                    None => break,
                }
            }
            () = tokio::time::sleep(WATCH_TICK) => {}
        }

        while let Some(due) = engine.next_due() {
            check_and_report(engine, &due).await;
        }
    }

    engine.clear_all();
    Ok(ExitCode::SUCCESS)
}

async fn check_and_report(engine: &mut CheckEngine, path: &Path) {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read document");
            return;
        }
    };
    match engine.check_document(path, &text).await {
        Ok(diagnostics) if diagnostics.is_empty() => {
            println!("{}: clean", path.display());
        }
        Ok(diagnostics) => {
            for diagnostic in &diagnostics {
                println!("{}", diagnostic.display_with_path(path));
            }
        }
        Err(e) => {
            // Previous diagnostics stay valid; just surface the failure.
            eprintln!("{e}");
        }
    }
}
