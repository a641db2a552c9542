//! Build command implementation.
//!
//! Loads the config, builds every theme and, with `--watch`, rebuilds
//! whenever the config file changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::Args;
use notify::{EventKind, RecursiveMode, Watcher};

use crate::config::{load_config, resolve_config};
use crate::error::{Result, TokenError};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{build_tokens, BuildOptions};

/// Events closer together than this trigger one rebuild.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Build CSS, SCSS and TypeScript tokens for every theme
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the config file (default: search the current directory)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Rebuild when the config file changes
    #[arg(long, short)]
    pub watch: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = build_once(args.config.as_deref(), &cwd, printer)?;

    if args.watch {
        watch(&config_path, &cwd, printer)?;
    }

    Ok(())
}

/// Load, resolve and build; returns the config path that was used.
fn build_once(config: Option<&Path>, cwd: &Path, printer: &Printer) -> Result<PathBuf> {
    let (path, user) = load_config(config, cwd)?;
    printer.info("Loaded", &display_path(&path));

    let resolved = resolve_config(user)?;
    printer.status("Building", &plural(resolved.themes.len(), "theme", "themes"));

    let result = build_tokens(&resolved, &BuildOptions::in_dir(cwd));
    for warning in &result.warnings {
        printer.warning("Warning", warning);
    }

    if !result.success {
        return Err(TokenError::Build {
            message: result.errors.join("; "),
            help: None,
        });
    }

    for file in &result.generated_files {
        printer.status("Generated", &printer.path(file));
    }
    printer.status("Finished", &plural(result.generated_files.len(), "file", "files"));

    Ok(path)
}

fn watch(config_path: &Path, cwd: &Path, printer: &Printer) -> Result<()> {
    let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(|e| TokenError::Watch {
        message: format!("Failed to start watcher: {}", e),
    })?;

    // Editors often replace the file, so watch its directory.
    let dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .map_err(|e| TokenError::Watch {
            message: format!("Failed to watch {}: {}", dir.display(), e),
        })?;

    printer.info(
        "Watching",
        &format!("{} (press Ctrl+C to stop)", display_path(config_path)),
    );

    let file_name = config_path.file_name();
    let mut last_build = Instant::now();

    for event in rx {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                printer.warning("Watch", &e.to_string());
                continue;
            }
        };

        if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
            continue;
        }
        if !event.paths.iter().any(|p| p.file_name() == file_name) {
            continue;
        }
        if last_build.elapsed() < DEBOUNCE {
            continue;
        }
        last_build = Instant::now();

        printer.info("Changed", &display_path(config_path));
        if let Err(e) = build_once(Some(config_path), cwd, printer) {
            printer.error("Failed", &e.to_string());
        }
    }

    Ok(())
}
