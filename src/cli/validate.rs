//! Validate command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::config::{load_config, resolve_config, ResolvedConfig};
use crate::error::{Result, TokenError};
use crate::output::{display_path, plural, Printer};
use crate::tokens::resolve_theme_inheritance;
use crate::validation::{print_diagnostics, validate_config, Severity};

/// Check a config file without building
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the config file (default: search the current directory)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let (path, user) = load_config(args.config.as_deref(), &cwd)?;
    printer.info("Loaded", &display_path(&path));

    let config = resolve_config(user)?;
    print_summary(&config, printer);

    let diagnostics = validate_config(&config);
    print_diagnostics(&diagnostics, printer);

    let errors = diagnostics.count(Severity::Error);
    if errors > 0 {
        return Err(TokenError::Config {
            message: format!(
                "{} found in {}",
                plural(errors, "error", "errors"),
                display_path(&path)
            ),
            help: None,
        });
    }

    Ok(())
}

fn print_summary(config: &ResolvedConfig, printer: &Printer) {
    // Merged counts when inheritance resolves, declared counts otherwise.
    let merged = resolve_theme_inheritance(&config.themes).ok();

    for (i, theme) in config.themes.iter().enumerate() {
        let count = merged
            .as_ref()
            .map_or(theme.colors.len(), |themes| themes[i].colors.len());
        let parent = theme
            .extends
            .as_deref()
            .map(|p| format!(", extends {}", p))
            .unwrap_or_default();
        printer.info(
            "Theme",
            &format!("{} ({}{})", theme.name, plural(count, "color", "colors"), parent),
        );
    }

    let formats: Vec<String> = config.output.formats.iter().map(|f| f.to_string()).collect();
    printer.info("Output", &display_path(&config.output.directory));
    printer.info("Formats", &formats.join(", "));
    printer.info("Prefix", &config.output.prefix);
}
