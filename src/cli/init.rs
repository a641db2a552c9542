//! Init command implementation.
//!
//! Writes a starter `design-tokens.config.yaml`.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{config_template, find_config_file, CONFIG_FILE_NAMES};
use crate::error::{Result, TokenError};
use crate::output::{display_path, Printer};

/// Write a starter design-tokens.config.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create the config in (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    if let Some(existing) = find_config_file(&args.path) {
        if !args.force {
            return Err(TokenError::Build {
                message: format!("{} already exists", display_path(&existing)),
                help: Some("Use --force to overwrite".to_string()),
            });
        }
    }

    fs::create_dir_all(&args.path).map_err(|e| TokenError::Io {
        path: args.path.clone(),
        message: format!("Failed to create directory: {}", e),
    })?;

    let config_path = args.path.join(CONFIG_FILE_NAMES[0]);
    fs::write(&config_path, config_template()).map_err(|e| TokenError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.status("Created", &display_path(&config_path));
    printer.info("Next", "run `design-tokens build`");

    Ok(())
}
