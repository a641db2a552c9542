//! Theme build orchestration.
//!
//! [`build_tokens`] flattens theme inheritance, writes the token tree to a
//! scratch directory, then runs one engine build per theme over the shared
//! tokens plus that theme's colours. The scratch directory is removed on
//! every exit path.

pub mod hooks;
mod platforms;

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::{OutputFormat, ResolvedConfig};
use crate::engine::BuildContext;
use crate::error::Result;
use crate::tokens::{materialize, resolve_theme_inheritance};

pub use hooks::token_hooks;
pub use platforms::{file_name, platforms_for_theme};

/// Where a build keeps its scratch files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Directory the scratch tree is created in.
    pub scratch_root: PathBuf,
}

impl BuildOptions {
    pub fn in_dir(scratch_root: impl Into<PathBuf>) -> Self {
        Self {
            scratch_root: scratch_root.into(),
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            scratch_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

/// Outcome of [`build_tokens`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    pub success: bool,
    /// `{directory}/{theme}.{ext}` per theme and emitted format.
    pub generated_files: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl BuildResult {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            errors: vec![error.into()],
            ..Default::default()
        }
    }
}

/// Build every theme in `config`.
///
/// Stops at the first failing theme. Files generated before the failure stay
/// listed in `generated_files`.
pub fn build_tokens(config: &ResolvedConfig, options: &BuildOptions) -> BuildResult {
    if config.themes.is_empty() {
        return BuildResult::failed("At least one theme must be defined");
    }

    let mut result = BuildResult::default();
    match run(config, options, &mut result) {
        Ok(()) => result.success = true,
        Err(e) => {
            tracing::debug!(error = %e, "build failed");
            result.success = false;
            result.errors.push(e.to_string());
        }
    }
    result
}

fn run(config: &ResolvedConfig, options: &BuildOptions, result: &mut BuildResult) -> Result<()> {
    let themes = resolve_theme_inheritance(&config.themes)?;
    let scratch = materialize(config, &themes, &options.scratch_root)?;

    if config.output.wants(OutputFormat::Json) {
        result
            .warnings
            .push("The 'json' output format is not supported and was skipped".to_string());
    }

    let hooks = token_hooks();
    for theme in &themes {
        tracing::debug!(theme = %theme.name, "building theme");

        let platforms = platforms_for_theme(&theme.name, &config.output);
        let sources = scratch.sources_for(&theme.name);
        let context = BuildContext::new(&sources, hooks.clone(), platforms)?;
        let output = context.build_all_platforms()?;
        result.warnings.extend(
            output
                .diagnostics
                .in_theme(&theme.name)
                .iter()
                .map(ToString::to_string),
        );

        let mut seen = HashSet::new();
        for &format in &config.output.formats {
            if format == OutputFormat::Json || !seen.insert(format) {
                continue;
            }
            result
                .generated_files
                .push(config.output.directory.join(file_name(&theme.name, format)));
        }
    }

    scratch.close()
}
