//! Config file discovery and loading.

use std::path::{Path, PathBuf};

use super::UserConfig;
use crate::error::{Result, TokenError};

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 3] = [
    "design-tokens.config.yaml",
    "design-tokens.config.yml",
    "design-tokens.config.json",
];

/// Find the first config file present in `dir`.
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load a config from an explicit path (relative to `cwd`) or by discovery in `cwd`.
pub fn load_config(path: Option<&Path>, cwd: &Path) -> Result<(PathBuf, UserConfig)> {
    let resolved = match path {
        Some(path) => {
            let path = cwd.join(path);
            if !path.exists() {
                return Err(TokenError::Config {
                    message: format!("Configuration file not found at: {}", path.display()),
                    help: None,
                });
            }
            path
        }
        None => find_config_file(cwd).ok_or_else(|| TokenError::Config {
            message: "No configuration file found".to_string(),
            help: Some(
                "Run 'design-tokens init' to create one, or specify a path with --config".to_string(),
            ),
        })?,
    };

    let content = std::fs::read_to_string(&resolved).map_err(|e| TokenError::Io {
        path: resolved.clone(),
        message: format!("Failed to read config: {}", e),
    })?;

    let config = parse_config(&content, &resolved)?;
    tracing::debug!(path = %resolved.display(), "loaded config");
    Ok((resolved, config))
}

/// Parse config text, choosing JSON or YAML by the file extension.
pub fn parse_config(content: &str, path: &Path) -> Result<UserConfig> {
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");

    let parsed = if is_json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| TokenError::Parse {
        message: format!("Failed to load config from {}: {}", path.display(), message),
        help: Some("Check the config file syntax".to_string()),
    })
}
