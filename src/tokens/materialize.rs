//! On-disk token tree consumed by the engine.
//!
//! Layout under the scratch root:
//!
//! ```text
//! .design-tokens-temp/
//!   shared/color.json    base colours
//!   shared/sizing.json
//!   shared/font.json
//!   color/<theme>.json   one per theme
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use super::inheritance::ResolvedTheme;
use super::variants::expand_color_variants;
use crate::config::{check_token, ResolvedConfig, TokenMap};
use crate::engine::Source;
use crate::error::{Result, TokenError};

/// Directory created under the scratch root.
pub const SCRATCH_DIR_NAME: &str = ".design-tokens-temp";

const SHARED_DIR: &str = "shared";
const THEME_DIR: &str = "color";

/// Owns the scratch directory; removes it when dropped.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Remove any leftover directory at `root` and start a fresh one.
    fn create(root: &Path) -> Result<Self> {
        let path = root.join(SCRATCH_DIR_NAME);
        remove_if_present(&path)?;

        for dir in [path.join(SHARED_DIR), path.join(THEME_DIR)] {
            fs::create_dir_all(&dir).map_err(|e| TokenError::Io {
                path: dir.clone(),
                message: format!("Failed to create scratch directory: {}", e),
            })?;
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shared token files plus the one file for `theme`.
    pub fn sources_for(&self, theme: &str) -> Vec<Source> {
        vec![
            Source::dir(self.path.join(SHARED_DIR)),
            Source::file(self.theme_file(theme)),
        ]
    }

    /// Remove the directory now, reporting failure.
    pub fn close(mut self) -> Result<()> {
        let path = std::mem::take(&mut self.path);
        remove_if_present(&path)
    }

    fn theme_file(&self, theme: &str) -> PathBuf {
        self.path.join(THEME_DIR).join(format!("{}.json", theme))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.path.as_os_str().is_empty() {
            return;
        }
        if let Err(e) = remove_if_present(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove scratch directory"
            );
        }
    }
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(TokenError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to remove scratch directory: {}", e),
        }),
    }
}

/// Write shared tokens and each theme's colours under `scratch_root`.
///
/// Empty groups are not written. The returned guard must be held for as long
/// as the files are needed.
pub fn materialize(
    config: &ResolvedConfig,
    themes: &[ResolvedTheme],
    scratch_root: &Path,
) -> Result<ScratchDir> {
    let scratch = ScratchDir::create(scratch_root)?;
    let shared = scratch.path.join(SHARED_DIR);

    let base_colors = if config.color_variants {
        expand_color_variants(&config.base_colors)
    } else {
        config.base_colors.clone()
    };

    write_group(&shared.join("color.json"), "color", &base_colors, "baseColors")?;
    write_group(&shared.join("sizing.json"), "sizing", &config.sizing, "sizing")?;
    write_group(&shared.join("font.json"), "font", &config.font, "font")?;

    for theme in themes {
        let colors = if config.color_variants {
            expand_color_variants(&theme.colors)
        } else {
            theme.colors.clone()
        };
        let owner = format!("theme '{}'", theme.name);
        write_group(&scratch.theme_file(&theme.name), "color", &colors, &owner)?;
    }

    tracing::debug!(path = %scratch.path.display(), themes = themes.len(), "materialized tokens");
    Ok(scratch)
}

fn write_group(path: &Path, group: &str, tokens: &TokenMap, owner: &str) -> Result<()> {
    if tokens.is_empty() {
        return Ok(());
    }

    let leaves = tokens
        .iter()
        .map(|(name, value)| {
            check_token(name, value, owner)?;
            Ok((name.clone(), json!({ "value": value })))
        })
        .collect::<Result<Map<String, Value>>>()?;
    let mut root = Map::new();
    root.insert(group.to_string(), Value::Object(leaves));

    let content = serde_json::to_string_pretty(&root)?;
    fs::write(path, content).map_err(|e| TokenError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write token file: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeDefinition;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn map(entries: &[(&str, &str)]) -> TokenMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn theme(name: &str, colors: TokenMap) -> ResolvedTheme {
        ResolvedTheme {
            name: name.to_string(),
            colors,
        }
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_layout() {
        let root = tempdir().unwrap();
        let mut config =
            ResolvedConfig::with_themes(vec![ThemeDefinition::new("light", TokenMap::new())]);
        config.base_colors = map(&[("white", "#ffffff")]);
        config.sizing = map(&[("sm", "4px")]);
        let themes = vec![theme("light", map(&[("bg", "{color.white}")]))];

        let scratch = materialize(&config, &themes, root.path()).unwrap();
        let dir = root.path().join(SCRATCH_DIR_NAME);
        assert_eq!(scratch.path(), dir.as_path());

        assert_eq!(
            read_json(&dir.join("shared/color.json")),
            json!({ "color": { "white": { "value": "#ffffff" } } })
        );
        assert_eq!(
            read_json(&dir.join("shared/sizing.json")),
            json!({ "sizing": { "sm": { "value": "4px" } } })
        );
        assert!(!dir.join("shared/font.json").exists());
        assert_eq!(
            read_json(&dir.join("color/light.json")),
            json!({ "color": { "bg": { "value": "{color.white}" } } })
        );

        drop(scratch);
        assert!(!dir.exists());
    }

    #[test]
    fn test_variants_and_empty_theme() {
        let root = tempdir().unwrap();
        let mut config = ResolvedConfig::with_themes(vec![]);
        config.color_variants = true;
        let themes = vec![
            theme("light", map(&[("primary", "#ff0000")])),
            theme("blank", TokenMap::new()),
        ];

        let scratch = materialize(&config, &themes, root.path()).unwrap();
        let light = read_json(&scratch.path().join("color/light.json"));
        let keys: Vec<&String> = light["color"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["primary", "primary-rgb", "primary-hsl", "primary-oklch"]);
        assert!(!scratch.path().join("color/blank.json").exists());
        assert!(!scratch.path().join("shared/color.json").exists());

        scratch.close().unwrap();
        assert!(!root.path().join(SCRATCH_DIR_NAME).exists());
    }

    #[test]
    fn test_leftover_directory_replaced() {
        let root = tempdir().unwrap();
        let stale = root.path().join(SCRATCH_DIR_NAME).join("color/old.json");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "{}").unwrap();

        let config = ResolvedConfig::with_themes(vec![]);
        let scratch = materialize(&config, &[], root.path()).unwrap();
        assert!(!stale.exists());
        assert!(scratch.path().join("shared").is_dir());
    }

    #[test]
    fn test_blank_value_rejected_and_cleaned_up() {
        let root = tempdir().unwrap();
        let config = ResolvedConfig::with_themes(vec![]);
        let themes = vec![theme("light", map(&[("bg", "#fff"), ("primary", "")]))];

        let err = materialize(&config, &themes, root.path()).unwrap_err();
        assert!(matches!(err, TokenError::Config { .. }));
        assert!(err
            .to_string()
            .contains("Token 'primary' in theme 'light' has an empty value"));
        assert!(!root.path().join(SCRATCH_DIR_NAME).exists());
    }

    #[test]
    fn test_sources_for_theme() {
        let root = tempdir().unwrap();
        let scratch = materialize(&ResolvedConfig::with_themes(vec![]), &[], root.path()).unwrap();
        let dir = root.path().join(SCRATCH_DIR_NAME);
        assert_eq!(
            scratch.sources_for("dark"),
            vec![Source::dir(dir.join("shared")), Source::file(dir.join("color/dark.json"))]
        );
    }
}
