//! Build configuration.
//!
//! A `UserConfig` is what users write (YAML or JSON); `resolve_config`
//! validates it, fills in defaults and normalizes every token value into a
//! plain string, producing the immutable `ResolvedConfig` a build runs on.

mod loader;
mod template;

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};

pub use loader::{find_config_file, load_config, parse_config, CONFIG_FILE_NAMES};
pub use template::config_template;

/// Ordered mapping of token name to normalized value.
pub type TokenMap = IndexMap<String, String>;

/// Default output directory.
pub const DEFAULT_DIRECTORY: &str = "./output";

/// Default CSS custom-property prefix.
pub const DEFAULT_PREFIX: &str = "dt";

/// Key that marks a leaf in the token tree.
const RESERVED_TOKEN_NAME: &str = "value";

/// A scalar token value as written by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A token value in either of its accepted spellings: `"#fff"` or `{ value: "#fff" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTokenValue {
    Literal(Scalar),
    Wrapped { value: Scalar },
}

impl RawTokenValue {
    /// The value as a plain string.
    pub fn normalize(&self) -> String {
        match self {
            RawTokenValue::Literal(s) | RawTokenValue::Wrapped { value: s } => s.to_string(),
        }
    }
}

impl From<&str> for RawTokenValue {
    fn from(value: &str) -> Self {
        RawTokenValue::Literal(Scalar::Text(value.to_string()))
    }
}

/// Raw token mapping as written by the user.
pub type RawTokenMap = IndexMap<String, RawTokenValue>;

/// Output format requested in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Css,
    Scss,
    Ts,
    Json,
}

impl OutputFormat {
    /// All formats emitted by default.
    pub const DEFAULTS: [OutputFormat; 3] =
        [OutputFormat::Css, OutputFormat::Scss, OutputFormat::Ts];

    /// File extension for generated files.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Css => "css",
            OutputFormat::Scss => "scss",
            OutputFormat::Ts => "ts",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A theme as written by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserTheme {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub colors: Option<RawTokenMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
}

/// Output settings as written by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserOutput {
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub formats: Option<Vec<OutputFormat>>,
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Configuration as loaded from a config file, before defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    #[serde(default)]
    pub themes: Option<Vec<UserTheme>>,
    #[serde(default)]
    pub base_colors: Option<RawTokenMap>,
    #[serde(default)]
    pub sizing: Option<RawTokenMap>,
    #[serde(default)]
    pub font: Option<RawTokenMap>,
    #[serde(default)]
    pub output: Option<UserOutput>,
    /// Derive `-rgb`, `-hsl` and `-oklch` variants for every colour.
    #[serde(default)]
    pub color_variants: Option<bool>,
}

/// A validated theme definition with normalized colour values.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDefinition {
    pub name: String,
    pub colors: TokenMap,
    pub extends: Option<String>,
}

impl ThemeDefinition {
    pub fn new(name: impl Into<String>, colors: TokenMap) -> Self {
        Self {
            name: name.into(),
            colors,
            extends: None,
        }
    }

    /// Set the parent theme.
    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }
}

/// Fully-defaulted output settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub formats: Vec<OutputFormat>,
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            formats: OutputFormat::DEFAULTS.to_vec(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl OutputConfig {
    /// Check whether a format was requested.
    pub fn wants(&self, format: OutputFormat) -> bool {
        self.formats.contains(&format)
    }
}

/// The configuration a build runs on.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub themes: Vec<ThemeDefinition>,
    pub base_colors: TokenMap,
    pub sizing: TokenMap,
    pub font: TokenMap,
    pub output: OutputConfig,
    pub color_variants: bool,
}

impl ResolvedConfig {
    /// A config with the given themes and every other setting defaulted.
    pub fn with_themes(themes: Vec<ThemeDefinition>) -> Self {
        Self {
            themes,
            base_colors: TokenMap::new(),
            sizing: TokenMap::new(),
            font: TokenMap::new(),
            output: OutputConfig::default(),
            color_variants: false,
        }
    }
}

/// Validate a user config and apply defaults.
pub fn resolve_config(user: UserConfig) -> Result<ResolvedConfig> {
    let raw_themes = user.themes.ok_or_else(|| TokenError::Config {
        message: "Configuration must include a 'themes' array".to_string(),
        help: Some("Add a `themes:` list with at least one `name`/`colors` entry".to_string()),
    })?;

    if raw_themes.is_empty() {
        return Err(TokenError::config("At least one theme must be defined"));
    }

    let mut seen = HashSet::new();
    let mut themes = Vec::with_capacity(raw_themes.len());

    for raw in raw_themes {
        let name = raw
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| TokenError::config("Each theme must have a 'name' property"))?;

        if name.contains(['/', '\\']) {
            return Err(TokenError::Config {
                message: format!("Theme name '{}' must not contain path separators", name),
                help: Some("Theme names become file names and CSS classes".to_string()),
            });
        }

        if !seen.insert(name.clone()) {
            return Err(TokenError::config(format!("Theme '{}' is defined more than once", name)));
        }

        let colors = raw.colors.ok_or_else(|| {
            TokenError::config(format!("Theme '{}' must have a 'colors' object", name))
        })?;
        let colors = normalize_tokens(&colors, &format!("theme '{}'", name))?;

        themes.push(ThemeDefinition {
            name,
            colors,
            extends: raw.extends,
        });
    }

    let output = user.output.unwrap_or_default();
    let defaults = OutputConfig::default();

    Ok(ResolvedConfig {
        themes,
        base_colors: normalize_optional(user.base_colors.as_ref(), "baseColors")?,
        sizing: normalize_optional(user.sizing.as_ref(), "sizing")?,
        font: normalize_optional(user.font.as_ref(), "font")?,
        output: OutputConfig {
            directory: output.directory.unwrap_or(defaults.directory),
            formats: output.formats.unwrap_or(defaults.formats),
            prefix: output.prefix.unwrap_or(defaults.prefix),
        },
        color_variants: user.color_variants.unwrap_or(false),
    })
}

fn normalize_optional(tokens: Option<&RawTokenMap>, owner: &str) -> Result<TokenMap> {
    match tokens {
        Some(tokens) => normalize_tokens(tokens, owner),
        None => Ok(TokenMap::new()),
    }
}

/// Normalize raw values once, rejecting entries a token tree cannot hold.
fn normalize_tokens(tokens: &RawTokenMap, owner: &str) -> Result<TokenMap> {
    tokens
        .iter()
        .map(|(key, raw)| {
            let value = raw.normalize();
            check_token(key, &value, owner)?;
            Ok((key.clone(), value))
        })
        .collect()
}

/// Token names may not be the leaf marker, and values may not be blank.
pub(crate) fn check_token(name: &str, value: &str, owner: &str) -> Result<()> {
    if name == RESERVED_TOKEN_NAME {
        return Err(TokenError::Config {
            message: format!("Token name '{}' in {} is reserved", name, owner),
            help: Some(
                "`value` marks a token's value in the token tree; rename the token".to_string(),
            ),
        });
    }
    if value.trim().is_empty() {
        return Err(TokenError::Config {
            message: format!("Token '{}' in {} has an empty value", name, owner),
            help: Some("Every token needs a non-empty value".to_string()),
        });
    }
    Ok(())
}
