//! Token transformation engine.
//!
//! Loads JSON token trees, runs a platform's transforms over the flattened
//! tokens (resolving `{a.b}` references along the way), and renders each
//! configured file with a named format.
//!
//! # Example
//!
//! ```ignore
//! use design_tokens::engine::{BuildContext, HookSet, PlatformConfig, Source};
//!
//! let ctx = BuildContext::new(&[Source::dir("tokens")], HookSet::builtin(), platforms)?;
//! let output = ctx.build_all_platforms()?;
//! ```

pub mod formats;
pub mod hooks;
mod resolve;
pub mod token;

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::error::{Result, TokenError};
use crate::validation::Diagnostics;

pub use hooks::{FormatArgs, HookSet, Transform, ValueTransform};
pub use token::{Attributes, Dictionary, SourceToken, Token};

/// Where token JSON is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Every `*.json` file directly inside the directory, by file name.
    Dir(PathBuf),
    /// A single JSON file.
    File(PathBuf),
}

impl Source {
    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Source::Dir(path.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Source::File(path.into())
    }

    /// Existing files this source selects, in load order.
    ///
    /// Missing directories and files select nothing.
    fn files(&self) -> Vec<PathBuf> {
        match self {
            Source::File(path) => {
                if path.is_file() {
                    vec![path.clone()]
                } else {
                    Vec::new()
                }
            }
            Source::Dir(dir) => WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
                .collect(),
        }
    }
}

/// Per-file options passed through to formats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOptions {
    /// Keep aliases as references where the format supports it.
    pub output_references: bool,
    /// Name of a registered file header.
    pub file_header: Option<String>,
    /// Theme name, for formats that scope output to a theme.
    pub theme: Option<String>,
}

/// One output file of a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub destination: String,
    pub format: String,
    /// Name of a registered filter.
    pub filter: Option<String>,
    pub options: FileOptions,
}

impl FileConfig {
    pub fn new(destination: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            format: format.into(),
            filter: None,
            options: FileOptions::default(),
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_options(mut self, options: FileOptions) -> Self {
        self.options = options;
        self
    }
}

/// A platform: a transform chain and the files rendered from its output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Transform names, applied in order.
    pub transforms: Vec<String>,
    pub prefix: Option<String>,
    pub build_path: PathBuf,
    pub files: Vec<FileConfig>,
}

/// Files written by a build and the warnings it produced.
#[derive(Debug, Default)]
pub struct BuildOutput {
    pub files: Vec<PathBuf>,
    pub diagnostics: Diagnostics,
}

/// A loaded token tree plus the hooks and platforms to build it with.
pub struct BuildContext {
    tokens: Vec<SourceToken>,
    hooks: HookSet,
    platforms: IndexMap<String, PlatformConfig>,
}

impl BuildContext {
    /// Load and merge `sources`, in order, into one token set.
    pub fn new(
        sources: &[Source],
        hooks: HookSet,
        platforms: IndexMap<String, PlatformConfig>,
    ) -> Result<Self> {
        let mut tree = Map::new();

        for path in sources.iter().flat_map(Source::files) {
            let content = fs::read_to_string(&path).map_err(|e| TokenError::Io {
                path: path.clone(),
                message: format!("Failed to read token file: {}", e),
            })?;
            let parsed: Value = serde_json::from_str(&content).map_err(|e| TokenError::Parse {
                message: format!("Invalid token file {}: {}", path.display(), e),
                help: None,
            })?;
            let Value::Object(parsed) = parsed else {
                return Err(TokenError::Parse {
                    message: format!("Token file {} must contain a JSON object", path.display()),
                    help: None,
                });
            };

            tracing::debug!(path = %path.display(), "loading token file");
            merge_tree(&mut tree, parsed, &mut Vec::new());
        }

        Ok(Self {
            tokens: token::flatten_tree(&tree)?,
            hooks,
            platforms,
        })
    }

    /// Tokens as declared, before any platform transforms.
    pub fn source_tokens(&self) -> &[SourceToken] {
        &self.tokens
    }

    /// Run a platform's transforms without writing anything.
    pub fn export_platform(&self, name: &str, diagnostics: &mut Diagnostics) -> Result<Dictionary> {
        let platform = self.platform(name)?;
        resolve::transform_tokens(&self.tokens, platform, &self.hooks, diagnostics)
    }

    /// Build one platform, returning the written file paths.
    pub fn build_platform(
        &self,
        name: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<PathBuf>> {
        let platform = self.platform(name)?;
        let dictionary =
            resolve::transform_tokens(&self.tokens, platform, &self.hooks, diagnostics)?;

        let mut written = Vec::with_capacity(platform.files.len());
        for file in &platform.files {
            let contents = self.render_file(&dictionary, file, platform)?;
            let path = platform.build_path.join(&file.destination);
            write_file(&path, &contents)?;
            tracing::debug!(platform = name, path = %path.display(), "wrote file");
            written.push(path);
        }

        Ok(written)
    }

    /// Build every platform in declaration order.
    pub fn build_all_platforms(&self) -> Result<BuildOutput> {
        let mut output = BuildOutput::default();
        for name in self.platforms.keys() {
            let files = self.build_platform(name, &mut output.diagnostics)?;
            output.files.extend(files);
        }
        Ok(output)
    }

    fn platform(&self, name: &str) -> Result<&PlatformConfig> {
        self.platforms
            .get(name)
            .ok_or_else(|| TokenError::build(format!("Unknown platform '{}'", name)))
    }

    fn render_file(
        &self,
        dictionary: &Dictionary,
        file: &FileConfig,
        platform: &PlatformConfig,
    ) -> Result<String> {
        let filter = file
            .filter
            .as_deref()
            .map(|name| self.hooks.filter(name))
            .transpose()?;
        let format = self.hooks.format(&file.format)?;
        let header = match file.options.file_header.as_deref() {
            Some(name) => self.hooks.file_header(name)?(),
            None => vec![formats::DEFAULT_HEADER.to_string()],
        };

        let tokens = dictionary
            .all_tokens()
            .iter()
            .filter(|t| filter.map_or(true, |f| f(t)))
            .collect();

        format(&FormatArgs {
            dictionary,
            tokens,
            file,
            platform,
            header,
        })
    }
}

/// Deep-merge `from` into `into`; later values win, groups merge key by key.
fn merge_tree(into: &mut Map<String, Value>, from: Map<String, Value>, path: &mut Vec<String>) {
    for (key, value) in from {
        path.push(key.clone());
        match into.get_mut(&key) {
            Some(Value::Object(existing)) if is_group(existing) && is_group_value(&value) => {
                if let Value::Object(incoming) = value {
                    merge_tree(existing, incoming, path);
                }
            }
            Some(_) => {
                tracing::warn!(token = %path.join("."), "token collision, later definition wins");
                into.insert(key, value);
            }
            None => {
                into.insert(key, value);
            }
        }
        path.pop();
    }
}

fn is_group(node: &Map<String, Value>) -> bool {
    !node.contains_key("value")
}

fn is_group_value(value: &Value) -> bool {
    matches!(value, Value::Object(node) if is_group(node))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TokenError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    fs::write(path, contents).map_err(|e| TokenError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}
