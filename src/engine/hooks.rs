//! Hook tables: named filters, transforms, formats and file headers.
//!
//! A `HookSet` is built up front and handed to `BuildContext::new`, so every
//! build sees exactly the hooks it was given.

use std::collections::HashMap;

use heck::{ToKebabCase, ToLowerCamelCase};

use super::formats;
use super::token::{Attributes, Dictionary, Token};
use super::{FileConfig, PlatformConfig};
use crate::colour::Colour;
use crate::error::{Result, TokenError};
use crate::validation::Diagnostics;

pub const ATTRIBUTE_CTI: &str = "attribute/cti";
pub const NAME_KEBAB: &str = "name/kebab";
pub const NAME_CAMEL: &str = "name/camel";
pub const SIZE_REM: &str = "size/rem";
pub const COLOR_CSS: &str = "color/css";
pub const COLOR_HEX: &str = "color/hex";
pub const FORMAT_SCSS_VARIABLES: &str = "scss/variables";
pub const FORMAT_JAVASCRIPT_ES6: &str = "javascript/es6";

/// Token predicate.
pub type Filter = fn(&Token) -> bool;

/// Produces a token's output name.
pub type NameFn = fn(&Token, &PlatformConfig) -> String;

/// Produces a token's attributes.
pub type AttributeFn = fn(&Token) -> Attributes;

/// Produces a token's new value; may record warnings instead of failing.
pub type ValueFn = fn(&Token, &mut Diagnostics) -> Result<String>;

/// Renders a file's contents.
pub type Format = fn(&FormatArgs<'_>) -> Result<String>;

/// Returns the lines of a file header comment.
pub type FileHeader = fn() -> Vec<String>;

/// A value transform and the tokens it applies to.
#[derive(Clone, Copy)]
pub struct ValueTransform {
    pub filter: Option<Filter>,
    /// Run after references resolve, including on aliases.
    pub transitive: bool,
    pub transform: ValueFn,
}

#[derive(Clone, Copy)]
pub enum Transform {
    Attribute(AttributeFn),
    Name(NameFn),
    Value(ValueTransform),
}

/// Everything a format needs to render one file.
pub struct FormatArgs<'a> {
    /// Every token of the platform, for reference lookups.
    pub dictionary: &'a Dictionary,
    /// Tokens that passed the file filter.
    pub tokens: Vec<&'a Token>,
    pub file: &'a FileConfig,
    pub platform: &'a PlatformConfig,
    pub header: Vec<String>,
}

/// Named hook tables.
#[derive(Clone, Default)]
pub struct HookSet {
    filters: HashMap<String, Filter>,
    transforms: HashMap<String, Transform>,
    formats: HashMap<String, Format>,
    file_headers: HashMap<String, FileHeader>,
}

impl HookSet {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin transforms and formats.
    pub fn builtin() -> Self {
        Self::new()
            .with_transform(ATTRIBUTE_CTI, Transform::Attribute(attribute_cti))
            .with_transform(NAME_KEBAB, Transform::Name(name_kebab))
            .with_transform(NAME_CAMEL, Transform::Name(name_camel))
            .with_transform(
                SIZE_REM,
                Transform::Value(ValueTransform {
                    filter: Some(is_size),
                    transitive: false,
                    transform: size_rem,
                }),
            )
            .with_transform(
                COLOR_CSS,
                Transform::Value(ValueTransform {
                    filter: Some(is_color),
                    transitive: false,
                    transform: color_css,
                }),
            )
            .with_transform(
                COLOR_HEX,
                Transform::Value(ValueTransform {
                    filter: Some(is_color),
                    transitive: false,
                    transform: color_hex,
                }),
            )
            .with_format(FORMAT_SCSS_VARIABLES, formats::scss_variables)
            .with_format(FORMAT_JAVASCRIPT_ES6, formats::javascript_es6)
    }

    pub fn with_filter(mut self, name: impl Into<String>, filter: Filter) -> Self {
        self.filters.insert(name.into(), filter);
        self
    }

    pub fn with_transform(mut self, name: impl Into<String>, transform: Transform) -> Self {
        self.transforms.insert(name.into(), transform);
        self
    }

    pub fn with_format(mut self, name: impl Into<String>, format: Format) -> Self {
        self.formats.insert(name.into(), format);
        self
    }

    pub fn with_file_header(mut self, name: impl Into<String>, header: FileHeader) -> Self {
        self.file_headers.insert(name.into(), header);
        self
    }

    pub fn filter(&self, name: &str) -> Result<Filter> {
        self.filters
            .get(name)
            .copied()
            .ok_or_else(|| unknown_hook("filter", name))
    }

    pub fn transform(&self, name: &str) -> Result<Transform> {
        self.transforms
            .get(name)
            .copied()
            .ok_or_else(|| unknown_hook("transform", name))
    }

    pub fn format(&self, name: &str) -> Result<Format> {
        self.formats
            .get(name)
            .copied()
            .ok_or_else(|| unknown_hook("format", name))
    }

    pub fn file_header(&self, name: &str) -> Result<FileHeader> {
        self.file_headers
            .get(name)
            .copied()
            .ok_or_else(|| unknown_hook("file header", name))
    }
}

fn unknown_hook(kind: &str, name: &str) -> TokenError {
    TokenError::Build {
        message: format!("Unknown {} '{}'", kind, name),
        help: Some(format!("Register the {} on the HookSet before building", kind)),
    }
}

fn attribute_cti(token: &Token) -> Attributes {
    Attributes {
        category: token.path.first().cloned(),
        kind: token.path.get(1).cloned(),
        item: token.path.get(2).cloned(),
    }
}

fn name_words(token: &Token, platform: &PlatformConfig) -> String {
    platform
        .prefix
        .iter()
        .filter(|p| !p.is_empty())
        .chain(token.path.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn name_kebab(token: &Token, platform: &PlatformConfig) -> String {
    name_words(token, platform).to_kebab_case()
}

fn name_camel(token: &Token, platform: &PlatformConfig) -> String {
    name_words(token, platform).to_lower_camel_case()
}

fn is_color(token: &Token) -> bool {
    token.category() == Some("color")
}

fn is_size(token: &Token) -> bool {
    token.category() == Some("size")
}

fn size_rem(token: &Token, _: &mut Diagnostics) -> Result<String> {
    let value = token.value.trim();
    match value.parse::<f64>() {
        Ok(n) => Ok(format!("{}rem", n)),
        Err(_) => Ok(value.to_string()),
    }
}

fn color_css(token: &Token, _: &mut Diagnostics) -> Result<String> {
    Ok(Colour::from_hex(&token.value)
        .map(Colour::to_css)
        .unwrap_or_else(|_| token.value.clone()))
}

fn color_hex(token: &Token, _: &mut Diagnostics) -> Result<String> {
    Ok(Colour::from_hex(&token.value)
        .map(Colour::to_lower_hex)
        .unwrap_or_else(|_| token.value.clone()))
}
