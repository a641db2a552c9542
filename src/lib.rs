//! design-tokens - Themed design token builder
//!
//! A library for turning a declarative theme config into CSS custom-property
//! classes, SCSS variables and TypeScript colour constants.

pub mod cli;
pub mod colour;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod tokens;
pub mod validation;

pub use colour::Colour;
pub use config::{
    config_template, load_config, resolve_config, OutputConfig, OutputFormat, ResolvedConfig,
    ThemeDefinition, TokenMap, UserConfig,
};
pub use engine::{BuildContext, Dictionary, HookSet, PlatformConfig, Source, Token};
pub use error::{Result, TokenError};
pub use pipeline::{build_tokens, BuildOptions, BuildResult};
pub use tokens::{expand_color_variants, resolve_theme_inheritance, ResolvedTheme};
pub use validation::{validate_config, Diagnostic, Diagnostics, Severity};
