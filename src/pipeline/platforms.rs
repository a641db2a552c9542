//! Platform definitions for one theme.

use indexmap::IndexMap;

use super::hooks::{
    COLOR_HSL, COLOR_OKLCH, COLOR_PLAIN_HEX, COLOR_RGB, FILTER_SCSS, FILTER_TS_COLORS,
    FORMAT_CLASSED_VARIABLES, HEADER,
};
use crate::config::{OutputConfig, OutputFormat};
use crate::engine::hooks::{
    ATTRIBUTE_CTI, COLOR_CSS, COLOR_HEX, FORMAT_JAVASCRIPT_ES6, FORMAT_SCSS_VARIABLES, NAME_CAMEL,
    NAME_KEBAB, SIZE_REM,
};
use crate::engine::{FileConfig, FileOptions, PlatformConfig};

/// Platforms for every requested format that produces a file, keyed by
/// format name, in request order.
pub fn platforms_for_theme(theme: &str, output: &OutputConfig) -> IndexMap<String, PlatformConfig> {
    let mut platforms = IndexMap::new();
    for &format in &output.formats {
        let platform = match format {
            OutputFormat::Css => css(theme, output),
            OutputFormat::Scss => scss(theme, output),
            OutputFormat::Ts => ts(theme, output),
            OutputFormat::Json => continue,
        };
        platforms.entry(format.to_string()).or_insert(platform);
    }
    platforms
}

fn transforms(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn header_options() -> FileOptions {
    FileOptions {
        file_header: Some(HEADER.to_string()),
        ..Default::default()
    }
}

fn css(theme: &str, output: &OutputConfig) -> PlatformConfig {
    PlatformConfig {
        transforms: transforms(&[
            ATTRIBUTE_CTI,
            NAME_KEBAB,
            SIZE_REM,
            COLOR_RGB,
            COLOR_HSL,
            COLOR_OKLCH,
            COLOR_PLAIN_HEX,
        ]),
        prefix: Some(output.prefix.clone()),
        build_path: output.directory.clone(),
        files: vec![FileConfig::new(file_name(theme, OutputFormat::Css), FORMAT_CLASSED_VARIABLES)
            .with_options(FileOptions {
                output_references: true,
                theme: Some(theme.to_string()),
                ..header_options()
            })],
    }
}

fn scss(theme: &str, output: &OutputConfig) -> PlatformConfig {
    PlatformConfig {
        transforms: transforms(&[ATTRIBUTE_CTI, NAME_KEBAB, SIZE_REM, COLOR_CSS]),
        prefix: None,
        build_path: output.directory.clone(),
        files: vec![FileConfig::new(file_name(theme, OutputFormat::Scss), FORMAT_SCSS_VARIABLES)
            .with_filter(FILTER_SCSS)
            .with_options(header_options())],
    }
}

fn ts(theme: &str, output: &OutputConfig) -> PlatformConfig {
    PlatformConfig {
        transforms: transforms(&[NAME_CAMEL, SIZE_REM, COLOR_HEX]),
        prefix: None,
        build_path: output.directory.clone(),
        files: vec![FileConfig::new(file_name(theme, OutputFormat::Ts), FORMAT_JAVASCRIPT_ES6)
            .with_filter(FILTER_TS_COLORS)
            .with_options(FileOptions {
                output_references: true,
                ..header_options()
            })],
    }
}

/// `{theme}.{ext}`
pub fn file_name(theme: &str, format: OutputFormat) -> String {
    format!("{}.{}", theme, format.extension())
}
