//! Transforms, filters and the class-scoped CSS format used by theme builds.

use crate::colour::Colour;
use crate::engine::formats::DEFAULT_HEADER;
use crate::engine::hooks::{HookSet, Transform, ValueTransform};
use crate::engine::token::{alias_target, Token};
use crate::engine::FormatArgs;
use crate::error::{Result, TokenError};
use crate::tokens::VARIANT_SUFFIXES;
use crate::validation::{Diagnostic, Diagnostics};

pub const COLOR_RGB: &str = "color/custom-rgb-colors";
pub const COLOR_HSL: &str = "color/custom-hsl-colors";
pub const COLOR_OKLCH: &str = "color/custom-oklch-colors";
pub const COLOR_PLAIN_HEX: &str = "color/custom-css-hex";
pub const FORMAT_CLASSED_VARIABLES: &str = "css/classed-variables";
pub const FILTER_TS_COLORS: &str = "color/ts-colors";
pub const FILTER_SCSS: &str = "scss/no-rgb-no-font";
pub const HEADER: &str = "designTokensHeader";

/// Hooks for a theme build: the builtins plus the colour-space transforms.
pub fn token_hooks() -> HookSet {
    HookSet::builtin()
        .with_filter(FILTER_TS_COLORS, is_ts_color)
        .with_filter(FILTER_SCSS, is_scss_token)
        .with_transform(COLOR_RGB, transitive(contains_rgb, to_rgb))
        .with_transform(COLOR_HSL, transitive(contains_hsl, to_hsl))
        .with_transform(COLOR_OKLCH, transitive(contains_oklch, to_oklch))
        .with_transform(COLOR_PLAIN_HEX, transitive(is_plain_color, plain_hex))
        .with_format(FORMAT_CLASSED_VARIABLES, classed_variables)
        .with_file_header(HEADER, header_lines)
}

fn transitive(
    filter: fn(&Token) -> bool,
    transform: fn(&Token, &mut Diagnostics) -> Result<String>,
) -> Transform {
    Transform::Value(ValueTransform {
        filter: Some(filter),
        transitive: true,
        transform,
    })
}

fn name_contains(token: &Token, needle: &str) -> bool {
    token.path.iter().any(|p| p.to_lowercase().contains(needle))
}

fn is_variant(token: &Token) -> bool {
    VARIANT_SUFFIXES.iter().any(|s| name_contains(token, s))
}

/// Needs `attribute/cti` to have run on the platform.
fn colour_variant(token: &Token, suffix: &str) -> bool {
    token.attributes.includes("color") && name_contains(token, suffix)
}

fn contains_rgb(token: &Token) -> bool {
    colour_variant(token, "rgb")
}

fn contains_hsl(token: &Token) -> bool {
    colour_variant(token, "hsl")
}

fn contains_oklch(token: &Token) -> bool {
    colour_variant(token, "oklch")
}

fn is_plain_color(token: &Token) -> bool {
    token.in_group("color") && !is_variant(token)
}

/// Colour tokens other than the colour-space variants.
pub fn is_ts_color(token: &Token) -> bool {
    is_plain_color(token)
}

/// Everything except rgb colour variants and font tokens.
pub fn is_scss_token(token: &Token) -> bool {
    !contains_rgb(token) && !token.in_group("font")
}

fn parse_colour(token: &Token) -> Result<Colour> {
    Colour::from_hex(&token.value).map_err(|_| TokenError::Build {
        message: format!(
            "Token '{}' has value '{}' which is not a hex colour",
            token.key(),
            token.value
        ),
        help: Some("Colour-space variants need a #RGB or #RRGGBB source value".to_string()),
    })
}

fn to_rgb(token: &Token, _: &mut Diagnostics) -> Result<String> {
    Ok(parse_colour(token)?.to_rgb_triple())
}

fn to_hsl(token: &Token, _: &mut Diagnostics) -> Result<String> {
    Ok(parse_colour(token)?.to_hsl().to_css_components())
}

fn to_oklch(token: &Token, diagnostics: &mut Diagnostics) -> Result<String> {
    match Colour::from_hex(&token.value) {
        Ok(colour) => Ok(colour.to_oklch().to_css_components()),
        Err(_) => {
            tracing::warn!(
                token = %token.key(),
                value = %token.value,
                "oklch conversion failed, keeping value"
            );
            diagnostics.push(
                Diagnostic::warning(
                    "design_tokens::transform::oklch",
                    format!(
                        "Token '{}' value '{}' could not be converted to OKLCH; kept as is",
                        token.key(),
                        token.value
                    ),
                )
                .with_help("Use a hex colour for OKLCH variants"),
            );
            Ok(token.value.clone())
        }
    }
}

fn plain_hex(token: &Token, _: &mut Diagnostics) -> Result<String> {
    Ok(token.value.clone())
}

fn header_lines() -> Vec<String> {
    vec![
        "Generated by design-tokens".to_string(),
        DEFAULT_HEADER.to_string(),
    ]
}

/// `.{theme} { --name: value; }` with optional `var()` references.
fn classed_variables(args: &FormatArgs<'_>) -> Result<String> {
    let options = &args.file.options;
    let theme = options.theme.as_deref().ok_or_else(|| TokenError::Build {
        message: format!("File '{}' needs a theme to scope its variables", args.file.destination),
        help: None,
    })?;

    let mut out = String::from("/**\n");
    for line in &args.header {
        out.push_str(&format!(" * {}\n", line));
    }
    out.push_str(" **/\n\n");

    out.push_str(&format!(".{} {{\n", theme));
    for token in &args.tokens {
        let value = if options.output_references {
            reference_for(token, args).unwrap_or_else(|| token.value.clone())
        } else {
            token.value.clone()
        };
        out.push_str(&format!("  --{}: {};\n", token.name, value));
    }
    out.push_str("}\n\n");

    Ok(out)
}

/// `var(--target)` when the token is a plain alias whose output matches its target's.
fn reference_for(token: &Token, args: &FormatArgs<'_>) -> Option<String> {
    let target = args.dictionary.get(alias_target(&token.original)?)?;
    (target.value == token.value).then(|| format!("var(--{})", target.name))
}
