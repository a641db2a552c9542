//! Static checks over a resolved configuration.
//!
//! Each check takes the config and returns a `Diagnostics` collection.

use std::collections::HashSet;

use crate::config::{OutputFormat, ResolvedConfig, TokenMap};
use crate::engine::token::references;
use crate::tokens::{resolve_theme_inheritance, variant_names, ResolvedTheme};

use super::diagnostic::{Diagnostic, Diagnostics};

/// Inheritance must resolve: parents exist, no self-extension or cycles.
pub fn check_inheritance(config: &ResolvedConfig) -> Diagnostics {
    let mut result = Diagnostics::new();

    if let Err(e) = resolve_theme_inheritance(&config.themes) {
        let message = match e {
            crate::error::TokenError::Config { message, .. } => message,
            other => other.to_string(),
        };
        result.push(
            Diagnostic::error("design_tokens::validate::extends", message)
                .with_help("'extends' must name another theme in the same config"),
        );
    }

    result
}

/// Themes that contribute no colours at all.
pub fn check_empty_themes(config: &ResolvedConfig) -> Diagnostics {
    let mut result = Diagnostics::new();

    for theme in &config.themes {
        if theme.colors.is_empty() && theme.extends.is_none() {
            result.push(
                Diagnostic::warning("design_tokens::validate::empty-theme", "Theme has no colors")
                    .with_help("Its output will only contain base colors, sizing and font tokens")
                    .in_theme(&theme.name),
            );
        }
    }

    result
}

/// Requested formats that produce nothing.
pub fn check_formats(config: &ResolvedConfig) -> Diagnostics {
    let mut result = Diagnostics::new();

    if config.output.formats.is_empty() {
        result.push(Diagnostic::warning(
            "design_tokens::validate::no-formats",
            "No output formats requested; nothing will be generated",
        ));
    }

    if config.output.wants(OutputFormat::Json) {
        result.push(
            Diagnostic::warning(
                "design_tokens::validate::json-format",
                "The 'json' output format is not supported and will be skipped",
            )
            .with_help("Use css, scss or ts"),
        );
    }

    result
}

/// Aliases must point at a token that exists in every theme build.
pub fn check_alias_refs(config: &ResolvedConfig) -> Diagnostics {
    let mut result = Diagnostics::new();

    // Broken inheritance is reported by check_inheritance.
    let Ok(themes) = resolve_theme_inheritance(&config.themes) else {
        return result;
    };

    let mut shared = HashSet::new();
    declare(&mut shared, "color", &config.base_colors, config.color_variants);
    declare(&mut shared, "sizing", &config.sizing, false);
    declare(&mut shared, "font", &config.font, false);

    let mut reported = HashSet::new();
    for theme in &themes {
        let mut declared = shared.clone();
        declare(&mut declared, "color", &theme.colors, config.color_variants);

        for (owner, value) in token_values(config, theme) {
            for target in references(value) {
                if declared.contains(target)
                    || !reported.insert((owner.clone(), target.to_string()))
                {
                    continue;
                }
                result.push(
                    Diagnostic::error(
                        "design_tokens::validate::unknown-reference",
                        format!("Token '{}' references '{}' which does not exist", owner, target),
                    )
                    .with_help("References use the dotted token path, e.g. {color.blue500}")
                    .in_theme(&theme.name),
                );
            }
        }
    }

    result
}

/// Declared colours that variant expansion would overwrite.
pub fn check_variant_collisions(config: &ResolvedConfig) -> Diagnostics {
    let mut result = Diagnostics::new();

    if !config.color_variants {
        return result;
    }

    let groups = std::iter::once(("baseColors", &config.base_colors))
        .chain(config.themes.iter().map(|t| (t.name.as_str(), &t.colors)));

    for (owner, colors) in groups {
        for name in colors.keys() {
            for variant in variant_names(name) {
                if colors.contains_key(&variant) {
                    result.push(Diagnostic::warning(
                        "design_tokens::validate::variant-collision",
                        format!(
                            "'{}' in {} is replaced by the variant derived from '{}'",
                            variant, owner, name
                        ),
                    ));
                }
            }
        }
    }

    result
}

fn declare(keys: &mut HashSet<String>, group: &str, tokens: &TokenMap, variants: bool) {
    for name in tokens.keys() {
        keys.insert(format!("{}.{}", group, name));
        if variants {
            keys.extend(variant_names(name).map(|v| format!("{}.{}", group, v)));
        }
    }
}

fn token_values<'a>(
    config: &'a ResolvedConfig,
    theme: &'a ResolvedTheme,
) -> impl Iterator<Item = (String, &'a String)> {
    let group = |name: &'static str, tokens: &'a TokenMap| {
        tokens
            .iter()
            .map(move |(k, v)| (format!("{}.{}", name, k), v))
    };

    group("color", &config.base_colors)
        .chain(group("sizing", &config.sizing))
        .chain(group("font", &config.font))
        .chain(group("color", &theme.colors))
}
