//! Theme inheritance.

use std::collections::{HashMap, HashSet};

use crate::config::{ThemeDefinition, TokenMap};
use crate::error::{Result, TokenError};

/// A theme with its ancestors' colours merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub name: String,
    pub colors: TokenMap,
}

/// Flatten `extends` chains, keeping input order.
///
/// Chains resolve transitively: a grandparent's colours reach the child unless
/// an intermediate theme overrides them. Each level is a shallow per-key
/// override; keys keep the position they first appeared at, new child keys are
/// appended.
pub fn resolve_theme_inheritance(themes: &[ThemeDefinition]) -> Result<Vec<ResolvedTheme>> {
    let by_name: HashMap<&str, &ThemeDefinition> =
        themes.iter().map(|t| (t.name.as_str(), t)).collect();

    let mut resolved: HashMap<String, TokenMap> = HashMap::new();
    let mut resolving: HashSet<String> = HashSet::new();

    themes
        .iter()
        .map(|theme| {
            let colors = resolve_single(theme, &by_name, &mut resolved, &mut resolving)?;
            Ok(ResolvedTheme {
                name: theme.name.clone(),
                colors,
            })
        })
        .collect()
}

fn resolve_single(
    theme: &ThemeDefinition,
    by_name: &HashMap<&str, &ThemeDefinition>,
    resolved: &mut HashMap<String, TokenMap>,
    resolving: &mut HashSet<String>,
) -> Result<TokenMap> {
    if let Some(colors) = resolved.get(&theme.name) {
        return Ok(colors.clone());
    }

    let Some(parent_name) = theme.extends.as_deref() else {
        resolved.insert(theme.name.clone(), theme.colors.clone());
        return Ok(theme.colors.clone());
    };

    if parent_name == theme.name {
        return Err(TokenError::Config {
            message: format!("Theme \"{}\" cannot extend itself", theme.name),
            help: None,
        });
    }

    let parent = by_name.get(parent_name).ok_or_else(|| TokenError::Config {
        message: format!(
            "Theme \"{}\" extends \"{}\" which does not exist",
            theme.name, parent_name
        ),
        help: Some(format!("Define a theme named \"{}\" or remove 'extends'", parent_name)),
    })?;

    if !resolving.insert(theme.name.clone()) {
        return Err(TokenError::Config {
            message: format!("Circular theme inheritance involving \"{}\"", theme.name),
            help: Some("Check the 'extends' fields of your themes".to_string()),
        });
    }

    let mut colors = resolve_single(parent, by_name, resolved, resolving)?;
    resolving.remove(&theme.name);

    for (key, value) in &theme.colors {
        colors.insert(key.clone(), value.clone());
    }

    tracing::debug!(theme = %theme.name, parent = parent_name, "resolved theme inheritance");
    resolved.insert(theme.name.clone(), colors.clone());
    Ok(colors)
}
