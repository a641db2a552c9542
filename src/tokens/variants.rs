//! Colour-space variant slots.

use crate::config::TokenMap;

/// Suffixes added for each colour, in emission order.
pub const VARIANT_SUFFIXES: [&str; 3] = ["rgb", "hsl", "oklch"];

/// Add `-rgb`, `-hsl` and `-oklch` entries for every colour.
///
/// Variants carry the source value unchanged; the value transforms rewrite
/// them by name later. Originals come first, followed by each colour's
/// variants in input order.
pub fn expand_color_variants(colors: &TokenMap) -> TokenMap {
    let mut expanded = TokenMap::with_capacity(colors.len() * 4);
    expanded.extend(colors.iter().map(|(k, v)| (k.clone(), v.clone())));

    for (name, value) in colors {
        for suffix in VARIANT_SUFFIXES {
            expanded.insert(format!("{}-{}", name, suffix), value.clone());
        }
    }

    expanded
}

/// Variant names for `name`.
pub fn variant_names(name: &str) -> impl Iterator<Item = String> + '_ {
    VARIANT_SUFFIXES.iter().map(move |s| format!("{}-{}", name, s))
}
