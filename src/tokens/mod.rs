//! Theme flattening, colour variants and the scratch token tree.

mod inheritance;
mod materialize;
mod variants;

pub use inheritance::{resolve_theme_inheritance, ResolvedTheme};
pub use materialize::{materialize, ScratchDir, SCRATCH_DIR_NAME};
pub use variants::{expand_color_variants, variant_names, VARIANT_SUFFIXES};
