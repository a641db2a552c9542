//! Configuration checks.
//!
//! Runs a suite of static checks against a resolved config and reports
//! errors and warnings. Used by `design-tokens validate`.

mod checks;
mod diagnostic;

pub use diagnostic::{Diagnostic, Diagnostics, Severity};

use crate::config::ResolvedConfig;
use crate::output::{plural, Printer};

/// Run all checks against the config.
pub fn validate_config(config: &ResolvedConfig) -> Diagnostics {
    let mut result = Diagnostics::new();

    result.extend(checks::check_inheritance(config));
    result.extend(checks::check_empty_themes(config));
    result.extend(checks::check_formats(config));
    result.extend(checks::check_alias_refs(config));
    result.extend(checks::check_variant_collisions(config));

    result
}

/// Print diagnostics to stderr, followed by a summary line.
pub fn print_diagnostics(result: &Diagnostics, printer: &Printer) {
    for d in result.iter() {
        printer.diagnostic(d);
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);

    if errors > 0 {
        printer.error(
            "Failed",
            &format!(
                "validation: {}, {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
        );
    } else if warnings > 0 {
        printer.warning(
            "Checked",
            &format!("config ({})", plural(warnings, "warning", "warnings")),
        );
    } else {
        printer.status("Checked", "config");
    }
}
