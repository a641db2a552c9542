//! Status lines for the `design-tokens` CLI.
//!
//! Everything goes to stderr in Cargo's layout: a right-aligned verb, then the
//! message. Colour is used only when stderr is a terminal.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::validation::{Diagnostic, Severity};

const VERB_WIDTH: usize = 12;

/// Colour of a status verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Done,
    Info,
    Warn,
    Fail,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Done => "\x1b[1;32m",
            Tone::Info => "\x1b[1;36m",
            Tone::Warn => "\x1b[1;33m",
            Tone::Fail => "\x1b[1;31m",
        }
    }
}

impl From<Severity> for Tone {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Tone::Warn,
            Severity::Error => Tone::Fail,
        }
    }
}

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const PATH: &str = "\x1b[36m";

pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A step finished: `Generated`, `Finished`, `Created`.
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(&self.line(Tone::Done, verb, message));
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(&self.line(Tone::Info, verb, message));
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(&self.line(Tone::Warn, verb, message));
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(&self.line(Tone::Fail, verb, message));
    }

    /// A check or build finding, with its help text on the next line.
    pub fn diagnostic(&self, diagnostic: &Diagnostic) {
        self.emit(&self.render_diagnostic(diagnostic));
    }

    /// A path relative to the working directory, highlighted.
    pub fn path(&self, path: &Path) -> String {
        self.paint(PATH, &display_path(path))
    }

    fn line(&self, tone: Tone, verb: &str, message: &str) -> String {
        format!("{} {}", self.paint(tone.ansi(), &format!("{verb:>VERB_WIDTH$}")), message)
    }

    fn render_diagnostic(&self, d: &Diagnostic) -> String {
        let label = self.paint(Tone::from(d.severity).ansi(), d.severity.label());
        let mut out = format!("  {}[{}]: {}", label, d.code, d);
        if let Some(help) = &d.help {
            out.push_str(&format!("\n    {}", self.paint(DIM, &format!("help: {}", help))));
        }
        out
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn emit(&self, text: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", text);
    }
}

/// `plural(1, "theme", "themes")` is "1 theme".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { pluralized })
}

/// Relative to the working directory when possible, otherwise as given.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));
    match relative {
        Some(r) if r.as_os_str().is_empty() => ".".to_string(),
        Some(r) => r.display().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain() -> Printer {
        Printer { color: false }
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "theme", "themes"), "1 theme");
        assert_eq!(plural(0, "file", "files"), "0 files");
        assert_eq!(plural(3, "color", "colors"), "3 colors");
    }

    #[test]
    fn test_display_path_outside_cwd() {
        let p = Path::new("/nonexistent/path/to/tokens");
        assert_eq!(display_path(p), "/nonexistent/path/to/tokens");
    }

    #[test]
    fn test_verb_column() {
        assert_eq!(
            plain().line(Tone::Done, "Generated", "output/light.css"),
            "   Generated output/light.css"
        );
    }

    #[test]
    fn test_colour_wraps_verb_only() {
        let printer = Printer { color: true };
        assert_eq!(
            printer.line(Tone::Fail, "Failed", "light"),
            "\x1b[1;31m      Failed\x1b[0m light"
        );
    }

    #[test]
    fn test_diagnostic_with_theme_and_help() {
        let d = Diagnostic::warning("design_tokens::validate::empty-theme", "No colors")
            .with_help("Add colors")
            .in_theme("blank");
        assert_eq!(
            plain().render_diagnostic(&d),
            "  warning[design_tokens::validate::empty-theme]: [blank] No colors\n    help: Add colors"
        );
    }
}
