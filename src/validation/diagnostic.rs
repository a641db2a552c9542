//! Findings from config checks and theme builds.
//!
//! A finding may name the theme it came from; builds run one theme at a time
//! and stamp the theme on whatever their transforms reported.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable identifier, e.g. `design_tokens::transform::oklch`.
    pub code: &'static str,
    pub message: String,
    pub help: Option<String>,
    /// Theme whose build or config produced the finding.
    pub theme: Option<String>,
}

impl Diagnostic {
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message.into())
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message.into())
    }

    fn new(severity: Severity, code: &'static str, message: String) -> Self {
        Self {
            severity,
            code,
            message,
            help: None,
            theme: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Attribute to `theme` unless a theme is already named.
    pub fn in_theme(mut self, theme: &str) -> Self {
        self.theme.get_or_insert_with(|| theme.to_string());
        self
    }
}

/// `[theme] message`, or the bare message when no theme is attached.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.theme {
            Some(theme) => write!(f, "[{}] {}", theme, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Ordered collection of findings.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.0.iter().filter(|d| d.severity == severity).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Attribute every finding without a theme to `theme`.
    pub fn in_theme(self, theme: &str) -> Self {
        self.0.into_iter().map(|d| d.in_theme(theme)).collect()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counts_by_severity() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.push(Diagnostic::warning("design_tokens::a", "first"));
        diagnostics.push(Diagnostic::error("design_tokens::b", "second"));
        diagnostics.push(Diagnostic::warning("design_tokens::c", "third"));

        assert_eq!(diagnostics.count(Severity::Warning), 2);
        assert_eq!(diagnostics.count(Severity::Error), 1);
    }

    #[test]
    fn test_theme_attribution_keeps_existing_theme() {
        let diagnostics: Diagnostics = [
            Diagnostic::warning("design_tokens::transform::oklch", "kept 'tomato'"),
            Diagnostic::warning("design_tokens::x", "from config").in_theme("light"),
        ]
        .into_iter()
        .collect();

        let lines: Vec<String> = diagnostics
            .in_theme("dark")
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(lines, vec!["[dark] kept 'tomato'", "[light] from config"]);
    }

    #[test]
    fn test_display_without_theme() {
        let d = Diagnostic::error("design_tokens::x", "odd").with_help("fix it");
        assert_eq!(d.to_string(), "odd");
        assert_eq!(d.help.as_deref(), Some("fix it"));
        assert_eq!(d.severity.label(), "error");
    }
}
