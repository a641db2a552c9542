use miette::Diagnostic;
use thiserror::Error;

/// Main error type for design-tokens operations
#[derive(Error, Diagnostic, Debug)]
pub enum TokenError {
    #[error("IO error: {0}")]
    #[diagnostic(code(design_tokens::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(design_tokens::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("JSON error: {0}")]
    #[diagnostic(code(design_tokens::json))]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(code(design_tokens::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(design_tokens::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Reference error: {message}")]
    #[diagnostic(code(design_tokens::reference))]
    Reference {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(design_tokens::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Watch error: {message}")]
    #[diagnostic(code(design_tokens::watch))]
    Watch { message: String },
}

impl TokenError {
    /// Shorthand for a configuration error without help text.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Shorthand for a build error without help text.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TokenError>;
