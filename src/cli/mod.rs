pub mod build;
pub mod completions;
pub mod init;
pub mod validate;

use clap::{Parser, Subcommand};

/// design-tokens - Themed design token builder
#[derive(Parser, Debug)]
#[command(name = "design-tokens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build CSS, SCSS and TypeScript tokens for every theme
    Build(build::BuildArgs),

    /// Write a starter design-tokens.config.yaml
    Init(init::InitArgs),

    /// Check a config file without building
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
