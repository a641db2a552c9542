use clap::Parser;
use design_tokens::cli::{Cli, Commands};
use design_tokens::output::Printer;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => design_tokens::cli::build::run(args, &printer)?,
        Commands::Init(args) => design_tokens::cli::init::run(args, &printer)?,
        Commands::Validate(args) => design_tokens::cli::validate::run(args, &printer)?,
        Commands::Completions(args) => design_tokens::cli::completions::run(args)?,
    }

    Ok(())
}
