use clap::Parser;
use tracing_subscriber::EnvFilter;

use prompt_catalog_cli::{run, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("prompt_catalog=debug,prompt_catalog_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = run(cli);
    std::process::exit(exit_code);
}
