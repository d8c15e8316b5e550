use clap::Parser;
use rightsizer_cli::{cli::Cli, config};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> rightsizer_cli::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref())?;

    // Execute command
    rightsizer_cli::run_command(cli.command, &config)
}
