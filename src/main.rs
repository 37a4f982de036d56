// ABOUTME: Entry point for the stackshift CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::Context;
use stackshift::error::Result;
use stackshift::output::Output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(cli.output_mode());
    let result = run(cli).await;

    if let Err(e) = result {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init {
            ref bucket,
            ref stack,
            force,
        } => commands::init(bucket.as_deref(), stack.as_deref(), force),
        Commands::Deploy {
            ref publish,
            ref update,
        } => commands::deploy(Context::resolve(&cli)?, publish, update).await,
        Commands::Publish { ref publish } => {
            commands::publish(Context::resolve(&cli)?, publish).await
        }
        Commands::Update {
            ref update,
            ref artifact,
        } => commands::update(Context::resolve(&cli)?, update, artifact.as_deref()).await,
        Commands::Check {
            ref publish,
            ref update,
        } => commands::check(Context::resolve(&cli)?, publish, update).await,
    }
}
