use anyhow::Result;
use avdboot::cli::{Cli, Commands};
use avdboot::{commands, console};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // CI logs usually end up in a file; only use ANSI on a real TTY.
    let use_color = atty::is(atty::Stream::Stdout);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_target(true)
        .with_ansi(use_color)
        .init();

    // Dispatch to appropriate command handler
    let result = match cli.cmd {
        Commands::Start(args) => commands::cmd_start(args).await,
        Commands::Ls(args) => commands::cmd_ls(args).await,
    };

    // Exactly one fatal message per failed run, then a non-zero exit.
    if let Err(e) = result {
        console::fail(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
