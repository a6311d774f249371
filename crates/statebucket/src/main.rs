mod commands;
mod render;

use clap::{Parser, Subcommand};
use colored::Colorize;
use statebucket_cloud::BootstrapError;
use statebucket_config::BootstrapConfig;

#[derive(Parser)]
#[command(name = "statebucket")]
#[command(
    about = "Ensure the remote state bucket exists with versioning, encryption and public access blocked",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Target region (defaults to AWS_REGION, AWS_DEFAULT_REGION, then ap-southeast-2)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Bucket name prefix; the account id is appended
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// Print the run report as JSON before the result line
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the state bucket if missing and (re-)apply its settings (default)
    Ensure,
    /// Show the derived bucket name and whether it exists, without changing anything
    Status,
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // stdout carries the result line, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), describe_error(&e));
        std::process::exit(1);
    }
}

/// Body of the `Error:` line, tagged with the failure class for bootstrap errors
fn describe_error(e: &anyhow::Error) -> String {
    match e.downcast_ref::<BootstrapError>() {
        Some(err) => format!("[{}] {}", err.kind(), err),
        None => e.to_string(),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if matches!(cli.command, Some(Commands::Version)) {
        println!("statebucket {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = BootstrapConfig::load(cli.region, cli.prefix)?;
    tracing::debug!("Resolved configuration: {:?}", config);

    match cli.command.unwrap_or(Commands::Ensure) {
        Commands::Ensure => commands::ensure::handle(&config, cli.json).await?,
        Commands::Status => commands::status::handle(&config, cli.json).await?,
        Commands::Version => unreachable!("Version is handled before config loading"),
    }

    Ok(())
}
