//! edugatectl - operator CLI for EduGate
//!
//! Usage:
//!   edugatectl tools
//!   edugatectl describe delete_user
//!   edugatectl --allow-destructive call delete_user -p '{"username":"jane.doe"}' --confirm --endpoint http://school/rpc

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "Starting edugatectl");
    cli.execute().await
}
