use clap::{Parser, Subcommand};

use edugate_safety::GateConfig;
use crate::commands;

/// EduGate CLI - inspect and call gated school-management operations
#[derive(Parser, Debug)]
#[command(name = "edugatectl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Gate configuration file (YAML)
    #[arg(long, short = 'c', global = true, env = "EDUGATE_CONFIG")]
    pub config: Option<String>,

    /// Allow destructive and critical operations
    #[arg(long, global = true)]
    pub allow_destructive: bool,

    /// Do not require the confirmation marker for gated operations
    #[arg(long, global = true)]
    pub no_confirmation: bool,

    /// Timeout for a single remote call, in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List operations offered under the current configuration
    Tools {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Include operations denied by policy
        #[arg(long)]
        all: bool,
    },

    /// Show tier, warning, policy decision and schema of an operation
    Describe {
        /// Operation name
        operation: String,
    },

    /// Call an operation on the remote school server
    Call {
        /// Operation name
        operation: String,

        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,

        /// Confirm a destructive or critical operation
        #[arg(long)]
        confirm: bool,

        /// JSON-RPC endpoint of the school server
        #[arg(long, env = "EDUGATE_ENDPOINT")]
        endpoint: String,
    },
}

impl Cli {
    /// Resolve the gate configuration: file, then environment, then flags
    pub fn gate_config(&self) -> anyhow::Result<GateConfig> {
        let base = match &self.config {
            Some(path) => GateConfig::from_yaml_file(path)?,
            None => GateConfig::default(),
        };

        let mut config = base.with_env_overrides(|key| std::env::var(key).ok());
        if self.allow_destructive {
            config.allow_destructive = true;
        }
        if self.no_confirmation {
            config.require_confirmation = false;
        }
        if let Some(secs) = self.timeout {
            config.remote_timeout_secs = (secs > 0).then_some(secs);
        }
        Ok(config)
    }

    pub async fn execute(self) -> anyhow::Result<()> {
        let config = self.gate_config()?;

        match self.command {
            Commands::Tools { output, all } => commands::tools::execute(config, &output, all),
            Commands::Describe { operation } => commands::describe::execute(config, &operation),
            Commands::Call {
                operation,
                params,
                confirm,
                endpoint,
            } => commands::call::execute(config, &operation, &params, confirm, &endpoint).await,
        }
    }
}
