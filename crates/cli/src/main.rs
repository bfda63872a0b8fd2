//! Cloud Cost Optimizer CLI
//!
//! A command-line tool for running what-if cost simulations and viewing
//! ranked optimization recommendations.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{recommendations, rules, simulate};

/// Cloud Cost Optimizer CLI
#[derive(Parser)]
#[command(name = "cco")]
#[command(author, version, about = "CLI for the Cloud Cost Optimizer", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via CCO_API_URL env var)
    #[arg(long, env = "CCO_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a what-if simulation for an optimization action
    Simulate {
        /// Resource ids to simulate (repeatable)
        #[arg(long = "resource", short, required = true)]
        resources: Vec<String>,

        /// Optimization action (offhours, commitment, storage, rightsizing, cleanup)
        #[arg(long, short)]
        action: String,

        /// Daily stop time for off-hours schedules (HH:MM)
        #[arg(long)]
        stop_at: Option<String>,

        /// Daily start time for off-hours schedules (HH:MM)
        #[arg(long)]
        start_at: Option<String>,

        /// Schedule timezone
        #[arg(long)]
        timezone: Option<String>,

        /// Commitment term in years
        #[arg(long)]
        commit_years: Option<u32>,

        /// Target storage tier
        #[arg(long)]
        target_tier: Option<String>,

        /// Storage retention in days before tier transition
        #[arg(long)]
        retention_days: Option<u32>,
    },

    /// Get recommendations or rules
    #[command(subcommand)]
    Get(GetCommands),
}

#[derive(Subcommand)]
pub enum GetCommands {
    /// Get the top optimization recommendations
    Recommendations,

    /// Get the loaded optimization rules
    Rules,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize client
    let client = client::ApiClient::new(&cli.api_url)?;

    // Execute command
    match cli.command {
        Commands::Simulate {
            resources,
            action,
            stop_at,
            start_at,
            timezone,
            commit_years,
            target_tier,
            retention_days,
        } => {
            let overrides = simulate::ParamOverrides {
                stop_at,
                start_at,
                timezone,
                commit_years,
                target_tier,
                retention_days,
            };
            simulate::run_simulation(&client, resources, &action, overrides, cli.format).await?;
        }
        Commands::Get(get_cmd) => match get_cmd {
            GetCommands::Recommendations => {
                recommendations::get_recommendations(&client, cli.format).await?;
            }
            GetCommands::Rules => {
                rules::get_rules(&client, cli.format).await?;
            }
        },
    }

    Ok(())
}
