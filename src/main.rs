mod api;
mod cli;
mod config;
mod data;
mod error;
mod models;
mod screens;
mod services;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::screens::PredictionForm;

#[derive(Parser)]
#[command(name = "ipl-insights")]
#[command(about = "IPL match, player and prediction insights")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List players, optionally filtered by name
    Players {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show upcoming matches
    Matches,
    /// Head-to-head, prediction and top players for one fixture
    Fixture {
        #[arg(short, long)]
        index: usize,
    },
    /// Compare two teams side by side
    Compare {
        #[arg(long)]
        team1: String,
        #[arg(long)]
        team2: String,
    },
    /// Teams known to the prediction service
    Teams,
    /// Venues known to the prediction service
    Venues,
    /// Request a win probability for a chase in progress
    Predict {
        #[arg(long)]
        batting_team: String,
        #[arg(long)]
        bowling_team: String,
        #[arg(long)]
        venue: String,
        #[arg(long)]
        target: String,
        #[arg(long)]
        current_score: String,
        #[arg(long)]
        wickets_left: String,
        #[arg(long)]
        balls_left: String,
    },
    /// Ask the IPL Guru a question
    Ask {
        #[arg(short, long)]
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port }) => {
            let port = port.unwrap_or(config.port);
            tracing::info!("Starting IPL Insights API server on port {}", port);
            api::serve(&config, port).await?;
        }
        Some(Commands::Players { search }) => {
            cli::list_players(&config, search.as_deref()).await?;
        }
        Some(Commands::Matches) => {
            cli::list_matches(&config).await?;
        }
        Some(Commands::Fixture { index }) => {
            cli::show_fixture(&config, index).await?;
        }
        Some(Commands::Compare { team1, team2 }) => {
            tracing::info!("Comparing {} and {}", team1, team2);
            cli::compare_teams(&config, &team1, &team2).await?;
        }
        Some(Commands::Teams) => {
            cli::list_teams(&config).await?;
        }
        Some(Commands::Venues) => {
            cli::list_venues(&config).await?;
        }
        Some(Commands::Predict {
            batting_team,
            bowling_team,
            venue,
            target,
            current_score,
            wickets_left,
            balls_left,
        }) => {
            let form = PredictionForm {
                batting_team,
                bowling_team,
                venue,
                target,
                current_score,
                wickets_left,
                balls_left,
            };
            cli::predict(&config, form).await?;
        }
        Some(Commands::Ask { question }) => {
            cli::ask(&config, &question).await?;
        }
        None => {
            // Default to serving
            tracing::info!("Starting IPL Insights API server on port {}", config.port);
            api::serve(&config, config.port).await?;
        }
    }

    Ok(())
}
