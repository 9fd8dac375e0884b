//! He3 Competitive Intelligence CLI
//!
//! Command-line interface for inspecting competing agents.

use clap::{Parser, Subcommand};
use he3_intel::intel::render_briefing;
use he3_intel::{
    AgentRoster, CompetitiveIntel, Config, ContractRegistry, IndexerPositionSource, Result,
    RpcBalanceSource,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "he3-intel")]
#[command(about = "Competitive intelligence for He3 game agents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Gather and analyze competitor data, printed as JSON
    Intel {
        /// Agent whose competitors to analyze (defaults to every agent)
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Print a plain-text competitor briefing
    Briefing {
        /// Agent whose competitors to analyze (defaults to every agent)
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Rank agents by He3 balance
    Rank,

    /// List configured agents
    Agents,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Intel { viewer } => {
            let service = build_service(&config)?;
            let intel = service.competitive_intelligence(viewer.as_deref()).await?;
            let analyses = service.analyze_competitor_strategies(&intel);
            let output = serde_json::json!({
                "intelligence": intel,
                "analysis": analyses,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Briefing { viewer } => {
            let service = build_service(&config)?;
            let intel = service.competitive_intelligence(viewer.as_deref()).await?;
            let analyses = service.analyze_competitor_strategies(&intel);
            println!("{}", render_briefing(&intel, &analyses));
        }
        Commands::Rank => {
            run_rank(&config).await?;
        }
        Commands::Agents => {
            let roster = AgentRoster::from_config(&config)?;
            for (agent_id, address) in roster.all() {
                let credentials = if roster.wallet(&agent_id).is_some() {
                    "key loaded"
                } else {
                    "address only"
                };
                println!("{}\t{}\t{}", agent_id, address, credentials);
            }
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn build_service(config: &Config) -> Result<CompetitiveIntel> {
    let roster = AgentRoster::from_config(config)?;
    let registry = ContractRegistry::new(&config.contracts, &config.agents);
    let balances = RpcBalanceSource::new(&config.rpc)?;
    let positions = IndexerPositionSource::new(
        config.indexer_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;

    tracing::info!(
        agents = roster.len(),
        indexer = %config.indexer_url,
        "Intelligence service ready"
    );

    Ok(CompetitiveIntel::new(
        Arc::new(registry),
        Arc::new(roster),
        Arc::new(balances),
        Arc::new(positions),
        config.thresholds,
    ))
}

async fn run_rank(config: &Config) -> Result<()> {
    let service = build_service(config)?;
    let ranked = service.rank_agents_by_target().await?;

    println!("{}", serde_json::to_string_pretty(&ranked)?);

    let missing: Vec<String> = service
        .roster()
        .all()
        .into_iter()
        .map(|(agent_id, _)| agent_id)
        .filter(|agent_id| !ranked.iter().any(|r| &r.agent_id == agent_id))
        .collect();

    if !missing.is_empty() {
        tracing::warn!(
            missing = missing.len(),
            total = service.roster().len(),
            "Some agents could not be ranked"
        );
        eprintln!("Missing from ranking: {}", missing.join(", "));
    }

    Ok(())
}
