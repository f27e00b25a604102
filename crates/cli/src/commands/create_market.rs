//! Market creation command.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use playmarket_data::{MarketRecord, Repositories};

/// Arguments for the create-market command.
#[derive(Args, Debug, Clone)]
pub struct CreateMarketArgs {
    /// The question the market trades on.
    #[arg(long)]
    pub question: String,

    /// Trading deadline in ISO 8601 format (e.g. "2026-06-30T00:00:00Z").
    #[arg(long)]
    pub closes_at: String,

    /// Market identifier (generated if not provided).
    #[arg(long)]
    pub id: Option<String>,
}

/// Runs the create-market command.
///
/// # Errors
/// Returns an error if the deadline cannot be parsed, the deadline is not
/// in the future, or the insert fails.
pub async fn run_create_market(args: CreateMarketArgs, config_path: &str) -> Result<()> {
    let closes_at: DateTime<Utc> = args
        .closes_at
        .parse()
        .map_err(|e| anyhow!("invalid closes-at timestamp: {e}"))?;
    let now = Utc::now();
    if closes_at <= now {
        return Err(anyhow!("closes-at must be in the future"));
    }

    let (config, db) = super::connect(config_path).await?;
    let id = args
        .id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let market = MarketRecord::new(
        id,
        args.question,
        config.trading.initial_pool_size,
        closes_at,
        now,
    );
    Repositories::new(db.pool()).markets.insert(&market).await?;

    println!("Created market {} ({})", market.id, market.question);
    println!(
        "  seed reserves {}/{}, closes {}",
        market.pool_yes,
        market.pool_no,
        market.closes_at.format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}
