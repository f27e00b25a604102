//! Market resolution command.

use anyhow::{anyhow, Result};
use clap::Args;
use playmarket_core::Side;
use playmarket_engine::TradeExecutor;

/// Arguments for the resolve command.
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Admin user performing the resolution.
    #[arg(long)]
    pub admin: String,

    /// Market to resolve.
    #[arg(long)]
    pub market: String,

    /// Declared outcome: "yes" or "no".
    #[arg(long)]
    pub outcome: String,

    /// Optional note recorded with the resolution.
    #[arg(long)]
    pub note: Option<String>,
}

/// Runs the resolve command.
///
/// # Errors
/// Returns an error if the caller is not an admin, the market is not open,
/// or storage fails.
pub async fn run_resolve(args: ResolveArgs, config_path: &str) -> Result<()> {
    let resolution = Side::parse(&args.outcome)
        .ok_or_else(|| anyhow!("outcome must be \"yes\" or \"no\", got {:?}", args.outcome))?;

    let (config, db) = super::connect(config_path).await?;
    let executor = TradeExecutor::new(db.pool(), config.trading);

    let summary = executor
        .resolve_market(&args.admin, &args.market, resolution, args.note)
        .await?;

    println!(
        "Resolved {} as {}: {} positions settled, {} winners paid {:.2}",
        summary.market_id,
        summary.resolution.as_str(),
        summary.positions_settled,
        summary.winners,
        summary.total_paid_out
    );
    Ok(())
}
