//! Read-only status commands: market listing, positions, trade history.

use anyhow::Result;
use clap::Args;
use playmarket_core::Side;
use playmarket_data::Repositories;

/// Arguments for the positions command.
#[derive(Args, Debug, Clone)]
pub struct PositionsArgs {
    /// User whose positions to show.
    #[arg(long)]
    pub user: String,

    /// Include settled zero-share rows.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the history command.
#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// User whose trades to show.
    #[arg(long)]
    pub user: String,

    /// Maximum number of trades to show, newest first.
    #[arg(long, default_value_t = 20)]
    pub limit: i64,
}

/// Runs the markets command: lists open markets with current prices.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn run_markets(config_path: &str) -> Result<()> {
    let (_, db) = super::connect(config_path).await?;
    let markets = Repositories::new(db.pool()).markets.query_open().await?;

    if markets.is_empty() {
        println!("No open markets.");
        return Ok(());
    }

    for market in &markets {
        let pool = market.pool();
        println!("{}  {}", market.id, market.question);
        println!(
            "  yes={:.4} no={:.4}  volume={:.2}  closes {}",
            pool.price(Side::Yes),
            pool.price(Side::No),
            market.total_volume,
            market.closes_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

/// Runs the positions command.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn run_positions(args: PositionsArgs, config_path: &str) -> Result<()> {
    let (_, db) = super::connect(config_path).await?;
    let repos = Repositories::new(db.pool());
    let positions = if args.all {
        repos.positions.query_all_by_user(&args.user).await?
    } else {
        repos.positions.query_held_by_user(&args.user).await?
    };

    if let Some(user) = repos.users.get_by_id(&args.user).await? {
        println!("{}  balance {:.2}", user.id, user.balance);
    }

    if positions.is_empty() {
        println!("No positions.");
        return Ok(());
    }

    for position in &positions {
        println!(
            "  {} {}: {:.4} shares @ {:.4} (cost {:.2}, realized {:.2})",
            position.market_id,
            position.side,
            position.shares,
            position.avg_price,
            position.cost_basis(),
            position.realized
        );
    }
    Ok(())
}

/// Runs the history command.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn run_history(args: HistoryArgs, config_path: &str) -> Result<()> {
    let (_, db) = super::connect(config_path).await?;
    let trades = Repositories::new(db.pool())
        .trades
        .query_by_user(&args.user, args.limit)
        .await?;

    if trades.is_empty() {
        println!("No trades.");
        return Ok(());
    }

    for trade in &trades {
        println!(
            "{}  {} {} {} {:.4} shares for {:.2} @ {:.4}",
            trade.created_at.format("%Y-%m-%d %H:%M:%S"),
            trade.market_id,
            trade.direction,
            trade.side,
            trade.shares,
            trade.amount,
            trade.price
        );
    }
    Ok(())
}
