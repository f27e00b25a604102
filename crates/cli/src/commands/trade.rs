//! Buy and sell commands.

use anyhow::{anyhow, Result};
use clap::Args;
use playmarket_core::Side;
use playmarket_engine::{TradeExecutor, TradeReceipt};
use rust_decimal::Decimal;

/// Arguments for the buy command.
#[derive(Args, Debug, Clone)]
pub struct BuyArgs {
    /// User placing the trade.
    #[arg(long)]
    pub user: String,

    /// Market to trade.
    #[arg(long)]
    pub market: String,

    /// Side to buy: "yes" or "no".
    #[arg(long)]
    pub side: String,

    /// Cash amount to spend.
    #[arg(long)]
    pub amount: Decimal,
}

/// Arguments for the sell command.
#[derive(Args, Debug, Clone)]
pub struct SellArgs {
    /// User placing the trade.
    #[arg(long)]
    pub user: String,

    /// Market to trade.
    #[arg(long)]
    pub market: String,

    /// Side to sell: "yes" or "no".
    #[arg(long)]
    pub side: String,

    /// Number of shares to sell.
    #[arg(long)]
    pub shares: Decimal,
}

fn parse_side(s: &str) -> Result<Side> {
    Side::parse(s).ok_or_else(|| anyhow!("side must be \"yes\" or \"no\", got {s:?}"))
}

fn print_receipt(receipt: &TradeReceipt) {
    println!(
        "{} {} {} shares @ {:.4} (cash {:.2})",
        receipt.direction.as_str(),
        receipt.side.as_str(),
        receipt.shares.round_dp(4),
        receipt.effective_price,
        receipt.amount
    );
    println!(
        "  market now yes={:.4} no={:.4}, balance {:.2}",
        receipt.price_yes, receipt.price_no, receipt.new_balance
    );
}

/// Runs the buy command.
///
/// # Errors
/// Returns an error if the trade is rejected or storage fails.
pub async fn run_buy(args: BuyArgs, config_path: &str) -> Result<()> {
    let side = parse_side(&args.side)?;
    let (config, db) = super::connect(config_path).await?;
    let executor = TradeExecutor::new(db.pool(), config.trading);

    let receipt = executor
        .execute_buy(&args.user, &args.market, side, args.amount)
        .await?;
    print_receipt(&receipt);
    Ok(())
}

/// Runs the sell command.
///
/// # Errors
/// Returns an error if the trade is rejected or storage fails.
pub async fn run_sell(args: SellArgs, config_path: &str) -> Result<()> {
    let side = parse_side(&args.side)?;
    let (config, db) = super::connect(config_path).await?;
    let executor = TradeExecutor::new(db.pool(), config.trading);

    let receipt = executor
        .execute_sell(&args.user, &args.market, side, args.shares)
        .await?;
    print_receipt(&receipt);
    Ok(())
}
