use clap::{Parser, Subcommand};

mod commands;

use commands::{
    BuyArgs, CreateMarketArgs, CreateUserArgs, HistoryArgs, PositionsArgs, ResolveArgs, SellArgs,
};

#[derive(Parser)]
#[command(name = "playmarket")]
#[command(about = "Play-money prediction market on a constant-product pool", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new market with equal seed reserves
    CreateMarket(CreateMarketArgs),
    /// Create a new user account with the starting balance
    CreateUser(CreateUserArgs),
    /// Buy shares by spending cash
    Buy(BuyArgs),
    /// Sell shares back to the pool
    Sell(SellArgs),
    /// Resolve a market and pay out winning positions
    Resolve(ResolveArgs),
    /// List open markets with current prices
    Markets,
    /// Show a user's balance and positions
    Positions(PositionsArgs),
    /// Show a user's trade history
    History(HistoryArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::CreateMarket(args) => {
            commands::run_create_market(args, &cli.config).await?;
        }
        Commands::CreateUser(args) => {
            commands::run_create_user(args, &cli.config).await?;
        }
        Commands::Buy(args) => {
            commands::run_buy(args, &cli.config).await?;
        }
        Commands::Sell(args) => {
            commands::run_sell(args, &cli.config).await?;
        }
        Commands::Resolve(args) => {
            commands::run_resolve(args, &cli.config).await?;
        }
        Commands::Markets => {
            commands::run_markets(&cli.config).await?;
        }
        Commands::Positions(args) => {
            commands::run_positions(args, &cli.config).await?;
        }
        Commands::History(args) => {
            commands::run_history(args, &cli.config).await?;
        }
    }

    Ok(())
}
