//! User creation command.

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use playmarket_data::{Repositories, UserRecord};

/// Arguments for the create-user command.
#[derive(Args, Debug, Clone)]
pub struct CreateUserArgs {
    /// User identifier.
    #[arg(long)]
    pub id: String,

    /// Grant resolution authority.
    #[arg(long)]
    pub admin: bool,
}

/// Runs the create-user command.
///
/// # Errors
/// Returns an error if the insert fails.
pub async fn run_create_user(args: CreateUserArgs, config_path: &str) -> Result<()> {
    let (config, db) = super::connect(config_path).await?;

    let mut user = UserRecord::new(args.id, config.trading.starting_balance, Utc::now());
    user.is_admin = args.admin;
    Repositories::new(db.pool()).users.insert(&user).await?;

    println!(
        "Created user {} with balance {}{}",
        user.id,
        user.balance,
        if user.is_admin { " (admin)" } else { "" }
    );
    Ok(())
}
