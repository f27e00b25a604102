//! End-to-end trade and resolution tests against a live `PostgreSQL` database.
//!
//! These tests verify the orchestrator's transactional behavior:
//! - Buys and sells persist reserves, balances, positions, and trade rows together
//! - Concurrent buys serialize so the trade log replays to the final reserves
//! - Resolution pays winners exactly once and is refused afterwards
//! - An admin trading their own market can resolve it without lock conflicts
//!
//! Set `DATABASE_URL` to run them (e.g.
//! `DATABASE_URL=postgresql://localhost/playmarket_test cargo test`);
//! each test exits early when no database is configured.

use chrono::{Duration, Utc};
use playmarket_core::{quote_buy, quote_sell, Pool, Side, TradingConfig};
use playmarket_data::{DatabaseClient, MarketRecord, Repositories, UserRecord};
use playmarket_engine::{EngineError, TradeExecutor};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

const EPSILON: Decimal = dec!(0.000001);

// =============================================================================
// Helper Functions
// =============================================================================

async fn test_db() -> Option<DatabaseClient> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let db = DatabaseClient::new(&url, 5)
        .await
        .expect("connect to test database");
    db.migrate().await.expect("apply migrations");
    Some(db)
}

fn test_executor(db: &DatabaseClient) -> TradeExecutor {
    TradeExecutor::new(db.pool(), TradingConfig::default())
}

async fn seed_user(db: &DatabaseClient, balance: Decimal, is_admin: bool) -> String {
    let id = format!("user-{}", Uuid::new_v4());
    let mut user = UserRecord::new(id.clone(), balance, Utc::now());
    user.is_admin = is_admin;
    Repositories::new(db.pool())
        .users
        .insert(&user)
        .await
        .expect("insert user");
    id
}

async fn seed_market(db: &DatabaseClient) -> String {
    let id = format!("market-{}", Uuid::new_v4());
    let market = MarketRecord::new(
        id.clone(),
        "Will the integration suite stay green?".to_string(),
        dec!(100),
        Utc::now() + Duration::hours(1),
        Utc::now(),
    );
    Repositories::new(db.pool())
        .markets
        .insert(&market)
        .await
        .expect("insert market");
    id
}

async fn balance_of(db: &DatabaseClient, user_id: &str) -> Decimal {
    Repositories::new(db.pool())
        .users
        .get_by_id(user_id)
        .await
        .expect("query user")
        .expect("user exists")
        .balance
}

async fn market_row(db: &DatabaseClient, market_id: &str) -> MarketRecord {
    Repositories::new(db.pool())
        .markets
        .get_by_id(market_id)
        .await
        .expect("query market")
        .expect("market exists")
}

// =============================================================================
// Buy / Sell Persistence Tests
// =============================================================================

#[tokio::test]
async fn buy_persists_reserves_balance_and_trade_row() {
    let Some(db) = test_db().await else { return };
    let executor = test_executor(&db);
    let user = seed_user(&db, dec!(1000), false).await;
    let market = seed_market(&db).await;

    let receipt = executor
        .execute_buy(&user, &market, Side::Yes, dec!(50))
        .await
        .expect("buy succeeds");

    assert_eq!(receipt.new_balance, dec!(950));
    assert!((receipt.shares - dec!(33.333333)).abs() < dec!(0.001));
    assert!((receipt.effective_price - dec!(1.5)).abs() < dec!(0.001));

    let stored = market_row(&db, &market).await;
    assert_eq!(stored.pool_no, dec!(150));
    assert!((stored.pool_yes - dec!(66.666667)).abs() < dec!(0.001));
    assert_eq!(stored.total_volume, dec!(50));
    assert_eq!(balance_of(&db, &user).await, dec!(950));

    let trades = Repositories::new(db.pool())
        .trades
        .query_by_market(&market)
        .await
        .expect("query trades");
    assert_eq!(trades.len(), 1);
    assert!(trades[0].is_buy());
    assert_eq!(trades[0].amount, dec!(50));
}

#[tokio::test]
async fn sell_round_trip_restores_reserves_and_cash() {
    let Some(db) = test_db().await else { return };
    let executor = test_executor(&db);
    let user = seed_user(&db, dec!(1000), false).await;
    let market = seed_market(&db).await;

    let buy = executor
        .execute_buy(&user, &market, Side::No, dec!(80))
        .await
        .expect("buy succeeds");
    let sell = executor
        .execute_sell(&user, &market, Side::No, buy.shares)
        .await
        .expect("sell succeeds");

    // Zero-fee pool: selling everything back undoes the buy.
    assert!((sell.amount - dec!(80)).abs() < EPSILON);
    assert!((balance_of(&db, &user).await - dec!(1000)).abs() < EPSILON);

    let stored = market_row(&db, &market).await;
    assert!((stored.pool_yes - dec!(100)).abs() < EPSILON);
    assert!((stored.pool_no - dec!(100)).abs() < EPSILON);
    // Volume counts both legs.
    assert!((stored.total_volume - dec!(160)).abs() < EPSILON);
}

#[tokio::test]
async fn oversell_rolls_back_without_touching_balance() {
    let Some(db) = test_db().await else { return };
    let executor = test_executor(&db);
    let user = seed_user(&db, dec!(1000), false).await;
    let market = seed_market(&db).await;

    let err = executor
        .execute_sell(&user, &market, Side::Yes, dec!(10))
        .await
        .expect_err("selling without a position fails");
    assert!(matches!(err, EngineError::InsufficientShares { .. }));

    assert_eq!(balance_of(&db, &user).await, dec!(1000));
    assert_eq!(market_row(&db, &market).await.total_volume, dec!(0));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_buys_replay_to_stored_reserves() {
    let Some(db) = test_db().await else { return };
    let executor = test_executor(&db);
    let market = seed_market(&db).await;

    let mut users = Vec::new();
    for _ in 0..8 {
        users.push(seed_user(&db, dec!(1000), false).await);
    }

    let mut handles = Vec::new();
    for (i, user) in users.into_iter().enumerate() {
        let executor = executor.clone();
        let market = market.clone();
        let side = if i % 2 == 0 { Side::Yes } else { Side::No };
        handles.push(tokio::spawn(async move {
            executor.execute_buy(&user, &market, side, dec!(25)).await
        }));
    }
    for handle in handles {
        handle.await.expect("task joins").expect("buy succeeds");
    }

    // The market row lock serializes the buys: replaying the committed log
    // against the seed pool must land on the stored reserves.
    let trades = Repositories::new(db.pool())
        .trades
        .query_by_market(&market)
        .await
        .expect("query trades");
    assert_eq!(trades.len(), 8);

    let mut pool = Pool::seeded(dec!(100));
    for trade in &trades {
        let side = trade.parsed_side().expect("stored side parses");
        if trade.is_buy() {
            pool = quote_buy(pool, side, trade.amount).pool;
        } else {
            pool = quote_sell(pool, side, trade.shares).pool;
        }
    }

    let stored = market_row(&db, &market).await;
    assert!((stored.pool_yes - pool.yes).abs() < EPSILON);
    assert!((stored.pool_no - pool.no).abs() < EPSILON);
    assert_eq!(stored.total_volume, dec!(200));
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_trading_own_market_resolves_without_lock_conflict() {
    let Some(db) = test_db().await else { return };
    let executor = test_executor(&db);
    let admin = seed_user(&db, dec!(1000), true).await;
    let market = seed_market(&db).await;

    // Buys by the resolving admin race the resolution itself; both paths
    // take the market row before the user row, so the only acceptable
    // rejection is the market leaving the OPEN state.
    let buy_task = {
        let executor = executor.clone();
        let admin = admin.clone();
        let market = market.clone();
        tokio::spawn(async move {
            let mut receipts = Vec::new();
            for _ in 0..10 {
                match executor.execute_buy(&admin, &market, Side::Yes, dec!(5)).await {
                    Ok(receipt) => receipts.push(receipt),
                    Err(EngineError::MarketNotOpen { .. }) => break,
                    Err(other) => panic!("unexpected buy failure: {other}"),
                }
            }
            receipts
        })
    };

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let summary = executor
        .resolve_market(&admin, &market, Side::Yes, None)
        .await
        .expect("resolve succeeds");
    let receipts = buy_task.await.expect("task joins");

    let spent: Decimal = receipts.iter().map(|r| r.amount).sum();
    let shares: Decimal = receipts.iter().map(|r| r.shares).sum();
    if shares > Decimal::ZERO {
        assert_eq!(summary.winners, 1);
        assert!((summary.total_paid_out - shares).abs() < EPSILON);
    }
    let expected = dec!(1000) - spent + shares;
    assert!((balance_of(&db, &admin).await - expected).abs() < EPSILON);
}

// =============================================================================
// Resolution Tests
// =============================================================================

#[tokio::test]
async fn resolution_pays_winners_once_and_refuses_reruns() {
    let Some(db) = test_db().await else { return };
    let executor = test_executor(&db);
    let admin = seed_user(&db, dec!(1000), true).await;
    let winner = seed_user(&db, dec!(1000), false).await;
    let loser = seed_user(&db, dec!(1000), false).await;
    let market = seed_market(&db).await;

    let buy = executor
        .execute_buy(&winner, &market, Side::Yes, dec!(50))
        .await
        .expect("winning buy");
    executor
        .execute_buy(&loser, &market, Side::No, dec!(40))
        .await
        .expect("losing buy");

    let summary = executor
        .resolve_market(&admin, &market, Side::Yes, Some("final".to_string()))
        .await
        .expect("resolve succeeds");
    assert_eq!(summary.positions_settled, 2);
    assert_eq!(summary.winners, 1);
    assert!((summary.total_paid_out - buy.shares).abs() < EPSILON);

    let winner_balance = balance_of(&db, &winner).await;
    assert!((winner_balance - (dec!(950) + buy.shares)).abs() < EPSILON);
    let loser_balance = balance_of(&db, &loser).await;
    assert_eq!(loser_balance, dec!(960));

    // A second resolution must fail on the status check before any payout.
    let err = executor
        .resolve_market(&admin, &market, Side::Yes, None)
        .await
        .expect_err("re-resolving fails");
    assert!(matches!(err, EngineError::MarketNotOpen { .. }));
    assert_eq!(balance_of(&db, &winner).await, winner_balance);

    // And the resolved market refuses further trades.
    let err = executor
        .execute_buy(&winner, &market, Side::Yes, dec!(10))
        .await
        .expect_err("trading a resolved market fails");
    assert!(matches!(err, EngineError::MarketNotOpen { .. }));
}

#[tokio::test]
async fn non_admin_cannot_resolve() {
    let Some(db) = test_db().await else { return };
    let executor = test_executor(&db);
    let outsider = seed_user(&db, dec!(1000), false).await;
    let market = seed_market(&db).await;

    let err = executor
        .resolve_market(&outsider, &market, Side::No, None)
        .await
        .expect_err("non-admin resolve fails");
    assert!(matches!(err, EngineError::Unauthorized(_)));
    assert!(market_row(&db, &market).await.is_open());
}
