//! Long-running background task that polls the Soroban RPC and writes
//! decoded FundMe events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::db;
use crate::errors::Result;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Where the next poll starts.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Position {
    ledger: u32,
    cursor: Option<String>,
}

/// Poll until `shutdown` is cancelled.
pub async fn run(state: Arc<IndexerState>, shutdown: CancellationToken) {
    info!(contract = %state.config.contract_id, "Indexer starting");

    let mut position = match db::load_cursor(&state.pool).await {
        Ok((last_ledger, cursor)) => {
            resume_position(last_ledger, cursor, state.config.start_ledger)
        }
        Err(e) => {
            error!("Could not read saved cursor, starting from config: {e}");
            resume_position(0, None, state.config.start_ledger)
        }
    };

    info!(ledger = position.ledger, "Resuming");

    loop {
        match poll_once(&state, &position).await {
            Ok(next) => position = next,
            Err(e) => error!("Indexer poll error: {e}"),
        }

        tokio::select! {
            _ = shutdown.cancelled() => {
                info!(ledger = position.ledger, "Indexer stopped");
                return;
            }
            _ = tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)) => {}
        }
    }
}

/// A saved ledger wins over the configured start ledger.
fn resume_position(last_ledger: i64, cursor: Option<String>, start_ledger: u32) -> Position {
    if last_ledger > 0 {
        Position {
            ledger: u32::try_from(last_ledger).unwrap_or(u32::MAX),
            cursor,
        }
    } else {
        Position {
            ledger: start_ledger,
            cursor: None,
        }
    }
}

/// Perform a single poll iteration and return the next position.
async fn poll_once(state: &IndexerState, position: &Position) -> Result<Position> {
    let config = &state.config;
    let page = rpc::fetch_events(
        &state.client,
        &config.rpc_url,
        &config.contract_id,
        position.ledger,
        position.cursor.as_deref(),
        config.events_per_page,
    )
    .await?;

    if !page.events.is_empty() {
        let decoded = rpc::decode_events(&page.events, &config.contract_id);
        let inserted = db::insert_events(&state.pool, &decoded).await?;
        info!(
            raw = page.events.len(),
            stored = inserted,
            "Polled events"
        );
    }

    let next = advance(position.ledger, page.cursor, page.latest_ledger);

    // Persist so restarts are deterministic.
    db::save_cursor(&state.pool, i64::from(next.ledger), next.cursor.as_deref()).await?;

    Ok(next)
}

/// The ledger never moves backwards; a returned cursor takes over
/// pagination from the ledger bound.
fn advance(start_ledger: u32, cursor: Option<String>, latest_ledger: Option<u64>) -> Position {
    let ledger = latest_ledger
        .and_then(|l| u32::try_from(l).ok())
        .map(|l| l.max(start_ledger))
        .unwrap_or(start_ledger);
    Position { ledger, cursor }
}
