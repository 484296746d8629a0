//! Long-running background task that polls the Soroban RPC and writes
//! decoded hackathon events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

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

/// Run the indexer loop until `shutdown` is cancelled.
pub async fn run(state: Arc<IndexerState>, shutdown: CancellationToken) {
    info!("Indexer starting for contract {}", state.config.contract_id);

    let mut position = match resume_position(&state.pool, state.config.start_ledger).await {
        Ok(position) => position,
        Err(e) => {
            warn!("Could not read saved cursor, starting from config: {e}");
            Position {
                ledger: state.config.start_ledger,
                cursor: None,
            }
        }
    };

    info!("Resuming from ledger {}", position.ledger);

    loop {
        match poll_once(&state.pool, &state.client, &state.config, &position).await {
            Ok(next) => position = next,
            Err(e) => error!("Indexer poll error: {e}"),
        }

        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Indexer stopping at ledger {}", position.ledger);
                return;
            }
            _ = tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)) => {}
        }
    }
}

/// Load the persisted cursor; fall back to `start_ledger` when nothing was saved.
async fn resume_position(pool: &SqlitePool, start_ledger: u32) -> Result<Position> {
    let last_ledger = db::get_last_ledger(pool).await?;
    let cursor = db::get_cursor_string(pool).await?;

    let ledger = if last_ledger > 0 {
        u32::try_from(last_ledger).unwrap_or(start_ledger)
    } else {
        start_ledger
    };
    Ok(Position { ledger, cursor })
}

/// Perform a single poll iteration and persist where the next one starts.
async fn poll_once(
    pool: &SqlitePool,
    client: &Client,
    config: &Config,
    position: &Position,
) -> Result<Position> {
    let page = rpc::fetch_events(
        client,
        &config.rpc_url,
        &config.contract_id,
        position.ledger,
        position.cursor.as_deref(),
        config.events_per_page,
    )
    .await?;

    if !page.events.is_empty() {
        let decoded = rpc::decode_events(&page.events, &config.contract_id);
        let inserted = db::insert_events(pool, &decoded).await?;
        info!(
            "Polled {} raw events → {} new records stored",
            page.events.len(),
            inserted
        );
    }

    let next = next_position(position, page.latest_ledger, page.cursor);

    // Persist cursor so restarts are deterministic.
    db::save_cursor(pool, i64::from(next.ledger), next.cursor.as_deref()).await?;

    Ok(next)
}

/// The ledger never moves backwards. A returned cursor takes over pagination;
/// when the RPC sends none the previous cursor is kept.
fn next_position(current: &Position, latest_ledger: Option<u64>, cursor: Option<String>) -> Position {
    let ledger = latest_ledger
        .and_then(|l| u32::try_from(l).ok())
        .map(|l| l.max(current.ledger))
        .unwrap_or(current.ledger);

    Position {
        ledger,
        cursor: cursor.or_else(|| current.cursor.clone()),
    }
}
