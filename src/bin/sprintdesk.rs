//! Line-oriented JSON transport for the dialog engine.
//!
//! Usage:
//!
//! ```text
//! sprintdesk < events.jsonl
//! ```
//!
//! Each stdin line is one inbound event:
//!
//! ```json
//! {"user": 42, "display_name": "Pat", "payload": {"kind": "text", "value": "/start"}}
//! ```
//!
//! Each event produces one stdout line holding the sender and the replies:
//!
//! ```json
//! {"user": 42, "replies": [{"text": "👋 Welcome, Pat! ...", "keyboard": {"kind": "menu", "rows": [["📝 Daily report"]]}}]}
//! ```
//!
//! Settings are read from the environment (see [`sprintdesk::config`]).
//! Without `DATABASE_URL` the tracker runs on an in-memory store.

use mockable::DefaultClock;
use serde::Serialize;
use sprintdesk::config::{AppConfig, ConfigError};
use sprintdesk::dialog::{
    domain::{Inbound, Reply},
    services::{DialogEngine, DialogError},
};
use sprintdesk::telemetry::{self, TelemetryError};
use sprintdesk::tracker::{
    adapters::{memory::InMemoryTrackerStore, postgres::PostgresTrackerStore},
    domain::ExternalUserId,
    ports::{StoreError, TrackerStore},
    services::TrackerService,
};
use std::io::Write as _;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, stdin, stdout};
use tracing::{info, warn};

#[derive(Debug, Error)]
enum TransportError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to open the tracker store: {0}")]
    Store(#[from] StoreError),
    #[error("failed to build the dialog engine: {0}")]
    Dialog(#[from] DialogError),
    #[error("stdio failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode replies: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct Outbound<'a> {
    user: ExternalUserId,
    replies: &'a [Reply],
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The subscriber may not be installed yet.
            let _written = writeln!(std::io::stderr(), "sprintdesk: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), TransportError> {
    let config = AppConfig::from_env()?;
    telemetry::init(&config.log_filter)?;
    match config.database_url.as_deref() {
        Some(url) => {
            let store = PostgresTrackerStore::connect(url, config.pool_size.get())?;
            info!(pool_size = config.pool_size.get(), "using PostgreSQL store");
            serve(store, &config).await
        }
        None => {
            info!("DATABASE_URL not set, using in-memory store");
            serve(InMemoryTrackerStore::new(), &config).await
        }
    }
}

async fn serve<S: TrackerStore>(store: S, config: &AppConfig) -> Result<(), TransportError> {
    let tracker = TrackerService::new(Arc::new(store), Arc::new(DefaultClock));
    let engine = DialogEngine::new(tracker)?.with_recent_limit(config.recent_limit);
    let mut lines = BufReader::new(stdin()).lines();
    let mut out = stdout();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let event: Inbound = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "skipping malformed event");
                continue;
            }
        };
        let user = event.user;
        let replies = engine.handle(event).await;
        let mut encoded = serde_json::to_vec(&Outbound {
            user,
            replies: &replies,
        })?;
        encoded.push(b'\n');
        out.write_all(&encoded).await?;
        out.flush().await?;
    }
    info!("input closed, shutting down");
    Ok(())
}
