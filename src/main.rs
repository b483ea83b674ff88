//! votecache CLI - wire the service together, run one synchronization,
//! and print the resulting datasets with their provenance.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use votecache::{
    shared_state, CacheStore, Config, ConnectivityMonitor, DataService, FileStore,
    OfflineNotifier, SheetClient, Synchronizer,
};

/// Buffer size for the connectivity event channel.
/// Transitions are rare; 8 leaves room for a flappy link without loss.
const EVENT_CHANNEL_SIZE: usize = 8;

/// Initialize the tracing subscriber for logging.
/// Use RUST_LOG to control the level (e.g. RUST_LOG=debug).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Config::load().context("Failed to load configuration")?;
    if config.endpoint.is_empty() {
        anyhow::bail!(
            "No endpoint configured - set {} or add \"endpoint\" to the config file",
            votecache::config::ENDPOINT_ENV
        );
    }

    info!(endpoint = %config.endpoint, "votecache starting");

    let store = FileStore::open(config.cache_file()?).context("Failed to open cache store")?;
    let cache = CacheStore::new(Box::new(store));
    let client = SheetClient::new(&config.endpoint).context("Failed to build HTTP client")?;

    // The CLI has no connectivity signal source, so it assumes online and
    // leaves the event channel idle; embedders feed real transitions in.
    let monitor = ConnectivityMonitor::new(true);
    let notifier = Arc::new(OfflineNotifier::new());
    let service = Arc::new(DataService::new(
        client,
        cache,
        monitor.flag(),
        Arc::clone(&notifier),
    ));
    let state = shared_state();
    let synchronizer = Arc::new(Synchronizer::new(Arc::clone(&service), Arc::clone(&state)));

    {
        let synchronizer = Arc::clone(&synchronizer);
        notifier.set_retry(move || {
            let synchronizer = Arc::clone(&synchronizer);
            tokio::spawn(async move {
                synchronizer.sync_data().await;
            });
        });
    }

    let (_events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
    tokio::spawn(monitor.run(events_rx, Arc::clone(&synchronizer)));

    let synced = synchronizer.sync_data().await;

    // A failed sync leaves shared state alone, so show the service's
    // fallback view instead - it is guaranteed to have data.
    let (students, candidates) = if synced {
        let state = state.lock().expect("state mutex poisoned");
        (state.students.clone(), state.candidates.clone())
    } else {
        let (students, candidates) = service.fetch_both().await;
        (students.data, candidates.data)
    };

    println!(
        "Data: {}   Last sync: {}",
        if synced { "live" } else { "cached/default" },
        service.cache().last_sync_age()
    );
    if notifier.is_visible() {
        println!("(offline - showing the last data fetched successfully)");
    }

    println!("\nStudents ({}):", students.len());
    for student in &students {
        println!(
            "  {:<10} {:<28} {:<8} {}",
            student.id,
            student.name,
            student.course,
            if student.eligible { "eligible" } else { "not eligible" }
        );
    }

    let votes = state.lock().expect("state mutex poisoned").votes.clone();
    println!("\nCandidates ({}):", candidates.len());
    for candidate in &candidates {
        println!(
            "  [{}] {:<6} {:<24} {} votes",
            candidate.id,
            candidate.code,
            candidate.name,
            votes.get(&candidate.id).copied().unwrap_or(0)
        );
    }

    Ok(())
}
