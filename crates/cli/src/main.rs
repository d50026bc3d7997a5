//! Mockbird import binary.
//!
//! Reads an exported snapshot file and folds it into a running backend:
//!
//! ```text
//! MOCKBIRD_BASE_URL=http://127.0.0.1:8080 mockbird-import backup.json
//! ```

use std::path::Path;

use mockbird_application::import_snapshot;
use mockbird_infrastructure::{HttpRemoteStore, SnapshotReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: mockbird-import <snapshot.json>")?;

    let base = std::env::var("MOCKBIRD_BASE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let base_url: Url = base
        .parse()
        .map_err(|e| format!("invalid MOCKBIRD_BASE_URL: {e}"))?;

    tracing::info!(%base_url, snapshot = %path, "importing snapshot");

    let snapshot = SnapshotReader::new().read(Path::new(&path))?;
    let store = HttpRemoteStore::new(base_url)?;
    let outcome = import_snapshot(&store, &snapshot).await?;

    println!("Import completed!");
    println!("{}", outcome.stats);
    for warning in &outcome.stats.warnings {
        println!("warning: {warning}");
    }

    Ok(())
}
