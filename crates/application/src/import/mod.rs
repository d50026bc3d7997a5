//! The import run.
//!
//! Folds a snapshot into the remote store: collections are resolved in
//! dependency order (merge or create), then requests and mock rules are
//! matched by natural key and created or updated. One run is strictly
//! linear; every remote call is awaited before the next is issued, and the
//! first remote failure aborts the remainder with no rollback.

mod live_index;
mod reconciler;
mod resolver;
mod stats;

use std::collections::HashMap;

use mockbird_domain::{LiveId, Snapshot, SnapshotId};

pub use live_index::LiveIndex;
pub use stats::{ImportStats, ImportWarning, WarningKind};

use crate::error::ImportError;
use crate::ports::RemoteStore;

/// What an import run hands back to the caller.
#[derive(Debug)]
pub struct ImportOutcome {
    /// Created/updated tallies and warnings, for display.
    pub stats: ImportStats,
    /// The live index as refreshed after the run, including everything the
    /// run created. Callers can repaint from it without another fetch.
    pub live: LiveIndex,
}

/// One import run: owns the live index, the old-id to live-id map and the
/// stats for the duration of a single snapshot import.
///
/// The id map is append-only within the run and discarded with it. No
/// mutual exclusion against a second concurrent importer is provided.
pub struct ImportRun<'a, R: RemoteStore> {
    store: &'a R,
    index: LiveIndex,
    id_map: HashMap<SnapshotId, LiveId>,
    stats: ImportStats,
}

impl<'a, R: RemoteStore> ImportRun<'a, R> {
    /// Creates a run against the given store.
    #[must_use]
    pub fn new(store: &'a R) -> Self {
        Self {
            store,
            index: LiveIndex::new(),
            id_map: HashMap::new(),
            stats: ImportStats::default(),
        }
    }

    /// Executes the run: refresh, resolve collections, reconcile requests,
    /// reconcile mocks, refresh again.
    ///
    /// # Errors
    ///
    /// Returns an error when any remote call fails; entities committed
    /// before the failure remain committed. Re-running the same snapshot is
    /// safe: already-merged entities match by natural key instead of being
    /// re-created.
    pub async fn execute(mut self, snapshot: &Snapshot) -> Result<ImportOutcome, ImportError> {
        tracing::info!(
            collections = snapshot.collections.len(),
            requests = snapshot.requests.len(),
            mocks = snapshot.mock_rules.len(),
            "starting import"
        );

        self.index.refresh(self.store).await?;
        self.resolve_collections(&snapshot.collections).await?;
        self.reconcile_requests(&snapshot.requests).await?;
        self.reconcile_mocks(&snapshot.mock_rules).await?;
        self.index.refresh(self.store).await?;

        tracing::info!(
            created = self.stats.total_created(),
            warnings = self.stats.warnings.len(),
            "import finished"
        );

        Ok(ImportOutcome {
            stats: self.stats,
            live: self.index,
        })
    }
}

/// Imports a snapshot in one call.
///
/// # Errors
///
/// See [`ImportRun::execute`].
pub async fn import_snapshot<R: RemoteStore>(
    store: &R,
    snapshot: &Snapshot,
) -> Result<ImportOutcome, ImportError> {
    ImportRun::new(store).execute(snapshot).await
}
