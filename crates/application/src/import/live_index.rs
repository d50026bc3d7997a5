//! Live index: the remote state as known to a running import.

use mockbird_domain::{LiveCollection, LiveId, MockRule, ParentRef, RequestRecord};

use crate::ports::{RemoteStore, RemoteStoreError};

/// Queryable snapshot of the remote store's current contents.
///
/// Refreshed from the store at the start of a run and again at the end;
/// between refreshes, collections created by the run are inserted
/// incrementally so later nodes can find them as duplicate targets and
/// reference them as parents. Requests and mocks are not inserted mid-run:
/// they are matched against the state captured at refresh time.
#[derive(Debug, Default)]
pub struct LiveIndex {
    collections: Vec<LiveCollection>,
    requests: Vec<RequestRecord>,
    mocks: Vec<MockRule>,
}

impl LiveIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            collections: Vec::new(),
            requests: Vec::new(),
            mocks: Vec::new(),
        }
    }

    /// Replaces the index contents with the store's current state.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the list calls fails.
    pub async fn refresh<R: RemoteStore>(&mut self, store: &R) -> Result<(), RemoteStoreError> {
        let tree = store.list_collections().await?;
        self.collections = LiveCollection::flatten(tree);
        self.requests = store.list_requests().await?;
        self.mocks = store.list_mocks().await?;
        Ok(())
    }

    /// Records a collection created during the current run.
    pub fn insert_collection(&mut self, collection: LiveCollection) {
        self.collections.push(collection);
    }

    /// Finds a collection by its natural key `(name, parent)`.
    ///
    /// Comparison is exact and case-sensitive; the first match wins.
    #[must_use]
    pub fn find_collection(
        &self,
        name: &str,
        parent: ParentRef<LiveId>,
    ) -> Option<&LiveCollection> {
        self.collections
            .iter()
            .find(|c| c.name == name && c.parent == parent)
    }

    /// Finds a request by its natural key `(name, collection)`.
    #[must_use]
    pub fn find_request(
        &self,
        name: &str,
        collection: ParentRef<LiveId>,
    ) -> Option<&RequestRecord> {
        self.requests
            .iter()
            .find(|r| r.name == name && r.collection == collection)
    }

    /// Finds a mock rule by its natural key `(path_pattern, method)`.
    #[must_use]
    pub fn find_mock(&self, path_pattern: &str, method: &str) -> Option<&MockRule> {
        self.mocks
            .iter()
            .find(|m| m.path_pattern == path_pattern && m.method == method)
    }

    /// All known collections, flat.
    #[must_use]
    pub fn collections(&self) -> &[LiveCollection] {
        &self.collections
    }

    /// All known requests.
    #[must_use]
    pub fn requests(&self) -> &[RequestRecord] {
        &self.requests
    }

    /// All known mock rules.
    #[must_use]
    pub fn mocks(&self) -> &[MockRule] {
        &self.mocks
    }
}
