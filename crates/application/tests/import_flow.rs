//! End-to-end tests for the import run against an in-memory store.

#![allow(clippy::unwrap_used, clippy::panic, missing_docs)]

use std::sync::Mutex;

use mockbird_application::{ImportStats, RemoteStore, RemoteStoreError, WarningKind, import_snapshot};
use mockbird_domain::{
    LiveCollection, LiveId, MockRule, ParentRef, RequestRecord, Snapshot, SnapshotCollection,
};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct StoreState {
    collections: Vec<LiveCollection>,
    requests: Vec<RequestRecord>,
    mocks: Vec<MockRule>,
    next_id: i64,
    log: Vec<String>,
    fail_create_request: bool,
}

/// In-memory [`RemoteStore`] that records the order of every call.
#[derive(Default)]
struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    fn log(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }

    fn collections(&self) -> Vec<LiveCollection> {
        self.state.lock().unwrap().collections.clone()
    }

    fn requests(&self) -> Vec<RequestRecord> {
        self.state.lock().unwrap().requests.clone()
    }

    fn mocks(&self) -> Vec<MockRule> {
        self.state.lock().unwrap().mocks.clone()
    }

    fn seed_request(&self, mut request: RequestRecord) -> LiveId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = LiveId(state.next_id);
        request.id = Some(id);
        state.requests.push(request);
        id
    }

    fn seed_mock(&self, mut rule: MockRule) -> LiveId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = LiveId(state.next_id);
        rule.id = Some(id);
        state.mocks.push(rule);
        id
    }

    fn fail_next_create_request(&self) {
        self.state.lock().unwrap().fail_create_request = true;
    }
}

impl RemoteStore for InMemoryStore {
    async fn list_collections(&self) -> Result<Vec<LiveCollection>, RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state.log.push("list_collections".to_string());
        // Served flat with parent references; a degenerate tree.
        Ok(state.collections.clone())
    }

    async fn create_collection(
        &self,
        name: &str,
        parent: ParentRef<LiveId>,
    ) -> Result<LiveId, RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = LiveId(state.next_id);
        state.log.push(format!("create_collection {name}"));
        state
            .collections
            .push(LiveCollection::new(id, name, parent));
        Ok(id)
    }

    async fn list_requests(&self) -> Result<Vec<RequestRecord>, RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state.log.push("list_requests".to_string());
        Ok(state.requests.clone())
    }

    async fn create_request(&self, request: &RequestRecord) -> Result<LiveId, RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_create_request {
            return Err(RemoteStoreError::Transport("connection reset".to_string()));
        }
        state.next_id += 1;
        let id = LiveId(state.next_id);
        state.log.push(format!("create_request {}", request.name));
        let mut stored = request.clone();
        stored.id = Some(id);
        state.requests.push(stored);
        Ok(id)
    }

    async fn update_request(
        &self,
        id: LiveId,
        request: &RequestRecord,
    ) -> Result<(), RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state.log.push(format!("update_request {}", request.name));
        let Some(slot) = state.requests.iter_mut().find(|r| r.id == Some(id)) else {
            return Err(RemoteStoreError::Status {
                endpoint: format!("api/requests/{id}"),
                code: 404,
            });
        };
        *slot = request.clone();
        slot.id = Some(id);
        Ok(())
    }

    async fn list_mocks(&self) -> Result<Vec<MockRule>, RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state.log.push("list_mocks".to_string());
        Ok(state.mocks.clone())
    }

    async fn create_mock(&self, rule: &MockRule) -> Result<LiveId, RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = LiveId(state.next_id);
        state
            .log
            .push(format!("create_mock {} {}", rule.method, rule.path_pattern));
        let mut stored = rule.clone();
        stored.id = Some(id);
        state.mocks.push(stored);
        Ok(id)
    }

    async fn update_mock(&self, id: LiveId, rule: &MockRule) -> Result<(), RemoteStoreError> {
        let mut state = self.state.lock().unwrap();
        state
            .log
            .push(format!("update_mock {} {}", rule.method, rule.path_pattern));
        let Some(slot) = state.mocks.iter_mut().find(|m| m.id == Some(id)) else {
            return Err(RemoteStoreError::Status {
                endpoint: format!("api/mocks/{id}"),
                code: 404,
            });
        };
        *slot = rule.clone();
        slot.id = Some(id);
        Ok(())
    }
}

fn node(id: i64, name: &str, parent: i64) -> SnapshotCollection {
    SnapshotCollection {
        id: id.into(),
        name: name.to_string(),
        parent: if parent == 0 {
            ParentRef::Root
        } else {
            ParentRef::Node(parent.into())
        },
    }
}

fn scenario_a_snapshot() -> Snapshot {
    serde_json::from_value(serde_json::json!({
        "version": "1.0",
        "collections": [{"id": 1, "name": "Auth", "parent_id": 0}],
        "requests": [{
            "id": 5,
            "name": "Login",
            "collection_id": 1,
            "method": "POST",
            "url": "/login"
        }],
        "mock_rules": []
    }))
    .unwrap()
}

#[tokio::test]
async fn scenario_a_creates_collection_and_request_into_empty_store() {
    let store = InMemoryStore::default();

    let outcome = import_snapshot(&store, &scenario_a_snapshot()).await.unwrap();

    assert_eq!(
        outcome.stats,
        ImportStats {
            new_collections: 1,
            new_requests: 1,
            ..ImportStats::default()
        }
    );

    let collections = store.collections();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].name, "Auth");
    assert_eq!(collections[0].parent, ParentRef::Root);

    let requests = store.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].name, "Login");
    assert_eq!(requests[0].collection, ParentRef::Node(collections[0].id));

    // The returned index reflects the final refresh.
    assert_eq!(outcome.live.collections().len(), 1);
    assert_eq!(outcome.live.requests().len(), 1);
}

#[tokio::test]
async fn scenario_b_rerun_matches_everything_by_natural_key() {
    let store = InMemoryStore::default();
    let snapshot = scenario_a_snapshot();

    import_snapshot(&store, &snapshot).await.unwrap();
    let second = import_snapshot(&store, &snapshot).await.unwrap();

    assert_eq!(
        second.stats,
        ImportStats {
            merged_collections: 1,
            updated_requests: 1,
            ..ImportStats::default()
        }
    );
    assert_eq!(second.stats.total_created(), 0);
    assert_eq!(store.collections().len(), 1);
    assert_eq!(store.requests().len(), 1);
}

#[tokio::test]
async fn collections_resolve_in_dependency_order_regardless_of_listing_order() {
    let store = InMemoryStore::default();
    let snapshot = Snapshot {
        collections: vec![
            node(3, "tokens", 2),
            node(4, "users", 1),
            node(2, "auth", 1),
            node(1, "api", 0),
        ],
        ..Snapshot::default()
    };

    let outcome = import_snapshot(&store, &snapshot).await.unwrap();
    assert_eq!(outcome.stats.new_collections, 4);
    assert!(outcome.stats.warnings.is_empty());

    let log = store.log();
    let creates: Vec<&str> = log
        .iter()
        .filter_map(|entry| entry.strip_prefix("create_collection "))
        .collect();
    assert_eq!(creates[0], "api");
    assert!(creates.iter().position(|n| *n == "auth").unwrap()
        < creates.iter().position(|n| *n == "tokens").unwrap());

    // Every child points at its parent's live id.
    let collections = store.collections();
    let find = |name: &str| collections.iter().find(|c| c.name == name).unwrap();
    assert_eq!(find("auth").parent, ParentRef::Node(find("api").id));
    assert_eq!(find("users").parent, ParentRef::Node(find("api").id));
    assert_eq!(find("tokens").parent, ParentRef::Node(find("auth").id));
}

#[tokio::test]
async fn scenario_c_orphans_are_skipped_and_their_requests_land_unfiled() {
    let store = InMemoryStore::default();
    let snapshot = Snapshot {
        collections: vec![node(2, "orphaned", 99), node(7, "independent", 0)],
        requests: vec![
            RequestRecord::new("Lost", "GET", "/lost")
                .with_collection(ParentRef::Node(LiveId(2))),
        ],
        ..Snapshot::default()
    };

    let outcome = import_snapshot(&store, &snapshot).await.unwrap();

    // The orphan does not block the unrelated subtree.
    let collections = store.collections();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].name, "independent");

    // The dependent request falls back to unfiled instead of failing.
    let requests = store.requests();
    assert_eq!(requests[0].collection, ParentRef::Root);

    let kinds: Vec<WarningKind> = outcome.stats.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![WarningKind::UnresolvedCollection, WarningKind::UnfiledRequest]
    );
    assert_eq!(outcome.stats.warnings[0].subject, "orphaned");
}

#[tokio::test]
async fn requests_with_the_same_name_in_different_collections_stay_distinct() {
    let store = InMemoryStore::default();
    let snapshot = Snapshot {
        collections: vec![node(1, "Auth", 0)],
        requests: vec![
            RequestRecord::new("Login", "POST", "/login")
                .with_collection(ParentRef::Node(LiveId(1))),
            RequestRecord::new("Login", "POST", "/legacy/login"),
        ],
        ..Snapshot::default()
    };

    let first = import_snapshot(&store, &snapshot).await.unwrap();
    assert_eq!(first.stats.new_requests, 2);

    let second = import_snapshot(&store, &snapshot).await.unwrap();
    assert_eq!(second.stats.new_requests, 0);
    assert_eq!(second.stats.updated_requests, 2);
    assert_eq!(store.requests().len(), 2);
}

#[tokio::test]
async fn scenario_d_duplicate_mock_keys_converge_on_one_existing_rule() {
    let store = InMemoryStore::default();
    let seeded = store.seed_mock(MockRule::new("/users/1", "GET"));

    let mut first = MockRule::new("/users/1", "GET");
    first.response_body = "first".to_string();
    let mut second = MockRule::new("/users/1", "GET");
    second.response_body = "second".to_string();

    let snapshot = Snapshot {
        mock_rules: vec![first, second],
        ..Snapshot::default()
    };
    let outcome = import_snapshot(&store, &snapshot).await.unwrap();

    assert_eq!(outcome.stats.updated_mocks, 2);
    assert_eq!(outcome.stats.new_mocks, 0);

    // Both matched the same live id; the later record wins.
    let mocks = store.mocks();
    assert_eq!(mocks.len(), 1);
    assert_eq!(mocks[0].id, Some(seeded));
    assert_eq!(mocks[0].response_body, "second");
}

#[tokio::test]
async fn mock_matching_uses_the_index_captured_at_run_start() {
    let store = InMemoryStore::default();
    let snapshot = Snapshot {
        mock_rules: vec![MockRule::new("/ping", "GET"), MockRule::new("/ping", "GET")],
        ..Snapshot::default()
    };

    // Against an empty store both rules are created.
    let outcome = import_snapshot(&store, &snapshot).await.unwrap();
    assert_eq!(outcome.stats.new_mocks, 2);
    assert_eq!(store.mocks().len(), 2);
}

#[tokio::test]
async fn duplicate_snapshot_ids_keep_the_first_mapping() {
    let store = InMemoryStore::default();
    let snapshot = Snapshot {
        collections: vec![node(1, "first", 0), node(1, "second", 0)],
        requests: vec![
            RequestRecord::new("Probe", "GET", "/probe")
                .with_collection(ParentRef::Node(LiveId(1))),
        ],
        ..Snapshot::default()
    };

    let outcome = import_snapshot(&store, &snapshot).await.unwrap();
    assert_eq!(outcome.stats.new_collections, 2);

    let collections = store.collections();
    let first_id = collections.iter().find(|c| c.name == "first").unwrap().id;
    assert_eq!(store.requests()[0].collection, ParentRef::Node(first_id));
}

#[tokio::test]
async fn existing_requests_are_matched_inside_freshly_merged_collections() {
    let store = InMemoryStore::default();

    // Populate the store by importing once.
    import_snapshot(&store, &scenario_a_snapshot()).await.unwrap();
    assert_eq!(store.requests().len(), 1);

    // A later export of the same data uses different snapshot ids; the
    // natural keys still line up.
    let renumbered: Snapshot = serde_json::from_value(serde_json::json!({
        "version": "1.0",
        "collections": [{"id": 40, "name": "Auth", "parent_id": 0}],
        "requests": [{"id": 0, "name": "Login", "collection_id": 40, "method": "POST", "url": "/login"}]
    }))
    .unwrap();

    let outcome = import_snapshot(&store, &renumbered).await.unwrap();
    assert_eq!(outcome.stats.merged_collections, 1);
    assert_eq!(outcome.stats.updated_requests, 1);
    assert_eq!(store.requests().len(), 1);
}

#[tokio::test]
async fn remote_failure_aborts_the_run_but_keeps_prior_commits() {
    let store = InMemoryStore::default();
    store.fail_next_create_request();

    let result = import_snapshot(&store, &scenario_a_snapshot()).await;
    assert!(result.is_err());

    // The collection committed before the failure stays committed.
    assert_eq!(store.collections().len(), 1);
    assert_eq!(store.requests().len(), 0);
}

#[tokio::test]
async fn phases_run_in_a_fixed_linear_order() {
    let store = InMemoryStore::default();
    let snapshot = Snapshot {
        collections: vec![node(1, "Auth", 0)],
        requests: vec![
            RequestRecord::new("Login", "POST", "/login")
                .with_collection(ParentRef::Node(LiveId(1))),
        ],
        mock_rules: vec![MockRule::new("/login", "POST")],
        ..Snapshot::default()
    };

    import_snapshot(&store, &snapshot).await.unwrap();

    let log = store.log();
    let position = |entry: &str| log.iter().position(|e| e == entry).unwrap();
    assert_eq!(position("list_collections"), 0);
    assert!(position("create_collection Auth") < position("create_request Login"));
    assert!(position("create_request Login") < position("create_mock POST /login"));
    // Final refresh re-lists everything after the mutations.
    assert!(log.iter().rposition(|e| e == "list_mocks").unwrap() > position("create_mock POST /login"));
}
