//! Remote store port.

use std::future::Future;

use mockbird_domain::{LiveCollection, LiveId, MockRule, ParentRef, RequestRecord};

/// Error type for remote store operations.
///
/// Any failure here aborts the remainder of an import run; entities already
/// committed stay committed.
#[derive(Debug, thiserror::Error)]
pub enum RemoteStoreError {
    /// The call never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("{endpoint} returned status {code}")]
    Status {
        /// Endpoint that was called.
        endpoint: String,
        /// HTTP status code returned.
        code: u16,
    },

    /// The response body could not be decoded.
    #[error("invalid response from {endpoint}: {message}")]
    InvalidResponse {
        /// Endpoint that was called.
        endpoint: String,
        /// Decoding failure detail.
        message: String,
    },
}

/// The engine's view of the backend store.
///
/// One method per backend operation. Calls are issued strictly sequentially
/// by the import run; implementations do not need to support concurrent use
/// within a run.
pub trait RemoteStore: Send + Sync {
    /// Lists all collections as a tree rooted at the virtual parent.
    fn list_collections(
        &self,
    ) -> impl Future<Output = Result<Vec<LiveCollection>, RemoteStoreError>> + Send;

    /// Creates a collection and returns its store-assigned id.
    fn create_collection(
        &self,
        name: &str,
        parent: ParentRef<LiveId>,
    ) -> impl Future<Output = Result<LiveId, RemoteStoreError>> + Send;

    /// Lists all saved requests.
    fn list_requests(
        &self,
    ) -> impl Future<Output = Result<Vec<RequestRecord>, RemoteStoreError>> + Send;

    /// Creates a request and returns its store-assigned id.
    fn create_request(
        &self,
        request: &RequestRecord,
    ) -> impl Future<Output = Result<LiveId, RemoteStoreError>> + Send;

    /// Overwrites the request with the given id.
    fn update_request(
        &self,
        id: LiveId,
        request: &RequestRecord,
    ) -> impl Future<Output = Result<(), RemoteStoreError>> + Send;

    /// Lists all mock rules.
    fn list_mocks(&self) -> impl Future<Output = Result<Vec<MockRule>, RemoteStoreError>> + Send;

    /// Creates a mock rule and returns its store-assigned id.
    fn create_mock(
        &self,
        rule: &MockRule,
    ) -> impl Future<Output = Result<LiveId, RemoteStoreError>> + Send;

    /// Overwrites the mock rule with the given id.
    fn update_mock(
        &self,
        id: LiveId,
        rule: &MockRule,
    ) -> impl Future<Output = Result<(), RemoteStoreError>> + Send;
}
