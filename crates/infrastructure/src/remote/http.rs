//! HTTP remote store adapter.
//!
//! Implements the `RemoteStore` port against the backend's REST API using
//! reqwest. Endpoints and payload shapes follow the backend exactly; create
//! calls answer with a small `{"id": ...}` document carrying the assigned id.

use mockbird_application::ports::{RemoteStore, RemoteStoreError};
use mockbird_domain::{LiveCollection, LiveId, MockRule, ParentRef, RequestRecord};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Response body of the backend's create endpoints.
#[derive(Debug, serde::Deserialize)]
struct CreatedResponse {
    id: LiveId,
}

/// Payload of `POST /api/collections`.
#[derive(Debug, Serialize)]
struct CreateCollectionBody<'a> {
    name: &'a str,
    parent_id: ParentRef<LiveId>,
}

/// Remote store adapter speaking the backend's REST API.
pub struct HttpRemoteStore {
    client: Client,
    base_url: Url,
}

impl HttpRemoteStore {
    /// Creates an adapter for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: Url) -> Result<Self, RemoteStoreError> {
        let client = Client::builder()
            .user_agent(concat!("mockbird/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteStoreError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates an adapter around an existing client.
    #[must_use]
    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        // Relative endpoint joins need the base path to end in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteStoreError> {
        self.base_url
            .join(path)
            .map_err(|e| RemoteStoreError::Transport(format!("invalid endpoint {path}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteStoreError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteStoreError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteStoreError::Status {
                endpoint: path.to_string(),
                code: status.as_u16(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteStoreError::InvalidResponse {
                endpoint: path.to_string(),
                message: e.to_string(),
            })
    }

    /// Fetches a list endpoint. The backend encodes an empty list as JSON
    /// `null`, so the payload is read as an optional list.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, RemoteStoreError> {
        Ok(self
            .get_json::<Option<Vec<T>>>(path)
            .await?
            .unwrap_or_default())
    }

    async fn post_created<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<LiveId, RemoteStoreError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteStoreError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteStoreError::Status {
                endpoint: path.to_string(),
                code: status.as_u16(),
            });
        }
        let created: CreatedResponse =
            response
                .json()
                .await
                .map_err(|e| RemoteStoreError::InvalidResponse {
                    endpoint: path.to_string(),
                    message: e.to_string(),
                })?;
        Ok(created.id)
    }

    async fn put_json<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), RemoteStoreError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteStoreError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteStoreError::Status {
                endpoint: path.to_string(),
                code: status.as_u16(),
            });
        }
        Ok(())
    }
}

impl RemoteStore for HttpRemoteStore {
    async fn list_collections(&self) -> Result<Vec<LiveCollection>, RemoteStoreError> {
        self.get_list("api/collections").await
    }

    async fn create_collection(
        &self,
        name: &str,
        parent: ParentRef<LiveId>,
    ) -> Result<LiveId, RemoteStoreError> {
        let body = CreateCollectionBody {
            name,
            parent_id: parent,
        };
        self.post_created("api/collections", &body).await
    }

    async fn list_requests(&self) -> Result<Vec<RequestRecord>, RemoteStoreError> {
        self.get_list("api/requests").await
    }

    async fn create_request(&self, request: &RequestRecord) -> Result<LiveId, RemoteStoreError> {
        self.post_created("api/requests", request).await
    }

    async fn update_request(
        &self,
        id: LiveId,
        request: &RequestRecord,
    ) -> Result<(), RemoteStoreError> {
        self.put_json(&format!("api/requests/{id}"), request).await
    }

    async fn list_mocks(&self) -> Result<Vec<MockRule>, RemoteStoreError> {
        self.get_list("api/mocks").await
    }

    async fn create_mock(&self, rule: &MockRule) -> Result<LiveId, RemoteStoreError> {
        self.post_created("api/mocks", rule).await
    }

    async fn update_mock(&self, id: LiveId, rule: &MockRule) -> Result<(), RemoteStoreError> {
        self.put_json(&format!("api/mocks/{id}"), rule).await
    }
}
