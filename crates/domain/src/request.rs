//! Saved request records.
//!
//! Wire-compatible with the backend store's request rows: the parameter,
//! header, auth and body sections are carried through the import engine
//! untouched, so anything the store accepts round-trips here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{self, LiveId, ParentRef};

/// A key/value row in a params, headers or form table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyValue {
    /// Row key.
    #[serde(default)]
    pub key: String,
    /// Row value.
    #[serde(default)]
    pub value: String,
    /// Optional human-readable description.
    #[serde(default)]
    pub description: String,
    /// Whether the row is active.
    #[serde(default)]
    pub enabled: bool,
    /// Row kind, used by form tables to mark file rows.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Authentication section of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Auth scheme: `none`, `basic`, `bearer` or `apikey`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Basic-auth fields (username/password).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub basic: BTreeMap<String, String>,
    /// Bearer-token fields.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bearer: BTreeMap<String, String>,
    /// API-key fields.
    #[serde(rename = "apikey", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub api_key: BTreeMap<String, String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            kind: "none".to_string(),
            basic: BTreeMap::new(),
            bearer: BTreeMap::new(),
            api_key: BTreeMap::new(),
        }
    }
}

/// Body section of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Body kind: `none`, `raw`, `form-data`, `x-www-form-urlencoded`,
    /// `binary` or `graphql`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Raw body subtype (e.g. `json`, `text`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw_type: String,
    /// Raw body content.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw_content: String,
    /// Multipart form rows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_data: Vec<KeyValue>,
    /// URL-encoded form rows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub url_encoded: Vec<KeyValue>,
    /// Path of a binary body file.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub binary_path: String,
    /// GraphQL query document.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub graphql_query: String,
    /// GraphQL variables as a JSON string.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub graphql_vars: String,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            kind: "none".to_string(),
            raw_type: String::new(),
            raw_content: String::new(),
            form_data: Vec::new(),
            url_encoded: Vec::new(),
            binary_path: String::new(),
            graphql_query: String::new(),
            graphql_vars: String::new(),
        }
    }
}

/// A saved API request.
///
/// The same shape serves live records and snapshot records. On a record read
/// from a snapshot, `id` and the collection reference still belong to the
/// snapshot's id space and are rewritten during reconciliation before the
/// record is sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Record id; unset (`0` on the wire) means "not yet stored".
    #[serde(default, with = "id::opt_id")]
    pub id: Option<LiveId>,
    /// Owning collection; the root means unfiled.
    #[serde(rename = "collection_id", default)]
    pub collection: ParentRef<LiveId>,
    /// Request name. Uniqueness is scoped to (name, collection).
    pub name: String,
    /// HTTP method, stored verbatim.
    #[serde(default)]
    pub method: String,
    /// Request URL.
    #[serde(default)]
    pub url: String,
    /// Query parameter rows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<KeyValue>,
    /// Header rows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<KeyValue>,
    /// Authentication section.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Body section.
    #[serde(default)]
    pub body: BodyConfig,
}

impl RequestRecord {
    /// Creates a minimal record with the given name, method and URL.
    #[must_use]
    pub fn new(name: impl Into<String>, method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            collection: ParentRef::Root,
            name: name.into(),
            method: method.into(),
            url: url.into(),
            params: Vec::new(),
            headers: Vec::new(),
            auth: AuthConfig::default(),
            body: BodyConfig::default(),
        }
    }

    /// Files the record under a collection.
    #[must_use]
    pub const fn with_collection(mut self, collection: ParentRef<LiveId>) -> Self {
        self.collection = collection;
        self
    }
}
