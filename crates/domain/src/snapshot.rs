//! The snapshot document: the import/export file format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::SnapshotCollection;
use crate::mock::MockRule;
use crate::request::RequestRecord;

/// A point-in-time export of collections, requests and mock rules.
///
/// Single-entity exports carry one populated list and leave the others empty
/// or absent, so every list defaults to empty. `version` is recorded but not
/// validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version, accepted as-is.
    #[serde(default)]
    pub version: String,
    /// When the snapshot was exported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    /// Collection forest, flat and in arbitrary order.
    #[serde(default)]
    pub collections: Vec<SnapshotCollection>,
    /// Request records.
    #[serde(default)]
    pub requests: Vec<RequestRecord>,
    /// Mock rules.
    #[serde(default)]
    pub mock_rules: Vec<MockRule>,
}

impl Snapshot {
    /// Version written by current exports.
    pub const FORMAT_VERSION: &'static str = "1.0";

    /// Returns `true` when the snapshot contains nothing to import.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.requests.is_empty() && self.mock_rules.is_empty()
    }
}
