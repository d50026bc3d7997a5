//! Mock rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{self, LiveId};

const fn default_status() -> u16 {
    200
}

/// A mock rule served by the mocking backend.
///
/// Rules are identified across imports by the `(path_pattern, method)` pair,
/// compared exactly and case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockRule {
    /// Record id; unset (`0` on the wire) means "not yet stored".
    #[serde(default, with = "id::opt_id")]
    pub id: Option<LiveId>,
    /// Request path this rule matches.
    pub path_pattern: String,
    /// HTTP method this rule matches, stored verbatim.
    #[serde(default)]
    pub method: String,
    /// Status code of the mocked response.
    #[serde(default = "default_status")]
    pub status_code: u16,
    /// Body of the mocked response.
    #[serde(default)]
    pub response_body: String,
    /// Headers of the mocked response.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub response_headers: BTreeMap<String, String>,
    /// Whether the rule is enabled.
    #[serde(default)]
    pub is_active: bool,
}

impl MockRule {
    /// Creates an active rule with an empty response body.
    #[must_use]
    pub fn new(path_pattern: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            id: None,
            path_pattern: path_pattern.into(),
            method: method.into(),
            status_code: default_status(),
            response_body: String::new(),
            response_headers: BTreeMap::new(),
            is_active: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_code_defaults_to_ok() {
        let rule: MockRule =
            serde_json::from_str(r#"{"path_pattern":"/users/1","method":"GET"}"#).unwrap();
        assert_eq!(rule.status_code, 200);
        assert_eq!(rule.id, None);
    }

    #[test]
    fn reads_a_full_rule() {
        let json = r#"{
            "id": 3,
            "path_pattern": "/users/1",
            "method": "GET",
            "status_code": 404,
            "response_body": "{\"error\":\"not found\"}",
            "response_headers": {"Content-Type": "application/json"},
            "is_active": true
        }"#;
        let rule: MockRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.id, Some(LiveId(3)));
        assert_eq!(rule.status_code, 404);
        assert!(rule.is_active);
    }
}
