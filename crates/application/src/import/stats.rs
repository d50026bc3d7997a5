//! Import stats and warnings.

use std::fmt;

use serde::Serialize;

/// Per-kind created/updated tallies for one import run.
///
/// Reported to the caller for display; never consulted by the engine itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    /// Collections created.
    pub new_collections: u32,
    /// Collections matched to an existing record (no mutation issued).
    pub merged_collections: u32,
    /// Requests created.
    pub new_requests: u32,
    /// Requests updated in place.
    pub updated_requests: u32,
    /// Mock rules created.
    pub new_mocks: u32,
    /// Mock rules updated in place.
    pub updated_mocks: u32,
    /// Entities the run could not fully place.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ImportWarning>,
}

impl ImportStats {
    /// Total records created across all kinds.
    #[must_use]
    pub const fn total_created(&self) -> u32 {
        self.new_collections + self.new_requests + self.new_mocks
    }
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Collections: {} new, {} merged",
            self.new_collections, self.merged_collections
        )?;
        writeln!(
            f,
            "Requests: {} new, {} updated",
            self.new_requests, self.updated_requests
        )?;
        write!(
            f,
            "Mocks: {} new, {} updated",
            self.new_mocks, self.updated_mocks
        )
    }
}

/// What a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A collection node's parent never resolved (missing from the snapshot
    /// or part of a cycle); the node was skipped.
    UnresolvedCollection,
    /// A request referenced a collection that did not resolve; it was filed
    /// at the root instead.
    UnfiledRequest,
}

/// A non-fatal problem encountered during an import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportWarning {
    /// Warning category.
    pub kind: WarningKind,
    /// Name of the affected entity.
    pub subject: String,
    /// Human-readable description.
    pub message: String,
}

impl ImportWarning {
    /// Warning for a collection node whose parent never resolved.
    #[must_use]
    pub fn unresolved_collection(name: &str) -> Self {
        Self {
            kind: WarningKind::UnresolvedCollection,
            subject: name.to_string(),
            message: "parent collection is missing from the snapshot or part of a cycle"
                .to_string(),
        }
    }

    /// Warning for a request that fell back to the root.
    #[must_use]
    pub fn unfiled_request(name: &str) -> Self {
        Self {
            kind: WarningKind::UnfiledRequest,
            subject: name.to_string(),
            message: "referenced collection did not resolve; imported as unfiled".to_string(),
        }
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}
