//! Collection nodes.
//!
//! Collections form a forest: the remote store serves them as a tree rooted
//! at the virtual parent, while snapshots carry them as a flat list in
//! arbitrary order, each node naming its parent by snapshot id.

use serde::{Deserialize, Serialize};

use crate::id::{LiveId, ParentRef, SnapshotId};

/// A collection node as it appears in an imported snapshot.
///
/// The `id` is only meaningful within the snapshot; it exists so other nodes
/// and requests can reference this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCollection {
    /// Snapshot-local identifier.
    pub id: SnapshotId,
    /// Collection name. Uniqueness is scoped to (name, resolved parent).
    pub name: String,
    /// Parent node within the snapshot.
    #[serde(rename = "parent_id", default)]
    pub parent: ParentRef<SnapshotId>,
}

/// A collection as known to the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveCollection {
    /// Store-assigned identifier.
    pub id: LiveId,
    /// Collection name.
    pub name: String,
    /// Parent collection.
    #[serde(rename = "parent_id", default)]
    pub parent: ParentRef<LiveId>,
    /// Child collections, populated when served as a tree.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LiveCollection>,
}

impl LiveCollection {
    /// Creates a childless collection node.
    #[must_use]
    pub fn new(id: LiveId, name: impl Into<String>, parent: ParentRef<LiveId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
            children: Vec::new(),
        }
    }

    /// Flattens a collection forest into a list, depth-first with parents
    /// before their children. Child vectors are drained in the process.
    #[must_use]
    pub fn flatten(tree: Vec<Self>) -> Vec<Self> {
        let mut flat = Vec::new();
        let mut stack: Vec<Self> = tree.into_iter().rev().collect();
        while let Some(mut node) = stack.pop() {
            let children = std::mem::take(&mut node.children);
            stack.extend(children.into_iter().rev());
            flat.push(node);
        }
        flat
    }
}
