//! Identifier types.
//!
//! The remote store assigns sequential integer ids; a snapshot carries ids
//! that are only meaningful inside that snapshot. The two id spaces are kept
//! apart at the type level so a snapshot id can never be handed to the store
//! by accident.
//!
//! The wire format uses `0` both for "no parent" on collections and for
//! "no id yet" on records. [`ParentRef`] and the [`opt_id`] serde helper
//! keep that encoding while making the two meanings explicit in the model.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier assigned by the remote store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LiveId(pub i64);

/// Identifier valid only within one imported snapshot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SnapshotId(pub i64);

impl From<i64> for LiveId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<LiveId> for i64 {
    fn from(id: LiveId) -> Self {
        id.0
    }
}

impl fmt::Display for LiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SnapshotId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<SnapshotId> for i64 {
    fn from(id: SnapshotId) -> Self {
        id.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a parent collection.
///
/// `Root` is the virtual top-level parent; on the wire it is the integer `0`
/// (the encoding used by the backend store and by exported snapshots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParentRef<I> {
    /// Top-level: no parent collection.
    #[default]
    Root,
    /// Child of the collection with the given id.
    Node(I),
}

impl<I> ParentRef<I> {
    /// Returns `true` for the virtual root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// Returns the referenced id, if any.
    #[must_use]
    pub fn node(self) -> Option<I> {
        match self {
            Self::Root => None,
            Self::Node(id) => Some(id),
        }
    }
}

impl<I: Into<i64> + Copy> Serialize for ParentRef<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = match self {
            Self::Root => 0,
            Self::Node(id) => (*id).into(),
        };
        serializer.serialize_i64(raw)
    }
}

impl<'de, I: From<i64>> Deserialize<'de> for ParentRef<I> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(if raw == 0 {
            Self::Root
        } else {
            Self::Node(I::from(raw))
        })
    }
}

/// Serde helper for record ids: `None` is encoded as `0`.
///
/// The backend treats an id of `0` on an incoming record as "create a new
/// row", so an unset id must round-trip as `0` rather than `null`.
pub mod opt_id {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::LiveId;

    /// Serializes an optional id, writing `0` when unset.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(id: &Option<LiveId>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(id.map_or(0, |id| id.0))
    }

    /// Deserializes an optional id, reading `0` as unset.
    ///
    /// # Errors
    ///
    /// Propagates deserializer errors.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<LiveId>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(if raw == 0 { None } else { Some(LiveId(raw)) })
    }
}
