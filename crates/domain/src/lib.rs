//! Mockbird Domain - Core data types
//!
//! This crate defines the data model shared by the import engine and its
//! adapters: identifiers, collection nodes, request records, mock rules and
//! the snapshot document. All types here are pure data with no I/O.

pub mod collection;
pub mod id;
pub mod mock;
pub mod request;
pub mod snapshot;

pub use collection::{LiveCollection, SnapshotCollection};
pub use id::{LiveId, ParentRef, SnapshotId};
pub use mock::MockRule;
pub use request::{AuthConfig, BodyConfig, KeyValue, RequestRecord};
pub use snapshot::Snapshot;
