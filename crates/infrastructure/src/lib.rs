//! Mockbird Infrastructure - Adapters
//!
//! Implementations of the application ports against the outside world:
//! the HTTP remote store adapter and the snapshot file reader.

pub mod remote;
pub mod snapshot;

pub use remote::HttpRemoteStore;
pub use snapshot::{ReaderConfig, SnapshotError, SnapshotReader};
