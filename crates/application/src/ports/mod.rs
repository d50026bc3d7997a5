//! Port definitions (interfaces)
//!
//! Ports define the boundary between the import engine and the backend
//! store. Adapters in the infrastructure layer implement them.

mod remote_store;

pub use remote_store::{RemoteStore, RemoteStoreError};
