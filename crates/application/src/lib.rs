//! Mockbird Application - The import engine
//!
//! This crate defines:
//! - The [`RemoteStore`] port, the engine's only view of the backend
//! - The import run: collection resolution, request and mock reconciliation
//! - Stats and warnings reported back to the caller

pub mod error;
pub mod import;
pub mod ports;

pub use error::ImportError;
pub use import::{
    ImportOutcome, ImportRun, ImportStats, ImportWarning, LiveIndex, WarningKind, import_snapshot,
};
pub use ports::{RemoteStore, RemoteStoreError};
