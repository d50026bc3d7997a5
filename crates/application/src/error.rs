//! Application error types

use thiserror::Error;

use crate::ports::RemoteStoreError;

/// Errors that abort an import run.
///
/// Unresolvable collection references are not errors; they surface as
/// warnings in the import stats instead.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A remote create/update/list call failed. Entities committed before
    /// the failure remain committed; re-running the import is safe.
    #[error("remote store error: {0}")]
    Remote(#[from] RemoteStoreError),
}
