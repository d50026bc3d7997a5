//! Request and mock rule reconciliation.
//!
//! Runs strictly after collection resolution: a request's collection
//! reference is remapped through the id map before the record is matched
//! against the live index by its natural key. Matched records update the
//! existing row; unmatched records are created with their id cleared.

use mockbird_domain::{MockRule, ParentRef, RequestRecord, SnapshotId};

use super::{ImportRun, ImportWarning};
use crate::error::ImportError;
use crate::ports::RemoteStore;

impl<R: RemoteStore> ImportRun<'_, R> {
    pub(super) async fn reconcile_requests(
        &mut self,
        requests: &[RequestRecord],
    ) -> Result<(), ImportError> {
        for record in requests {
            // The incoming collection reference still lives in the
            // snapshot's id space. Anything the resolver did not map falls
            // back to unfiled rather than failing the run.
            let collection = match record.collection {
                ParentRef::Root => ParentRef::Root,
                ParentRef::Node(foreign) => {
                    match self.id_map.get(&SnapshotId::from(i64::from(foreign))) {
                        Some(live) => ParentRef::Node(*live),
                        None => {
                            tracing::warn!(name = %record.name, "request collection did not resolve");
                            self.stats
                                .warnings
                                .push(ImportWarning::unfiled_request(&record.name));
                            ParentRef::Root
                        }
                    }
                }
            };

            let mut outgoing = record.clone();
            outgoing.collection = collection;

            match self
                .index
                .find_request(&record.name, collection)
                .and_then(|existing| existing.id)
            {
                Some(id) => {
                    outgoing.id = Some(id);
                    self.store.update_request(id, &outgoing).await?;
                    tracing::debug!(name = %record.name, %id, "updated request");
                    self.stats.updated_requests += 1;
                }
                None => {
                    outgoing.id = None;
                    let id = self.store.create_request(&outgoing).await?;
                    tracing::debug!(name = %record.name, %id, "created request");
                    self.stats.new_requests += 1;
                }
            }
        }
        Ok(())
    }

    pub(super) async fn reconcile_mocks(&mut self, rules: &[MockRule]) -> Result<(), ImportError> {
        for rule in rules {
            let mut outgoing = rule.clone();

            match self
                .index
                .find_mock(&rule.path_pattern, &rule.method)
                .and_then(|existing| existing.id)
            {
                Some(id) => {
                    outgoing.id = Some(id);
                    self.store.update_mock(id, &outgoing).await?;
                    tracing::debug!(path = %rule.path_pattern, method = %rule.method, %id, "updated mock rule");
                    self.stats.updated_mocks += 1;
                }
                None => {
                    outgoing.id = None;
                    let id = self.store.create_mock(&outgoing).await?;
                    tracing::debug!(path = %rule.path_pattern, method = %rule.method, %id, "created mock rule");
                    self.stats.new_mocks += 1;
                }
            }
        }
        Ok(())
    }
}
