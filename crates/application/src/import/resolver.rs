//! Collection resolution.
//!
//! Snapshot collections arrive as a flat forest in arbitrary order, each
//! node naming its parent by snapshot id. Resolution walks the forest in
//! dependency order with a ready queue: roots first, then any node whose
//! parent has just been mapped. Nodes never reached that way have a parent
//! that is absent from the snapshot or sits on a cycle; they are skipped and
//! reported, never created with a dangling parent.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use mockbird_domain::{LiveCollection, ParentRef, SnapshotCollection};

use super::{ImportRun, ImportWarning};
use crate::error::ImportError;
use crate::ports::RemoteStore;

impl<R: RemoteStore> ImportRun<'_, R> {
    pub(super) async fn resolve_collections(
        &mut self,
        nodes: &[SnapshotCollection],
    ) -> Result<(), ImportError> {
        // Adjacency by snapshot parent id; roots seed the queue.
        let mut children: HashMap<_, Vec<usize>> = HashMap::new();
        let mut ready = VecDeque::new();
        for (pos, node) in nodes.iter().enumerate() {
            match node.parent {
                ParentRef::Root => ready.push_back(pos),
                ParentRef::Node(parent) => children.entry(parent).or_default().push(pos),
            }
        }

        let mut visited = vec![false; nodes.len()];
        while let Some(pos) = ready.pop_front() {
            if visited[pos] {
                continue;
            }
            visited[pos] = true;
            let node = &nodes[pos];

            // A queued node's parent is resolved by construction.
            let parent = match node.parent {
                ParentRef::Root => ParentRef::Root,
                ParentRef::Node(old) => match self.id_map.get(&old) {
                    Some(live) => ParentRef::Node(*live),
                    None => continue,
                },
            };

            let live = match self.index.find_collection(&node.name, parent) {
                Some(existing) => {
                    tracing::debug!(name = %node.name, id = %existing.id, "merged collection");
                    self.stats.merged_collections += 1;
                    existing.id
                }
                None => {
                    let id = self.store.create_collection(&node.name, parent).await?;
                    tracing::debug!(name = %node.name, %id, "created collection");
                    self.index
                        .insert_collection(LiveCollection::new(id, node.name.clone(), parent));
                    self.stats.new_collections += 1;
                    id
                }
            };

            // The id map is append-only: when a snapshot reuses an id, the
            // first resolution wins and only it releases the children.
            if let Entry::Vacant(entry) = self.id_map.entry(node.id) {
                entry.insert(live);
                if let Some(dependents) = children.remove(&node.id) {
                    ready.extend(dependents);
                }
            }
        }

        for (pos, node) in nodes.iter().enumerate() {
            if !visited[pos] {
                tracing::warn!(name = %node.name, id = %node.id, "unresolvable collection node");
                self.stats
                    .warnings
                    .push(ImportWarning::unresolved_collection(&node.name));
            }
        }

        Ok(())
    }
}
