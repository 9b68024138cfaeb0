//! Core database trait for the class registry
//!
//! The registry is the single mutable structure threaded through every
//! pipeline stage. Stages only depend on this trait plus the concrete
//! entity type, so each one can be exercised against a synthetic registry.

use anyhow::Result;

/// Core trait for model databases
///
/// Entries are keyed by the identifier of the diagram node they came from
/// and iterate in insertion order.
pub trait Database: Send + Sync {
    /// The entry type stored in this database
    type Entry: Clone + Send + Sync;

    /// Insert an entry under the given node id
    fn insert(&mut self, id: &str, entry: Self::Entry) -> Result<()>;

    /// Get an entry by node id
    fn get(&self, id: &str) -> Option<&Self::Entry>;

    /// Get a mutable entry by node id
    fn get_mut(&mut self, id: &str) -> Option<&mut Self::Entry>;

    /// Iterate over all entries in insertion order
    fn entries(&self) -> impl Iterator<Item = &Self::Entry>;

    /// Returns true if an entry exists for the node id
    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of entries
    fn len(&self) -> usize;

    /// Returns true if the database holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
