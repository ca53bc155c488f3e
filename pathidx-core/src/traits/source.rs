//! Immutable index interface

use super::Record;
use crate::NodeId;

/// Read-only index yielding decoded records
///
/// Implementations must be safe to share between threads: any number of
/// caches may fetch records from the same index concurrently.
pub trait RecordSource: Sync {
    /// Decoded record type owned by whoever fetches it
    type Record: Record;

    /// Decode the record of `node`
    ///
    /// Called for nodes the index contains; what an absent node yields is up
    /// to the index (usually an empty record).
    fn record(&self, node: NodeId) -> Self::Record;

    /// Whether the index has a record for `node`
    fn contains(&self, node: NodeId) -> bool;

    /// Node identifier of the reverse orientation of `node`
    fn reverse(&self, node: NodeId) -> NodeId {
        node ^ 1
    }
}
