//! Decoded per-node record interface

use crate::{NodeId, Range};

/// Decoded outgoing-edge and rank data of one node
///
/// Rows of the record are the visits to the node, ordered as in the index.
/// Successor indexes address the outgoing edges in increasing node order.
pub trait Record {
    /// Number of rows (visits) in the record
    fn size(&self) -> usize;

    /// Number of distinct outgoing edges
    fn outdegree(&self) -> usize;

    /// Target node of the `i`-th outgoing edge
    fn successor(&self, i: usize) -> NodeId;

    /// Successor index of the edge to `to`, if the record has one
    fn edge_to(&self, to: NodeId) -> Option<usize>;

    /// LF-mapping of `range` to the rows of `to` that follow it
    fn lf(&self, range: Range, to: NodeId) -> Range;

    /// Bidirectional LF-mapping
    ///
    /// Returns the forward range together with the number of rows in `range`
    /// whose successor sorts before `to` in reverse orientation. That count
    /// shifts the start of the backward range.
    fn bd_lf(&self, range: Range, to: NodeId) -> (Range, usize);

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
