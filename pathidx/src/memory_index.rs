//! Uncompressed in-memory index over node paths
//!
//! Every node keeps the successor of each of its visits in reverse-prefix
//! order, which is exactly the information a compressed record decodes to.
//! Node 0 is the endmarker and node 1 its reverse; the reverse orientation of
//! a node is `node ^ 1`. Rows of the endmarker record are the sequence
//! starts, so LF-mapping into the endmarker is not meaningful.

use hashbrown::HashMap;
use pathidx_core::{NodeId, Range, Record, RecordSource, ENDMARKER};
use tracing::debug;

use crate::{Error, Result};

/// Decoded record of one node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryRecord {
    /// Outgoing edges as (successor, first row in the successor's record), sorted by node
    outgoing: Vec<(NodeId, usize)>,
    /// Edge rank of the successor of every row
    body: Vec<usize>,
}

impl MemoryRecord {
    /// Count rows in `[0, end)` that go to edge `rank`
    fn rank(&self, end: usize, rank: usize) -> usize {
        self.body[..end.min(self.body.len())]
            .iter()
            .filter(|&&r| r == rank)
            .count()
    }

    /// Row bounds of `range` as a half-open pair clamped to the record
    fn bounds(&self, range: Range) -> (usize, usize) {
        let len = self.body.len();
        (range.start.min(len), range.end.saturating_add(1).min(len))
    }
}

impl Record for MemoryRecord {
    fn size(&self) -> usize {
        self.body.len()
    }

    fn outdegree(&self) -> usize {
        self.outgoing.len()
    }

    fn successor(&self, i: usize) -> NodeId {
        self.outgoing[i].0
    }

    fn edge_to(&self, to: NodeId) -> Option<usize> {
        self.outgoing.binary_search_by_key(&to, |edge| edge.0).ok()
    }

    fn lf(&self, range: Range, to: NodeId) -> Range {
        if range.is_empty() {
            return Range::EMPTY;
        }
        let Some(rank) = self.edge_to(to) else {
            return Range::EMPTY;
        };
        let (start, end) = self.bounds(range);
        let offset = self.outgoing[rank].1;
        Range::from_half_open(offset + self.rank(start, rank), offset + self.rank(end, rank))
    }

    fn bd_lf(&self, range: Range, to: NodeId) -> (Range, usize) {
        let forward = self.lf(range, to);
        if forward.is_empty() {
            return (forward, 0);
        }
        let (start, end) = self.bounds(range);
        let reverse_to = to ^ 1;
        let reverse_offset = self.body[start..end]
            .iter()
            .filter(|&&rank| (self.outgoing[rank].0 ^ 1) < reverse_to)
            .count();
        (forward, reverse_offset)
    }
}

/// One visit to a node while building
struct Visit {
    /// Nodes preceding the visit, nearest first, terminated by the endmarker
    key: Vec<NodeId>,
    sequence: usize,
    predecessor: NodeId,
    successor: NodeId,
}

/// Read-only index over a set of node paths
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    records: HashMap<NodeId, MemoryRecord>,
    sequences: Vec<Vec<NodeId>>,
    bidirectional: bool,
}

impl MemoryIndex {
    /// Build an index over `paths`
    ///
    /// With `bidirectional`, the reverse orientation of every path is indexed
    /// as well, which is what bidirectional search requires. Empty paths are
    /// skipped; nodes 0 and 1 are reserved.
    pub fn from_paths(paths: &[Vec<NodeId>], bidirectional: bool) -> Result<Self> {
        let mut sequences = Vec::with_capacity(paths.len() * if bidirectional { 2 } else { 1 });
        for path in paths.iter().filter(|path| !path.is_empty()) {
            if let Some(&node) = path.iter().find(|&&node| node <= 1) {
                return Err(Error::ReservedNode(node));
            }
            sequences.push(path.clone());
            if bidirectional {
                sequences.push(path.iter().rev().map(|&node| node ^ 1).collect());
            }
        }

        let mut visits: HashMap<NodeId, Vec<Visit>> = HashMap::new();
        for (sequence, nodes) in sequences.iter().enumerate() {
            visits.entry(ENDMARKER).or_default().push(Visit {
                key: Vec::new(),
                sequence,
                predecessor: ENDMARKER,
                successor: nodes[0],
            });
            for (i, &node) in nodes.iter().enumerate() {
                let key = nodes[..i]
                    .iter()
                    .rev()
                    .copied()
                    .chain(std::iter::once(ENDMARKER))
                    .collect();
                visits.entry(node).or_default().push(Visit {
                    key,
                    sequence,
                    predecessor: if i == 0 { ENDMARKER } else { nodes[i - 1] },
                    successor: nodes.get(i + 1).copied().unwrap_or(ENDMARKER),
                });
            }
        }

        // Sorted by key, the predecessors of a node's visits are nondecreasing.
        let mut predecessors: HashMap<NodeId, Vec<NodeId>> = HashMap::with_capacity(visits.len());
        for (&node, node_visits) in visits.iter_mut() {
            node_visits.sort_by(|a, b| a.key.cmp(&b.key).then(a.sequence.cmp(&b.sequence)));
            predecessors.insert(node, node_visits.iter().map(|v| v.predecessor).collect());
        }

        let mut records = HashMap::with_capacity(visits.len());
        for (&node, node_visits) in visits.iter() {
            let mut targets: Vec<NodeId> = node_visits.iter().map(|v| v.successor).collect();
            targets.sort_unstable();
            targets.dedup();

            let outgoing = targets
                .iter()
                .map(|&to| {
                    let offset = predecessors
                        .get(&to)
                        .map_or(0, |preds| preds.partition_point(|&pred| pred < node));
                    (to, offset)
                })
                .collect();
            let body = node_visits
                .iter()
                .map(|v| targets.partition_point(|&to| to < v.successor))
                .collect();
            records.insert(node, MemoryRecord { outgoing, body });
        }

        debug!(
            sequences = sequences.len(),
            nodes = records.len(),
            bidirectional,
            "built memory index"
        );
        Ok(Self {
            records,
            sequences,
            bidirectional,
        })
    }

    /// Number of indexed sequences, reverse orientations included
    pub fn sequences(&self) -> usize {
        self.sequences.len()
    }

    /// Number of nodes with a record, endmarker included
    pub fn node_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// Nodes with a record in increasing order
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.records.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Occurrences of `pattern` in the indexed sequences, counted by scanning
    pub fn count_occurrences(&self, pattern: &[NodeId]) -> usize {
        if pattern.is_empty() {
            return 0;
        }
        self.sequences
            .iter()
            .map(|sequence| {
                sequence
                    .windows(pattern.len())
                    .filter(|window| *window == pattern)
                    .count()
            })
            .sum()
    }
}

impl RecordSource for MemoryIndex {
    type Record = MemoryRecord;

    fn record(&self, node: NodeId) -> MemoryRecord {
        self.records.get(&node).cloned().unwrap_or_default()
    }

    fn contains(&self, node: NodeId) -> bool {
        self.records.contains_key(&node)
    }
}
