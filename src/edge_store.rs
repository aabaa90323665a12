//! Static graph storage: directed weighted edges with ascending ids.
//!
//! Edges are created once from loader records and never mutated. Identity is the
//! edge `id` alone, so two edges with the same endpoints and weight are still
//! distinct if they were inserted separately.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Node identifier.
pub type NodeId = usize;

/// Edge record as produced by a topology loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Source node.
    pub from: NodeId,
    /// Destination node.
    pub to: NodeId,
    /// Non-negative integer length.
    pub length: u64,
}

impl EdgeRecord {
    /// Shorthand constructor.
    pub fn new(from: NodeId, to: NodeId, length: u64) -> Self {
        Self { from, to, length }
    }
}

/// Directed edge stored in an [`EdgeStore`].
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// Source node.
    pub from: NodeId,
    /// Destination node.
    pub to: NodeId,
    /// Edge weight (finite, `>= 0`).
    pub weight: f64,
    /// Store-assigned id, strictly increasing in insertion order.
    pub id: u64,
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Hands out edge ids `1, 2, 3, ...`.
#[derive(Debug, Clone, Default)]
pub struct EdgeIdGenerator {
    last: u64,
}

impl EdgeIdGenerator {
    /// Next id.
    pub fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}

/// The graph as a set of directed weighted edges.
#[derive(Debug, Clone, Default)]
pub struct EdgeStore {
    edges: Vec<Edge>,
    // (from, to) -> index of the first edge inserted for that pair.
    by_pair: HashMap<(NodeId, NodeId), usize>,
    ids: EdgeIdGenerator,
    max_weight: f64,
}

impl EdgeStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an edge built from `record` and return a copy of it.
    pub fn insert(&mut self, record: EdgeRecord) -> Edge {
        let edge = Edge {
            from: record.from,
            to: record.to,
            weight: record.length as f64,
            id: self.ids.next_id(),
        };
        self.by_pair
            .entry((edge.from, edge.to))
            .or_insert(self.edges.len());
        if edge.weight > self.max_weight {
            self.max_weight = edge.weight;
        }
        self.edges.push(edge);
        edge
    }

    /// The edge used for weight lookups between `from` and `to`.
    ///
    /// With parallel edges this is the first one inserted.
    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.by_pair.get(&(from, to)).map(|&k| &self.edges[k])
    }

    /// Weight of the edge `from -> to`, if any.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.edge(from, to).map(|e| e.weight)
    }

    /// Largest weight seen so far (`0.0` when empty).
    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    /// All edges in id order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of stored edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the store holds no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Drop every edge and restart ids from 1.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Map a weight into one of `buckets` linear tiers, `1..=buckets`.
///
/// `weight >= max_weight` lands in the top tier, `weight <= 0` in the bottom one.
/// `buckets` must be at least 1.
pub fn capacity_bucket(weight: f64, max_weight: f64, buckets: usize) -> usize {
    if weight >= max_weight {
        return buckets;
    }
    if weight <= 0.0 {
        return 1;
    }
    let tier = (buckets as f64 * weight / max_weight).floor() as usize;
    (tier + 1).min(buckets)
}
