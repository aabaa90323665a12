//! Trial-driven path search over a network of learning automata.
//!
//! Each trial walks from `src` by asking every visited node's automaton for its
//! next hop, at a virtual time that advances by one slot per trial. A walk stops
//! at `dest`, at a node with no neighbors, or as soon as it revisits a node.
//!
//! Walks that reach `dest` are scored by total edge weight (the lightest one is
//! kept) and every hop on them is rewarded with
//! \[
//! f = \operatorname{clamp}\left(1 - \frac{h}{N}, 0, 1\right),
//! \]
//! where \(h\) is the hop count and \(N\) the number of automata, so paths with
//! fewer hops are reinforced harder. Failed walks only stamp their hops with the
//! trial time.
//!
//! Learning is cumulative: probabilities, timestamps and the virtual clock carry
//! over between calls to [`PathSearch::path`] until [`PathSearch::clear`].

use std::collections::HashSet;
use std::fmt;
use std::io;

use tracing::{debug, error, trace, warn};

use crate::automaton::{self, AutomatonNetwork, LearningAutomaton};
use crate::edge_store::{capacity_bucket, EdgeRecord, EdgeStore, NodeId};

/// Trial budget used when none (or a non-positive one) is given.
pub const DEFAULT_ITERATIONS: usize = 3000;

/// Virtual time added per trial.
pub const DEFAULT_TIME_SLOT: f64 = 0.001;

/// Number of capacity tiers edge weights are mapped into.
pub const DEFAULT_CAPACITY_BUCKETS: usize = 8;

/// Errors for path search.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Path is too short to have a length, or longer than any acyclic path can be.
    #[error("invalid path: {len} nodes for a network of {automata} automata")]
    InvalidPath {
        /// Number of nodes in the path.
        len: usize,
        /// Number of automata in the network.
        automata: usize,
    },
    /// Consecutive path nodes with no stored edge between them.
    #[error("no edge {from}->{to}")]
    MissingEdge {
        /// Source endpoint.
        from: NodeId,
        /// Destination endpoint.
        to: NodeId,
    },
    /// Time slot must be positive and finite.
    #[error("time slot must be positive and finite, got {0}")]
    InvalidTimeSlot(f64),
    /// At least one capacity bucket is required.
    #[error("capacity bucket count must be at least 1, got {0}")]
    InvalidBucketCount(usize),
}

/// Convenience result type for this module.
pub type Result<T> = std::result::Result<T, Error>;

/// Something that can find a path between two nodes and be reset.
pub trait PathSearch {
    /// Best path from `src` to `dest`, or an empty vector if none was found.
    fn path(&mut self, src: NodeId, dest: NodeId) -> Vec<NodeId>;

    /// Discard all graph and learned state.
    fn clear(&mut self);
}

/// Search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Trials per call to [`PathSearch::path`]; `0` selects [`DEFAULT_ITERATIONS`].
    pub iterations: usize,
    /// Virtual time added per trial.
    pub time_slot: f64,
    /// Number of capacity tiers.
    pub capacity_buckets: usize,
    /// Seed for the automata's generators; `None` draws from system entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            time_slot: DEFAULT_TIME_SLOT,
            capacity_buckets: DEFAULT_CAPACITY_BUCKETS,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Set the trial budget; `budget <= 0` selects [`DEFAULT_ITERATIONS`].
    pub fn with_iterations(mut self, budget: i64) -> Self {
        self.iterations = if budget > 0 {
            budget as usize
        } else {
            DEFAULT_ITERATIONS
        };
        self
    }

    /// Set the virtual time slot.
    pub fn with_time_slot(mut self, slot: f64) -> Self {
        self.time_slot = slot;
        self
    }

    /// Set the number of capacity tiers.
    pub fn with_capacity_buckets(mut self, buckets: usize) -> Self {
        self.capacity_buckets = buckets;
        self
    }

    /// Make tie-breaking deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.time_slot <= 0.0 || !self.time_slot.is_finite() {
            return Err(Error::InvalidTimeSlot(self.time_slot));
        }
        if self.capacity_buckets == 0 {
            return Err(Error::InvalidBucketCount(self.capacity_buckets));
        }
        Ok(())
    }
}

/// Whether any node occurs more than once in `path`.
pub fn has_cycle(path: &[NodeId]) -> bool {
    let unique: HashSet<NodeId> = path.iter().copied().collect();
    unique.len() != path.len()
}

/// Reward for a successful walk of `hops` hops in a network of `automata` automata.
///
/// `hops` counts edges, not nodes: a walk `[a, b, c]` has 2 hops. A walk through
/// every node of an N-node chain therefore still earns `1/N`.
pub fn hop_feedback(hops: usize, automata: usize) -> f64 {
    if automata == 0 {
        return 0.0;
    }
    (1.0 - hops as f64 / automata as f64).clamp(0.0, 1.0)
}

fn node_seed(seed: u64, node: NodeId) -> u64 {
    seed ^ (node as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Path search engine backed by one [`LearningAutomaton`] per node.
///
/// Not meant for concurrent mutation; a host sharing one engine between threads
/// should lock the whole engine.
#[derive(Debug, Clone)]
pub struct LaPathSearch {
    config: SearchConfig,
    edges: EdgeStore,
    network: AutomatonNetwork,
    clock: f64,
    searched: bool,
}

impl LaPathSearch {
    /// Build with [`SearchConfig::default`].
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let mut engine = Self::empty(SearchConfig::default());
        engine.insert_edges(records);
        engine
    }

    /// Build with an explicit configuration.
    pub fn with_config<I>(records: I, config: SearchConfig) -> Result<Self>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        Self::from_source(
            records.into_iter().map(Ok::<_, std::convert::Infallible>),
            config,
        )
    }

    /// Build from a fallible edge source.
    ///
    /// A source error ends loading: it is logged and the engine keeps the edges
    /// read before it, possibly none.
    pub fn from_source<I, E>(source: I, config: SearchConfig) -> Result<Self>
    where
        I: IntoIterator<Item = std::result::Result<EdgeRecord, E>>,
        E: fmt::Display,
    {
        config.validate()?;
        let mut records = Vec::new();
        for item in source {
            match item {
                Ok(record) => records.push(record),
                Err(e) => {
                    error!(loaded = records.len(), "topology load failed: {}", e);
                    break;
                }
            }
        }
        let mut engine = Self::empty(config);
        engine.insert_edges(records);
        Ok(engine)
    }

    fn empty(mut config: SearchConfig) -> Self {
        if config.iterations == 0 {
            config.iterations = DEFAULT_ITERATIONS;
        }
        Self {
            config,
            edges: EdgeStore::new(),
            network: AutomatonNetwork::new(),
            clock: 0.0,
            searched: false,
        }
    }

    /// Add edges and register them with the automata of their endpoints.
    ///
    /// Capacity tiers are scaled by the largest weight across the stored edges and
    /// this batch. Adding a neighbor resets that node's distribution to uniform, so
    /// inserting after a search has run discards what the node learned.
    pub fn insert_edges<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let records: Vec<EdgeRecord> = records.into_iter().collect();
        let max_weight = records
            .iter()
            .map(|r| r.length as f64)
            .fold(self.edges.max_weight(), f64::max);
        let buckets = self.config.capacity_buckets;

        for record in records {
            let edge = self.edges.insert(record);
            let capacity = capacity_bucket(edge.weight, max_weight, buckets);
            let searched = self.searched;

            let la = self.automaton_entry(edge.from);
            if searched && la.probability(edge.to).is_none() && !la.is_empty() {
                warn!(
                    node = edge.from,
                    neighbor = edge.to,
                    "neighbor added after search; learned probabilities reset"
                );
            }
            la.insert_neighbor(edge.to, capacity);
            self.automaton_entry(edge.to);
        }

        debug!(
            edges = self.edges.len(),
            automata = self.network.len(),
            max_weight,
            "automaton network updated"
        );
    }

    fn automaton_entry(&mut self, node: NodeId) -> &mut LearningAutomaton {
        let seed = self.config.seed;
        self.network.entry(node).or_insert_with(|| match seed {
            Some(s) => LearningAutomaton::with_seed(node_seed(s, node)),
            None => LearningAutomaton::new(),
        })
    }

    /// Total weight of `path`.
    ///
    /// Fails with [`Error::InvalidPath`] for fewer than two nodes or more nodes
    /// than automata, and with [`Error::MissingEdge`] if a hop has no edge.
    pub fn path_length(&self, path: &[NodeId]) -> Result<f64> {
        if path.len() <= 1 || path.len() > self.network.len() {
            return Err(Error::InvalidPath {
                len: path.len(),
                automata: self.network.len(),
            });
        }
        let mut total = 0.0;
        for hop in path.windows(2) {
            total += self
                .edges
                .weight(hop[0], hop[1])
                .ok_or(Error::MissingEdge {
                    from: hop[0],
                    to: hop[1],
                })?;
        }
        Ok(total)
    }

    fn traverse(&mut self, src: NodeId, dest: NodeId, time: f64) -> Vec<NodeId> {
        let mut path = vec![src];
        let mut visited = HashSet::from([src]);
        let mut node = src;
        // A walk of N automata revisits a node after at most N hops.
        for _ in 0..=self.network.len() {
            if node == dest {
                break;
            }
            let next = self
                .network
                .get_mut(&node)
                .and_then(|la| la.next_hop(time));
            match next {
                Some(n) => {
                    path.push(n);
                    node = n;
                    if !visited.insert(n) {
                        break;
                    }
                }
                None => break,
            }
        }
        path
    }

    fn for_each_hop<F>(&mut self, path: &[NodeId], mut apply: F)
    where
        F: FnMut(&mut LearningAutomaton, NodeId) -> automaton::Result<()>,
    {
        for hop in path.windows(2) {
            let (from, to) = (hop[0], hop[1]);
            let outcome = match self.network.get_mut(&from) {
                Some(la) => apply(la, to),
                None => Err(automaton::Error::UnknownNeighbor { node: to }),
            };
            if let Err(e) = outcome {
                warn!(node = from, "skipping hop update: {}", e);
            }
        }
    }

    fn reward(&mut self, path: &[NodeId], time: f64, feedback: f64) {
        self.for_each_hop(path, |la, to| la.update_probs(to, time, feedback));
    }

    fn stamp(&mut self, path: &[NodeId], time: f64) {
        self.for_each_hop(path, |la, to| la.time_change(to, time));
    }

    /// Write `node`'s probability table to `out`; `Ok(false)` if the node is unknown.
    pub fn dump_probabilities<W: io::Write>(&self, node: NodeId, out: &mut W) -> io::Result<bool> {
        match self.network.get(&node) {
            Some(la) => la.dump_probabilities(out).map(|()| true),
            None => Ok(false),
        }
    }

    /// The automaton of `node`.
    pub fn automaton(&self, node: NodeId) -> Option<&LearningAutomaton> {
        self.network.get(&node)
    }

    /// Number of automata (nodes seen as an edge endpoint).
    pub fn automaton_count(&self) -> usize {
        self.network.len()
    }

    /// Stored edges.
    pub fn edge_store(&self) -> &EdgeStore {
        &self.edges
    }

    /// Active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Current virtual time.
    pub fn clock(&self) -> f64 {
        self.clock
    }
}

impl PathSearch for LaPathSearch {
    fn path(&mut self, src: NodeId, dest: NodeId) -> Vec<NodeId> {
        self.searched = true;
        let mut best: Vec<NodeId> = Vec::new();
        let mut best_length = f64::INFINITY;
        let mut successes = 0usize;

        for _ in 0..self.config.iterations {
            self.clock += self.config.time_slot;
            let time = self.clock;
            let walk = self.traverse(src, dest, time);

            if walk.first() != Some(&src) || walk.last() != Some(&dest) {
                self.stamp(&walk, time);
                continue;
            }

            let length = match self.path_length(&walk) {
                Ok(length) => length,
                Err(e) => {
                    trace!(src, dest, "walk rejected: {}", e);
                    self.stamp(&walk, time);
                    continue;
                }
            };

            if length < best_length {
                best_length = length;
                best = walk.clone();
            }
            let feedback = hop_feedback(walk.len() - 1, self.network.len());
            self.reward(&walk, time, feedback);
            successes += 1;
        }

        debug!(
            src,
            dest,
            iterations = self.config.iterations,
            successes,
            hops = best.len().saturating_sub(1),
            "path search finished"
        );
        best
    }

    fn clear(&mut self) {
        self.edges.clear();
        self.network.clear();
        self.clock = 0.0;
        self.searched = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chain(k: usize) -> Vec<EdgeRecord> {
        (0..k).map(|i| EdgeRecord::new(i, i + 1, i as u64 + 1)).collect()
    }

    fn seeded(records: Vec<EdgeRecord>, iterations: i64) -> LaPathSearch {
        let config = SearchConfig::default().with_seed(17).with_iterations(iterations);
        LaPathSearch::with_config(records, config).unwrap()
    }

    #[test]
    fn chain_yields_the_only_path() {
        let mut la = seeded(chain(6), 0);
        assert_eq!(la.path(0, 6), vec![0, 1, 2, 3, 4, 5, 6]);
        // Cumulative state does not disturb a second query.
        assert_eq!(la.path(0, 6), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(la.path(2, 4), vec![2, 3, 4]);
    }

    #[test]
    fn unreachable_destination_is_empty() {
        let records = vec![EdgeRecord::new(0, 1, 1), EdgeRecord::new(2, 3, 1)];
        for budget in [1, 10, 500] {
            let mut la = seeded(records.clone(), budget);
            assert!(la.path(0, 3).is_empty(), "budget={}", budget);
            assert!(la.path(3, 0).is_empty(), "budget={}", budget);
        }
    }

    #[test]
    fn unknown_source_and_trivial_query_are_empty() {
        let mut la = seeded(chain(3), 50);
        assert!(la.path(42, 3).is_empty());
        assert!(la.path(1, 1).is_empty());
    }

    #[test]
    fn walks_escape_cycles() {
        let records = vec![
            EdgeRecord::new(0, 1, 1),
            EdgeRecord::new(1, 0, 1),
            EdgeRecord::new(1, 2, 1),
        ];
        let mut la = seeded(records, 200);
        assert_eq!(la.path(0, 2), vec![0, 1, 2]);
    }

    #[test]
    fn diamond_returns_lighter_branch() {
        let records = vec![
            EdgeRecord::new(0, 1, 1),
            EdgeRecord::new(1, 3, 1),
            EdgeRecord::new(0, 2, 5),
            EdgeRecord::new(2, 3, 5),
        ];
        let mut la = seeded(records, 300);
        assert_eq!(la.path(0, 3), vec![0, 1, 3]);
    }

    #[test]
    fn fewer_hops_earn_more_probability() {
        let records = vec![
            EdgeRecord::new(0, 3, 1),
            EdgeRecord::new(0, 1, 1),
            EdgeRecord::new(1, 2, 1),
            EdgeRecord::new(2, 3, 1),
        ];
        let mut la = seeded(records, 0);
        assert_eq!(la.path(0, 3), vec![0, 3]);
        let a = la.automaton(0).unwrap();
        let direct = a.probability(3).unwrap();
        let detour = a.probability(1).unwrap();
        assert!(direct > detour, "direct={} detour={}", direct, detour);
        assert!((a.probability_sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_learning() {
        let records = vec![
            EdgeRecord::new(0, 1, 2),
            EdgeRecord::new(0, 2, 2),
            EdgeRecord::new(1, 3, 2),
            EdgeRecord::new(2, 3, 2),
            EdgeRecord::new(1, 2, 1),
        ];
        let mut a = seeded(records.clone(), 100);
        let mut b = seeded(records, 100);
        assert_eq!(a.path(0, 3), b.path(0, 3));

        let (mut da, mut db) = (Vec::new(), Vec::new());
        assert!(a.dump_probabilities(0, &mut da).unwrap());
        assert!(b.dump_probabilities(0, &mut db).unwrap());
        assert_eq!(da, db);
        assert!(!a.dump_probabilities(99, &mut da).unwrap());
    }

    #[test]
    fn path_length_sums_edge_weights() {
        let la = seeded(vec![EdgeRecord::new(0, 1, 4), EdgeRecord::new(1, 2, 3)], 1);
        assert_eq!(la.path_length(&[0, 1]), Ok(4.0));
        assert_eq!(la.path_length(&[0, 1, 2]), Ok(7.0));
        assert_eq!(
            la.path_length(&[0]),
            Err(Error::InvalidPath { len: 1, automata: 3 })
        );
        assert_eq!(
            la.path_length(&[]),
            Err(Error::InvalidPath { len: 0, automata: 3 })
        );
        assert_eq!(
            la.path_length(&[0, 1, 2, 1]),
            Err(Error::InvalidPath { len: 4, automata: 3 })
        );
        assert_eq!(
            la.path_length(&[1, 0]),
            Err(Error::MissingEdge { from: 1, to: 0 })
        );
    }

    #[test]
    fn zero_iterations_in_literal_config_selects_default() {
        let config = SearchConfig {
            iterations: 0,
            ..SearchConfig::default().with_seed(3)
        };
        assert!(config.validate().is_ok());
        let mut la = LaPathSearch::with_config(chain(3), config).unwrap();
        assert_eq!(la.config().iterations, DEFAULT_ITERATIONS);
        assert_eq!(la.path(0, 3), vec![0, 1, 2, 3]);
        let expected = DEFAULT_ITERATIONS as f64 * DEFAULT_TIME_SLOT;
        assert!((la.clock() - expected).abs() < 1e-6, "clock={}", la.clock());
    }

    #[test]
    fn bad_hops_are_skipped_and_the_rest_updated() {
        let records = vec![
            EdgeRecord::new(0, 1, 1),
            EdgeRecord::new(0, 4, 1),
            EdgeRecord::new(1, 2, 1),
            EdgeRecord::new(2, 3, 1),
        ];
        let mut la = seeded(records, 1);
        // 1 -> 99 is not a neighbor of 1; 99 has no automaton at all.
        let walk = [0, 1, 99, 2, 3];

        la.stamp(&walk, 5.0);
        assert_eq!(la.automaton(0).unwrap().last_chosen(1), Some(5.0));
        assert_eq!(la.automaton(2).unwrap().last_chosen(3), Some(5.0));
        assert_eq!(la.automaton(1).unwrap().last_chosen(2), Some(0.0));
        assert_eq!(la.automaton(0).unwrap().probability(1), Some(0.5));

        la.reward(&walk, 6.0, 0.5);
        let a = la.automaton(0).unwrap();
        assert_eq!(a.last_chosen(1), Some(6.0));
        assert!(a.probability(1).unwrap() > 0.5, "p={:?}", a.probability(1));
        assert_eq!(la.automaton(2).unwrap().last_chosen(3), Some(6.0));
        assert!(la.automaton(99).is_none());
        for node in 0..5 {
            let a = la.automaton(node).unwrap();
            if !a.is_empty() {
                let s = a.probability_sum();
                assert!((s - 1.0).abs() < 1e-9, "node={} s={}", node, s);
            }
        }
    }

    #[test]
    fn cycle_check() {
        assert!(has_cycle(&[0, 1, 0]));
        assert!(has_cycle(&[3, 3]));
        assert!(!has_cycle(&[0, 1, 2]));
        assert!(!has_cycle(&[]));
    }

    #[test]
    fn feedback_is_clamped() {
        assert_eq!(hop_feedback(1, 4), 0.75);
        assert_eq!(hop_feedback(4, 4), 0.0);
        assert_eq!(hop_feedback(9, 4), 0.0);
        assert_eq!(hop_feedback(0, 4), 1.0);
        assert_eq!(hop_feedback(1, 0), 0.0);
    }

    #[test]
    fn clear_matches_fresh_empty_engine() {
        let mut la = seeded(chain(4), 50);
        assert!(!la.path(0, 4).is_empty());
        la.clear();

        let mut fresh = LaPathSearch::new(Vec::new());
        assert_eq!(la.automaton_count(), 0);
        assert!(la.edge_store().is_empty());
        assert_eq!(la.clock(), 0.0);
        assert_eq!(la.path(0, 4), fresh.path(0, 4));
        assert!(la.path(0, 4).is_empty());
        assert_eq!(la.path_length(&[0, 1]), fresh.path_length(&[0, 1]));
    }

    #[test]
    fn clock_is_cumulative() {
        let mut la = seeded(chain(2), 10);
        la.path(0, 2);
        la.path(0, 2);
        assert!((la.clock() - 20.0 * DEFAULT_TIME_SLOT).abs() < 1e-12);
        let last = la.automaton(0).unwrap().last_chosen(1).unwrap();
        assert!((last - la.clock()).abs() < 1e-12, "last={}", last);
    }

    #[test]
    fn late_insertion_resets_distribution() {
        let records = vec![
            EdgeRecord::new(0, 1, 1),
            EdgeRecord::new(0, 2, 1),
            EdgeRecord::new(1, 3, 1),
        ];
        let mut la = seeded(records, 100);
        la.path(0, 3);
        assert!(la.automaton(0).unwrap().probability(1).unwrap() > 0.5);

        la.insert_edges([EdgeRecord::new(0, 4, 1)]);
        let a = la.automaton(0).unwrap();
        for n in [1, 2, 4] {
            let p = a.probability(n).unwrap();
            assert!((p - 1.0 / 3.0).abs() < 1e-12, "n={} p={}", n, p);
        }
    }

    #[test]
    fn capacity_follows_graph_wide_max() {
        let records = vec![EdgeRecord::new(0, 1, 2), EdgeRecord::new(0, 2, 8)];
        let la = seeded(records, 1);
        let a = la.automaton(0).unwrap();
        assert_eq!(a.capacity(1), Some(3));
        assert_eq!(a.capacity(2), Some(DEFAULT_CAPACITY_BUCKETS));
    }

    #[test]
    fn source_error_keeps_earlier_edges() {
        let source = vec![
            Ok(EdgeRecord::new(0, 1, 1)),
            Err("truncated topology"),
            Ok(EdgeRecord::new(1, 2, 1)),
        ];
        let config = SearchConfig::default().with_seed(1);
        let mut la = LaPathSearch::from_source(source, config).unwrap();
        assert_eq!(la.edge_store().len(), 1);
        assert_eq!(la.automaton_count(), 2);
        assert_eq!(la.path(0, 1), vec![0, 1]);
        assert!(la.path(0, 2).is_empty());
    }

    #[test]
    fn config_is_validated() {
        let bad_slot = SearchConfig::default().with_time_slot(0.0);
        assert_eq!(
            LaPathSearch::with_config(chain(2), bad_slot).err(),
            Some(Error::InvalidTimeSlot(0.0))
        );
        let bad_buckets = SearchConfig::default().with_capacity_buckets(0);
        assert_eq!(
            LaPathSearch::with_config(chain(2), bad_buckets).err(),
            Some(Error::InvalidBucketCount(0))
        );
        assert_eq!(
            SearchConfig::default().with_iterations(-5).iterations,
            DEFAULT_ITERATIONS
        );
        assert_eq!(SearchConfig::default().with_iterations(12).iterations, 12);
    }

    proptest! {
        #[test]
        fn found_paths_are_acyclic_walks_between_endpoints(
            raw in prop::collection::vec((0usize..6, 0usize..6, 0u64..10), 1..20),
            src in 0usize..6,
            dest in 0usize..6,
            seed in any::<u64>()
        ) {
            let records: Vec<EdgeRecord> = raw
                .into_iter()
                .map(|(f, t, w)| EdgeRecord::new(f, t, w))
                .collect();
            let config = SearchConfig::default().with_seed(seed).with_iterations(40);
            let mut la = LaPathSearch::with_config(records, config).unwrap();
            let p = la.path(src, dest);
            if !p.is_empty() {
                prop_assert_eq!(p[0], src);
                prop_assert_eq!(*p.last().unwrap(), dest);
                prop_assert!(!has_cycle(&p), "p={:?}", p);
                for hop in p.windows(2) {
                    prop_assert!(la.edge_store().weight(hop[0], hop[1]).is_some());
                }
            }
            for node in 0..6 {
                if let Some(a) = la.automaton(node) {
                    if !a.is_empty() {
                        prop_assert!((a.probability_sum() - 1.0).abs() < 1e-9);
                    }
                }
            }
        }
    }
}
