//! Per-node learning automata.
//!
//! A [`LearningAutomaton`] keeps, for every outgoing neighbor of its node:
//! - a selection probability \(p_j\) (the distribution sums to 1),
//! - the virtual time \(\tau_j\) the neighbor was last chosen,
//! - a capacity bucket \(c_j \ge 1\) derived from the edge weight.
//!
//! Hop selection maximizes the cost
//! \[
//! \kappa_j(t) = \frac{(t - \tau_j)^2 \, p_j}{c_j},
//! \]
//! so neighbors that have not been tried recently gain priority, scaled by the
//! learned preference and divided by capacity.
//!
//! Reinforcement is the linear reward rule with floor \(a\) and rate \(\lambda\):
//! every other neighbor loses \(\lambda f (p_j - a)\) and the rewarded neighbor gains
//! the sum of those losses, so total mass is conserved.

use std::collections::{BTreeMap, HashMap};
use std::io;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::edge_store::NodeId;

/// Probability floor `a` of the reward rule.
pub const PROBABILITY_FLOOR: f64 = 0.0001;

/// Learning rate `λ` of the reward rule.
pub const LEARNING_RATE: f64 = 0.15;

/// Capacity used when a neighbor is inserted without one.
pub const DEFAULT_CAPACITY: usize = 1;

/// Errors for automaton updates.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The referenced node was never inserted as a neighbor.
    #[error("unknown neighbor {node}")]
    UnknownNeighbor {
        /// The offending node id.
        node: NodeId,
    },
}

/// Convenience result type for this module.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy)]
struct Arm {
    probability: f64,
    last_chosen: f64,
    capacity: usize,
}

impl Arm {
    fn cost(&self, time: f64) -> f64 {
        (time - self.last_chosen).powi(2) * self.probability / self.capacity as f64
    }
}

/// Adaptive next-hop selector for a single node.
#[derive(Debug, Clone)]
pub struct LearningAutomaton {
    // One entry per neighbor keeps the three per-neighbor tables on a shared key set.
    arms: BTreeMap<NodeId, Arm>,
    rng: StdRng,
}

impl Default for LearningAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

impl LearningAutomaton {
    /// Empty automaton with an entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            arms: BTreeMap::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Empty automaton with a deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            arms: BTreeMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Automaton seeded with `neighbors`, each at [`DEFAULT_CAPACITY`], uniformly weighted.
    pub fn with_neighbors<I>(neighbors: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut la = Self::with_seed(seed);
        for node in neighbors {
            la.insert_neighbor(node, DEFAULT_CAPACITY);
        }
        la
    }

    /// Register `node` as a neighbor. No-op if it is already known.
    ///
    /// A new neighbor resets the whole distribution to uniform, discarding any
    /// adaptation made so far.
    pub fn insert_neighbor(&mut self, node: NodeId, capacity: usize) {
        if self.arms.contains_key(&node) {
            return;
        }
        self.arms.insert(
            node,
            Arm {
                probability: 0.0,
                last_chosen: 0.0,
                capacity: capacity.max(1),
            },
        );
        let uniform = 1.0 / self.arms.len() as f64;
        for arm in self.arms.values_mut() {
            arm.probability = uniform;
        }
    }

    /// Pick the neighbor with the highest cost at `time`.
    ///
    /// Exact ties are broken uniformly at random.
    ///
    /// Returns `None` iff the automaton has no neighbors.
    pub fn next_hop(&mut self, time: f64) -> Option<NodeId> {
        let mut best = f64::NEG_INFINITY;
        let mut candidates: Vec<NodeId> = Vec::new();
        for (&node, arm) in &self.arms {
            let cost = arm.cost(time);
            if cost > best {
                best = cost;
                candidates.clear();
                candidates.push(node);
            } else if cost == best {
                candidates.push(node);
            }
        }
        match candidates.len() {
            0 => None,
            1 => Some(candidates[0]),
            n => Some(candidates[self.rng.gen_range(0..n)]),
        }
    }

    /// Reward `node` with `feedback` (clamped to `[0, 1]`) and stamp it with `time`.
    pub fn update_probs(&mut self, node: NodeId, time: f64, feedback: f64) -> Result<()> {
        if !self.arms.contains_key(&node) {
            return Err(Error::UnknownNeighbor { node });
        }
        let f = feedback.clamp(0.0, 1.0);
        let step = LEARNING_RATE * f;

        let mut siphoned = 0.0;
        for (&other, arm) in self.arms.iter_mut() {
            if other == node {
                continue;
            }
            let excess = arm.probability - PROBABILITY_FLOOR;
            siphoned += excess;
            arm.probability -= step * excess;
        }

        if let Some(arm) = self.arms.get_mut(&node) {
            arm.probability += step * siphoned;
            arm.last_chosen = time;
        }
        Ok(())
    }

    /// Stamp `node` with `time` without touching probabilities.
    pub fn time_change(&mut self, node: NodeId, time: f64) -> Result<()> {
        let arm = self
            .arms
            .get_mut(&node)
            .ok_or(Error::UnknownNeighbor { node })?;
        arm.last_chosen = time;
        Ok(())
    }

    /// Known neighbors in ascending id order.
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arms.keys().copied()
    }

    /// Selection probability of `node`.
    pub fn probability(&self, node: NodeId) -> Option<f64> {
        self.arms.get(&node).map(|a| a.probability)
    }

    /// Capacity bucket of `node`.
    pub fn capacity(&self, node: NodeId) -> Option<usize> {
        self.arms.get(&node).map(|a| a.capacity)
    }

    /// Time `node` was last chosen.
    pub fn last_chosen(&self, node: NodeId) -> Option<f64> {
        self.arms.get(&node).map(|a| a.last_chosen)
    }

    /// Sum of all neighbor probabilities.
    pub fn probability_sum(&self) -> f64 {
        self.arms.values().map(|a| a.probability).sum()
    }

    /// Number of neighbors.
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    /// Whether the automaton has no neighbors.
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// Write the probability table, one `node: <id>, prob: <p>` line per neighbor.
    pub fn dump_probabilities<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for (node, arm) in &self.arms {
            writeln!(out, "node: {}, prob: {}", node, arm.probability)?;
        }
        Ok(())
    }
}

/// One automaton per graph node.
pub type AutomatonNetwork = HashMap<NodeId, LearningAutomaton>;
