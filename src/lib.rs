//! Path search on weighted directed graphs driven by learning automata.
//!
//! Every node runs a small learning automaton over its outgoing edges. A search
//! repeatedly walks from source to destination, letting each automaton pick the
//! next hop, and reinforces the hops of walks that arrive. The lightest arriving
//! walk is reported.
//!
//! Public invariants (must not change):
//! - Every automaton's distribution sums to 1 after each update.
//! - A non-empty result starts at the source, ends at the destination and is acyclic.
//! - Randomness is per automaton and seedable (`SearchConfig::seed`).
//! - The result is a heuristic: no shortest-path guarantee, and an empty result
//!   when no walk arrived within the trial budget.

pub mod automaton;
pub mod edge_store;
pub mod search;

pub use automaton::{AutomatonNetwork, LearningAutomaton};
pub use edge_store::{Edge, EdgeRecord, EdgeStore, NodeId};
pub use search::{LaPathSearch, PathSearch, SearchConfig};
