//! Route finding over a public transport network.
//!
//! A network is a set of named lines, each calling at stations in order.
//! [`graph::GraphBuilder`] turns line definitions, optional edge weights and
//! optional station locations into an undirected [`graph::TransportGraph`].
//! The [`search`] module answers "how do I get from A to B?" with depth-first,
//! breadth-first, Dijkstra and A* searches.

pub mod domain;
pub mod graph;
pub mod index_pq;
pub mod search;

#[cfg(test)]
mod test_networks;
