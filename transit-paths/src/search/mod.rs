//! Path search over a [`TransportGraph`].
//!
//! Four algorithms share one contract, [`PathSearch`]:
//!
//! - [`DepthFirstSearch`]: reachability only, paths are not minimal
//! - [`BreadthFirstSearch`]: fewest hops
//! - [`DijkstraSearch`]: least total weight
//! - [`AStarSearch`]: least total weight, guided by station locations
//!
//! A search is constructed for a (start, end) pair, run once with
//! [`search`](PathSearch::search), then queried. Querying before the search has
//! run, or running it twice, is an error.

mod astar;
mod bfs;
mod compare;
mod config;
mod dfs;
mod dijkstra;

pub use astar::AStarSearch;
pub use bfs::BreadthFirstSearch;
pub use compare::{Algorithm, SearchOutcome, compare};
pub use config::SearchConfig;
pub use dfs::DepthFirstSearch;
pub use dijkstra::DijkstraSearch;

use crate::domain::{Station, StationIndex};
use crate::graph::{GraphError, TransportGraph};
use crate::index_pq::QueueError;

/// Error from path search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Start/end lookup or weight validation failed
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Frontier bookkeeping failed
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// Results queried before `search()` ran
    #[error("search has not been run yet")]
    NotSearched,

    /// `search()` called a second time
    #[error("search has already been run")]
    AlreadySearched,

    /// Station index beyond the graph
    #[error("station index {0} is out of range")]
    IndexOutOfRange(usize),

    /// Heuristic travel-time factor is negative, NaN or infinite
    #[error(
        "invalid travel time factor {travel_time_per_unit}: must be finite and non-negative"
    )]
    InvalidConfig { travel_time_per_unit: f64 },
}

/// Round a total weight to two decimals, halves away from zero.
pub fn round_weight(weight: f64) -> f64 {
    (weight * 100.0).round() / 100.0
}

/// Fail if any connection has a weight Dijkstra-style searches can't handle.
///
/// [`GraphBuilder`](crate::graph::GraphBuilder) already rejects such weights,
/// so this only fires for graphs assembled through other constructors.
fn ensure_valid_weights(graph: &TransportGraph) -> Result<(), GraphError> {
    match graph
        .connections()
        .find(|c| !(c.weight.is_finite() && c.weight >= 0.0))
    {
        Some(c) => Err(GraphError::InvalidWeight { weight: c.weight }),
        None => Ok(()),
    }
}

/// Bookkeeping shared by every search algorithm.
///
/// Holds the resolved endpoints, the `marked` set, the parent-pointer tree
/// (`edge_to`) and the order in which vertices were visited.
#[derive(Debug, Clone)]
pub struct SearchState<'g> {
    graph: &'g TransportGraph,
    start: StationIndex,
    end: StationIndex,
    marked: Vec<bool>,
    edge_to: Vec<Option<StationIndex>>,
    nodes_visited: Vec<StationIndex>,
    searched: bool,
}

impl<'g> SearchState<'g> {
    /// Resolve `start` and `end` by name and allocate per-vertex state.
    pub fn new(graph: &'g TransportGraph, start: &str, end: &str) -> Result<Self, SearchError> {
        let start = graph.index_of_station_by_name(start)?;
        let end = graph.index_of_station_by_name(end)?;
        let n = graph.number_of_stations();

        Ok(Self {
            graph,
            start,
            end,
            marked: vec![false; n],
            edge_to: vec![None; n],
            nodes_visited: Vec::new(),
            searched: false,
        })
    }

    pub fn graph(&self) -> &'g TransportGraph {
        self.graph
    }

    pub fn start(&self) -> StationIndex {
        self.start
    }

    pub fn end(&self) -> StationIndex {
        self.end
    }

    pub fn is_searched(&self) -> bool {
        self.searched
    }

    pub fn is_marked(&self, index: StationIndex) -> bool {
        self.marked.get(index.0).copied().unwrap_or(false)
    }

    /// Parent of `index` in the search tree.
    pub fn edge_to(&self, index: StationIndex) -> Option<StationIndex> {
        self.edge_to.get(index.0).copied().flatten()
    }

    /// Indices in the order the algorithm visited them.
    pub fn visited_indices(&self) -> &[StationIndex] {
        &self.nodes_visited
    }

    /// Flip into the searched state; fails if a search already ran.
    fn begin(&mut self) -> Result<(), SearchError> {
        if self.searched {
            return Err(SearchError::AlreadySearched);
        }
        self.searched = true;
        Ok(())
    }

    fn mark(&mut self, index: StationIndex) {
        self.marked[index.0] = true;
    }

    fn set_edge(&mut self, to: StationIndex, from: StationIndex) {
        self.edge_to[to.0] = Some(from);
    }

    fn visit(&mut self, index: StationIndex) {
        self.nodes_visited.push(index);
    }

    fn ensure_searched(&self) -> Result<(), SearchError> {
        if self.searched {
            Ok(())
        } else {
            Err(SearchError::NotSearched)
        }
    }

    fn check_query(&self, index: StationIndex) -> Result<(), SearchError> {
        self.ensure_searched()?;
        if index.0 >= self.marked.len() {
            return Err(SearchError::IndexOutOfRange(index.0));
        }
        Ok(())
    }

    /// Follow `edge_to` from `index` back to the start, returned start-first.
    fn walk_back(&self, index: StationIndex) -> Vec<StationIndex> {
        let mut path = vec![index];
        let mut current = index;
        while current != self.start {
            match self.edge_to(current) {
                Some(parent) => {
                    path.push(parent);
                    current = parent;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }

    fn stations(&self, indices: &[StationIndex]) -> Vec<&'g Station> {
        let graph = self.graph;
        indices.iter().filter_map(|&i| graph.station(i)).collect()
    }
}

/// Shared contract of the search algorithms.
///
/// Implementors supply [`state`](Self::state), [`search`](Self::search) and
/// [`reaches`](Self::reaches); the queries are provided on top of those.
pub trait PathSearch<'g> {
    /// Shared bookkeeping of this search.
    fn state(&self) -> &SearchState<'g>;

    /// Run the algorithm. May only be called once.
    fn search(&mut self) -> Result<(), SearchError>;

    /// Algorithm-specific reachability, without the searched/range checks.
    fn reaches(&self, index: StationIndex) -> bool;

    /// Total weight of the path to the end station, for weighted searches.
    ///
    /// `None` for unweighted searches and for unreachable ends.
    fn total_weight(&self) -> Result<Option<f64>, SearchError> {
        self.state().ensure_searched()?;
        Ok(None)
    }

    fn start(&self) -> StationIndex {
        self.state().start()
    }

    fn end(&self) -> StationIndex {
        self.state().end()
    }

    /// Whether the search found a way to `index`.
    fn has_path_to(&self, index: StationIndex) -> Result<bool, SearchError> {
        self.state().check_query(index)?;
        Ok(self.reaches(index))
    }

    /// Path from the start to `index`, start first. Empty if unreachable.
    fn path_to(&self, index: StationIndex) -> Result<Vec<&'g Station>, SearchError> {
        if !self.has_path_to(index)? {
            return Ok(Vec::new());
        }
        let state = self.state();
        Ok(state.stations(&state.walk_back(index)))
    }

    /// Path from the start to the end station.
    fn path(&self) -> Result<Vec<&'g Station>, SearchError> {
        self.path_to(self.end())
    }

    /// Stations in the order the algorithm visited them.
    fn nodes_visited(&self) -> Result<Vec<&'g Station>, SearchError> {
        let state = self.state();
        state.ensure_searched()?;
        Ok(state.stations(state.visited_indices()))
    }
}

#[cfg(test)]
mod search_tests;
