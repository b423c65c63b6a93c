//! Dijkstra's shortest path.

use tracing::{debug, trace};

use crate::domain::StationIndex;
use crate::graph::TransportGraph;
use crate::index_pq::IndexMinPq;

use super::{PathSearch, SearchError, SearchState, ensure_valid_weights, round_weight};

/// Least-weight path search.
///
/// The frontier is an indexed min-queue keyed by tentative distance from the
/// start. The search stops when the end station is settled: with
/// non-negative weights no unsettled vertex can offer a shorter route, so its
/// distance is final. Negative or non-finite weights are rejected at
/// construction.
#[derive(Debug, Clone)]
pub struct DijkstraSearch<'g> {
    state: SearchState<'g>,
    dist_to: Vec<f64>,
    frontier: IndexMinPq<f64>,
}

impl<'g> DijkstraSearch<'g> {
    pub fn new(graph: &'g TransportGraph, start: &str, end: &str) -> Result<Self, SearchError> {
        let state = SearchState::new(graph, start, end)?;
        ensure_valid_weights(graph)?;
        let n = graph.number_of_stations();

        Ok(Self {
            state,
            dist_to: vec![f64::INFINITY; n],
            frontier: IndexMinPq::new(n),
        })
    }

    /// Shortest known distance from the start to `index`; infinite if unreachable.
    pub fn dist_to(&self, index: StationIndex) -> Result<f64, SearchError> {
        self.state.check_query(index)?;
        Ok(self.dist_to[index.0])
    }

    fn relax(&mut self, v: StationIndex) -> Result<(), SearchError> {
        let graph = self.state.graph();

        for &w in graph.adjacent_vertices(v) {
            let Some(connection) = graph.connection(v, w) else {
                continue;
            };
            let candidate = self.dist_to[v.0] + connection.weight;
            if candidate >= self.dist_to[w.0] {
                continue;
            }

            self.dist_to[w.0] = candidate;
            self.state.set_edge(w, v);
            if self.frontier.contains(w.0) {
                self.frontier.change_key(w.0, candidate)?;
            } else {
                self.frontier.insert(w.0, candidate)?;
            }
        }
        Ok(())
    }
}

impl<'g> PathSearch<'g> for DijkstraSearch<'g> {
    fn state(&self) -> &SearchState<'g> {
        &self.state
    }

    fn search(&mut self) -> Result<(), SearchError> {
        self.state.begin()?;
        let start = self.state.start();
        let end = self.state.end();

        self.dist_to[start.0] = 0.0;
        self.frontier.insert(start.0, 0.0)?;

        while !self.frontier.is_empty() {
            let v = StationIndex(self.frontier.del_min()?);
            self.state.mark(v);
            self.state.visit(v);
            if v == end {
                break;
            }
            trace!(station = %v, dist = self.dist_to[v.0], "Dijkstra settling");
            self.relax(v)?;
        }

        debug!(
            visited = self.state.visited_indices().len(),
            distance = self.dist_to[end.0],
            "Dijkstra complete"
        );
        Ok(())
    }

    fn reaches(&self, index: StationIndex) -> bool {
        self.dist_to
            .get(index.0)
            .is_some_and(|d| *d < f64::INFINITY)
    }

    /// Distance to the end station, rounded to two decimals.
    fn total_weight(&self) -> Result<Option<f64>, SearchError> {
        let end = self.state.end();
        Ok(self
            .has_path_to(end)?
            .then(|| round_weight(self.dist_to[end.0])))
    }
}
