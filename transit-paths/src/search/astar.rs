//! A* shortest path.

use tracing::{debug, trace, warn};

use crate::domain::{Location, StationIndex};
use crate::graph::TransportGraph;
use crate::index_pq::IndexMinPq;

use super::{PathSearch, SearchConfig, SearchError, SearchState, ensure_valid_weights, round_weight};

/// Least-weight path search guided by station locations.
///
/// Vertices are prioritised by `g + h`. `g` is the settled cost from the
/// start and is stored per vertex. `h` is the straight-line travel-time
/// estimate to the end station, recomputed on demand from locations. A station
/// without a location, or an end station without one, contributes `h = 0`.
///
/// A vertex whose `g` improves after it was settled goes back on the
/// frontier, so the result is optimal for any admissible heuristic, not only
/// consistent ones. If the configured factor is larger than the graph's
/// [`max_admissible_travel_factor`](TransportGraph::max_admissible_travel_factor)
/// the heuristic may overestimate and a warning is logged.
#[derive(Debug, Clone)]
pub struct AStarSearch<'g> {
    state: SearchState<'g>,
    g_score: Vec<f64>,
    frontier: IndexMinPq<f64>,
    target: Option<Location>,
    travel_time_per_unit: f64,
}

impl<'g> AStarSearch<'g> {
    /// A* with the default [`SearchConfig`].
    pub fn new(graph: &'g TransportGraph, start: &str, end: &str) -> Result<Self, SearchError> {
        Self::with_config(graph, start, end, &SearchConfig::default())
    }

    pub fn with_config(
        graph: &'g TransportGraph,
        start: &str,
        end: &str,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        let state = SearchState::new(graph, start, end)?;
        ensure_valid_weights(graph)?;

        let factor = config.travel_time_per_unit;
        if let Some(max) = graph.max_admissible_travel_factor()
            && factor > max
        {
            warn!(
                factor,
                max_admissible = max,
                "Heuristic factor may overestimate; A* paths can be suboptimal"
            );
        }

        let target = graph.station(state.end()).and_then(|s| s.location());
        if target.is_none() {
            debug!(end = %state.end(), "End station has no location, heuristic disabled");
        }

        let n = graph.number_of_stations();
        Ok(Self {
            state,
            g_score: vec![f64::INFINITY; n],
            frontier: IndexMinPq::new(n),
            target,
            travel_time_per_unit: factor,
        })
    }

    /// Cost of the best known path from the start to `index`.
    pub fn g_score(&self, index: StationIndex) -> Result<f64, SearchError> {
        self.state.check_query(index)?;
        Ok(self.g_score[index.0])
    }

    /// Estimated remaining cost from `index` to the end station.
    pub fn heuristic(&self, index: StationIndex) -> f64 {
        let location = self
            .state
            .graph()
            .station(index)
            .and_then(|s| s.location());

        match (location, self.target) {
            (Some(here), Some(target)) => here.travel_time_with(&target, self.travel_time_per_unit),
            _ => 0.0,
        }
    }

    fn relax(&mut self, v: StationIndex) -> Result<(), SearchError> {
        let graph = self.state.graph();

        for &w in graph.adjacent_vertices(v) {
            let Some(connection) = graph.connection(v, w) else {
                continue;
            };
            let candidate = self.g_score[v.0] + connection.weight;
            if candidate >= self.g_score[w.0] {
                continue;
            }

            self.g_score[w.0] = candidate;
            self.state.set_edge(w, v);
            let priority = candidate + self.heuristic(w);
            if self.frontier.contains(w.0) {
                self.frontier.change_key(w.0, priority)?;
            } else {
                if self.state.is_marked(w) {
                    trace!(station = %w, "A* reopening settled station");
                }
                self.frontier.insert(w.0, priority)?;
            }
        }
        Ok(())
    }
}

impl<'g> PathSearch<'g> for AStarSearch<'g> {
    fn state(&self) -> &SearchState<'g> {
        &self.state
    }

    fn search(&mut self) -> Result<(), SearchError> {
        self.state.begin()?;
        let start = self.state.start();
        let end = self.state.end();

        self.g_score[start.0] = 0.0;
        self.frontier.insert(start.0, self.heuristic(start))?;

        while !self.frontier.is_empty() {
            let v = StationIndex(self.frontier.del_min()?);
            self.state.mark(v);
            self.state.visit(v);
            if v == end {
                break;
            }
            trace!(station = %v, g = self.g_score[v.0], "A* expanding");
            self.relax(v)?;
        }

        debug!(
            visited = self.state.visited_indices().len(),
            distance = self.g_score[end.0],
            "A* complete"
        );
        Ok(())
    }

    fn reaches(&self, index: StationIndex) -> bool {
        self.g_score
            .get(index.0)
            .is_some_and(|g| *g < f64::INFINITY)
    }

    /// Cost of the path to the end station, rounded to two decimals.
    fn total_weight(&self) -> Result<Option<f64>, SearchError> {
        let end = self.state.end();
        Ok(self
            .has_path_to(end)?
            .then(|| round_weight(self.g_score[end.0])))
    }
}
