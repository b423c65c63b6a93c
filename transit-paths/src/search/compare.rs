//! Running the algorithms side by side.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::graph::TransportGraph;

use super::{
    AStarSearch, BreadthFirstSearch, DepthFirstSearch, DijkstraSearch, PathSearch, SearchConfig,
    SearchError,
};

/// The available search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    DepthFirst,
    BreadthFirst,
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::DepthFirst,
        Algorithm::BreadthFirst,
        Algorithm::Dijkstra,
        Algorithm::AStar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::DepthFirst => "depth-first",
            Algorithm::BreadthFirst => "breadth-first",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "a-star",
        }
    }

    /// Whether the algorithm minimises total weight.
    pub fn is_weighted(&self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar)
    }

    /// Construct an (unrun) search of this kind.
    pub fn searcher<'g>(
        self,
        graph: &'g TransportGraph,
        start: &str,
        end: &str,
        config: &SearchConfig,
    ) -> Result<Box<dyn PathSearch<'g> + 'g>, SearchError> {
        Ok(match self {
            Algorithm::DepthFirst => Box::new(DepthFirstSearch::new(graph, start, end)?),
            Algorithm::BreadthFirst => Box::new(BreadthFirstSearch::new(graph, start, end)?),
            Algorithm::Dijkstra => Box::new(DijkstraSearch::new(graph, start, end)?),
            Algorithm::AStar => Box::new(AStarSearch::with_config(graph, start, end, config)?),
        })
    }

    /// Construct, run and summarise a search.
    pub fn run(
        self,
        graph: &TransportGraph,
        start: &str,
        end: &str,
        config: &SearchConfig,
    ) -> Result<SearchOutcome, SearchError> {
        let mut search = self.searcher(graph, start, end, config)?;
        search.search()?;
        SearchOutcome::from_search(self, search.as_ref())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Summary of one finished search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub algorithm: Algorithm,
    pub from: String,
    pub to: String,
    /// Station names from start to end; empty if the end wasn't reached.
    pub path: Vec<String>,
    /// Station names in visit order.
    pub nodes_visited: Vec<String>,
    /// Rounded total weight, for weighted algorithms that reached the end.
    pub total_weight: Option<f64>,
}

impl SearchOutcome {
    /// Summarise a search that has already run.
    pub fn from_search<'g>(
        algorithm: Algorithm,
        search: &dyn PathSearch<'g>,
    ) -> Result<Self, SearchError> {
        let graph = search.state().graph();
        let name_of = |index| {
            graph
                .station(index)
                .map(|s| s.name().to_string())
                .unwrap_or_default()
        };
        let names = |stations: Vec<&Station>| {
            stations.into_iter().map(|s| s.name().to_string()).collect()
        };

        Ok(Self {
            algorithm,
            from: name_of(search.start()),
            to: name_of(search.end()),
            path: names(search.path()?),
            nodes_visited: names(search.nodes_visited()?),
            total_weight: search.total_weight()?,
        })
    }

    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

/// Run all four algorithms for the same pair of stations.
pub fn compare(
    graph: &TransportGraph,
    start: &str,
    end: &str,
    config: &SearchConfig,
) -> Result<Vec<SearchOutcome>, SearchError> {
    Algorithm::ALL
        .iter()
        .map(|algorithm| algorithm.run(graph, start, end, config))
        .collect()
}
