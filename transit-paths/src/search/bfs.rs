//! Breadth-first search.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::domain::StationIndex;
use crate::graph::TransportGraph;

use super::{PathSearch, SearchError, SearchState};

/// Level-order traversal from the start station.
///
/// Vertices are marked when enqueued, so each is discovered exactly once and
/// its parent is fixed at first discovery. The path to the end therefore has
/// the fewest hops. The search stops as soon as the end station is dequeued.
#[derive(Debug, Clone)]
pub struct BreadthFirstSearch<'g> {
    state: SearchState<'g>,
}

impl<'g> BreadthFirstSearch<'g> {
    pub fn new(graph: &'g TransportGraph, start: &str, end: &str) -> Result<Self, SearchError> {
        Ok(Self {
            state: SearchState::new(graph, start, end)?,
        })
    }
}

impl<'g> PathSearch<'g> for BreadthFirstSearch<'g> {
    fn state(&self) -> &SearchState<'g> {
        &self.state
    }

    fn search(&mut self) -> Result<(), SearchError> {
        self.state.begin()?;
        let graph = self.state.graph();
        let start = self.state.start();
        let end = self.state.end();

        let mut queue = VecDeque::new();
        self.state.mark(start);
        queue.push_back(start);

        while let Some(v) = queue.pop_front() {
            self.state.visit(v);
            if v == end {
                break;
            }

            trace!(station = %v, queued = queue.len(), "BFS expanding");
            for &w in graph.adjacent_vertices(v) {
                if !self.state.is_marked(w) {
                    self.state.set_edge(w, v);
                    self.state.mark(w);
                    queue.push_back(w);
                }
            }
        }

        debug!(
            visited = self.state.visited_indices().len(),
            found = self.reaches(end),
            "BFS complete"
        );
        Ok(())
    }

    fn reaches(&self, index: StationIndex) -> bool {
        self.state.is_marked(index)
    }
}
