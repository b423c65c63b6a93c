//! Depth-first search.

use tracing::{debug, trace};

use crate::domain::StationIndex;
use crate::graph::TransportGraph;

use super::{PathSearch, SearchError, SearchState};

/// Depth-first traversal from the start station.
///
/// Neighbours are explored in adjacency order. The end station is recorded
/// when first discovered but never expanded; the rest of the reachable graph
/// is still explored. The resulting path proves reachability and is not, in
/// general, the shortest by hops or weight.
///
/// The traversal keeps an explicit stack of `(vertex, next neighbour)` frames,
/// visiting vertices in the same order as the textbook recursive version.
#[derive(Debug, Clone)]
pub struct DepthFirstSearch<'g> {
    state: SearchState<'g>,
}

impl<'g> DepthFirstSearch<'g> {
    pub fn new(graph: &'g TransportGraph, start: &str, end: &str) -> Result<Self, SearchError> {
        Ok(Self {
            state: SearchState::new(graph, start, end)?,
        })
    }
}

impl<'g> PathSearch<'g> for DepthFirstSearch<'g> {
    fn state(&self) -> &SearchState<'g> {
        &self.state
    }

    fn search(&mut self) -> Result<(), SearchError> {
        self.state.begin()?;
        let graph = self.state.graph();
        let start = self.state.start();
        let end = self.state.end();

        self.state.mark(start);
        self.state.visit(start);
        let mut stack: Vec<(StationIndex, usize)> = vec![(start, 0)];

        while let Some(frame) = stack.last_mut() {
            let (v, cursor) = *frame;
            let Some(&w) = graph.adjacent_vertices(v).get(cursor) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if self.state.is_marked(w) {
                continue;
            }
            self.state.set_edge(w, v);
            self.state.mark(w);
            self.state.visit(w);

            if w == end {
                trace!(end = %w, via = %v, "DFS reached end station");
                continue;
            }
            stack.push((w, 0));
        }

        debug!(
            visited = self.state.visited_indices().len(),
            found = self.reaches(end),
            "DFS complete"
        );
        Ok(())
    }

    fn reaches(&self, index: StationIndex) -> bool {
        self.state.is_marked(index)
    }
}
