//! Directed arcs between stations.

use super::{LineIndex, StationIndex};

/// A directed arc of the transport graph.
///
/// Every undirected edge is stored as two connections, one per direction,
/// with the same weight and line. See [`Connection::reversed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: StationIndex,
    pub to: StationIndex,
    pub weight: f64,
    pub line: LineIndex,
}

impl Connection {
    pub fn new(from: StationIndex, to: StationIndex, weight: f64, line: LineIndex) -> Self {
        Self {
            from,
            to,
            weight,
            line,
        }
    }

    /// The same edge travelled the other way.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            ..*self
        }
    }
}
