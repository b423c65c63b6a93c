//! The built, read-only transport graph.

use std::collections::HashMap;

use crate::domain::{Connection, Line, LineIndex, Station, StationIndex, StationName};

use super::GraphError;

/// Undirected, weighted graph of stations.
///
/// Stations are addressed by a dense [`StationIndex`]. Each undirected edge is
/// stored as two [`Connection`]s, one per direction, carrying the same weight
/// and line. The graph is immutable once built; construct it with
/// [`GraphBuilder`](super::GraphBuilder).
#[derive(Debug, Clone)]
pub struct TransportGraph {
    stations: Vec<Station>,
    station_indices: HashMap<StationName, StationIndex>,
    lines: Vec<Line>,
    adjacency: Vec<Vec<StationIndex>>,
    connections: HashMap<(StationIndex, StationIndex), Connection>,
}

impl TransportGraph {
    /// Allocate a graph holding `stations` as vertices `0..stations.len()`, with no edges.
    pub(crate) fn with_vertices(stations: Vec<Station>, lines: Vec<Line>) -> Self {
        let station_indices = stations
            .iter()
            .enumerate()
            .map(|(i, station)| (station.name().clone(), StationIndex(i)))
            .collect();
        let adjacency = vec![Vec::new(); stations.len()];

        Self {
            stations,
            station_indices,
            lines,
            adjacency,
            connections: HashMap::new(),
        }
    }

    /// Add an undirected edge, storing the connection and its reverse.
    ///
    /// When two lines serve the same pair of stations the neighbour is listed
    /// once and the cheaper connection is kept; on a tie the first one wins.
    pub(crate) fn add_edge(&mut self, connection: Connection) {
        let Connection { from, to, .. } = connection;

        match self.connections.get(&(from, to)) {
            Some(existing) if existing.weight <= connection.weight => return,
            Some(_) => {}
            None => {
                self.adjacency[from.0].push(to);
                self.adjacency[to.0].push(from);
            }
        }

        self.connections.insert((from, to), connection);
        self.connections.insert((to, from), connection.reversed());
    }

    /// Neighbours of a station in insertion order. Empty for unknown indices.
    pub fn adjacent_vertices(&self, index: StationIndex) -> &[StationIndex] {
        self.adjacency
            .get(index.0)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Connection from one station to an adjacent one.
    pub fn connection(&self, from: StationIndex, to: StationIndex) -> Option<&Connection> {
        self.connections.get(&(from, to))
    }

    /// Look up a station's index by name.
    pub fn index_of_station_by_name(&self, name: &str) -> Result<StationIndex, GraphError> {
        self.station_indices
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::StationNotFound(name.to_string()))
    }

    pub fn station(&self, index: StationIndex) -> Option<&Station> {
        self.stations.get(index.0)
    }

    /// Look up a station by name.
    pub fn station_by_name(&self, name: &str) -> Result<&Station, GraphError> {
        let index = self.index_of_station_by_name(name)?;
        Ok(&self.stations[index.0])
    }

    pub fn number_of_stations(&self) -> usize {
        self.stations.len()
    }

    /// Stations in index order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Lines in registration order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: LineIndex) -> Option<&Line> {
        self.lines.get(index.0)
    }

    /// Number of undirected edges (each stored as two connections).
    pub fn number_of_connections(&self) -> usize {
        self.connections.len() / 2
    }

    /// Every directed connection, ordered by source index then adjacency order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.adjacency.iter().enumerate().flat_map(move |(from, neighbours)| {
            neighbours
                .iter()
                .filter_map(move |&to| self.connections.get(&(StationIndex(from), to)))
        })
    }

    /// Largest travel-time factor for which a straight-line A* heuristic stays admissible.
    ///
    /// This is the smallest `weight / distance` over edges whose endpoints both
    /// have a location. A factor at or below it never overestimates the cost
    /// of any edge, and therefore of any path. Returns `None` when no edge has
    /// two located endpoints a non-zero distance apart.
    pub fn max_admissible_travel_factor(&self) -> Option<f64> {
        self.connections()
            .filter_map(|c| {
                let from = self.stations[c.from.0].location()?;
                let to = self.stations[c.to.0].location()?;
                let distance = from.distance(&to);
                (distance > 0.0).then(|| c.weight / distance)
            })
            .reduce(f64::min)
    }
}
