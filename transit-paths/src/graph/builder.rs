//! Staged construction of a [`TransportGraph`].
//!
//! Building happens in a fixed order:
//!
//! 1. [`add_line`](GraphBuilder::add_line) for every route
//! 2. [`build_station_set`](GraphBuilder::build_station_set)
//! 3. [`add_lines_to_stations`](GraphBuilder::add_lines_to_stations)
//! 4. [`build_connections`](GraphBuilder::build_connections)
//! 5. optionally [`set_weights_to_connections`](GraphBuilder::set_weights_to_connections)
//!    and [`set_locations_to_stations`](GraphBuilder::set_locations_to_stations)
//!    (or their keyed counterparts)
//! 6. [`build`](GraphBuilder::build)
//!
//! Each step checks that its prerequisite has run and fails with
//! [`GraphError::OutOfOrder`] otherwise.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::domain::{Connection, Line, LineIndex, Location, Station, StationName, TransportMode};

use super::{DataKind, GraphError, TransportGraph};

/// Where the builder is in the staged protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Lines,
    StationSet,
    LinesAttached,
    Connections,
}

/// An undirected edge of one line, not yet resolved to station indices.
#[derive(Debug, Clone)]
struct PendingConnection {
    line: LineIndex,
    from: StationName,
    to: StationName,
    weight: f64,
}

/// Identifies an edge of a line regardless of travel direction.
type EdgeKey = (LineIndex, StationName, StationName);

fn edge_key(line: LineIndex, a: &StationName, b: &StationName) -> EdgeKey {
    if a <= b {
        (line, a.clone(), b.clone())
    } else {
        (line, b.clone(), a.clone())
    }
}

fn checked_weight(weight: f64) -> Result<f64, GraphError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(GraphError::InvalidWeight { weight })
    }
}

/// Builder for [`TransportGraph`].
///
/// # Examples
///
/// ```
/// use transit_paths::graph::GraphBuilder;
///
/// let graph = GraphBuilder::new()
///     .add_line("red", "metro", ["A", "B", "C"])?
///     .add_line("blue", "bus", ["B", "D"])?
///     .build_station_set()?
///     .add_lines_to_stations()?
///     .build_connections()?
///     .set_weights_to_connections(&[1.0, 2.0, 0.5])?
///     .build()?;
///
/// assert_eq!(graph.number_of_stations(), 4);
/// assert_eq!(graph.number_of_connections(), 3);
/// # Ok::<(), transit_paths::graph::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    stage: Stage,
    lines: Vec<Line>,
    /// Deduplicated stations, in order of first appearance.
    stations: Vec<Station>,
    station_lookup: HashMap<StationName, usize>,
    /// Per line, in order of first appearance on the route.
    connections: Vec<PendingConnection>,
    connection_lookup: HashMap<EdgeKey, usize>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            stage: Stage::Lines,
            lines: Vec::new(),
            stations: Vec::new(),
            station_lookup: HashMap::new(),
            connections: Vec::new(),
            connection_lookup: HashMap::new(),
        }
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a line calling at `stations` in order.
    ///
    /// Stations are referenced by name and may be shared between lines.
    pub fn add_line<I, S>(
        mut self,
        name: &str,
        mode: impl Into<TransportMode>,
        stations: I,
    ) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<StationName>,
    {
        self.require_exactly(Stage::Lines, "add_line", "before build_station_set")?;

        let line = Line::new(name, mode).with_stations(stations);
        if line.stations().is_empty() {
            return Err(GraphError::InvalidLineDefinition(format!(
                "line {name} has no stations"
            )));
        }

        self.lines.push(line);
        Ok(self)
    }

    /// Register a line from its flat form `[name, mode, station, station, ...]`.
    pub fn add_line_definition<S: AsRef<str>>(self, definition: &[S]) -> Result<Self, GraphError> {
        match definition {
            [name, mode, stations @ ..] if !stations.is_empty() => {
                self.add_line(name.as_ref(), mode.as_ref(), stations.iter().map(|s| s.as_ref()))
            }
            _ => Err(GraphError::InvalidLineDefinition(format!(
                "expected [name, mode, station, ...], got {} entries",
                definition.len()
            ))),
        }
    }

    /// Deduplicate the stations of all lines by name.
    pub fn build_station_set(mut self) -> Result<Self, GraphError> {
        self.require_exactly(Stage::Lines, "build_station_set", "once, after add_line")?;

        for line in &self.lines {
            for name in line.stations() {
                if !self.station_lookup.contains_key(name) {
                    self.station_lookup.insert(name.clone(), self.stations.len());
                    self.stations.push(Station::new(name.clone()));
                }
            }
        }

        debug!(
            lines = self.lines.len(),
            stations = self.stations.len(),
            "Built station set"
        );
        self.stage = Stage::StationSet;
        Ok(self)
    }

    /// Attach to every station each line that calls at it.
    pub fn add_lines_to_stations(mut self) -> Result<Self, GraphError> {
        self.require_exactly(
            Stage::StationSet,
            "add_lines_to_stations",
            "once, after build_station_set",
        )?;

        for (i, line) in self.lines.iter().enumerate() {
            for name in line.stations() {
                if let Some(&slot) = self.station_lookup.get(name) {
                    self.stations[slot].add_line(LineIndex(i));
                }
            }
        }

        self.stage = Stage::LinesAttached;
        Ok(self)
    }

    /// Create one undirected connection per consecutive station pair of each line.
    ///
    /// A pair that repeats on the same line (in either direction) yields a
    /// single connection, and a pair naming the same station twice yields
    /// none. Weights start at zero.
    pub fn build_connections(mut self) -> Result<Self, GraphError> {
        self.require_exactly(
            Stage::LinesAttached,
            "build_connections",
            "once, after add_lines_to_stations",
        )?;

        for (i, line) in self.lines.iter().enumerate() {
            let line_index = LineIndex(i);
            for (from, to) in line.segments() {
                if from == to {
                    trace!(line = line.name(), station = %from, "Skipping self-loop");
                    continue;
                }
                let key = edge_key(line_index, from, to);
                if self.connection_lookup.contains_key(&key) {
                    continue;
                }
                self.connection_lookup.insert(key, self.connections.len());
                self.connections.push(PendingConnection {
                    line: line_index,
                    from: from.clone(),
                    to: to.clone(),
                    weight: 0.0,
                });
            }
        }

        debug!(connections = self.connections.len(), "Built connections");
        self.stage = Stage::Connections;
        Ok(self)
    }

    /// Assign weights from a flat list, consumed positionally.
    ///
    /// Lines are visited in registration order and each line's stations in
    /// route order. At every visit, each connection of that line departing the
    /// visited station takes the next weight. A station visited twice on the
    /// same line (a loop line's terminus) consumes a weight on each visit,
    /// the later one winning. Surplus weights are ignored.
    pub fn set_weights_to_connections(mut self, weights: &[f64]) -> Result<Self, GraphError> {
        self.require_exactly(
            Stage::Connections,
            "set_weights_to_connections",
            "after build_connections",
        )?;

        let mut next = weights.iter().copied();
        for (i, line) in self.lines.iter().enumerate() {
            let line_index = LineIndex(i);
            for station in line.stations() {
                for connection in self
                    .connections
                    .iter_mut()
                    .filter(|c| c.line == line_index && &c.from == station)
                {
                    let weight = next.next().ok_or_else(|| GraphError::InsufficientData {
                        kind: DataKind::Weights,
                        supplied: weights.len(),
                        line: line.name().to_string(),
                    })?;
                    connection.weight = checked_weight(weight)?;
                }
            }
        }

        let surplus = next.count();
        if surplus > 0 {
            debug!(surplus, "Ignoring surplus weights");
        }
        Ok(self)
    }

    /// Set the weight of the edge between `stations[position]` and
    /// `stations[position + 1]` of the named line.
    pub fn set_edge_weight(
        mut self,
        line: &str,
        position: usize,
        weight: f64,
    ) -> Result<Self, GraphError> {
        self.require_exactly(Stage::Connections, "set_edge_weight", "after build_connections")?;
        let weight = checked_weight(weight)?;

        let line_index = self
            .lines
            .iter()
            .position(|l| l.name() == line)
            .map(LineIndex)
            .ok_or_else(|| GraphError::UnknownLine(line.to_string()))?;

        let out_of_range = || GraphError::EdgeOutOfRange {
            line: line.to_string(),
            position,
        };
        let (from, to) = self.lines[line_index.0]
            .segments()
            .nth(position)
            .ok_or_else(out_of_range)?;
        let slot = *self
            .connection_lookup
            .get(&edge_key(line_index, from, to))
            .ok_or_else(out_of_range)?;

        self.connections[slot].weight = weight;
        Ok(self)
    }

    /// Assign locations from a flat list of `"x.y"` strings, consumed positionally.
    ///
    /// One entry per (line, station) visit, in the same order as
    /// [`set_weights_to_connections`](Self::set_weights_to_connections). A
    /// station served by several lines keeps the location of its last visit.
    pub fn set_locations_to_stations<S: AsRef<str>>(
        mut self,
        locations: &[S],
    ) -> Result<Self, GraphError> {
        self.require_at_least(
            Stage::StationSet,
            "set_locations_to_stations",
            "after build_station_set",
        )?;

        let mut next = locations.iter();
        for line in &self.lines {
            for name in line.stations() {
                let raw = next.next().ok_or_else(|| GraphError::InsufficientData {
                    kind: DataKind::Locations,
                    supplied: locations.len(),
                    line: line.name().to_string(),
                })?;
                let location: Location = raw.as_ref().parse()?;
                if let Some(&slot) = self.station_lookup.get(name) {
                    self.stations[slot].set_location(location);
                }
            }
        }

        Ok(self)
    }

    /// Set the location of a single station.
    pub fn set_station_location(
        mut self,
        name: &str,
        location: Location,
    ) -> Result<Self, GraphError> {
        self.require_at_least(
            Stage::StationSet,
            "set_station_location",
            "after build_station_set",
        )?;

        let slot = *self
            .station_lookup
            .get(name)
            .ok_or_else(|| GraphError::StationNotFound(name.to_string()))?;
        self.stations[slot].set_location(location);
        Ok(self)
    }

    /// Allocate the graph, index the stations and add every connection.
    ///
    /// Station indices follow the order in which stations first appear across
    /// lines in registration order.
    pub fn build(self) -> Result<TransportGraph, GraphError> {
        self.require_exactly(Stage::Connections, "build", "after build_connections")?;

        let Self {
            lines,
            stations,
            station_lookup,
            connections,
            ..
        } = self;

        let mut graph = TransportGraph::with_vertices(stations, lines);
        for pending in connections {
            let from = graph.index_of_station_by_name(pending.from.as_str())?;
            let to = graph.index_of_station_by_name(pending.to.as_str())?;
            graph.add_edge(Connection::new(from, to, pending.weight, pending.line));
        }

        debug!(
            stations = station_lookup.len(),
            connections = graph.number_of_connections(),
            "Built transport graph"
        );
        Ok(graph)
    }

    fn require_exactly(
        &self,
        stage: Stage,
        step: &'static str,
        requirement: &'static str,
    ) -> Result<(), GraphError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(GraphError::OutOfOrder { step, requirement })
        }
    }

    fn require_at_least(
        &self,
        stage: Stage,
        step: &'static str,
        requirement: &'static str,
    ) -> Result<(), GraphError> {
        if self.stage >= stage {
            Ok(())
        } else {
            Err(GraphError::OutOfOrder { step, requirement })
        }
    }
}
