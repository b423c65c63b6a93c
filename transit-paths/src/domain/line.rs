//! Lines (routes) and their transport modes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StationName;

/// Position of a line in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineIndex(pub usize);

/// Kind of vehicle running a line.
///
/// Parsing is case-insensitive and never fails: unknown modes are kept
/// verbatim in [`TransportMode::Other`].
///
/// # Examples
///
/// ```
/// use transit_paths::domain::TransportMode;
///
/// assert_eq!(TransportMode::from("metro"), TransportMode::Metro);
/// assert_eq!(TransportMode::from("BUS"), TransportMode::Bus);
/// assert_eq!(TransportMode::from("cable car").as_str(), "cable car");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransportMode {
    Metro,
    Bus,
    Tram,
    Train,
    Ferry,
    Other(String),
}

impl TransportMode {
    pub fn as_str(&self) -> &str {
        match self {
            TransportMode::Metro => "metro",
            TransportMode::Bus => "bus",
            TransportMode::Tram => "tram",
            TransportMode::Train => "train",
            TransportMode::Ferry => "ferry",
            TransportMode::Other(mode) => mode,
        }
    }
}

impl From<&str> for TransportMode {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "metro" => TransportMode::Metro,
            "bus" => TransportMode::Bus,
            "tram" => TransportMode::Tram,
            "train" => TransportMode::Train,
            "ferry" => TransportMode::Ferry,
            _ => TransportMode::Other(s.to_string()),
        }
    }
}

impl From<String> for TransportMode {
    fn from(s: String) -> Self {
        TransportMode::from(s.as_str())
    }
}

impl From<TransportMode> for String {
    fn from(mode: TransportMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named route calling at an ordered sequence of stations.
///
/// Consecutive stations on the route are adjacent in the graph. A route may
/// visit the same station more than once (loop lines start and end at the
/// same place).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    name: String,
    mode: TransportMode,
    stations: Vec<StationName>,
}

impl Line {
    pub fn new(name: impl Into<String>, mode: impl Into<TransportMode>) -> Self {
        Self {
            name: name.into(),
            mode: mode.into(),
            stations: Vec::new(),
        }
    }

    pub fn with_stations<I, S>(mut self, stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StationName>,
    {
        self.stations.extend(stations.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> &TransportMode {
        &self.mode
    }

    /// Stations in route order, repeats included.
    pub fn stations(&self) -> &[StationName] {
        &self.stations
    }

    pub fn calls_at(&self, station: &StationName) -> bool {
        self.stations.contains(station)
    }

    /// Consecutive station pairs in route order, i.e. the line's edges.
    pub fn segments(&self) -> impl Iterator<Item = (&StationName, &StationName)> {
        self.stations.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mode, self.name)
    }
}
