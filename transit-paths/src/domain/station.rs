//! Stations and their identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{LineIndex, Location};

/// Name of a station; the station's identity within a network.
///
/// Backed by `Arc<str>` so the builder can hand the same name to lines,
/// connections and the station table without copying.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationName(Arc<str>);

impl StationName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.as_str())
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for StationName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StationName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl Borrow<str> for StationName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for StationName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Stable position of a station inside a built graph.
///
/// Indices are dense (`0..number_of_stations`) and never change once
/// the graph is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationIndex(pub usize);

impl fmt::Display for StationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vertex of the transport graph.
///
/// Two stations are equal when their names are equal; the attached lines
/// and location don't take part in identity.
#[derive(Debug, Clone)]
pub struct Station {
    name: StationName,
    lines: Vec<LineIndex>,
    location: Option<Location>,
}

impl Station {
    pub fn new(name: impl Into<StationName>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
            location: None,
        }
    }

    pub fn name(&self) -> &StationName {
        &self.name
    }

    /// Lines serving this station, in registration order.
    pub fn lines(&self) -> &[LineIndex] {
        &self.lines
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Returns true if more than one line calls here.
    pub fn is_interchange(&self) -> bool {
        self.lines.len() > 1
    }

    pub(crate) fn add_line(&mut self, line: LineIndex) {
        if !self.lines.contains(&line) {
            self.lines.push(line);
        }
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}
