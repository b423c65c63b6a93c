//! Grid coordinates of stations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a malformed `"x.y"` coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed coordinate {input:?}: {reason}")]
pub struct InvalidLocation {
    input: String,
    reason: &'static str,
}

impl InvalidLocation {
    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// An integer (x, y) position on the network map.
///
/// Locations only feed the A* heuristic: the estimated travel time between two
/// stations is their straight-line distance times a per-unit factor.
///
/// # Examples
///
/// ```
/// use transit_paths::domain::Location;
///
/// let a: Location = "0.0".parse().unwrap();
/// let b: Location = "3.4".parse().unwrap();
/// assert_eq!(a.distance(&b), 5.0);
/// assert_eq!(a.travel_time(&b), 7.5);
///
/// assert!("3,4".parse::<Location>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    /// Default estimated time units per unit of straight-line distance.
    pub const ESTIMATED_TRAVEL_PER_UNIT: f64 = 1.5;

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another location.
    pub fn distance(&self, other: &Location) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    /// Estimated travel time using [`ESTIMATED_TRAVEL_PER_UNIT`](Self::ESTIMATED_TRAVEL_PER_UNIT).
    pub fn travel_time(&self, other: &Location) -> f64 {
        self.travel_time_with(other, Self::ESTIMATED_TRAVEL_PER_UNIT)
    }

    /// Estimated travel time with an explicit per-unit factor.
    pub fn travel_time_with(&self, other: &Location, per_unit: f64) -> f64 {
        self.distance(other) * per_unit
    }
}

impl FromStr for Location {
    type Err = InvalidLocation;

    /// Parse the `"<x>.<y>"` form used by network definitions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| InvalidLocation {
            input: s.to_string(),
            reason,
        };

        let (x, y) = s
            .split_once('.')
            .ok_or_else(|| invalid("expected <x>.<y>"))?;
        let x = x.parse().map_err(|_| invalid("x is not an integer"))?;
        let y = y.parse().map_err(|_| invalid("y is not an integer"))?;

        Ok(Location { x, y })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.x, self.y)
    }
}
