//! Graph construction and lookup errors.

use std::fmt;

use crate::domain::InvalidLocation;

/// Which positional configuration list ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Weights,
    Locations,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Weights => f.write_str("weight"),
            DataKind::Locations => f.write_str("location"),
        }
    }
}

/// Errors raised while building or querying a [`TransportGraph`](super::TransportGraph).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// No station with this name exists in the network
    #[error("station not found: {0}")]
    StationNotFound(String),

    /// No line with this name was registered
    #[error("line not found: {0}")]
    UnknownLine(String),

    /// A positional weight or location list ran out before every slot was filled
    #[error("insufficient {kind} data: {supplied} supplied, exhausted on line {line}")]
    InsufficientData {
        kind: DataKind,
        supplied: usize,
        line: String,
    },

    /// A location string isn't of the form `<x>.<y>`
    #[error(transparent)]
    MalformedCoordinate(#[from] InvalidLocation),

    /// Weight is negative, NaN or infinite
    #[error("invalid weight {weight}: weights must be finite and non-negative")]
    InvalidWeight { weight: f64 },

    /// Line has no edge at the requested position
    #[error("line {line} has no edge at position {position}")]
    EdgeOutOfRange { line: String, position: usize },

    /// Flat line definition is missing its name, mode or stations
    #[error("invalid line definition: {0}")]
    InvalidLineDefinition(String),

    /// Builder step called before its prerequisite (or after the stage it belongs to)
    #[error("{step} called out of order: must come {requirement}")]
    OutOfOrder {
        step: &'static str,
        requirement: &'static str,
    },
}
