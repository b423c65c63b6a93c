//! Domain types for the transport network.
//!
//! Stations, lines, the connections between them and the coordinates used by
//! the A* heuristic. Identity types (`StationName`, `StationIndex`,
//! `LineIndex`) are cheap to copy or clone and are what the rest of the crate
//! passes around.

mod connection;
mod line;
mod location;
mod station;

pub use connection::Connection;
pub use line::{Line, LineIndex, TransportMode};
pub use location::{InvalidLocation, Location};
pub use station::{Station, StationIndex, StationName};
