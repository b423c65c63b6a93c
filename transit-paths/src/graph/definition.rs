//! Data-driven network definitions.
//!
//! A [`NetworkDefinition`] carries the same inputs the builder takes (flat
//! line definitions plus optional positional weights and locations) in a
//! form that can be read from JSON:
//!
//! ```json
//! {
//!   "lines": [["red", "metro", "A", "B", "C"], ["blue", "bus", "B", "D"]],
//!   "weights": [1.0, 2.0, 0.5],
//!   "locations": ["0.0", "1.0", "2.0", "1.0", "1.2"]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GraphBuilder, GraphError, TransportGraph};

/// Errors from loading a network definition.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// Definition file couldn't be read
    #[error("failed to read network definition: {0}")]
    Io(#[from] std::io::Error),

    /// Definition isn't valid JSON for this schema
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Definition parsed but describes an invalid network
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Description of a transport network, ready to be built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDefinition {
    /// Each entry is `[name, mode, station, station, ...]`.
    pub lines: Vec<Vec<String>>,

    /// Positional weights, see [`GraphBuilder::set_weights_to_connections`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,

    /// Positional `"x.y"` locations, see [`GraphBuilder::set_locations_to_stations`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
}

impl NetworkDefinition {
    /// Parse a definition from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a definition from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let definition = Self::from_json_str(&contents)?;
        debug!(
            path = %path.display(),
            lines = definition.lines.len(),
            "Loaded network definition"
        );
        Ok(definition)
    }

    /// Run the builder pipeline over this definition.
    pub fn build(&self) -> Result<TransportGraph, GraphError> {
        let mut builder = self
            .lines
            .iter()
            .try_fold(GraphBuilder::new(), |builder, line| {
                builder.add_line_definition(line.as_slice())
            })?
            .build_station_set()?
            .add_lines_to_stations()?
            .build_connections()?;

        if let Some(weights) = &self.weights {
            builder = builder.set_weights_to_connections(weights)?;
        }
        if let Some(locations) = &self.locations {
            builder = builder.set_locations_to_stations(locations.as_slice())?;
        }

        builder.build()
    }
}
