//! Search configuration.

use crate::domain::Location;

use super::SearchError;

/// Configuration parameters for path search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Estimated time units per unit of straight-line distance, used by the
    /// A* heuristic. The heuristic is only admissible while this stays at or
    /// below [`TransportGraph::max_admissible_travel_factor`](crate::graph::TransportGraph::max_admissible_travel_factor).
    pub travel_time_per_unit: f64,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(travel_time_per_unit: f64) -> Self {
        Self {
            travel_time_per_unit,
        }
    }

    /// Set the heuristic travel-time factor.
    pub fn with_travel_time_per_unit(mut self, travel_time_per_unit: f64) -> Self {
        self.travel_time_per_unit = travel_time_per_unit;
        self
    }

    /// Check that the travel-time factor is a finite, non-negative number.
    pub fn validate(&self) -> Result<(), SearchError> {
        let factor = self.travel_time_per_unit;
        if factor.is_finite() && factor >= 0.0 {
            Ok(())
        } else {
            Err(SearchError::InvalidConfig {
                travel_time_per_unit: factor,
            })
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            travel_time_per_unit: Location::ESTIMATED_TRAVEL_PER_UNIT,
        }
    }
}
