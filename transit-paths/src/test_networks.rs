//! Networks shared by the unit tests.

use crate::graph::{GraphBuilder, GraphError, TransportGraph};

/// Four lines over stations A..J, no weights or locations.
pub const LETTER_LINES: [&[&str]; 4] = [
    &["red", "metro", "A", "B", "C", "D"],
    &["blue", "metro", "E", "B", "F", "G"],
    &["green", "metro", "H", "I", "C", "G", "J"],
    &["yellow", "bus", "A", "E", "H", "D", "G", "A"],
];

pub const REFERENCE_LINES: [&[&str]; 5] = [
    &[
        "red",
        "metro",
        "Haven",
        "Marken",
        "Steigerplein",
        "Centrum",
        "Meridiaan",
        "Dukdalf",
        "Oostvaarders",
    ],
    &[
        "blue",
        "metro",
        "Trojelaan",
        "Coltrane Cirkel",
        "Meridiaan",
        "Robijnpark",
        "Violetplantsoen",
    ],
    &[
        "purple",
        "metro",
        "Grote Sluis",
        "Grootzeil",
        "Coltrane Cirkel",
        "Centrum",
        "Swingstraat",
    ],
    &[
        "green",
        "metro",
        "Ymeerdijk",
        "Trojelaan",
        "Steigerplein",
        "Swingstraat",
        "Bachgracht",
        "Nobelplein",
    ],
    &[
        "yellow",
        "bus",
        "Grote Sluis",
        "Ymeerdijk",
        "Haven",
        "Nobelplein",
        "Violetplantsoen",
        "Oostvaarders",
        "Grote Sluis",
    ],
];

pub const REFERENCE_WEIGHTS: [f64; 26] = [
    // red
    4.5, 4.7, 6.1, 3.5, 5.4, 5.6, //
    // blue
    6.0, 5.3, 5.1, 3.3, //
    // purple
    6.2, 5.2, 3.8, 3.6, //
    // green
    5.0, 3.7, 6.9, 3.9, 3.4, //
    // yellow, Grote Sluis visited twice
    26.0, 19.0, 37.0, 25.0, 22.0, 28.0, 26.0,
];

pub const REFERENCE_LOCATIONS: [&str; 30] = [
    // red
    "14.1", "12.3", "10.5", "8.8", "6.9", "3.10", "0.11", //
    // blue
    "9.3", "7.6", "6.9", "6.12", "5.14", //
    // purple
    "2.3", "4.6", "7.6", "8.8", "10.9", //
    // green
    "9.0", "9.3", "10.5", "10.9", "11.11", "12.13", //
    // yellow
    "2.3", "9.0", "14.1", "12.13", "5.14", "0.11", "2.3",
];

fn staged(lines: &[&[&str]]) -> Result<GraphBuilder, GraphError> {
    lines
        .iter()
        .try_fold(GraphBuilder::new(), |builder, &definition| {
            builder.add_line_definition(definition)
        })?
        .build_station_set()?
        .add_lines_to_stations()?
        .build_connections()
}

/// Unweighted network of lettered stations.
pub fn letters() -> Result<TransportGraph, GraphError> {
    staged(&LETTER_LINES)?.build()
}

/// Reference network with connections built but no weights or locations yet.
pub fn reference_builder() -> GraphBuilder {
    staged(&REFERENCE_LINES).unwrap()
}

/// Reference network with weights only.
pub fn reference_weighted() -> TransportGraph {
    reference_builder()
        .set_weights_to_connections(&REFERENCE_WEIGHTS)
        .and_then(GraphBuilder::build)
        .unwrap()
}

/// Reference network with weights and locations.
pub fn reference() -> TransportGraph {
    reference_builder()
        .set_weights_to_connections(&REFERENCE_WEIGHTS)
        .and_then(|b| b.set_locations_to_stations(&REFERENCE_LOCATIONS))
        .and_then(GraphBuilder::build)
        .unwrap()
}
