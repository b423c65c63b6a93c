//! Behavioural tests shared across the search algorithms.

use super::*;
use crate::domain::Location;
use crate::graph::GraphBuilder;
use crate::test_networks;

fn names(stations: Vec<&Station>) -> Vec<&str> {
    stations.into_iter().map(|s| s.name().as_str()).collect()
}

fn idx(graph: &TransportGraph, name: &str) -> StationIndex {
    graph.index_of_station_by_name(name).unwrap()
}

fn run<'g, S: PathSearch<'g>>(mut search: S) -> S {
    search.search().unwrap();
    search
}

fn path_weight(graph: &TransportGraph, path: &[&Station]) -> f64 {
    path.windows(2)
        .map(|pair| {
            let from = idx(graph, pair[0].name().as_str());
            let to = idx(graph, pair[1].name().as_str());
            graph.connection(from, to).unwrap().weight
        })
        .fold(0.0, |total, w| total + w)
}

fn two_islands() -> TransportGraph {
    GraphBuilder::new()
        .add_line_definition(&["north", "tram", "A", "B", "C"])
        .and_then(|b| b.add_line_definition(&["south", "tram", "X", "Y"]))
        .and_then(GraphBuilder::build_station_set)
        .and_then(GraphBuilder::add_lines_to_stations)
        .and_then(GraphBuilder::build_connections)
        .and_then(|b| b.set_weights_to_connections(&[1.0, 2.0, 3.0]))
        .and_then(GraphBuilder::build)
        .unwrap()
}

// Depth-first

#[test]
fn dfs_follows_adjacency_order() {
    let graph = test_networks::letters().unwrap();
    let dfs = run(DepthFirstSearch::new(&graph, "A", "J").unwrap());

    assert!(dfs.has_path_to(dfs.end()).unwrap());
    assert_eq!(names(dfs.path().unwrap()), ["A", "B", "C", "D", "G", "J"]);
    assert_eq!(
        names(dfs.nodes_visited().unwrap()),
        ["A", "B", "C", "D", "H", "I", "E", "G", "F", "J"]
    );
    assert_eq!(dfs.total_weight().unwrap(), None);
}

#[test]
fn dfs_paths_are_valid_walks() {
    let graph = test_networks::letters().unwrap();
    for from in graph.stations() {
        for to in graph.stations() {
            let (start, end) = (from.name().as_str(), to.name().as_str());
            let dfs = run(DepthFirstSearch::new(&graph, start, end).unwrap());
            let path = dfs.path().unwrap();

            assert_eq!(path.first().map(|s| s.name()), Some(from.name()));
            assert_eq!(path.last().map(|s| s.name()), Some(to.name()));
            for pair in path.windows(2) {
                let a = idx(&graph, pair[0].name().as_str());
                let b = idx(&graph, pair[1].name().as_str());
                assert!(graph.connection(a, b).is_some(), "{a} -> {b} is not an edge");
            }
        }
    }
}

#[test]
fn dfs_explores_beyond_end() {
    let graph = test_networks::letters().unwrap();
    let dfs = run(DepthFirstSearch::new(&graph, "A", "B").unwrap());

    assert_eq!(names(dfs.path().unwrap()), ["A", "B"]);
    // The end station is not expanded, but everything reachable another way is
    assert_eq!(dfs.nodes_visited().unwrap().len(), graph.number_of_stations());
}

// Breadth-first

#[test]
fn bfs_finds_fewest_hops() {
    let graph = test_networks::letters().unwrap();
    let bfs = run(BreadthFirstSearch::new(&graph, "A", "J").unwrap());

    assert_eq!(names(bfs.path().unwrap()), ["A", "G", "J"]);
    assert_eq!(
        names(bfs.nodes_visited().unwrap()),
        ["A", "B", "E", "G", "C", "F", "H", "J"]
    );
    assert_eq!(bfs.total_weight().unwrap(), None);
}

#[test]
fn bfs_never_longer_than_dfs() {
    let graph = test_networks::letters().unwrap();
    for from in graph.stations() {
        for to in graph.stations() {
            let (from, to) = (from.name().as_str(), to.name().as_str());
            let bfs = run(BreadthFirstSearch::new(&graph, from, to).unwrap());
            let dfs = run(DepthFirstSearch::new(&graph, from, to).unwrap());

            let bfs_len = bfs.path().unwrap().len();
            let dfs_len = dfs.path().unwrap().len();
            assert!(bfs_len <= dfs_len, "{from} -> {to}: bfs {bfs_len}, dfs {dfs_len}");
        }
    }
}

// Dijkstra

#[test]
fn dijkstra_reference_route() {
    let graph = test_networks::reference();
    let dijkstra = run(DijkstraSearch::new(&graph, "Oostvaarders", "Violetplantsoen").unwrap());

    assert_eq!(dijkstra.total_weight().unwrap(), Some(19.4));
    assert_eq!(
        names(dijkstra.path().unwrap()),
        ["Oostvaarders", "Dukdalf", "Meridiaan", "Robijnpark", "Violetplantsoen"]
    );
    let visited = names(dijkstra.nodes_visited().unwrap());
    assert_eq!(visited.first(), Some(&"Oostvaarders"));
    assert_eq!(visited.last(), Some(&"Violetplantsoen"));
}

#[test]
fn dijkstra_total_matches_path_weights() {
    let graph = test_networks::reference_weighted();
    for from in graph.stations() {
        for to in graph.stations() {
            let (from, to) = (from.name().as_str(), to.name().as_str());
            let dijkstra = run(DijkstraSearch::new(&graph, from, to).unwrap());
            let path = dijkstra.path().unwrap();

            assert!(!path.is_empty());
            assert_eq!(
                dijkstra.total_weight().unwrap(),
                Some(round_weight(path_weight(&graph, &path)))
            );
        }
    }
}

#[test]
fn dijkstra_never_beaten_by_bfs_route() {
    let graph = test_networks::reference_weighted();
    for from in graph.stations() {
        for to in graph.stations() {
            let (from, to) = (from.name().as_str(), to.name().as_str());
            let dijkstra = run(DijkstraSearch::new(&graph, from, to).unwrap());
            let bfs = run(BreadthFirstSearch::new(&graph, from, to).unwrap());

            let best = dijkstra.dist_to(dijkstra.end()).unwrap();
            let hop_route = path_weight(&graph, &bfs.path().unwrap());
            assert!(best <= hop_route + 1e-9, "{from} -> {to}: {best} > {hop_route}");
        }
    }
}

#[test]
fn dijkstra_distances_settle_along_path() {
    let graph = test_networks::reference_weighted();
    let dijkstra = run(DijkstraSearch::new(&graph, "Haven", "Centrum").unwrap());

    assert_eq!(dijkstra.dist_to(idx(&graph, "Haven")).unwrap(), 0.0);
    assert_eq!(dijkstra.dist_to(idx(&graph, "Marken")).unwrap(), 4.5);
    assert_eq!(dijkstra.total_weight().unwrap(), Some(15.3));
}

// A*

#[test]
fn astar_reference_route() {
    let graph = test_networks::reference();
    let astar = run(AStarSearch::new(&graph, "Oostvaarders", "Violetplantsoen").unwrap());

    assert_eq!(astar.total_weight().unwrap(), Some(19.4));
    assert_eq!(
        names(astar.path().unwrap()),
        ["Oostvaarders", "Dukdalf", "Meridiaan", "Robijnpark", "Violetplantsoen"]
    );
}

#[test]
fn astar_matches_dijkstra_with_admissible_factor() {
    let graph = test_networks::reference();
    let config = SearchConfig::new(1.0);
    assert!(graph.max_admissible_travel_factor().unwrap() >= 1.0);

    for from in graph.stations() {
        for to in graph.stations() {
            let (from, to) = (from.name().as_str(), to.name().as_str());
            let dijkstra = run(DijkstraSearch::new(&graph, from, to).unwrap());
            let astar = run(AStarSearch::with_config(&graph, from, to, &config).unwrap());

            assert_eq!(
                astar.total_weight().unwrap(),
                dijkstra.total_weight().unwrap(),
                "{from} -> {to}"
            );
        }
    }
}

#[test]
fn astar_explores_no_more_than_dijkstra() {
    let graph = test_networks::reference();
    let config = SearchConfig::new(1.0);
    let dijkstra = run(DijkstraSearch::new(&graph, "Haven", "Violetplantsoen").unwrap());
    let astar = run(AStarSearch::with_config(&graph, "Haven", "Violetplantsoen", &config).unwrap());

    assert!(astar.nodes_visited().unwrap().len() <= dijkstra.nodes_visited().unwrap().len());
}

#[test]
fn astar_without_locations_is_dijkstra() {
    let graph = test_networks::reference_weighted();
    let dijkstra = run(DijkstraSearch::new(&graph, "Haven", "Violetplantsoen").unwrap());
    let astar = run(AStarSearch::new(&graph, "Haven", "Violetplantsoen").unwrap());

    assert_eq!(astar.heuristic(astar.start()), 0.0);
    assert_eq!(astar.total_weight().unwrap(), dijkstra.total_weight().unwrap());
    assert_eq!(
        names(astar.nodes_visited().unwrap()),
        names(dijkstra.nodes_visited().unwrap())
    );
    assert_eq!(names(astar.path().unwrap()), names(dijkstra.path().unwrap()));
}

#[test]
fn astar_heuristic_scales_with_factor() {
    let graph = test_networks::reference();
    let astar = |factor| {
        AStarSearch::with_config(&graph, "Haven", "Oostvaarders", &SearchConfig::new(factor))
            .unwrap()
    };
    let (slow, fast) = (astar(2.0), astar(1.0));
    let haven = idx(&graph, "Haven");
    let end = idx(&graph, "Oostvaarders");

    // Haven (14,1) to Oostvaarders (0,11)
    let distance = Location::new(14, 1).distance(&Location::new(0, 11));
    assert!((fast.heuristic(haven) - distance).abs() < 1e-9);
    assert!((slow.heuristic(haven) - 2.0 * distance).abs() < 1e-9);
    assert_eq!(fast.heuristic(end), 0.0);
}

#[test]
fn astar_rejects_unusable_factor() {
    let graph = test_networks::reference();

    for factor in [f64::NAN, f64::INFINITY, -1.0] {
        let config = SearchConfig::new(factor);
        let err = AStarSearch::with_config(&graph, "Oostvaarders", "Violetplantsoen", &config)
            .unwrap_err();
        assert!(
            matches!(err, SearchError::InvalidConfig { .. }),
            "factor {factor} accepted"
        );

        let err = compare(&graph, "Oostvaarders", "Violetplantsoen", &config).unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfig { .. }));
    }
}

#[test]
fn weighted_searches_reject_bad_weights() {
    use crate::domain::{Connection, Line, LineIndex};

    let lines = vec![Line::new("red", "metro").with_stations(["A", "B"])];
    let mut graph =
        TransportGraph::with_vertices(vec![Station::new("A"), Station::new("B")], lines);
    graph.add_edge(Connection::new(
        StationIndex(0),
        StationIndex(1),
        -2.0,
        LineIndex(0),
    ));

    let expected = SearchError::Graph(GraphError::InvalidWeight { weight: -2.0 });
    assert_eq!(DijkstraSearch::new(&graph, "A", "B").unwrap_err(), expected);
    assert_eq!(AStarSearch::new(&graph, "A", "B").unwrap_err(), expected);
    // Unweighted searches don't look at weights
    assert!(BreadthFirstSearch::new(&graph, "A", "B").is_ok());
}

// Shared contract

#[test]
fn start_equals_end() {
    let graph = test_networks::reference();
    let searches: Vec<Box<dyn PathSearch<'_> + '_>> = vec![
        Box::new(DepthFirstSearch::new(&graph, "Centrum", "Centrum").unwrap()),
        Box::new(BreadthFirstSearch::new(&graph, "Centrum", "Centrum").unwrap()),
        Box::new(DijkstraSearch::new(&graph, "Centrum", "Centrum").unwrap()),
        Box::new(AStarSearch::new(&graph, "Centrum", "Centrum").unwrap()),
    ];

    for mut search in searches {
        search.search().unwrap();
        assert_eq!(names(search.path().unwrap()), ["Centrum"]);
        assert_eq!(search.nodes_visited().unwrap()[0].name().as_str(), "Centrum");
    }

    let mut dijkstra = DijkstraSearch::new(&graph, "Centrum", "Centrum").unwrap();
    dijkstra.search().unwrap();
    assert_eq!(dijkstra.total_weight().unwrap(), Some(0.0));
    assert_eq!(names(dijkstra.nodes_visited().unwrap()), ["Centrum"]);
}

#[test]
fn unreachable_end() {
    let graph = two_islands();
    let searches: Vec<Box<dyn PathSearch<'_> + '_>> = vec![
        Box::new(DepthFirstSearch::new(&graph, "A", "Y").unwrap()),
        Box::new(BreadthFirstSearch::new(&graph, "A", "Y").unwrap()),
        Box::new(DijkstraSearch::new(&graph, "A", "Y").unwrap()),
        Box::new(AStarSearch::new(&graph, "A", "Y").unwrap()),
    ];

    for mut search in searches {
        search.search().unwrap();
        let end = search.end();
        assert!(!search.has_path_to(end).unwrap());
        assert!(search.path().unwrap().is_empty());
        assert_eq!(search.total_weight().unwrap(), None);
        assert_eq!(names(search.nodes_visited().unwrap()), ["A", "B", "C"]);
    }
}

#[test]
fn path_to_other_reached_stations() {
    let graph = two_islands();
    let bfs = run(BreadthFirstSearch::new(&graph, "A", "Y").unwrap());

    assert_eq!(names(bfs.path_to(idx(&graph, "C")).unwrap()), ["A", "B", "C"]);
    assert!(bfs.path_to(idx(&graph, "X")).unwrap().is_empty());
}

#[test]
fn queries_before_search_fail() {
    let graph = test_networks::reference();
    let dijkstra = DijkstraSearch::new(&graph, "Haven", "Centrum").unwrap();

    assert_eq!(dijkstra.path().unwrap_err(), SearchError::NotSearched);
    assert_eq!(dijkstra.nodes_visited().unwrap_err(), SearchError::NotSearched);
    assert_eq!(dijkstra.total_weight().unwrap_err(), SearchError::NotSearched);
    assert_eq!(
        dijkstra.has_path_to(StationIndex(0)).unwrap_err(),
        SearchError::NotSearched
    );

    let bfs = BreadthFirstSearch::new(&graph, "Haven", "Centrum").unwrap();
    assert_eq!(bfs.total_weight().unwrap_err(), SearchError::NotSearched);
}

#[test]
fn search_runs_once() {
    let graph = test_networks::reference();
    let mut dfs = DepthFirstSearch::new(&graph, "Haven", "Centrum").unwrap();
    let mut astar = AStarSearch::new(&graph, "Haven", "Centrum").unwrap();

    dfs.search().unwrap();
    astar.search().unwrap();
    assert_eq!(dfs.search(), Err(SearchError::AlreadySearched));
    assert_eq!(astar.search(), Err(SearchError::AlreadySearched));
}

#[test]
fn out_of_range_queries_fail() {
    let graph = test_networks::reference();
    let beyond = StationIndex(graph.number_of_stations());
    let dijkstra = run(DijkstraSearch::new(&graph, "Haven", "Centrum").unwrap());
    let astar = run(AStarSearch::new(&graph, "Haven", "Centrum").unwrap());

    assert_eq!(
        dijkstra.has_path_to(beyond),
        Err(SearchError::IndexOutOfRange(beyond.0))
    );
    assert_eq!(
        dijkstra.path_to(beyond).unwrap_err(),
        SearchError::IndexOutOfRange(beyond.0)
    );
    assert_eq!(dijkstra.dist_to(beyond), Err(SearchError::IndexOutOfRange(beyond.0)));
    assert_eq!(astar.g_score(beyond), Err(SearchError::IndexOutOfRange(beyond.0)));
}

#[test]
fn unknown_station_rejected_by_every_algorithm() {
    let graph = test_networks::letters().unwrap();
    let missing = SearchError::Graph(GraphError::StationNotFound("Z".to_string()));

    assert_eq!(DepthFirstSearch::new(&graph, "A", "Z").unwrap_err(), missing);
    assert_eq!(BreadthFirstSearch::new(&graph, "Z", "A").unwrap_err(), missing);
    assert_eq!(DijkstraSearch::new(&graph, "A", "Z").unwrap_err(), missing);
    assert_eq!(AStarSearch::new(&graph, "A", "Z").unwrap_err(), missing);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const STATIONS: usize = 8;

    fn station_name(i: usize) -> String {
        format!("S{i}")
    }

    fn network() -> impl Strategy<Value = (Vec<Vec<usize>>, Vec<f64>, Vec<(i32, i32)>)> {
        (
            prop::collection::vec(prop::collection::vec(0..STATIONS, 2..6), 1..5),
            prop::collection::vec(0.0f64..20.0, 160),
            prop::collection::vec((-10i32..10, -10i32..10), STATIONS),
        )
    }

    fn build(
        lines: &[Vec<usize>],
        weights: &[f64],
        locations: Option<&[(i32, i32)]>,
    ) -> TransportGraph {
        let mut builder = GraphBuilder::new();
        for (n, stations) in lines.iter().enumerate() {
            let names = stations.iter().map(|&i| station_name(i));
            builder = builder.add_line(&format!("line{n}"), "bus", names).unwrap();
        }
        let mut builder = builder
            .build_station_set()
            .and_then(GraphBuilder::add_lines_to_stations)
            .and_then(GraphBuilder::build_connections)
            .and_then(|b| b.set_weights_to_connections(weights))
            .unwrap();

        if let Some(locations) = locations {
            let mut used: Vec<usize> = lines.iter().flatten().copied().collect();
            used.sort_unstable();
            used.dedup();
            for i in used {
                let (x, y) = locations[i];
                builder = builder
                    .set_station_location(&station_name(i), Location::new(x, y))
                    .unwrap();
            }
        }
        builder.build().unwrap()
    }

    proptest! {
        #[test]
        fn algorithms_agree_on_reachability((lines, weights, _) in network()) {
            let graph = build(&lines, &weights, None);
            for from in graph.stations() {
                for to in graph.stations() {
                    let (from, to) = (from.name().as_str(), to.name().as_str());
                    let dfs = run(DepthFirstSearch::new(&graph, from, to).unwrap());
                    let bfs = run(BreadthFirstSearch::new(&graph, from, to).unwrap());
                    let dijkstra = run(DijkstraSearch::new(&graph, from, to).unwrap());

                    let reached = dijkstra.has_path_to(dijkstra.end()).unwrap();
                    prop_assert_eq!(dfs.has_path_to(dfs.end()).unwrap(), reached);
                    prop_assert_eq!(bfs.has_path_to(bfs.end()).unwrap(), reached);
                    prop_assert!(bfs.path().unwrap().len() <= dijkstra.path().unwrap().len());
                    prop_assert!(bfs.path().unwrap().len() <= dfs.path().unwrap().len());
                }
            }
        }

        #[test]
        fn dijkstra_distance_is_its_path_weight((lines, weights, _) in network()) {
            let graph = build(&lines, &weights, None);
            for from in graph.stations() {
                for to in graph.stations() {
                    let (from, to) = (from.name().as_str(), to.name().as_str());
                    let dijkstra = run(DijkstraSearch::new(&graph, from, to).unwrap());
                    let path = dijkstra.path().unwrap();
                    if !path.is_empty() {
                        let distance = dijkstra.dist_to(dijkstra.end()).unwrap();
                        prop_assert_eq!(distance, path_weight(&graph, &path));
                    }
                }
            }
        }

        #[test]
        fn admissible_astar_is_optimal((lines, weights, locations) in network()) {
            let graph = build(&lines, &weights, Some(&locations));
            let factor = graph.max_admissible_travel_factor().unwrap_or(1.0);
            let config = SearchConfig::new(factor);

            for from in graph.stations() {
                for to in graph.stations() {
                    let (from, to) = (from.name().as_str(), to.name().as_str());
                    let dijkstra = run(DijkstraSearch::new(&graph, from, to).unwrap());
                    let astar = run(AStarSearch::with_config(&graph, from, to, &config).unwrap());

                    let best = dijkstra.dist_to(dijkstra.end()).unwrap();
                    let found = astar.g_score(astar.end()).unwrap();
                    if best.is_finite() {
                        prop_assert!(
                            (best - found).abs() < 1e-9,
                            "{} -> {}: {} vs {}",
                            from,
                            to,
                            best,
                            found
                        );
                    } else {
                        prop_assert!(found.is_infinite());
                    }
                }
            }
        }
    }
}
