//! Integration tests for the shared optimal-parsing engine, independent of
//! any single format's bitstream.

use retrolzss::engine::{self, Backend};

struct FlatCostBackend;

impl Backend for FlatCostBackend {
    type Symbol = u8;

    const MAX_MATCH_LENGTH: usize = 32;
    const MAX_MATCH_DISTANCE: usize = 1024;

    fn literal_cost(&self) -> u32 {
        9
    }

    fn match_cost(&self, length: usize, _distance: usize) -> u32 {
        if (3..=Self::MAX_MATCH_LENGTH).contains(&length) {
            17
        } else {
            0
        }
    }
}

#[test]
fn every_position_is_reached() {
    let data = b"abcabcabcabcabcabcabcabcabcabc".to_vec();
    let nodes = engine::build_graph(&FlatCostBackend, &data);
    for (i, node) in nodes.iter().enumerate() {
        assert!(node.is_reached(), "position {i} was not reached");
    }
}

#[test]
fn edges_cover_the_whole_input_exactly_once() {
    let data = b"the quick brown fox the quick brown fox the quick brown fox".to_vec();
    let nodes = engine::build_graph(&FlatCostBackend, &data);
    let edges = engine::walk_edges(&nodes);

    let mut covered = 0usize;
    for edge in &edges {
        covered += match edge {
            engine::Edge::Literal => 1,
            engine::Edge::Match { length, .. } => *length,
        };
    }
    assert_eq!(covered, data.len());
}

#[test]
fn repetitive_input_uses_at_least_one_match_edge() {
    let data = vec![0x42u8; 64];
    let nodes = engine::build_graph(&FlatCostBackend, &data);
    let edges = engine::walk_edges(&nodes);
    assert!(
        edges
            .iter()
            .any(|e| matches!(e, engine::Edge::Match { .. })),
        "expected at least one match edge on a repetitive input"
    );
}

#[test]
fn single_byte_input_is_always_a_literal() {
    let data = vec![7u8];
    let nodes = engine::build_graph(&FlatCostBackend, &data);
    let edges = engine::walk_edges(&nodes);
    assert_eq!(edges.len(), 1);
    assert!(matches!(edges[0], engine::Edge::Literal));
}

#[test]
fn no_edge_ever_reports_a_refused_zero_cost_match() {
    // match_cost returning 0 means "refused"; the engine must never select
    // a match shorter than 3 or longer than MAX_MATCH_LENGTH.
    let data = vec![1u8; 40];
    let nodes = engine::build_graph(&FlatCostBackend, &data);
    let edges = engine::walk_edges(&nodes);
    for edge in edges {
        if let engine::Edge::Match { length, .. } = edge {
            assert!(length >= 3 && length <= FlatCostBackend::MAX_MATCH_LENGTH);
        }
    }
}
