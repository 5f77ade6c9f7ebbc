//! The shared optimal-parsing engine.
//!
//! One forward DP pass decides, for every input position, the cheapest way
//! to have arrived there — either via a literal edge from the previous
//! position or a match edge copied from some earlier position. This is the
//! same two-phase shape as `clownlzss.h`'s `MAKE_FIND_MATCHES_FUNCTION`
//! macro (forward relaxation, then a single backward-to-forward chain
//! reversal and emission walk), expressed as a generic function over a
//! [`Backend`] rather than a C preprocessor macro instantiated per format.
//!
//! Static dispatch is deliberate: `compress` is generic over `B: Backend`,
//! so the compiler monomorphizes one specialized copy of the DP loop per
//! format, keeping `match_cost`/`find_extra_matches` calls inlineable in
//! the hot inner loop instead of going through a vtable.

use crate::node::{self, Node, NONE};

/// The cost-model half of a format: window size, maximum match length, and
/// the cost functions the DP pass consults while building the graph.
///
/// `Symbol` is `u8` for every byte-oriented format and `u16` for Comper,
/// which operates on 16-bit words.
pub trait Backend {
    type Symbol: Copy + PartialEq;

    /// Longest match length this format's bitstream can encode.
    const MAX_MATCH_LENGTH: usize;
    /// Longest match distance (window size) this format's bitstream can encode.
    const MAX_MATCH_DISTANCE: usize;

    /// Cost, in bits, of emitting one literal symbol.
    fn literal_cost(&self) -> u32;

    /// Cost, in bits, of emitting a match of `length` symbols at `distance`
    /// symbols back. Returning `0` means the match is refused outright (the
    /// DP pass will not relax any node using it) — every backend in this
    /// crate treats a free edge as nonsensical and never relies on one.
    fn match_cost(&self, length: usize, distance: usize) -> u32;

    /// Hook for formats whose decoder supports match shapes a plain
    /// sliding-window search would not find on its own (for example a
    /// dedicated short run-length encoding). Pushes `(distance, length)`
    /// pairs onto `out`; the default implementation finds nothing extra.
    fn find_extra_matches(
        &self,
        _data: &[Self::Symbol],
        _pos: usize,
        _out: &mut Vec<(usize, usize)>,
    ) {
    }
}

/// One edge chosen by the optimal parser: either a literal symbol or a
/// match copied from `distance` symbols back. `offset` is the absolute
/// source position the match copies from (`clownlzss.h`'s `match_offset`,
/// passed to `MATCH_CALLBACK` as its own, separate argument from
/// `distance`) — most backends only need `distance`, but a format whose
/// decoder addresses a ring buffer by absolute position rather than
/// relative distance (Rocket) needs this instead.
#[derive(Debug, Clone, Copy)]
pub enum Edge {
    Literal,
    Match {
        distance: usize,
        length: usize,
        offset: usize,
    },
}

/// Build the DP lattice over `data` and return it together with the index
/// of the final (fully-parsed) node. `nodes[i]` describes the cheapest way
/// to have compressed `data[..i]`; `nodes[data.len()]` is always reached
/// since a run of literals reaches every position.
pub fn build_graph<B: Backend>(backend: &B, data: &[B::Symbol]) -> Vec<Node> {
    let len = data.len();
    let mut nodes = Vec::new();
    if nodes.try_reserve_exact(len + 1).is_err() {
        // Caller maps allocation failure via the fallible wrapper below;
        // build_graph itself is infallible so this degrades to an empty
        // (and therefore rejected-by-caller) allocation.
        return Vec::new();
    }
    nodes.resize(len + 1, Node::unreached());
    nodes[0] = Node::root();

    let literal_cost = backend.literal_cost();
    let mut extra = Vec::new();

    for pos in 0..len {
        let cost_here = nodes[pos].cost();
        if cost_here == NONE {
            continue;
        }

        // Plain sliding-window match search: for every distance within
        // range, find the longest shared prefix and relax every
        // intermediate length, nearest distance first (shorter distances
        // are checked first since they are typically cheaper to encode).
        let max_distance = B::MAX_MATCH_DISTANCE.min(pos);
        for distance in 1..=max_distance {
            let source = pos - distance;
            let max_len = (len - pos).min(B::MAX_MATCH_LENGTH);
            let mut match_len = 0;
            while match_len < max_len && data[source + match_len] == data[pos + match_len] {
                match_len += 1;
            }
            if match_len == 0 {
                continue;
            }
            for length in 1..=match_len {
                let cost = backend.match_cost(length, distance);
                if cost == 0 {
                    continue;
                }
                let total = cost_here.saturating_add(cost);
                nodes[pos + length].relax(total, pos as u32, length as u32, source as u32);
            }
        }

        extra.clear();
        backend.find_extra_matches(data, pos, &mut extra);
        for (distance, length) in extra.drain(..) {
            if length == 0 || pos + length > len {
                continue;
            }
            let cost = backend.match_cost(length, distance);
            if cost == 0 || distance > pos {
                continue;
            }
            let total = cost_here.saturating_add(cost);
            let source = pos - distance;
            nodes[pos + length].relax(total, pos as u32, length as u32, source as u32);
        }

        // Literal edge: pos -> pos + 1, relaxed last so it wins an exact
        // cost tie against any match candidate considered above for this
        // position, matching clownlzss.h's tie-break.
        let literal_total = cost_here.saturating_add(literal_cost);
        nodes[pos + 1].relax_tie_to_literal(literal_total, pos as u32, 0, 0);
    }

    node::reverse_chain(&mut nodes, len as u32);
    nodes
}

/// Walk the forward `next` chain built by [`build_graph`] and yield the
/// sequence of edges an emitter should write out, start to end.
pub fn walk_edges(nodes: &[Node]) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut current = 0usize;
    while current != nodes.len() - 1 {
        let next = nodes[current].next();
        debug_assert_ne!(next, NONE, "graph must reach every position");
        let next = next as usize;
        let node = &nodes[next];
        if node.length == 0 {
            edges.push(Edge::Literal);
        } else {
            edges.push(Edge::Match {
                distance: current - node.offset as usize,
                length: node.length as usize,
                offset: node.offset as usize,
            });
        }
        current = next;
    }
    edges
}
