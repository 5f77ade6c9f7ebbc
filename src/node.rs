//! The optimal parser's per-position DP node.
//!
//! Mirrors `LZSSNodeMeta` from `clownlzss.h`: each node holds the minimal
//! cost to reach that position, the predecessor that achieves it, and the
//! length/offset of the edge taken to get there. After the forward pass
//! reconstructs the cheapest path, `previous` links are walked backwards
//! once and reversed into a forward `next` chain so emission can walk the
//! path start-to-end; `next` is stored in the same field `cost` occupied
//! during the forward pass; nothing reads `cost` after that point.

/// Sentinel meaning "no predecessor" / "no successor" / "infinite cost".
pub const NONE: u32 = u32::MAX;

/// One node in the DP lattice, one per input position `0..=len`.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    /// Cost to reach this position during the forward pass; repurposed to
    /// hold the index of the next node on the chosen path once the
    /// predecessor chain has been reversed.
    cost_or_next: u32,
    /// Index of the predecessor node on the cheapest known path.
    pub previous: u32,
    /// Length of the edge arriving from `previous`; 0 means a literal edge.
    pub length: u32,
    /// Absolute source position of a match edge; unused for literal edges.
    pub offset: u32,
}

impl Node {
    /// A node with infinite cost and no known predecessor.
    pub const fn unreached() -> Self {
        Node {
            cost_or_next: NONE,
            previous: NONE,
            length: 0,
            offset: 0,
        }
    }

    /// The node for position 0: the empty prefix, reachable at zero cost.
    pub const fn root() -> Self {
        Node {
            cost_or_next: 0,
            previous: NONE,
            length: 0,
            offset: 0,
        }
    }

    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost_or_next
    }

    #[inline]
    pub fn is_reached(&self) -> bool {
        self.cost_or_next != NONE
    }

    /// Relax this node if `candidate_cost` improves on the current cost.
    /// Returns whether the relaxation took effect.
    #[inline]
    pub fn relax(&mut self, candidate_cost: u32, previous: u32, length: u32, offset: u32) -> bool {
        if candidate_cost < self.cost_or_next {
            self.cost_or_next = candidate_cost;
            self.previous = previous;
            self.length = length;
            self.offset = offset;
            true
        } else {
            false
        }
    }

    /// Like [`Node::relax`], but also replaces the current best edge on an
    /// exact cost tie. `clownlzss.h`'s `MAKE_FIND_MATCHES_FUNCTION` relaxes
    /// every match candidate for a position with a strict `>` comparison,
    /// then relaxes that position's literal edge last with `>=`, so the
    /// literal wins ties against a match of identical cost. The engine here
    /// calls this variant only for the literal edge, after every match
    /// candidate for the position has already been considered.
    #[inline]
    pub fn relax_tie_to_literal(
        &mut self,
        candidate_cost: u32,
        previous: u32,
        length: u32,
        offset: u32,
    ) -> bool {
        if candidate_cost <= self.cost_or_next {
            self.cost_or_next = candidate_cost;
            self.previous = previous;
            self.length = length;
            self.offset = offset;
            true
        } else {
            false
        }
    }

    #[inline]
    fn set_next(&mut self, next: u32) {
        self.cost_or_next = next;
    }

    #[inline]
    pub fn next(&self) -> u32 {
        self.cost_or_next
    }
}

/// Reverse the `previous` chain ending at `last` into a forward `next`
/// chain starting at node 0, reusing the `cost` field's storage.
///
/// After this call `nodes[i].cost()`/`next()` must not be read as a cost;
/// only `next()` is meaningful, read while walking from node 0 onward.
pub fn reverse_chain(nodes: &mut [Node], last: u32) {
    let mut current = last;
    let mut next = NONE;
    while current != NONE {
        let previous = nodes[current as usize].previous;
        nodes[current as usize].set_next(next);
        next = current;
        current = previous;
    }
}
