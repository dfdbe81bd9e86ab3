//! Per-node sorted letter-to-child-index table.
//!
//! Edge counts per node are 0–26 with a strong low-single-digit mode; a sorted dense
//! array beats a hash map in both cache footprint and signature determinism (the
//! node's signature is computed from the exact byte sequence of its edges, so a
//! canonical ordering matters as much as lookup speed).

/// A single outgoing edge: a letter ordinal (`0..26`) paired with the arena index of
/// the node it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub letter: u8,
    pub child: u32,
}

/// A growable, sorted-by-letter list of edges. Letters are unique within one map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeMap {
    edges: Vec<Edge>,
}

impl EdgeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new edge. The caller must ensure `letter` is strictly greater than
    /// the last letter already present — the DAWG builder only ever inserts letters
    /// in alphabetical order, so this keeps insertion O(1) amortized while the map
    /// stays naturally sorted.
    pub fn insert(&mut self, letter: u8, child: u32) {
        debug_assert!(
            self.edges.last().map_or(true, |e| letter > e.letter),
            "edges must be inserted in strictly ascending letter order"
        );
        self.edges.push(Edge { letter, child });
    }

    pub fn find(&self, letter: u8) -> Option<u32> {
        self.edges
            .binary_search_by_key(&letter, |e| e.letter)
            .ok()
            .map(|i| self.edges[i].child)
    }

    /// Overwrites the child index for an existing letter. Undefined (debug-asserts)
    /// if the letter is absent.
    pub fn replace(&mut self, letter: u8, new_child: u32) {
        match self.edges.binary_search_by_key(&letter, |e| e.letter) {
            Ok(i) => self.edges[i].child = new_child,
            Err(_) => debug_assert!(false, "replace called for absent letter"),
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Raw bytes of the ordered edge list, used by `node::signature` to compute a
    /// stable hash. `Edge` has no padding (u8 + u32, repr default but tightly packed
    /// by field order would still risk padding) so we serialize explicitly instead of
    /// transmuting, keeping the byte layout independent of `repr`.
    pub fn signature_bytes(&self, out: &mut Vec<u8>) {
        out.reserve(self.edges.len() * 5);
        for edge in &self.edges {
            out.push(edge.letter);
            out.extend_from_slice(&edge.child.to_le_bytes());
        }
    }
}
