//! Fixed-capacity, separately-chained hash map from a node's signature to its arena
//! index, used only during DAWG construction to detect and merge equivalent suffix
//! branches.

/// Default bucket count, per the engine's documented limits.
pub const DEFAULT_BUCKETS: usize = 8192;

#[derive(Debug, Clone)]
pub struct NodeLookup {
    buckets: Vec<Vec<(u64, u32)>>,
}

impl NodeLookup {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0);
        Self {
            buckets: vec![Vec::new(); capacity],
        }
    }

    fn bucket_index(&self, signature: u64) -> usize {
        (signature % self.buckets.len() as u64) as usize
    }

    /// Inserts `(signature, node_index)`. If an entry with the same signature is
    /// already present — whether or not it represents the same node — the insert is
    /// silently dropped and a warning is logged. The branch simply remains
    /// un-merged; correctness is preserved at the cost of a slightly larger graph.
    pub fn insert(&mut self, signature: u64, node_index: u32) {
        let bucket = self.bucket_index(signature);
        if self.buckets[bucket].iter().any(|&(sig, _)| sig == signature) {
            log::warn!("duplicate node with signature {signature}");
            return;
        }
        self.buckets[bucket].push((signature, node_index));
    }

    pub fn find(&self, signature: u64) -> Option<u32> {
        let bucket = self.bucket_index(signature);
        self.buckets[bucket]
            .iter()
            .find(|&&(sig, _)| sig == signature)
            .map(|&(_, index)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_find_round_trips() {
        let mut lookup = NodeLookup::new(16);
        lookup.insert(42, 7);
        assert_eq!(lookup.find(42), Some(7));
        assert_eq!(lookup.find(43), None);
    }

    #[test]
    fn duplicate_signature_is_dropped_not_overwritten() {
        let mut lookup = NodeLookup::new(16);
        lookup.insert(42, 7);
        lookup.insert(42, 9);
        assert_eq!(lookup.find(42), Some(7));
    }

    #[test]
    fn collisions_across_buckets_still_resolve() {
        let mut lookup = NodeLookup::new(4);
        for i in 0..20u64 {
            lookup.insert(i, i as u32);
        }
        for i in 0..20u64 {
            assert_eq!(lookup.find(i), Some(i as u32));
        }
    }
}
