//! The finalized, immutable Directed Acyclic Word Graph plus the word-list loader
//! that builds one.

use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::dawgbuilder::Builder;
use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::nodearray::NodeArray;

/// Maximum acceptable length for a word that may be added to the DAWG.
pub const MAX_WORD_LEN: usize = 32;

/// Root node is always at index 0.
pub const ROOT: u32 = 0;

/// A finalized, immutable DAWG: a node arena plus the letter-frequency distribution
/// of the word list it was built from. Contains no interior mutability, so it is
/// safely `Send + Sync` and shareable across concurrent searches on distinct boards.
#[derive(Debug, Clone)]
pub struct Dawg {
    nodes: NodeArray,
    distribution: Distribution,
}

impl Dawg {
    pub(crate) fn from_parts(nodes: NodeArray, distribution: Distribution) -> Self {
        Self { nodes, distribution }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub(crate) fn nodes(&self) -> &NodeArray {
        &self.nodes
    }

    /// Whether `word` (lowercase ASCII `a..z`) is present in the DAWG.
    pub fn contains(&self, word: &[u8]) -> bool {
        let mut node = ROOT;
        for &letter in word {
            match self.nodes.get(node).edges.find(letter) {
                Some(child) => node = child,
                None => return false,
            }
        }
        self.nodes.get(node).is_word
    }

    /// Traverses from the root through `prefix`, returning the node index reached,
    /// or `None` if `prefix` is not itself a valid path in the DAWG.
    pub(crate) fn traverse(&self, prefix: &[u8]) -> Option<u32> {
        let mut node = ROOT;
        for &letter in prefix {
            node = self.nodes.get(node).edges.find(letter)?;
        }
        Some(node)
    }

    /// Exhaustively enumerates every word reachable from the root, for round-trip
    /// testing. Not used by the search/board hot path.
    pub fn all_words(&self) -> Vec<Vec<u8>> {
        let mut words = Vec::new();
        let mut scratch = Vec::new();
        self.collect_words(ROOT, &mut scratch, &mut words);
        words
    }

    fn collect_words(&self, node_index: u32, scratch: &mut Vec<u8>, out: &mut Vec<Vec<u8>>) {
        let node = self.nodes.get(node_index);
        if node.is_word {
            out.push(scratch.clone());
        }
        for edge in node.edges.iter() {
            scratch.push(edge.letter);
            self.collect_words(edge.child, scratch, out);
            scratch.pop();
        }
    }
}

/// Reads a list of whitespace-delimited, alphabetically-sorted, all-lowercase tokens
/// from `path` and builds a DAWG from them. Tokens that fail validity rules are
/// silently dropped; out-of-order tokens are dropped with a logged diagnostic (see
/// `dawgbuilder::Builder::add`). Returns the finalized DAWG and the number of words
/// accepted.
pub fn build_dawg(path: &Path) -> Result<(Dawg, u32)> {
    let file = std::fs::File::open(path).map_err(|source| Error::WordListIo {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut builder = Builder::new();
    let mut accepted = 0u32;
    for line in reader.lines() {
        let line = line.map_err(|source| Error::WordListIo {
            path: path.to_path_buf(),
            source,
        })?;
        for token in line.split_whitespace() {
            // Apply a conservative cap matching the reference reader's maximum
            // recognized token length, rather than feeding an unbounded string into
            // the builder (which would reject it anyway, just after an unbounded
            // allocation).
            let token = if token.len() > 511 { &token[..511] } else { token };
            if builder.add(token.as_bytes()) {
                accepted += 1;
            }
        }
    }

    builder.finalize();
    Ok((builder.publish(), accepted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn round_trip_all_words_equals_input_set() {
        let words = ["cat", "cats", "facet", "facets", "fact", "facts"];
        let mut builder = Builder::new();
        for w in words {
            builder.add(w.as_bytes());
        }
        builder.finalize();
        let dawg = builder.publish();

        let mut expected: Vec<Vec<u8>> = words.iter().map(|w| w.as_bytes().to_vec()).collect();
        expected.sort();
        let mut actual = dawg.all_words();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn build_dawg_reads_sorted_word_list_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("wordplacer_test_wordlist_{}.txt", std::process::id()));
        {
            let mut f = std::fs::File::create(&path).unwrap();
            writeln!(f, "cat\ncats\ndog\ndogs").unwrap();
        }

        let (dawg, accepted) = build_dawg(&path).unwrap();
        assert_eq!(accepted, 4);
        assert!(dawg.contains(b"cat"));
        assert!(dawg.contains(b"dogs"));
        assert!(!dawg.contains(b"do"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn build_dawg_reports_unreadable_path() {
        let missing = std::env::temp_dir().join("wordplacer_definitely_missing_file.txt");
        let result = build_dawg(&missing);
        assert!(result.is_err());
    }
}
