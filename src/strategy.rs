//! Best-move selection strategies.
//!
//! The engine counts every legal move a search finds but retains only one in the
//! output move slot. The default tie-breaker is "longest word wins"; an optional
//! "favorite letters" layer prefers the move whose letters contain the most matches
//! against four randomly chosen letters, falling back to length when neither move
//! scores higher on favorites. Kept as a small trait so new tie-breakers can be added
//! without touching the search kernel, rather than an `#ifdef`-style compile-time switch.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decides whether a newly-found candidate move should replace the current best.
pub trait MoveStrategy {
    /// `candidate`/`incumbent` are the words under consideration; `incumbent` is
    /// empty iff no move has been accepted yet this search.
    fn prefers(&mut self, candidate: &[u8], incumbent: &[u8]) -> bool;
}

/// Default strategy: strictly longer words win, ties keep the incumbent.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestWins;

impl MoveStrategy for LongestWins {
    fn prefers(&mut self, candidate: &[u8], incumbent: &[u8]) -> bool {
        candidate.len() > incumbent.len()
    }
}

/// Picks four letters at random (via a seeded RNG, so runs are reproducible) and
/// prefers whichever candidate contains the most occurrences of them, falling back
/// to "longest wins" when the favorite-letter count doesn't strictly improve.
#[derive(Debug, Clone)]
pub struct FavoriteLetters {
    favorites: [u8; 4],
    best_score: i32,
}

impl FavoriteLetters {
    /// Builds a strategy with four favorite letters drawn from a `StdRng` seeded
    /// with `seed`. Threading the seed explicitly (rather than reaching for a
    /// global thread-local RNG) keeps move selection deterministic under test.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut favorites = [0u8; 4];
        for slot in favorites.iter_mut() {
            *slot = b'a' + rng.gen_range(0..26);
        }
        Self {
            favorites,
            best_score: -1,
        }
    }

    pub fn favorites(&self) -> [u8; 4] {
        self.favorites
    }

    #[cfg(test)]
    fn with_favorites(favorites: [u8; 4]) -> Self {
        Self {
            favorites,
            best_score: -1,
        }
    }

    fn score(&self, word: &[u8]) -> i32 {
        let mut score = 0i32;
        for &letter in word {
            if self.favorites.contains(&letter) {
                score += 1;
            }
        }
        score
    }
}

impl MoveStrategy for FavoriteLetters {
    fn prefers(&mut self, candidate: &[u8], incumbent: &[u8]) -> bool {
        // The favorite-score is always recomputed and `best_score` kept in sync
        // with it, even along the length-win path — matching the original, which
        // runs this block unconditionally rather than skipping it once a length
        // win has already decided adoption. Otherwise a later equal-length move
        // would be compared against a stale `best_score` left over from before
        // the length win.
        let mut should_adopt = candidate.len() > incumbent.len();
        let score = self.score(candidate);
        if score > self.best_score {
            self.best_score = score;
            should_adopt = true;
        }
        should_adopt
    }
}
