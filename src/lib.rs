//! Word-placement engine for a generalized crossword/Scrabble-style game.
//!
//! The crate is split into the dictionary engine (a minimized Directed Acyclic Word
//! Graph, built incrementally per Appel & Jacobson, CACM 1988) and the board/search
//! engine (a grid with incremental cross-check bitmasks, searched via a constrained
//! recursive anchor algorithm). See `DESIGN.md` at the repository root for the
//! module-by-module rationale.

pub mod board;
pub mod config;
pub mod dawg;
pub mod dawgbuilder;
pub mod distribution;
pub mod edgemap;
pub mod error;
pub mod mv;
pub mod node;
pub mod nodearray;
pub mod nodelookup;
pub mod rack;
pub mod search;
pub mod strategy;

pub use board::Board;
pub use dawg::{build_dawg, Dawg};
pub use error::Error;
pub use mv::Move;
pub use rack::Rack;
pub use search::{search_board, search_segment};
