//! Error type for fallible operations that are programmer-contract violations or I/O
//! failures, as opposed to the boolean/count returns the core search and build APIs
//! use for expected rejection paths.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read word list at {path}: {source}")]
    WordListIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("move write would overlap existing letter '{existing}' with '{new}' at index {index}")]
    LetterMismatch { index: usize, existing: u8, new: u8 },

    #[error("move write spans a blocked seam at index {index}")]
    BlockedSeam { index: usize },

    #[error("pattern length {pattern_len} exceeds segment length {length}")]
    PatternTooLong { pattern_len: usize, length: usize },

    #[error("segment length {length} exceeds the maximum word length {max}")]
    SegmentTooLong { length: usize, max: usize },

    #[error("could not parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
