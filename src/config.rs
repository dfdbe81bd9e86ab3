//! Optional TOML config file for the CLI driver, read with `serde`/`toml` the same
//! way a small game driver loads its settings file — just the word list path and
//! board dimensions, no turn/player state.

use std::path::{Path, PathBuf};

use serde_derive::Deserialize;

use crate::error::{Error, Result};

fn default_board_x() -> usize {
    15
}

fn default_board_y() -> usize {
    15
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub wordlist: PathBuf,
    #[serde(default = "default_board_x")]
    pub board_x: usize,
    #[serde(default = "default_board_y")]
    pub board_y: usize,
}

impl Config {
    /// Loads a config file from `path`. Any read/parse failure is reported as a
    /// `WordListIo`-shaped error carrying the config path, mirroring how the rest
    /// of the crate surfaces I/O failures rather than panicking.
    pub fn load(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::WordListIo {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
