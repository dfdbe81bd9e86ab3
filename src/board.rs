//! A rectangular grid with incremental cross-check bitmasks and block flags.
//!
//! The board stores a one-cell border around the playable area on all four sides,
//! used purely as a technical representation of "off-board": border cells are never
//! written, and their block flags already forbid movement across the playable
//! boundary in the relevant direction.

use crate::dawg::Dawg;
use crate::error::{Error, Result};

pub const BLOCKFLAG_NEXT_ACROSS: u8 = 0x01;
pub const BLOCKFLAG_NEXT_DOWN: u8 = 0x02;
pub const BLOCKFLAG_PREV_ACROSS: u8 = 0x04;
pub const BLOCKFLAG_PREV_DOWN: u8 = 0x08;

/// All 26 bits set: every letter is legal.
pub const CHECKBITS_ANY: u32 = (1 << 26) - 1;

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Letter(u8),
    Blank,
    Anchor,
}

impl Cell {
    fn is_letter(self) -> bool {
        matches!(self, Cell::Letter(_))
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    size_x: usize,
    size_y: usize,
    letters: Vec<Cell>,
    blockflags: Vec<u8>,
    /// Legal letters for this cell when playing a DOWN word, i.e. letters that
    /// combine with already-placed letters to form a legal ACROSS word through here.
    checkbits_across: Vec<u32>,
    /// Legal letters for this cell when playing an ACROSS word, symmetric.
    checkbits_down: Vec<u32>,
}

impl Board {
    /// Creates a new board with the given playable dimensions, padded by a one-cell
    /// border on each side. `index`/`coord` address cells in playable-coordinate
    /// space (`0..playable_x`, `0..playable_y`); the border itself is only ever
    /// reached through the raw storage walk `search_board` performs, and is never
    /// written.
    pub fn init(playable_x: usize, playable_y: usize) -> Self {
        let playable_x = playable_x.max(1);
        let playable_y = playable_y.max(1);
        let size_x = playable_x + 2;
        let size_y = playable_y + 2;
        let num_squares = size_x * size_y;

        let mut board = Self {
            size_x,
            size_y,
            letters: vec![Cell::Blank; num_squares],
            blockflags: vec![0u8; num_squares],
            checkbits_across: vec![CHECKBITS_ANY; num_squares],
            checkbits_down: vec![CHECKBITS_ANY; num_squares],
        };

        // Seal the seam between the border ring and the inset playable region on
        // all four sides, so a word can never span from a playable cell into the
        // off-board border (border cells are never written, per §3). This is the
        // playable/border boundary, not the outermost ring itself.
        for x in 0..size_x {
            board.block_next(x, false); // border top row -> first playable row
            board.block_next((size_y - 2) * size_x + x, false); // last playable row -> border bottom row
        }
        for y in 0..size_y {
            let row_start = size_x * y;
            board.block_next(row_start, true); // border left column -> first playable column
            board.block_next(row_start + size_x - 2, true); // last playable column -> border right column
        }

        board
    }

    /// Playable width (excludes the one-cell border on each side).
    pub fn width(&self) -> usize {
        self.size_x - 2
    }

    /// Playable height (excludes the one-cell border on each side).
    pub fn height(&self) -> usize {
        self.size_y - 2
    }

    /// Storage index for playable coordinate `(x, y)`, `x < width()`, `y < height()`.
    /// Offset by one in each axis to land in the inset region past the border.
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width() && y < self.height());
        (y + 1) * self.size_x + (x + 1)
    }

    /// Inverse of `index`: the playable coordinate a storage index corresponds to.
    pub fn coord(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.letters.len());
        let y = index / self.size_x;
        let x = index - y * self.size_x;
        (x - 1, y - 1)
    }

    /// Full storage width, border included — used internally to walk every row/
    /// column (border cells are always `Blank` and never become anchors, so
    /// including them in a line walk is harmless; it's how the walk reaches the
    /// sealed seam at each edge).
    pub(crate) fn storage_width(&self) -> usize {
        self.size_x
    }

    pub(crate) fn storage_height(&self) -> usize {
        self.size_y
    }

    /// Raw storage index, no playable-space offset. `x < storage_width()`,
    /// `y < storage_height()`.
    pub(crate) fn storage_index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size_x && y < self.size_y);
        y * self.size_x + x
    }

    pub fn offset(&self, across: bool) -> isize {
        if across {
            1
        } else {
            self.size_x as isize
        }
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.letters[index]
    }

    pub fn blockflags(&self, index: usize) -> u8 {
        self.blockflags[index]
    }

    pub fn checkbits_across(&self, index: usize) -> u32 {
        self.checkbits_across[index]
    }

    pub fn checkbits_down(&self, index: usize) -> u32 {
        self.checkbits_down[index]
    }

    /// Marks the seam between `index` and its neighbor in the given direction as
    /// permanently blocked, forbidding a word from spanning it.
    pub fn block_next(&mut self, index: usize, across: bool) {
        let blockflag_next = if across {
            BLOCKFLAG_NEXT_ACROSS
        } else {
            BLOCKFLAG_NEXT_DOWN
        };
        let blockflag_prev = if across {
            BLOCKFLAG_PREV_ACROSS
        } else {
            BLOCKFLAG_PREV_DOWN
        };
        let next_index = (index as isize + self.offset(across)) as usize;
        self.blockflags[index] |= blockflag_next;
        self.blockflags[next_index] |= blockflag_prev;
    }

    fn is_letter(&self, index: usize) -> bool {
        self.letters[index].is_letter()
    }

    /// Places `word` on the board starting at `start_index`, in the direction given
    /// by `across`, then recomputes cross-check bits for every newly-dirtied anchor.
    /// Returns an error rather than corrupting the board if `word` would overlap an
    /// existing non-matching letter or span a blocked seam.
    pub fn write(&mut self, dawg: &Dawg, start_index: usize, across: bool, word: &[u8]) -> Result<()> {
        let offset = self.offset(across);
        let cross_offset = self.offset(!across);

        let blockflag_next = if across {
            BLOCKFLAG_NEXT_ACROSS
        } else {
            BLOCKFLAG_NEXT_DOWN
        };
        let blockflag_prev = if across {
            BLOCKFLAG_PREV_ACROSS
        } else {
            BLOCKFLAG_PREV_DOWN
        };
        let cross_blockflag_next = if across {
            BLOCKFLAG_NEXT_DOWN
        } else {
            BLOCKFLAG_NEXT_ACROSS
        };
        let cross_blockflag_prev = if across {
            BLOCKFLAG_PREV_DOWN
        } else {
            BLOCKFLAG_PREV_ACROSS
        };

        // Validate before mutating anything, so a rejected write leaves the board
        // untouched rather than partially applied.
        let mut index = start_index as isize;
        for (i, &letter) in word.iter().enumerate() {
            let idx = index as usize;
            if i != word.len() - 1 && (self.blockflags[idx] & blockflag_next) != 0 {
                return Err(Error::BlockedSeam { index: idx });
            }
            if let Cell::Letter(existing) = self.letters[idx] {
                if existing != letter {
                    return Err(Error::LetterMismatch {
                        index: idx,
                        existing,
                        new: letter,
                    });
                }
            }
            index += offset;
        }

        let mut dirty_anchors = Vec::with_capacity(word.len() * 2 + 2);

        let mut index = start_index as isize;
        for &letter in word {
            let idx = index as usize;
            if !self.letters[idx].is_letter() {
                self.letters[idx] = Cell::Letter(letter);
                self.flag_dirty_anchor(idx as isize, -cross_offset, cross_blockflag_prev, &mut dirty_anchors);
                self.flag_dirty_anchor(idx as isize, cross_offset, cross_blockflag_next, &mut dirty_anchors);
            }
            index += offset;
        }

        self.flag_dirty_anchor(start_index as isize, -offset, blockflag_prev, &mut dirty_anchors);
        self.flag_dirty_anchor(index - offset, offset, blockflag_next, &mut dirty_anchors);

        for dirty_index in dirty_anchors {
            self.recompute_checkbits(dawg, dirty_index);
        }

        Ok(())
    }

    /// From `from_index`, walks in `search_dir_offset` steps until blocked (nothing
    /// to flag) or a blank/anchor cell is reached, which becomes (or remains) an
    /// anchor and is recorded as dirty.
    fn flag_dirty_anchor(
        &mut self,
        from_index: isize,
        search_dir_offset: isize,
        blockflag: u8,
        out: &mut Vec<usize>,
    ) {
        let mut index = from_index;
        loop {
            let idx = index as usize;
            if (self.blockflags[idx] & blockflag) != 0 {
                return;
            }
            let next_index = index + search_dir_offset;
            let next_idx = next_index as usize;
            match self.letters[next_idx] {
                Cell::Blank | Cell::Anchor => {
                    self.letters[next_idx] = Cell::Anchor;
                    out.push(next_idx);
                    return;
                }
                Cell::Letter(_) => {
                    index = next_index;
                }
            }
        }
    }

    fn recompute_checkbits(&mut self, dawg: &Dawg, anchor_index: usize) {
        self.checkbits_across[anchor_index] = self.resolve_checkbits(
            dawg,
            anchor_index,
            1,
            BLOCKFLAG_PREV_ACROSS,
            BLOCKFLAG_NEXT_ACROSS,
        );
        self.checkbits_down[anchor_index] = self.resolve_checkbits(
            dawg,
            anchor_index,
            self.size_x as isize,
            BLOCKFLAG_PREV_DOWN,
            BLOCKFLAG_NEXT_DOWN,
        );
    }

    fn resolve_checkbits(
        &self,
        dawg: &Dawg,
        anchor_index: usize,
        offset: isize,
        blockflag_prev: u8,
        blockflag_next: u8,
    ) -> u32 {
        let mut prefix_len = 0i32;
        let mut index = anchor_index as isize;
        while (self.blockflags[index as usize] & blockflag_prev) == 0 {
            let prev_index = index - offset;
            if !self.is_letter(prev_index as usize) {
                break;
            }
            prefix_len += 1;
            index = prev_index;
        }

        let mut suffix_len = 0i32;
        let mut index = anchor_index as isize;
        while (self.blockflags[index as usize] & blockflag_next) == 0 {
            let next_index = index + offset;
            if !self.is_letter(next_index as usize) {
                break;
            }
            suffix_len += 1;
            index = next_index;
        }

        if prefix_len == 0 && suffix_len == 0 {
            return CHECKBITS_ANY;
        }

        let mut prefix_node = crate::dawg::ROOT;
        let mut index = anchor_index as isize - offset * prefix_len as isize;
        while index < anchor_index as isize {
            let letter = match self.letters[index as usize] {
                Cell::Letter(l) => l,
                _ => unreachable!("prefix cells must be letters"),
            };
            match dawg.nodes().get(prefix_node).edges.find(letter) {
                Some(next) => prefix_node = next,
                None => return 0,
            }
            index += offset;
        }

        let mut value = 0u32;
        let prefix_node_data = dawg.nodes().get(prefix_node);
        for edge in prefix_node_data.edges.iter() {
            let ordinal = edge.letter - b'a';
            if self.check_suffix(dawg, edge.child, anchor_index, offset, suffix_len) {
                value |= 1 << ordinal;
            }
        }
        value
    }

    fn check_suffix(
        &self,
        dawg: &Dawg,
        mut node_index: u32,
        anchor_index: usize,
        offset: isize,
        suffix_len: i32,
    ) -> bool {
        for depth in 1..=suffix_len {
            let suffix_index = (anchor_index as isize + offset * depth as isize) as usize;
            let letter = match self.letters[suffix_index] {
                Cell::Letter(l) => l,
                _ => unreachable!("suffix cells must be letters"),
            };
            match dawg.nodes().get(node_index).edges.find(letter) {
                Some(next) => node_index = next,
                None => return false,
            }
        }
        dawg.nodes().get(node_index).is_word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dawgbuilder::Builder;

    fn small_dawg() -> Dawg {
        let mut builder = Builder::new();
        for w in [
            "day", "days", "yesterday", "yes", "yeses", "are", "ares", "ray", "rays",
        ] {
            builder.add(w.as_bytes());
        }
        builder.finalize();
        builder.publish()
    }

    #[test]
    fn init_sets_border_blockflags() {
        let board = Board::init(15, 15);
        assert_eq!(board.width(), 15);
        assert_eq!(board.height(), 15);
        assert_eq!(board.storage_width(), 17);
        assert_eq!(board.storage_height(), 17);
        // The first playable cell sits right against the sealed playable/border
        // seam, so it carries the PREV_ blockflags in both directions.
        let top_left = board.index(0, 0);
        assert_ne!(board.blockflags(top_left) & BLOCKFLAG_PREV_ACROSS, 0);
        assert_ne!(board.blockflags(top_left) & BLOCKFLAG_PREV_DOWN, 0);
        // The last playable cell carries the symmetric NEXT_ blockflags.
        let bottom_right = board.index(14, 14);
        assert_ne!(board.blockflags(bottom_right) & BLOCKFLAG_NEXT_ACROSS, 0);
        assert_ne!(board.blockflags(bottom_right) & BLOCKFLAG_NEXT_DOWN, 0);
        // Border cells themselves are never written and the walk never reaches
        // past the seam: a cell one step outside the playable region still has
        // the mirrored block flag.
        let storage_border_right = board.storage_index(board.storage_width() - 1, 1);
        assert_ne!(board.blockflags(storage_border_right) & BLOCKFLAG_PREV_ACROSS, 0);
    }

    #[test]
    fn write_rejects_blocked_seam() {
        let dawg = small_dawg();
        let mut board = Board::init(10, 10);
        let start = board.index(1, 1);
        board.block_next(start, true);
        let result = board.write(&dawg, start, true, b"ray");
        assert!(matches!(result, Err(Error::BlockedSeam { .. })));
    }

    #[test]
    fn write_rejects_mismatched_overlap() {
        let dawg = small_dawg();
        let mut board = Board::init(10, 10);
        let start = board.index(1, 1);
        board.write(&dawg, start, true, b"ray").unwrap();

        // "bay" would need a 'b' at the same cell that already holds 'r'.
        let bad = board.write(&dawg, start, true, b"bay");
        assert!(matches!(bad, Err(Error::LetterMismatch { .. })));
    }

    #[test]
    fn write_marks_anchors_around_word() {
        let dawg = small_dawg();
        let mut board = Board::init(15, 15);
        let start = board.index(4, 4);
        board.write(&dawg, start, true, b"yesterday").unwrap();

        let before = board.index(3, 4);
        let after = board.index(13, 4);
        assert_eq!(board.cell(before), Cell::Anchor);
        assert_eq!(board.cell(after), Cell::Anchor);

        for i in 0..9 {
            let idx = board.index(4 + i, 4);
            assert!(matches!(board.cell(idx), Cell::Letter(_)));
        }
    }

    #[test]
    fn blank_cell_with_no_neighbors_has_all_checkbits() {
        let board = Board::init(15, 15);
        let idx = board.index(7, 7);
        assert_eq!(board.checkbits_across(idx), CHECKBITS_ANY);
        assert_eq!(board.checkbits_down(idx), CHECKBITS_ANY);
    }
}
