//! Constrained recursive move search over a board, given a rack and a read-only
//! DAWG. Implements the prefix/suffix/anchor recursion classic to Appel & Jacobson-
//! style word-placement engines.
//!
//! Two public entry points (`search_board`, `search_segment`) share one recursive
//! kernel, carried as a `SearchContext` that owns the private rack copy, the scratch
//! word buffer, the pattern buffer, and the output move — the "recursive search with
//! mutable shared context" pattern, expressed here as pop-before-recurse /
//! push-after-recurse around `&mut self` rather than a manually threaded frame stack,
//! since the borrow checker makes that discipline safe without unsafe code.

use crate::board::{Board, Cell, BLOCKFLAG_NEXT_ACROSS, BLOCKFLAG_NEXT_DOWN, BLOCKFLAG_PREV_ACROSS, BLOCKFLAG_PREV_DOWN};
use crate::dawg::{Dawg, MAX_WORD_LEN, ROOT};
use crate::error::{Error, Result};
use crate::mv::Move;
use crate::rack::Rack;
use crate::strategy::{LongestWins, MoveStrategy};

/// Byte value used in a pattern buffer position to mean "no constraint here". Any
/// byte outside `a..z` works; callers should prefer this named sentinel.
pub const PATTERN_ANY: u8 = 0;

fn is_unconstrained(b: u8) -> bool {
    !(b'a'..=b'z').contains(&b)
}

struct SearchContext<'a> {
    dawg: &'a Dawg,
    board: &'a Board,
    rack: Rack,
    pattern: [u8; MAX_WORD_LEN],
    scratch: [u8; MAX_WORD_LEN],
    offset: isize,
    blockflag_next: u8,
    blockflag_prev: u8,
    across: bool,
    anchor_index: isize,
    required_prefix_len: i32,
    required_suffix_len: i32,
    num_legal_moves: u32,
    best_move: Move,
    strategy: &'a mut dyn MoveStrategy,
}

impl<'a> SearchContext<'a> {
    fn checkbits(&self, index: usize) -> u32 {
        if self.across {
            self.board.checkbits_down(index)
        } else {
            self.board.checkbits_across(index)
        }
    }

    /// Overwrites `best_move` if the strategy prefers this candidate, and always
    /// counts the move as legal.
    fn accept_move(&mut self, s_len: usize, start_index: isize) {
        self.num_legal_moves += 1;
        let candidate = &self.scratch[..s_len];
        if self.strategy.prefers(candidate, &self.best_move.word) {
            let start = start_index as usize;
            let mut letters_used = Rack::new();
            let mut square_index = start_index;
            for &letter in candidate {
                let idx = square_index as usize;
                if !matches!(self.board.cell(idx), Cell::Letter(existing) if existing == letter) {
                    letters_used.push(letter);
                }
                square_index += self.offset;
            }
            self.best_move = Move {
                start,
                offset: self.offset,
                word: candidate.to_vec(),
                letters_used,
            };
        }
    }

    fn consider_word(&mut self, s_len: usize, square_index: isize, suffix_len: i32) {
        if self.required_suffix_len < 0 || suffix_len == self.required_suffix_len {
            let start_index = square_index - s_len as isize * self.offset;
            self.accept_move(s_len, start_index);
        }
    }

    fn build_suffix(&mut self, s_len: usize, node_index: u32, square_index: isize) {
        let idx = square_index as usize;

        let mut can_continue = (self.board.blockflags(idx) & self.blockflag_next) == 0;
        let suffix_len = ((square_index - self.anchor_index) / self.offset) as i32;
        if self.required_suffix_len >= 0 && suffix_len > self.required_suffix_len {
            can_continue = false;
        }

        match self.board.cell(idx) {
            Cell::Letter(existing) => {
                if let Some(child) = self.dawg.nodes().get(node_index).edges.find(existing) {
                    self.scratch[s_len] = existing;
                    if self.dawg.nodes().get(child).is_word {
                        self.consider_word(s_len + 1, square_index + self.offset, suffix_len + 1);
                    }
                    if can_continue {
                        self.build_suffix(s_len + 1, child, square_index + self.offset);
                    }
                }
            }
            Cell::Blank | Cell::Anchor => {
                let checkbits = self.checkbits(idx);
                let dawg = self.dawg;
                for edge in dawg.nodes().get(node_index).edges.iter().copied() {
                    if !(is_unconstrained(self.pattern[s_len]) || self.pattern[s_len] == edge.letter) {
                        continue;
                    }
                    let letter_bit = 1u32 << (edge.letter - b'a');
                    if (letter_bit & checkbits) == 0 {
                        continue;
                    }
                    if !self.rack.pop(edge.letter) {
                        continue;
                    }

                    self.scratch[s_len] = edge.letter;
                    if self.dawg.nodes().get(edge.child).is_word {
                        self.consider_word(s_len + 1, square_index + self.offset, suffix_len + 1);
                    }
                    if can_continue {
                        self.build_suffix(s_len + 1, edge.child, square_index + self.offset);
                    }

                    self.rack.push(edge.letter);
                }
            }
        }
    }

    fn build_prefix(&mut self, s_len: usize, node_index: u32, limit: i32) {
        if self.required_prefix_len < 0 || s_len as i32 == self.required_prefix_len {
            self.build_suffix(s_len, node_index, self.anchor_index);
        }

        if limit > 0 {
            let dawg = self.dawg;
            for edge in dawg.nodes().get(node_index).edges.iter().copied() {
                if !(is_unconstrained(self.pattern[s_len]) || self.pattern[s_len] == edge.letter) {
                    continue;
                }
                if !self.rack.pop(edge.letter) {
                    continue;
                }
                self.scratch[s_len] = edge.letter;
                self.build_prefix(s_len + 1, edge.child, limit - 1);
                self.rack.push(edge.letter);
            }
        }
    }

    /// If `num_preceding_letters > 0`, the prefix is already on the board: copies
    /// those letters and traverses the DAWG to the node they reach, then builds
    /// suffixes from there. Otherwise builds every possible prefix from the rack,
    /// up to `num_preceding_blanks` letters, before building suffixes from each.
    fn search_anchor(&mut self, num_preceding_blanks: i32, num_preceding_letters: i32) {
        if num_preceding_letters > 0 {
            let mut s_len = 0usize;
            let mut square_index = self.anchor_index - num_preceding_letters as isize * self.offset;
            let mut node_index = ROOT;
            while (s_len as i32) < num_preceding_letters {
                let letter = match self.board.cell(square_index as usize) {
                    Cell::Letter(l) => l,
                    _ => unreachable!("prefix cells must hold letters"),
                };
                self.scratch[s_len] = letter;
                match self.dawg.nodes().get(node_index).edges.find(letter) {
                    Some(next) => node_index = next,
                    None => return,
                }
                s_len += 1;
                square_index += self.offset;
            }
            self.build_suffix(s_len, node_index, self.anchor_index);
        } else {
            self.build_prefix(0, ROOT, num_preceding_blanks);
        }
    }

    fn search_line(&mut self, start_index: isize, end_index: isize) {
        let mut num_contiguous_blanks = 0i32;
        let mut num_contiguous_letters = 0i32;
        let mut index = start_index;
        while index < end_index {
            let idx = index as usize;
            if (self.board.blockflags(idx) & self.blockflag_prev) != 0 {
                num_contiguous_blanks = 0;
                num_contiguous_letters = 0;
            }

            match self.board.cell(idx) {
                Cell::Anchor => {
                    self.anchor_index = index;
                    self.search_anchor(num_contiguous_blanks, num_contiguous_letters);
                    num_contiguous_blanks = 0;
                    num_contiguous_letters = 0;
                }
                Cell::Blank => {
                    num_contiguous_blanks += 1;
                    num_contiguous_letters = 0;
                }
                Cell::Letter(_) => {
                    num_contiguous_blanks = 0;
                    num_contiguous_letters += 1;
                }
            }

            index += self.offset;
        }
    }
}

/// Enumerates every legal move across the whole board (every row for across moves,
/// every column for down moves), using the default `LongestWins` strategy. Returns
/// the number of legal moves considered and the single best move found (a left-
/// initialized, empty `Move` if `count == 0` — callers must not read it then).
pub fn search_board(dawg: &Dawg, board: &Board, rack: &Rack) -> (u32, Move) {
    let mut strategy = LongestWins;
    search_board_with_strategy(dawg, board, rack, &mut strategy)
}

/// Same as `search_board`, but with an explicit move-selection strategy (e.g.
/// `strategy::FavoriteLetters`).
pub fn search_board_with_strategy(
    dawg: &Dawg,
    board: &Board,
    rack: &Rack,
    strategy: &mut dyn MoveStrategy,
) -> (u32, Move) {
    let mut ctx = SearchContext {
        dawg,
        board,
        rack: *rack,
        pattern: [PATTERN_ANY; MAX_WORD_LEN],
        scratch: [0u8; MAX_WORD_LEN],
        offset: 0,
        blockflag_next: 0,
        blockflag_prev: 0,
        across: true,
        anchor_index: -1,
        required_prefix_len: -1,
        required_suffix_len: -1,
        num_legal_moves: 0,
        best_move: Move::default(),
        strategy,
    };

    // Across: walk every row of the full storage grid (border included — border
    // cells are always `Blank` and never become anchors, so the walk just resets
    // its contiguity counters there without ever finding a move past the sealed
    // seam).
    ctx.offset = board.offset(true);
    ctx.blockflag_next = BLOCKFLAG_NEXT_ACROSS;
    ctx.blockflag_prev = BLOCKFLAG_PREV_ACROSS;
    ctx.across = true;
    for y in 0..board.storage_height() {
        let start = board.storage_index(0, y) as isize;
        let end = start + board.storage_width() as isize * ctx.offset;
        ctx.search_line(start, end);
    }

    // Down: walk every column of the full storage grid.
    ctx.offset = board.offset(false);
    ctx.blockflag_next = BLOCKFLAG_NEXT_DOWN;
    ctx.blockflag_prev = BLOCKFLAG_PREV_DOWN;
    ctx.across = false;
    for x in 0..board.storage_width() {
        let start = board.storage_index(x, 0) as isize;
        let end = start + board.storage_height() as isize * ctx.offset;
        ctx.search_line(start, end);
    }

    (ctx.num_legal_moves, ctx.best_move)
}

/// Searches one segment of a row/column only, optionally constrained by a
/// fixed-length `pattern` (where each byte is either the required letter at that
/// offset, or `PATTERN_ANY`/any non-`a..z` byte for "unconstrained"). Returns an
/// error if `pattern` is longer than `length` rather than silently truncating.
pub fn search_segment(
    dawg: &Dawg,
    board: &Board,
    rack: &Rack,
    start_index: usize,
    pattern: Option<&[u8]>,
    length: usize,
    across: bool,
) -> Result<(u32, Move)> {
    let mut strategy = LongestWins;
    search_segment_with_strategy(dawg, board, rack, start_index, pattern, length, across, &mut strategy)
}

/// Same as `search_segment`, but with an explicit move-selection strategy.
#[allow(clippy::too_many_arguments)]
pub fn search_segment_with_strategy(
    dawg: &Dawg,
    board: &Board,
    rack: &Rack,
    start_index: usize,
    pattern: Option<&[u8]>,
    length: usize,
    across: bool,
    strategy: &mut dyn MoveStrategy,
) -> Result<(u32, Move)> {
    // `scratch`/`pattern` are fixed `[u8; MAX_WORD_LEN]` buffers (the engine's
    // documented max word length), but a segment's `length` is otherwise
    // unbounded per the spec; reject rather than let a long segment index past
    // them (§9's open question on oversized input is resolved toward explicit
    // rejection, same as the pattern-length case below).
    if length > MAX_WORD_LEN {
        return Err(Error::SegmentTooLong {
            length,
            max: MAX_WORD_LEN,
        });
    }
    if let Some(pattern) = pattern {
        if pattern.len() > length {
            return Err(Error::PatternTooLong {
                pattern_len: pattern.len(),
                length,
            });
        }
    }

    let offset = board.offset(across);
    let blockflag_next = if across { BLOCKFLAG_NEXT_ACROSS } else { BLOCKFLAG_NEXT_DOWN };
    let blockflag_prev = if across { BLOCKFLAG_PREV_ACROSS } else { BLOCKFLAG_PREV_DOWN };

    // Scan the segment, noting letters/anchors and shortening the segment if a
    // blocked seam is hit before `length` cells have been examined.
    let mut segment_num_letters = 0usize;
    let mut first_anchor_index: Option<isize> = None;
    let mut actual_length = length;
    let mut index = start_index as isize;
    for segment_offset in 0..length {
        let idx = index as usize;
        match board.cell(idx) {
            Cell::Blank => {}
            Cell::Anchor => {
                if first_anchor_index.is_none() {
                    first_anchor_index = Some(index);
                }
            }
            Cell::Letter(_) => segment_num_letters += 1,
        }
        if (board.blockflags(idx) & blockflag_next) != 0 {
            actual_length = segment_offset + 1;
            break;
        }
        index += offset;
    }
    let length = actual_length;

    if segment_num_letters == length {
        return Ok((0, Move::default()));
    }

    let mut ctx = SearchContext {
        dawg,
        board,
        rack: *rack,
        pattern: [PATTERN_ANY; MAX_WORD_LEN],
        scratch: [0u8; MAX_WORD_LEN],
        offset,
        blockflag_next,
        blockflag_prev,
        across,
        anchor_index: -1,
        required_prefix_len: -1,
        required_suffix_len: -1,
        num_legal_moves: 0,
        best_move: Move::default(),
        strategy,
    };

    if let Some(anchor_index) = first_anchor_index {
        // Letters immediately before the anchor (limited by a PREV block) form a
        // fixed prefix already on the board.
        let mut num_preceding_letters = 0i32;
        {
            let mut idx = anchor_index;
            loop {
                if (board.blockflags(idx as usize) & ctx.blockflag_prev) != 0 {
                    break;
                }
                let prev_index = idx - offset;
                match board.cell(prev_index as usize) {
                    Cell::Blank | Cell::Anchor => break,
                    Cell::Letter(_) => {
                        num_preceding_letters += 1;
                        idx = prev_index;
                    }
                }
            }
        }

        // The suffix must reach at least to the end of the segment; if the segment
        // ends mid-word (a contiguous run of letters/anchors abutting the far end),
        // extend the required suffix length to cover them too.
        let end_index = start_index as isize + offset * length as isize;
        let mut required_suffix_len = (end_index - anchor_index) / offset;

        let last_in_segment = end_index - offset;
        let last_is_letter_or_anchor = !matches!(board.cell(last_in_segment as usize), Cell::Blank);
        let last_can_continue = (board.blockflags(last_in_segment as usize) & blockflag_next) == 0;
        if last_is_letter_or_anchor && last_can_continue {
            let mut idx = end_index;
            loop {
                match board.cell(idx as usize) {
                    Cell::Blank | Cell::Anchor => break,
                    Cell::Letter(_) => {
                        required_suffix_len += 1;
                        if (board.blockflags(idx as usize) & blockflag_next) != 0 {
                            break;
                        }
                        idx += offset;
                    }
                }
            }
        }

        ctx.anchor_index = anchor_index;
        ctx.required_prefix_len = if num_preceding_letters > 0 {
            0
        } else {
            ((anchor_index - start_index as isize) / offset) as i32
        };
        ctx.required_suffix_len = required_suffix_len as i32;
        if let Some(pattern) = pattern {
            let dest_offset = num_preceding_letters as usize;
            ctx.pattern[dest_offset..dest_offset + pattern.len()].copy_from_slice(pattern);
        }
        ctx.search_anchor(ctx.required_prefix_len, num_preceding_letters);
        return Ok((ctx.num_legal_moves, ctx.best_move));
    }

    // Entirely blank segment, no anchors: treat the start square itself as the
    // anchor, with a zero-length prefix and a suffix spanning the whole segment.
    ctx.anchor_index = start_index as isize;
    ctx.required_suffix_len = length as i32;
    if let Some(pattern) = pattern {
        ctx.pattern[..pattern.len()].copy_from_slice(pattern);
    }
    ctx.search_anchor(0, 0);
    Ok((ctx.num_legal_moves, ctx.best_move))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dawgbuilder::Builder;

    fn build_dawg(words: &[&str]) -> Dawg {
        let mut builder = Builder::new();
        for w in words {
            builder.add(w.as_bytes());
        }
        builder.finalize();
        builder.publish()
    }

    #[test]
    fn empty_board_has_no_moves() {
        let dawg = build_dawg(&["cat", "cats"]);
        let board = Board::init(15, 15);
        let rack = Rack::from_letters(*b"cats");
        let (count, mv) = search_board(&dawg, &board, &rack);
        assert_eq!(count, 0);
        assert!(mv.is_empty());
    }

    #[test]
    fn finds_a_move_crossing_a_seeded_word() {
        let dawg = build_dawg(&[
            "ah", "an", "and", "ant", "at", "cat", "cats", "has", "hat", "hats", "tan",
        ]);
        let mut board = Board::init(15, 15);
        let start = board.index(4, 4);
        board.write(&dawg, start, true, b"cat").unwrap();

        let rack = Rack::from_letters(*b"hstans");
        let (count, mv) = search_board(&dawg, &board, &rack);
        assert!(count >= 1, "expected at least one legal move, found {count}");
        assert!(!mv.is_empty());
        assert!(dawg.contains(&mv.word));
    }

    #[test]
    fn segment_search_with_pattern_honors_fixed_letter() {
        let dawg = build_dawg(&["bed", "bee", "bet", "led", "lee", "let", "red", "ten"]);
        let board = Board::init(10, 10);
        let rack = Rack::from_letters(*b"bedlrtn");

        let start = board.index(1, 1);
        let mut pattern = [PATTERN_ANY; 3];
        pattern[2] = b'd';
        let (count, mv) = search_segment(&dawg, &board, &rack, start, Some(&pattern), 3, true).unwrap();
        if count > 0 {
            assert_eq!(mv.word[2], b'd');
        }
    }

    #[test]
    fn segment_search_rejects_oversized_pattern() {
        let dawg = build_dawg(&["cat"]);
        let board = Board::init(10, 10);
        let rack = Rack::from_letters(*b"cat");
        let start = board.index(1, 1);
        let pattern = [b'c', b'a', b't', b's'];
        let result = search_segment(&dawg, &board, &rack, start, Some(&pattern), 3, true);
        assert!(matches!(result, Err(Error::PatternTooLong { .. })));
    }

    #[test]
    fn all_blank_segment_with_no_rack_letters_finds_nothing() {
        let dawg = build_dawg(&["cat"]);
        let board = Board::init(10, 10);
        let rack = Rack::new();
        let start = board.index(1, 1);
        let (count, mv) = search_segment(&dawg, &board, &rack, start, None, 3, true).unwrap();
        assert_eq!(count, 0);
        assert!(mv.is_empty());
    }
}
