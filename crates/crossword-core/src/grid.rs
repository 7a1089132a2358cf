//! Square letter grid and the placements committed to it.
//!
//! Cells hold uppercase ASCII letters. A cell written by two placements
//! must carry the same letter for both; [`Grid::can_place`] enforces this
//! before [`Grid::place`] is allowed to write.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Orientation of a placed word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right along a row
    Across,
    /// Top to bottom along a column
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    /// Cell reached after stepping `offset` letters from `(row, col)`.
    pub fn offset(self, row: usize, col: usize, offset: usize) -> Position {
        match self {
            Direction::Across => Position::new(row, col + offset),
            Direction::Down => Position::new(row + offset, col),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A word committed to the grid. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// The word, uppercased
    pub word: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl Placement {
    pub fn new(word: &str, row: usize, col: usize, direction: Direction) -> Self {
        Self {
            word: word.to_ascii_uppercase(),
            row,
            col,
            direction,
        }
    }

    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    pub fn start(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Every cell this placement occupies, first letter first.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len()).map(move |i| self.direction.offset(self.row, self.col, i))
    }

    /// Cells paired with the letter written there.
    pub fn letters(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.cells().zip(self.word.chars())
    }

    pub fn covers(&self, pos: Position) -> bool {
        match self.direction {
            Direction::Across => {
                pos.row == self.row && pos.col >= self.col && pos.col < self.col + self.len()
            }
            Direction::Down => {
                pos.col == self.col && pos.row >= self.row && pos.row < self.row + self.len()
            }
        }
    }
}

/// A feasible position for a word, as returned by [`Grid::valid_placements`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

/// N×N letter grid under construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<u8>>,
    placements: Vec<Placement>,
    /// Cells newly filled by each placement, parallel to `placements`
    undo_log: Vec<Vec<usize>>,
}

impl Grid {
    /// Create an empty grid of `size` × `size` cells
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            placements: Vec::new(),
            undo_log: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// True when nothing has been placed yet
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Letter at a cell, or `None` for an empty or out-of-range cell
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[self.index(row, col)].map(char::from)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn fits(&self, len: usize, row: usize, col: usize, direction: Direction) -> bool {
        if len == 0 || row >= self.size || col >= self.size {
            return false;
        }
        match direction {
            Direction::Across => col + len <= self.size,
            Direction::Down => row + len <= self.size,
        }
    }

    /// Whether `word` may be written starting at `(row, col)`.
    ///
    /// The first word only has to fit. Every later word must cross at
    /// least one existing letter and agree with every letter it touches.
    /// Words with non-ASCII characters never fit.
    pub fn can_place(&self, word: &str, row: usize, col: usize, direction: Direction) -> bool {
        if !word.is_ascii() {
            return false;
        }
        let bytes = word.as_bytes();
        if !self.fits(bytes.len(), row, col, direction) {
            return false;
        }
        if self.placements.is_empty() {
            return true;
        }

        let mut intersects = false;
        for (i, &letter) in bytes.iter().enumerate() {
            let pos = direction.offset(row, col, i);
            if let Some(existing) = self.cells[self.index(pos.row, pos.col)] {
                if existing != letter.to_ascii_uppercase() {
                    return false;
                }
                intersects = true;
            }
        }
        intersects
    }

    /// Write `word` into the grid and record the placement.
    ///
    /// Callers check [`Grid::can_place`] first.
    pub fn place(&mut self, word: &str, row: usize, col: usize, direction: Direction) {
        debug_assert!(self.fits(word.len(), row, col, direction));

        let placement = Placement::new(word, row, col, direction);
        let mut filled = Vec::new();
        for (i, letter) in placement.word.bytes().enumerate() {
            let pos = direction.offset(row, col, i);
            let idx = self.index(pos.row, pos.col);
            match self.cells[idx] {
                None => {
                    self.cells[idx] = Some(letter);
                    filled.push(idx);
                }
                Some(existing) => debug_assert_eq!(existing, letter, "crossing mismatch at {:?}", pos),
            }
        }
        self.placements.push(placement);
        self.undo_log.push(filled);
    }

    /// Reverse the most recent [`Grid::place`], clearing exactly the
    /// cells it filled.
    pub fn undo_last(&mut self) -> Option<Placement> {
        let filled = self.undo_log.pop()?;
        for idx in filled {
            self.cells[idx] = None;
        }
        self.placements.pop()
    }

    /// Every feasible position for `word`, in reading order with Across
    /// before Down at each cell.
    pub fn candidate_placements(&self, word: &str) -> Vec<Candidate> {
        let mut out = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                for direction in Direction::ALL {
                    if self.can_place(word, row, col, direction) {
                        out.push(Candidate { row, col, direction });
                    }
                }
            }
        }
        out
    }

    /// Feasible positions for `word` in uniformly shuffled order.
    pub fn valid_placements<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> Vec<Candidate> {
        let mut candidates = self.candidate_placements(word);
        candidates.shuffle(rng);
        candidates
    }

    /// Reduce to the bounding box of filled cells.
    ///
    /// Returns `None` when the grid holds no letters.
    pub fn trim(&self) -> Option<TrimmedGrid> {
        let bounds = BoundingBox::of(self.size, self.size, |r, c| self.get(r, c).is_some())?;

        let solution = bounds.extract(|r, c| self.get(r, c));
        let placements = self
            .placements
            .iter()
            .map(|p| bounds.remap(p))
            .collect();

        Some(TrimmedGrid::from_parts(solution, placements))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            let line: Vec<String> = (0..self.size)
                .map(|col| self.get(row, col).unwrap_or('.').to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct BoundingBox {
    min_row: usize,
    max_row: usize,
    min_col: usize,
    max_col: usize,
}

impl BoundingBox {
    fn of(rows: usize, cols: usize, filled: impl Fn(usize, usize) -> bool) -> Option<Self> {
        let mut bounds: Option<Self> = None;
        for row in 0..rows {
            for col in 0..cols {
                if !filled(row, col) {
                    continue;
                }
                let b = bounds.get_or_insert(Self {
                    min_row: row,
                    max_row: row,
                    min_col: col,
                    max_col: col,
                });
                b.min_row = b.min_row.min(row);
                b.max_row = b.max_row.max(row);
                b.min_col = b.min_col.min(col);
                b.max_col = b.max_col.max(col);
            }
        }
        bounds
    }

    fn extract(&self, cell: impl Fn(usize, usize) -> Option<char>) -> Vec<Vec<Option<char>>> {
        (self.min_row..=self.max_row)
            .map(|r| (self.min_col..=self.max_col).map(|c| cell(r, c)).collect())
            .collect()
    }

    fn remap(&self, placement: &Placement) -> Placement {
        Placement {
            word: placement.word.clone(),
            row: placement.row - self.min_row,
            col: placement.col - self.min_col,
            direction: placement.direction,
        }
    }
}

/// A grid reduced to the minimal rectangle around its letters, with
/// placements shifted to match. Always derived, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimmedGrid {
    pub solution: Vec<Vec<Option<char>>>,
    pub placements: Vec<Placement>,
    pub rows: usize,
    pub cols: usize,
}

impl TrimmedGrid {
    pub fn from_parts(solution: Vec<Vec<Option<char>>>, placements: Vec<Placement>) -> Self {
        let rows = solution.len();
        let cols = solution.first().map_or(0, Vec::len);
        Self {
            solution,
            placements,
            rows,
            cols,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.solution.get(row)?.get(col).copied().flatten()
    }

    /// Positions of all filled cells in reading order
    pub fn filled_cells(&self) -> Vec<Position> {
        let mut out = Vec::new();
        for (r, row) in self.solution.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_some() {
                    out.push(Position::new(r, c));
                }
            }
        }
        out
    }

    pub fn filled_count(&self) -> usize {
        self.solution.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Trim again. A grid that is already tight comes back unchanged.
    pub fn trim(&self) -> Option<TrimmedGrid> {
        let bounds = BoundingBox::of(self.rows, self.cols, |r, c| self.get(r, c).is_some())?;
        let solution = bounds.extract(|r, c| self.get(r, c));
        let placements = self.placements.iter().map(|p| bounds.remap(p)).collect();
        Some(TrimmedGrid::from_parts(solution, placements))
    }
}

impl fmt::Display for TrimmedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.solution {
            let line: Vec<String> = row
                .iter()
                .map(|c| c.unwrap_or('.').to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_word_only_needs_to_fit() {
        let grid = Grid::new(5);
        assert!(grid.can_place("hello", 0, 0, Direction::Across));
        assert!(!grid.can_place("hello", 2, 3, Direction::Down));
        assert!(grid.can_place("hello", 0, 4, Direction::Down));
        assert!(!grid.can_place("hello", 0, 1, Direction::Across));
    }

    #[test]
    fn test_second_word_must_intersect() {
        let mut grid = Grid::new(5);
        grid.place("cat", 0, 0, Direction::Across);

        // Floating: no shared cell
        assert!(!grid.can_place("dog", 2, 0, Direction::Across));
        // Crosses the C
        assert!(grid.can_place("car", 0, 0, Direction::Down));
        // Crosses the A
        assert!(grid.can_place("ant", 0, 1, Direction::Down));
        // Collides with a mismatching letter
        assert!(!grid.can_place("dog", 0, 1, Direction::Down));
    }

    #[test]
    fn test_non_ascii_words_never_fit() {
        let mut grid = Grid::new(5);
        assert!(!grid.can_place("café", 0, 0, Direction::Across));

        grid.place("cat", 0, 0, Direction::Across);
        // 'é' would truncate to a byte that is not a letter at all
        assert!(!grid.can_place("éa", 0, 1, Direction::Down));
        assert!(!grid.can_place("añt", 0, 1, Direction::Down));
    }

    #[test]
    fn test_can_place_is_case_insensitive() {
        let mut grid = Grid::new(4);
        grid.place("CAT", 0, 0, Direction::Across);
        assert!(grid.can_place("tea", 0, 2, Direction::Down));
        assert!(grid.can_place("TEA", 0, 2, Direction::Down));
    }

    #[test]
    fn test_place_uppercases_and_records() {
        let mut grid = Grid::new(4);
        grid.place("cat", 1, 0, Direction::Across);
        assert_eq!(grid.get(1, 0), Some('C'));
        assert_eq!(grid.get(1, 2), Some('T'));
        assert_eq!(grid.get(0, 0), None);
        assert_eq!(grid.placements()[0].word, "CAT");
        assert_eq!(grid.placement_count(), 1);
    }

    #[test]
    fn test_undo_restores_shared_cells() {
        let mut grid = Grid::new(4);
        grid.place("cat", 0, 0, Direction::Across);
        let before = grid.clone();

        grid.place("car", 0, 0, Direction::Down);
        assert_eq!(grid.get(2, 0), Some('R'));

        let undone = grid.undo_last().unwrap();
        assert_eq!(undone.word, "CAR");
        // Shared C stays, the rest of CAR is gone
        assert_eq!(grid.get(0, 0), Some('C'));
        assert_eq!(grid.get(1, 0), None);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_valid_placements_same_set_as_candidates() {
        let mut grid = Grid::new(5);
        grid.place("crane", 2, 0, Direction::Across);

        let mut rng = StdRng::seed_from_u64(7);
        let mut shuffled = grid.valid_placements("near", &mut rng);
        let mut ordered = grid.candidate_placements("near");
        let key = |c: &Candidate| (c.row, c.col, c.direction);
        shuffled.sort_by_key(key);
        ordered.sort_by_key(key);
        assert_eq!(shuffled, ordered);
        assert!(!ordered.is_empty());
    }

    #[test]
    fn test_trim_empty_grid() {
        assert!(Grid::new(6).trim().is_none());
    }

    #[test]
    fn test_trim_remaps_placements() {
        let mut grid = Grid::new(8);
        grid.place("cat", 3, 2, Direction::Across);
        grid.place("ant", 3, 3, Direction::Down);

        let trimmed = grid.trim().unwrap();
        assert_eq!(trimmed.rows, 3);
        assert_eq!(trimmed.cols, 3);
        assert_eq!(trimmed.placements[0].start(), Position::new(0, 0));
        assert_eq!(trimmed.placements[1].start(), Position::new(0, 1));
        assert_eq!(trimmed.get(2, 1), Some('T'));
        assert_eq!(trimmed.get(2, 0), None);
        assert_eq!(trimmed.filled_count(), 5);
    }

    #[test]
    fn test_trim_is_idempotent() {
        let mut grid = Grid::new(7);
        grid.place("stone", 1, 1, Direction::Down);
        grid.place("tone", 2, 1, Direction::Across);

        let once = grid.trim().unwrap();
        let twice = once.trim().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_placement_covers() {
        let p = Placement::new("dog", 1, 2, Direction::Down);
        assert!(p.covers(Position::new(1, 2)));
        assert!(p.covers(Position::new(3, 2)));
        assert!(!p.covers(Position::new(4, 2)));
        assert!(!p.covers(Position::new(1, 3)));
    }
}
