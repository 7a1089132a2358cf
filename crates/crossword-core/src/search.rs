//! Backtracking placement search.
//!
//! Words are tried longest first. Each word is either committed at one of
//! its feasible positions (explored in random order) or, once the grid
//! already holds `min_words` placements, skipped. The first complete pass
//! over the word list wins; there is no ranking between layouts.

use crate::generator::GeneratorConfig;
use crate::grid::Grid;
use log::debug;
use rand::Rng;
use std::ops::RangeInclusive;

/// Grid sizes tried for a word list whose longest word has `longest` letters.
pub fn size_range(longest: usize, config: &GeneratorConfig) -> RangeInclusive<usize> {
    let min = config.min_grid_size.max(longest);
    let max = config
        .max_grid_size
        .min(config.target_size.filter(|&s| s > 0).unwrap_or(longest + 3));
    min..=max
}

/// Search every grid size in range, returning the first layout found.
///
/// Each size starts from an empty grid. `None` means no size produced a
/// layout that meets the word-count floor within the node budget.
pub fn find_layout<R: Rng + ?Sized>(
    words: &[String],
    config: &GeneratorConfig,
    rng: &mut R,
) -> Option<Grid> {
    let mut sorted: Vec<&str> = words.iter().map(String::as_str).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    let longest = sorted.first()?.len();

    for size in size_range(longest, config) {
        let mut search = PlacementSearch::new(&sorted, config.min_words, config.max_nodes, rng);
        let mut grid = Grid::new(size);
        if search.backtrack(&mut grid, 0) {
            debug!(
                "size {}: placed {}/{} words after {} nodes",
                size,
                grid.placement_count(),
                sorted.len(),
                search.nodes
            );
            return Some(grid);
        }
        debug!(
            "size {}: no layout after {} nodes{}",
            size,
            search.nodes,
            if search.exhausted { " (budget spent)" } else { "" }
        );
    }
    None
}

/// State for one search over one grid size
struct PlacementSearch<'a, R: Rng + ?Sized> {
    words: &'a [&'a str],
    min_words: usize,
    max_nodes: usize,
    nodes: usize,
    exhausted: bool,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> PlacementSearch<'a, R> {
    fn new(words: &'a [&'a str], min_words: usize, max_nodes: usize, rng: &'a mut R) -> Self {
        Self {
            words,
            min_words,
            max_nodes,
            nodes: 0,
            exhausted: false,
            rng,
        }
    }

    /// Try to place `words[index..]`. On success the layout is left in `grid`;
    /// on failure `grid` is exactly as it was on entry.
    fn backtrack(&mut self, grid: &mut Grid, index: usize) -> bool {
        let Some(&word) = self.words.get(index) else {
            return true;
        };
        if self.nodes >= self.max_nodes {
            self.exhausted = true;
            return false;
        }
        self.nodes += 1;

        for candidate in grid.valid_placements(word, &mut *self.rng) {
            grid.place(word, candidate.row, candidate.col, candidate.direction);
            if self.backtrack(grid, index + 1) {
                return true;
            }
            grid.undo_last();
            if self.exhausted {
                return false;
            }
        }

        self.skip(grid, index)
    }

    /// Continue past `words[index]` without placing it, allowed only once
    /// the grid already meets the word-count floor.
    fn skip(&mut self, grid: &mut Grid, index: usize) -> bool {
        if self.exhausted || grid.placement_count() < self.min_words {
            return false;
        }
        self.backtrack(grid, index + 1)
    }
}
