//! Which solved cells are shown before the player starts.

use crate::generator::Difficulty;
use crate::grid::TrimmedGrid;
use crate::numbering::reading_order;
use rand::seq::SliceRandom;
use rand::Rng;

/// Share of filled cells revealed on easy
pub const EASY_REVEAL_RATIO: f64 = 0.3;

/// Cells to reveal for `difficulty`, as `[row, col]` pairs.
///
/// - easy: a random 30% of filled cells, rounded down
/// - intermediate: the first cell of every entry, in reading order
/// - advanced: nothing
pub fn select_prefilled<R: Rng + ?Sized>(
    grid: &TrimmedGrid,
    difficulty: Difficulty,
    rng: &mut R,
) -> Vec<[usize; 2]> {
    match difficulty {
        Difficulty::Easy => random_cells(grid, EASY_REVEAL_RATIO, rng),
        Difficulty::Intermediate => start_cells(grid),
        Difficulty::Advanced => Vec::new(),
    }
}

fn random_cells<R: Rng + ?Sized>(grid: &TrimmedGrid, ratio: f64, rng: &mut R) -> Vec<[usize; 2]> {
    let cells = grid.filled_cells();
    let count = (cells.len() as f64 * ratio).floor() as usize;
    cells
        .choose_multiple(rng, count)
        .map(|p| [p.row, p.col])
        .collect()
}

fn start_cells(grid: &TrimmedGrid) -> Vec<[usize; 2]> {
    reading_order(&grid.placements)
        .into_iter()
        .map(|p| [p.row, p.col])
        .collect()
}
