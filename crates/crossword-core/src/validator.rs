//! Certification of a trimmed layout before it becomes a puzzle.

use crate::grid::{Position, TrimmedGrid};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Outcome of [`validate`]. Every violated check contributes a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Run every check against `grid`, collecting all failures.
pub fn validate(grid: &TrimmedGrid, min_words: usize) -> ValidationReport {
    let mut errors = Vec::new();
    errors.extend(check_crossings(grid));
    errors.extend(check_orphans(grid));
    errors.extend(check_connectivity(grid));
    if grid.placements.len() < min_words {
        errors.push(format!(
            "Only {} words, minimum is {}",
            grid.placements.len(),
            min_words
        ));
    }
    ValidationReport::from_errors(errors)
}

/// Each placement's letters must match the solution it claims to cover.
fn check_crossings(grid: &TrimmedGrid) -> Vec<String> {
    let mut errors = Vec::new();
    for placement in &grid.placements {
        for (pos, letter) in placement.letters() {
            if grid.get(pos.row, pos.col) != Some(letter) {
                errors.push(format!(
                    "{} {} disagrees with grid at ({},{})",
                    placement.word, placement.direction, pos.row, pos.col
                ));
                break;
            }
        }
    }
    errors
}

/// Filled cells not covered by any placement.
fn check_orphans(grid: &TrimmedGrid) -> Vec<String> {
    let covered: HashSet<Position> = grid
        .placements
        .iter()
        .flat_map(|p| p.cells())
        .collect();

    grid.filled_cells()
        .into_iter()
        .filter(|pos| !covered.contains(pos))
        .map(|pos| format!("Orphan letter at ({},{})", pos.row, pos.col))
        .collect()
}

/// Breadth-first flood fill from the first filled cell.
fn check_connectivity(grid: &TrimmedGrid) -> Option<String> {
    let filled = grid.filled_cells();
    let start = *filled.first()?;

    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for next in neighbours(pos, grid.rows, grid.cols) {
            if grid.get(next.row, next.col).is_some() && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    (seen.len() != filled.len()).then(|| "Grid has disconnected cells".to_string())
}

fn neighbours(pos: Position, rows: usize, cols: usize) -> impl Iterator<Item = Position> {
    let Position { row, col } = pos;
    [
        row.checked_sub(1).map(|r| Position::new(r, col)),
        (row + 1 < rows).then(|| Position::new(row + 1, col)),
        col.checked_sub(1).map(|c| Position::new(row, c)),
        (col + 1 < cols).then(|| Position::new(row, col + 1)),
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Direction, Grid, Placement};

    fn row(s: &str) -> Vec<Option<char>> {
        s.chars().map(|c| if c == '.' { None } else { Some(c) }).collect()
    }

    #[test]
    fn test_valid_layout() {
        let mut grid = Grid::new(5);
        grid.place("cat", 0, 0, Direction::Across);
        grid.place("car", 0, 0, Direction::Down);
        grid.place("ant", 0, 1, Direction::Down);

        let report = validate(&grid.trim().unwrap(), 3);
        assert!(report.valid, "{:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_orphan_letter() {
        let trimmed = TrimmedGrid::from_parts(
            vec![row("CAT"), row("..X")],
            vec![Placement::new("cat", 0, 0, Direction::Across)],
        );
        let report = validate(&trimmed, 1);
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["Orphan letter at (1,2)".to_string()]);
    }

    #[test]
    fn test_disconnected_grid() {
        let trimmed = TrimmedGrid::from_parts(
            vec![row("CAT"), row("..."), row("DOG")],
            vec![
                Placement::new("cat", 0, 0, Direction::Across),
                Placement::new("dog", 2, 0, Direction::Across),
            ],
        );
        let report = validate(&trimmed, 2);
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["Grid has disconnected cells".to_string()]);
    }

    #[test]
    fn test_collects_all_errors() {
        let trimmed = TrimmedGrid::from_parts(
            vec![row("CAT"), row("..."), row("..X")],
            vec![Placement::new("cat", 0, 0, Direction::Across)],
        );
        let report = validate(&trimmed, 3);
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "Orphan letter at (2,2)".to_string(),
                "Grid has disconnected cells".to_string(),
                "Only 1 words, minimum is 3".to_string(),
            ]
        );
    }

    #[test]
    fn test_mismatched_placement() {
        let trimmed = TrimmedGrid::from_parts(
            vec![row("CAT")],
            vec![Placement::new("cot", 0, 0, Direction::Across)],
        );
        let report = validate(&trimmed, 1);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("COT"));
    }
}
