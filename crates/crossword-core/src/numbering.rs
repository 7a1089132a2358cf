//! Crossword numbering and assembly of the final [`PuzzleRecord`].
//!
//! Start cells are numbered in reading order. An across and a down entry
//! that begin on the same cell share one number.

use crate::clues::{resolve, ClueLookup};
use crate::grid::{Direction, Placement, Position, TrimmedGrid};
use crate::puzzle::{ClueEntry, Clues, PuzzleRecord};
use std::collections::HashMap;

/// A placement paired with its clue number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numbered<'a> {
    pub num: u32,
    pub placement: &'a Placement,
}

/// Placements in reading order. Ties keep their input order.
pub fn reading_order(placements: &[Placement]) -> Vec<&Placement> {
    let mut sorted: Vec<&Placement> = placements.iter().collect();
    sorted.sort_by_key(|p| (p.row, p.col));
    sorted
}

/// Number every placement by its start cell.
pub fn number_placements(placements: &[Placement]) -> Vec<Numbered<'_>> {
    let mut numbers: HashMap<Position, u32> = HashMap::new();
    let mut next = 1;

    reading_order(placements)
        .into_iter()
        .map(|placement| {
            let num = *numbers.entry(placement.start()).or_insert_with(|| {
                let n = next;
                next += 1;
                n
            });
            Numbered { num, placement }
        })
        .collect()
}

/// Build the across and down clue lists.
pub fn build_clues(placements: &[Placement], lookup: &dyn ClueLookup) -> Clues {
    let mut clues = Clues::default();
    for Numbered { num, placement } in number_placements(placements) {
        let clue = resolve(lookup, &placement.word.to_ascii_lowercase());
        let entry = ClueEntry {
            num,
            row: placement.row,
            col: placement.col,
            text: clue.en,
            text_zh: clue.zh,
        };
        match placement.direction {
            Direction::Across => clues.across.push(entry),
            Direction::Down => clues.down.push(entry),
        }
    }
    clues
}

/// Assemble the puzzle record for a validated grid.
pub fn format_puzzle(
    id: String,
    title: &str,
    grid: &TrimmedGrid,
    lookup: &dyn ClueLookup,
    prefilled: Vec<[usize; 2]>,
) -> PuzzleRecord {
    PuzzleRecord {
        id,
        title: title.to_string(),
        solution: grid.solution.clone(),
        prefilled,
        clues: build_clues(&grid.placements, lookup),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clues::{Clue, ClueMap};
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Placement> {
        vec![
            Placement::new("ant", 0, 2, Direction::Down),
            Placement::new("cat", 0, 0, Direction::Across),
            Placement::new("car", 0, 0, Direction::Down),
            Placement::new("tar", 2, 0, Direction::Across),
        ]
    }

    #[test]
    fn test_shared_start_shares_number() {
        let placements = sample();
        let numbered: Vec<(u32, &str)> = number_placements(&placements)
            .iter()
            .map(|n| (n.num, n.placement.word.as_str()))
            .collect();
        assert_eq!(
            numbered,
            vec![(1, "CAT"), (1, "CAR"), (2, "ANT"), (3, "TAR")]
        );
    }

    #[test]
    fn test_numbering_is_deterministic() {
        let placements = sample();
        assert_eq!(number_placements(&placements), number_placements(&placements));
    }

    #[test]
    fn test_build_clues_partitions_and_falls_back() {
        let mut lookup = ClueMap::new();
        lookup.insert("cat", Clue::new("Purring pet", "猫"));

        let clues = build_clues(&sample(), &lookup);
        assert_eq!(clues.len(), 4);
        assert_eq!(
            clues.across,
            vec![
                ClueEntry {
                    num: 1,
                    row: 0,
                    col: 0,
                    text: "Purring pet".to_string(),
                    text_zh: "猫".to_string(),
                },
                ClueEntry {
                    num: 3,
                    row: 2,
                    col: 0,
                    text: "Word: TAR".to_string(),
                    text_zh: "单词：TAR".to_string(),
                },
            ]
        );
        let down: Vec<u32> = clues.down.iter().map(|e| e.num).collect();
        assert_eq!(down, vec![1, 2]);
        assert_eq!(clues.down[1].text, "Word: ANT");
    }

    #[test]
    fn test_format_puzzle() {
        let solution = vec![
            vec![Some('C'), Some('A'), Some('T')],
            vec![Some('A'), None, None],
            vec![Some('R'), None, None],
        ];
        let grid = TrimmedGrid::from_parts(
            solution.clone(),
            vec![
                Placement::new("cat", 0, 0, Direction::Across),
                Placement::new("car", 0, 0, Direction::Down),
            ],
        );
        let record = format_puzzle(
            "gen_0_aaaaa".to_string(),
            "Pets",
            &grid,
            &ClueMap::builtin(),
            vec![[0, 0]],
        );
        assert_eq!(record.title, "Pets");
        assert_eq!(record.solution, solution);
        assert_eq!(record.clues.across[0].text, "Furry pet that purrs");
        assert_eq!(record.clues.down[0].text, "Road vehicle");
        assert_eq!(record.prefilled, vec![[0, 0]]);
    }
}
