use crossword_core::numbering::number_placements;
use crossword_core::search::find_layout;
use crossword_core::{validate, GeneratorConfig, Grid, Position};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};

fn search_config(min_words: usize) -> GeneratorConfig {
    GeneratorConfig {
        min_words,
        max_nodes: 5_000,
        ..GeneratorConfig::default()
    }
}

fn layout(words: &[String], min_words: usize, seed: u64) -> Option<Grid> {
    let mut rng = StdRng::seed_from_u64(seed);
    find_layout(words, &search_config(min_words), &mut rng)
}

fn word_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]{3,6}", 3..7)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn crossing_letters_agree(words in word_list(), min_words in 1usize..=3, seed in any::<u64>()) {
        if let Some(grid) = layout(&words, min_words, seed) {
            let mut letters: HashMap<Position, char> = HashMap::new();
            for placement in grid.placements() {
                for (pos, letter) in placement.letters() {
                    let seen = *letters.entry(pos).or_insert(letter);
                    prop_assert_eq!(seen, letter);
                    prop_assert_eq!(grid.get(pos.row, pos.col), Some(letter));
                }
            }
        }
    }

    #[test]
    fn every_later_word_crosses_an_earlier_one(words in word_list(), min_words in 1usize..=3, seed in any::<u64>()) {
        if let Some(grid) = layout(&words, min_words, seed) {
            let placements = grid.placements();
            for (i, placement) in placements.iter().enumerate().skip(1) {
                let earlier: HashSet<Position> = placements[..i]
                    .iter()
                    .flat_map(|p| p.cells())
                    .collect();
                prop_assert!(
                    placement.cells().any(|pos| earlier.contains(&pos)),
                    "{} floats", placement.word
                );
            }
        }
    }

    #[test]
    fn found_layouts_validate(words in word_list(), min_words in 1usize..=3, seed in any::<u64>()) {
        if let Some(grid) = layout(&words, min_words, seed) {
            prop_assert!(grid.placement_count() >= min_words);
            let trimmed = grid.trim().expect("non-empty layout");
            let report = validate(&trimmed, min_words);
            prop_assert!(report.valid, "{:?}", report.errors);
        }
    }

    #[test]
    fn numbering_is_stable(words in word_list(), seed in any::<u64>()) {
        if let Some(grid) = layout(&words, 1, seed) {
            let trimmed = grid.trim().expect("non-empty layout");
            let first: Vec<u32> = number_placements(&trimmed.placements).iter().map(|n| n.num).collect();
            let second: Vec<u32> = number_placements(&trimmed.placements).iter().map(|n| n.num).collect();
            prop_assert_eq!(&first, &second);

            // Numbers start at 1 and never skip
            let distinct: HashSet<u32> = first.iter().copied().collect();
            let max = first.iter().copied().max().unwrap_or(0);
            prop_assert_eq!(distinct.len() as u32, max);
        }
    }

    #[test]
    fn trimming_twice_changes_nothing(words in word_list(), seed in any::<u64>()) {
        if let Some(grid) = layout(&words, 1, seed) {
            let once = grid.trim().expect("non-empty layout");
            let twice = once.trim().expect("non-empty layout");
            prop_assert_eq!(once, twice);
        }
    }
}

#[test]
fn cat_car_ant_scenario() {
    let words: Vec<String> = ["cat", "car", "ant"].iter().map(|w| w.to_string()).collect();
    let grid = layout(&words, 2, 2024).expect("layout");
    assert!(grid.placement_count() >= 2);

    let trimmed = grid.trim().unwrap();
    let report = validate(&trimmed, 2);
    assert!(report.valid, "{:?}", report.errors);
}

#[test]
fn letters_without_overlap_never_lay_out() {
    let words: Vec<String> = ["zzz", "qqq"].iter().map(|w| w.to_string()).collect();
    for seed in 0..5 {
        assert!(layout(&words, 2, seed).is_none());
    }
}
