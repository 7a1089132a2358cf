use crate::clues::ClueLookup;
use crate::error::{GenerateError, Result};
use crate::grid::TrimmedGrid;
use crate::numbering::format_puzzle;
use crate::prefill::select_prefilled;
use crate::puzzle::{puzzle_id, PuzzleRecord};
use crate::search::find_layout;
use crate::validator::validate;
use crate::wordlist::{normalize_words, WordList};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Difficulty level of a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Intermediate, Difficulty::Advanced]
    }

    /// Letter counts of words drawn for this level
    pub fn word_lengths(&self) -> RangeInclusive<usize> {
        match self {
            Difficulty::Easy => 3..=4,
            Difficulty::Intermediate => 4..=6,
            Difficulty::Advanced => 5..=8,
        }
    }

    /// Target number of words in the puzzle
    pub fn word_count(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Intermediate => 5,
            Difficulty::Advanced => 6,
        }
    }

    /// How clue text should read at this level
    pub fn clue_style(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Use simple, direct definitions that a child could understand.",
            Difficulty::Intermediate => "Use slightly clever clues with simple wordplay.",
            Difficulty::Advanced => "Use clever wordplay, puns, or cultural references.",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty {0:?}: use easy, intermediate, or advanced")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// Configuration for puzzle generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Drives word sampling and prefill
    pub difficulty: Difficulty,
    /// Smallest grid side tried
    pub min_grid_size: usize,
    /// Largest grid side tried
    pub max_grid_size: usize,
    /// Layouts with fewer placements are rejected
    pub min_words: usize,
    /// Search attempts before giving up
    pub max_attempts: usize,
    /// Recursive calls allowed per grid size
    pub max_nodes: usize,
    /// Requested grid side; defaults to longest word + 3
    pub target_size: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            min_grid_size: 3,
            max_grid_size: 10,
            min_words: 3,
            max_attempts: 50,
            max_nodes: 200_000,
            target_size: None,
        }
    }
}

impl GeneratorConfig {
    pub fn easy() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            max_nodes: 80_000,
            ..Self::default()
        }
    }

    pub fn intermediate() -> Self {
        Self {
            difficulty: Difficulty::Intermediate,
            ..Self::default()
        }
    }

    pub fn advanced() -> Self {
        Self {
            difficulty: Difficulty::Advanced,
            ..Self::default()
        }
    }

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::easy(),
            Difficulty::Intermediate => Self::intermediate(),
            Difficulty::Advanced => Self::advanced(),
        }
    }
}

/// Where candidate words come from
#[derive(Debug, Clone)]
pub enum WordSource<'a> {
    /// Exactly these words, never resampled
    Fixed(Vec<String>),
    /// Fresh draws from a word list on every attempt
    Sampled(&'a WordList),
}

/// A validated, trimmed layout awaiting clues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub grid: TrimmedGrid,
    /// Placed words, lowercase, in placement order
    pub words: Vec<String>,
    /// Attempt that produced this layout, starting at 1
    pub attempt: usize,
}

/// Crossword puzzle generator
pub struct Generator<R = StdRng> {
    config: GeneratorConfig,
    rng: R,
}

impl Generator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Generator with a fixed seed for reproducible output
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Search for a layout, retrying up to `max_attempts` times.
    ///
    /// Sampled sources draw a new word set after each failed attempt.
    pub fn layout(&mut self, source: &WordSource<'_>) -> Result<Layout> {
        let mut words = match source {
            WordSource::Fixed(words) => {
                let words = normalize_words(words)?;
                if words.len() < self.config.min_words {
                    return Err(GenerateError::NotEnoughWords {
                        found: words.len(),
                        required: self.config.min_words,
                    });
                }
                words
            }
            WordSource::Sampled(list) => self.sample(list),
        };

        for attempt in 1..=self.config.max_attempts {
            if words.len() >= self.config.min_words {
                debug!("attempt {}: words {}", attempt, words.join(", "));
                if let Some(grid) = find_layout(&words, &self.config, &mut self.rng) {
                    return self.certify(&grid, attempt);
                }
            } else {
                warn!(
                    "attempt {}: only {} words drawn, need {}",
                    attempt,
                    words.len(),
                    self.config.min_words
                );
            }

            if let WordSource::Sampled(list) = source {
                words = self.sample(list);
            }
        }

        Err(GenerateError::Infeasible {
            attempts: self.config.max_attempts,
        })
    }

    fn sample(&mut self, list: &WordList) -> Vec<String> {
        let difficulty = self.config.difficulty;
        list.sample(
            difficulty.word_lengths(),
            difficulty.word_count() + 2,
            &mut self.rng,
        )
    }

    fn certify(&self, grid: &crate::grid::Grid, attempt: usize) -> Result<Layout> {
        let trimmed = grid.trim().ok_or(GenerateError::EmptyGrid)?;
        info!(
            "attempt {}: {}x{} grid with {} words",
            attempt,
            trimmed.rows,
            trimmed.cols,
            trimmed.placements.len()
        );

        let report = validate(&trimmed, self.config.min_words);
        if !report.valid {
            warn!("validation failed: {:?}", report.errors);
            return Err(GenerateError::Validation(report.errors));
        }

        let words = trimmed
            .placements
            .iter()
            .map(|p| p.word.to_ascii_lowercase())
            .collect();
        Ok(Layout {
            grid: trimmed,
            words,
            attempt,
        })
    }

    /// Number clues, pick prefilled cells, and assemble the record.
    pub fn finish(&mut self, layout: &Layout, title: &str, clues: &dyn ClueLookup) -> PuzzleRecord {
        let prefilled = select_prefilled(&layout.grid, self.config.difficulty, &mut self.rng);
        let id = puzzle_id(&mut self.rng);
        format_puzzle(id, title, &layout.grid, clues, prefilled)
    }

    /// Layout and finish in one step, for callers with clues at hand.
    pub fn generate(
        &mut self,
        source: &WordSource<'_>,
        title: &str,
        clues: &dyn ClueLookup,
    ) -> Result<PuzzleRecord> {
        let layout = self.layout(source)?;
        Ok(self.finish(&layout, title, clues))
    }
}
