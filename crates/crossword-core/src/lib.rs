//! Crossword grid constructor.
//!
//! Given candidate words, finds a connected arrangement of intersecting
//! placements, trims it to its bounding box, numbers the clues, and picks
//! which cells to reveal up front.
//!
//! ```no_run
//! use crossword_core::{ClueMap, Generator, GeneratorConfig, WordSource};
//!
//! let words = vec!["cat".to_string(), "car".to_string(), "ant".to_string()];
//! let mut generator = Generator::new(GeneratorConfig::intermediate());
//! let puzzle = generator
//!     .generate(&WordSource::Fixed(words), "Pets", &ClueMap::builtin())
//!     .expect("puzzle");
//! println!("{}", serde_json::to_string_pretty(&puzzle).unwrap());
//! ```

pub mod clues;
pub mod error;
pub mod generator;
pub mod grid;
pub mod numbering;
pub mod prefill;
pub mod puzzle;
pub mod search;
pub mod validator;
pub mod wordlist;

pub use clues::{Clue, ClueLookup, ClueMap};
pub use error::{GenerateError, Result};
pub use generator::{Difficulty, Generator, GeneratorConfig, Layout, UnknownDifficulty, WordSource};
pub use grid::{Candidate, Direction, Grid, Placement, Position, TrimmedGrid};
pub use puzzle::{ClueEntry, Clues, PuzzleRecord};
pub use validator::{validate, ValidationReport};
pub use wordlist::WordList;
