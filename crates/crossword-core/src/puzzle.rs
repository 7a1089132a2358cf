use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One numbered clue in the across or down list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueEntry {
    pub num: u32,
    pub row: usize,
    pub col: usize,
    pub text: String,
    #[serde(rename = "textZh")]
    pub text_zh: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clues {
    pub across: Vec<ClueEntry>,
    pub down: Vec<ClueEntry>,
}

impl Clues {
    pub fn len(&self) -> usize {
        self.across.len() + self.down.len()
    }

    pub fn is_empty(&self) -> bool {
        self.across.is_empty() && self.down.is_empty()
    }
}

/// The finished puzzle handed to the play UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub id: String,
    pub title: String,
    /// Rows of uppercase letters, `None` for black cells
    pub solution: Vec<Vec<Option<char>>>,
    /// `[row, col]` pairs revealed at the start
    pub prefilled: Vec<[usize; 2]>,
    pub clues: Clues,
}

impl PuzzleRecord {
    pub fn rows(&self) -> usize {
        self.solution.len()
    }

    pub fn cols(&self) -> usize {
        self.solution.first().map_or(0, Vec::len)
    }
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `gen_<unix millis>_<5 base36 chars>`
pub fn puzzle_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix: String = (0..5)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("gen_{}_{}", millis, suffix)
}
