use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors surfaced by the generation pipeline.
///
/// Search failures are recoverable by retry; by the time one of these
/// reaches the caller every retry for the puzzle has been spent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("not enough words: found {found}, need at least {required}")]
    NotEnoughWords { found: usize, required: usize },

    #[error("invalid word {0:?}: words must be non-empty ASCII letters")]
    InvalidWord(String),

    #[error("no layout found after {attempts} attempt(s)")]
    Infeasible { attempts: usize },

    #[error("generated grid is empty")]
    EmptyGrid,

    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("word list error: {0}")]
    WordList(String),
}
