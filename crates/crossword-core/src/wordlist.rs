//! Candidate words: loading a word list and drawing samples from it.

use crate::error::{GenerateError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;
use std::path::Path;

pub const MIN_WORD_LEN: usize = 3;
pub const MAX_WORD_LEN: usize = 8;

/// Words bucketed by length
#[derive(Debug, Clone, Default)]
pub struct WordList {
    by_length: BTreeMap<usize, Vec<String>>,
}

impl WordList {
    /// One word per line. Keeps lowercase ASCII words of 3 to 8 letters.
    pub fn parse(text: &str) -> Self {
        let mut by_length: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        let mut seen = HashSet::new();
        for line in text.lines() {
            let word = line.trim().to_ascii_lowercase();
            if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()) {
                continue;
            }
            if !word.bytes().all(|b| b.is_ascii_lowercase()) {
                continue;
            }
            if seen.insert(word.clone()) {
                by_length.entry(word.len()).or_default().push(word);
            }
        }
        Self { by_length }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GenerateError::WordList(format!("{}: {}", path.display(), e)))?;
        Ok(Self::parse(&text))
    }

    pub fn len(&self) -> usize {
        self.by_length.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }

    pub fn words_of_length(&self, len: usize) -> &[String] {
        self.by_length.get(&len).map_or(&[], Vec::as_slice)
    }

    /// Draw up to `count` distinct words with lengths in `lengths`.
    ///
    /// The first pick is free; every later pick must share a letter with
    /// something already chosen, so the set has a chance of crossing.
    /// At most `count * 10` candidates are examined.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        lengths: RangeInclusive<usize>,
        count: usize,
        rng: &mut R,
    ) -> Vec<String> {
        let mut pool: Vec<&String> = self
            .by_length
            .range(lengths)
            .flat_map(|(_, words)| words.iter())
            .collect();
        if pool.is_empty() {
            return Vec::new();
        }
        pool.shuffle(rng);

        let mut selected: Vec<String> = Vec::new();
        let mut letters: HashSet<u8> = HashSet::new();
        for word in pool.iter().cycle().take(count * 10) {
            if selected.len() >= count {
                break;
            }
            if selected.iter().any(|s| s == *word) {
                continue;
            }
            if !selected.is_empty() && !word.bytes().any(|b| letters.contains(&b)) {
                continue;
            }
            letters.extend(word.bytes());
            selected.push((*word).clone());
        }
        selected
    }
}

/// Trim and lowercase caller-supplied words, rejecting anything that is
/// not purely ASCII letters.
pub fn normalize_words<S: AsRef<str>>(raw: &[S]) -> Result<Vec<String>> {
    raw.iter()
        .map(|w| {
            let word = w.as_ref().trim().to_ascii_lowercase();
            if word.is_empty() || !word.bytes().all(|b| b.is_ascii_lowercase()) {
                return Err(GenerateError::InvalidWord(w.as_ref().to_string()));
            }
            Ok(word)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    const TEXT: &str = "Cat\ndog\n  bird \nox\nelephants\nco-op\nfish\ncat\nzebra\n";

    #[test]
    fn test_parse_filters_and_buckets() {
        let list = WordList::parse(TEXT);
        assert_eq!(list.len(), 5);
        assert_eq!(list.words_of_length(3), ["cat", "dog"]);
        assert_eq!(list.words_of_length(4), ["bird", "fish"]);
        assert_eq!(list.words_of_length(5), ["zebra"]);
        assert!(list.words_of_length(2).is_empty());
        assert!(list.words_of_length(9).is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = WordList::load("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, GenerateError::WordList(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "apple\nbanana\npear").unwrap();
        let list = WordList::load(file.path()).unwrap();
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_sample_shares_letters() {
        let list = WordList::parse("cat\ndog\nact\ntan\nbug\nhit\nant\nmop\n");
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = list.sample(3..=4, 4, &mut rng);
            assert!(!picked.is_empty());
            assert!(picked.len() <= 4);

            let unique: HashSet<&String> = picked.iter().collect();
            assert_eq!(unique.len(), picked.len());

            for (i, word) in picked.iter().enumerate().skip(1) {
                let shares = picked[..i]
                    .iter()
                    .any(|prev| prev.bytes().any(|b| word.as_bytes().contains(&b)));
                assert!(shares, "{} shares nothing with {:?}", word, &picked[..i]);
            }
        }
    }

    #[test]
    fn test_sample_respects_length_range() {
        let list = WordList::parse(TEXT);
        let mut rng = StdRng::seed_from_u64(2);
        let picked = list.sample(4..=5, 10, &mut rng);
        assert!(picked.iter().all(|w| (4..=5).contains(&w.len())));
        assert!(list.sample(7..=8, 3, &mut rng).is_empty());
    }

    #[test]
    fn test_normalize_words() {
        let words = normalize_words(&[" Cat", "DOG "]).unwrap();
        assert_eq!(words, vec!["cat", "dog"]);
        assert_eq!(
            normalize_words(&["cat", "c4t"]).unwrap_err(),
            GenerateError::InvalidWord("c4t".to_string())
        );
        assert!(normalize_words(&[""]).is_err());
    }
}
