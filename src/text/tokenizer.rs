// Word extraction for training and candidate documents.
//
// Word identity depends on the punctuation set and the stop-word list, so a
// single Tokenizer value is built once per run and handed to both the corpus
// statistics builder and the classification path.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use stop_words::{get, LANGUAGE};

use crate::error::ClassifyError;

/// Characters replaced by a space before splitting on whitespace.
pub const PUNCTUATION: &str = ".,;:!?()[]{}<>\"'@#/\\=+-*";

/// Short list of function words that carry no theme signal.
pub const BASIC_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "of", "and", "or", "to", "in", "on", "for", "is", "are", "was", "were",
    "be", "been", "this", "that", "with", "as", "by", "it", "from",
];

/// Which stop-word list to drop during tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopWords {
    /// No filtering
    None,
    /// The built-in short list (`BASIC_STOP_WORDS`)
    #[default]
    Basic,
    /// The full English list from the stop-words crate
    English,
}

impl StopWords {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopWords::None => "none",
            StopWords::Basic => "basic",
            StopWords::English => "english",
        }
    }

    fn words(&self) -> HashSet<String> {
        match self {
            StopWords::None => HashSet::new(),
            StopWords::Basic => BASIC_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            StopWords::English => get(LANGUAGE::English)
                .into_iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }
}

impl fmt::Display for StopWords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StopWords {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(StopWords::None),
            "basic" => Ok(StopWords::Basic),
            "english" | "en" => Ok(StopWords::English),
            other => Err(format!(
                "unknown stop-word list '{other}' (expected basic, english or none)"
            )),
        }
    }
}

/// Lowercasing, punctuation-stripping, stop-word-filtering tokenizer.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    punctuation: Vec<char>,
    stop_words: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(StopWords::default())
    }
}

impl Tokenizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            punctuation: PUNCTUATION.chars().collect(),
            stop_words: stop_words.words(),
        }
    }

    /// All words of `text` in order, repeats included.
    pub fn words(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| if self.punctuation.contains(&c) { ' ' } else { c })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|w| !self.stop_words.contains(*w))
            .map(str::to_string)
            .collect()
    }

    /// The set of distinct words in `text`. Order and frequency are discarded.
    pub fn distinct_words(&self, text: &str) -> BTreeSet<String> {
        self.words(text).into_iter().collect()
    }

    /// Read a file and return its distinct words.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected;
    /// mail and newsgroup dumps routinely carry stray Latin-1.
    pub fn read_distinct_words(&self, path: &Path) -> Result<BTreeSet<String>, ClassifyError> {
        let bytes = fs::read(path).map_err(|source| ClassifyError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.distinct_words(&String::from_utf8_lossy(&bytes)))
    }
}
