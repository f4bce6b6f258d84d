// Per-theme document-frequency statistics.
//
// For each theme we keep the number of training documents and, for each word,
// the number of those documents that contain it at least once. Repeats inside
// one document never count twice, so word_count(theme, w) <= documents(theme)
// always holds.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::reader;
use crate::error::ClassifyError;
use crate::text::tokenizer::Tokenizer;

/// Statistics for a single theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeStats {
    pub name: String,
    /// Number of training documents read for this theme
    pub documents: u32,
    /// word -> number of documents of this theme containing it
    pub word_counts: HashMap<String, u32>,
}

impl ThemeStats {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            documents: 0,
            word_counts: HashMap::new(),
        }
    }
}

/// Immutable statistics for a whole training pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorpusStatistics {
    /// Themes in their fixed iteration order
    themes: Vec<ThemeStats>,
    /// Union of every word seen in any theme
    vocabulary: BTreeSet<String>,
}

impl CorpusStatistics {
    /// Build statistics from in-memory `(theme, text)` pairs.
    ///
    /// Themes are ordered by first appearance.
    pub fn from_documents<'a, I>(documents: I, tokenizer: &Tokenizer) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut builder = StatisticsBuilder::default();
        for (theme, text) in documents {
            builder.add_document(theme, &tokenizer.distinct_words(text));
        }
        builder.finish()
    }

    pub fn themes(&self) -> &[ThemeStats] {
        &self.themes
    }

    pub fn theme(&self, name: &str) -> Option<&ThemeStats> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn theme_names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.name.as_str())
    }

    /// Number of training documents for `theme` (0 for unknown themes).
    pub fn document_count(&self, theme: &str) -> u32 {
        self.theme(theme).map(|t| t.documents).unwrap_or(0)
    }

    /// Number of `theme` documents containing `word` (0 if never seen).
    pub fn word_count(&self, theme: &str, word: &str) -> u32 {
        self.theme(theme)
            .and_then(|t| t.word_counts.get(word).copied())
            .unwrap_or(0)
    }

    pub fn total_documents(&self) -> u32 {
        self.themes.iter().map(|t| t.documents).sum()
    }

    /// The global vocabulary.
    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    /// True when no themes were found.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

/// Accumulates documents theme by theme, then freezes into `CorpusStatistics`.
#[derive(Debug, Default)]
pub struct StatisticsBuilder {
    themes: Vec<ThemeStats>,
}

impl StatisticsBuilder {
    /// Register a theme even if it ends up with no documents.
    pub fn add_theme(&mut self, theme: &str) -> &mut Self {
        self.theme_mut(theme);
        self
    }

    /// Count one document's distinct words toward `theme`.
    pub fn add_document(&mut self, theme: &str, words: &BTreeSet<String>) -> &mut Self {
        let stats = self.theme_mut(theme);
        stats.documents += 1;
        for word in words {
            *stats.word_counts.entry(word.clone()).or_insert(0) += 1;
        }
        self
    }

    pub fn finish(self) -> CorpusStatistics {
        let vocabulary = self
            .themes
            .iter()
            .flat_map(|t| t.word_counts.keys().cloned())
            .collect();
        CorpusStatistics {
            themes: self.themes,
            vocabulary,
        }
    }

    fn theme_mut(&mut self, theme: &str) -> &mut ThemeStats {
        let idx = match self.themes.iter().position(|t| t.name == theme) {
            Some(idx) => idx,
            None => {
                self.themes.push(ThemeStats::new(theme));
                self.themes.len() - 1
            }
        };
        &mut self.themes[idx]
    }
}

/// Scan a training root (one subdirectory per theme) into statistics.
///
/// A missing root is reported as `MissingTrainingRoot` rather than as empty
/// statistics; callers that want to carry on with nothing to learn from can
/// use `CorpusStatistics::default()` instead. Unreadable training documents
/// are logged and skipped; they do not count toward the theme's document
/// total.
pub fn build_statistics(
    root: &Path,
    tokenizer: &Tokenizer,
) -> Result<CorpusStatistics, ClassifyError> {
    if !root.is_dir() {
        return Err(ClassifyError::MissingTrainingRoot(root.to_path_buf()));
    }

    let themes = reader::list_themes(root).map_err(|source| ClassifyError::Unreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut builder = StatisticsBuilder::default();
    for theme in &themes {
        builder.add_theme(theme);

        let theme_dir = root.join(theme);
        let documents = match reader::list_documents(&theme_dir) {
            Ok(docs) => docs,
            Err(e) => {
                warn!(theme = %theme, error = %e, "Cannot list theme directory, keeping it empty");
                continue;
            }
        };

        add_theme_documents(&mut builder, theme, &documents, tokenizer);
        debug!(theme = %theme, documents = documents.len(), "Theme scanned");
    }

    let stats = builder.finish();
    info!(
        themes = stats.themes().len(),
        documents = stats.total_documents(),
        vocabulary = stats.vocabulary().len(),
        "Corpus statistics built"
    );
    Ok(stats)
}

/// Count each readable document toward `theme`; unreadable ones are skipped.
fn add_theme_documents(
    builder: &mut StatisticsBuilder,
    theme: &str,
    documents: &[PathBuf],
    tokenizer: &Tokenizer,
) {
    for path in documents {
        match tokenizer.read_distinct_words(path) {
            Ok(words) => {
                builder.add_document(theme, &words);
            }
            Err(e) => warn!(error = %e, "Skipping training document"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenizer::StopWords;

    fn tok() -> Tokenizer {
        Tokenizer::new(StopWords::None)
    }

    #[test]
    fn test_document_frequency_not_term_frequency() {
        let stats = CorpusStatistics::from_documents(
            [("sports", "ball ball ball game"), ("sports", "ball")],
            &tok(),
        );
        assert_eq!(stats.document_count("sports"), 2);
        assert_eq!(stats.word_count("sports", "ball"), 2);
        assert_eq!(stats.word_count("sports", "game"), 1);
        assert_eq!(stats.word_count("sports", "vote"), 0);
    }

    #[test]
    fn test_vocabulary_is_union() {
        let stats = CorpusStatistics::from_documents(
            [("sports", "ball game"), ("politics", "vote ball")],
            &tok(),
        );
        let vocab: Vec<&str> = stats.vocabulary().iter().map(String::as_str).collect();
        assert_eq!(vocab, vec!["ball", "game", "vote"]);
    }

    #[test]
    fn test_theme_order_is_first_appearance() {
        let stats = CorpusStatistics::from_documents(
            [("zeta", "a"), ("alpha", "b"), ("zeta", "c")],
            &tok(),
        );
        let names: Vec<&str> = stats.theme_names().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_empty_theme_retained() {
        let mut builder = StatisticsBuilder::default();
        builder.add_theme("empty");
        builder.add_document("full", &tok().distinct_words("word"));
        let stats = builder.finish();
        assert_eq!(stats.themes().len(), 2);
        assert_eq!(stats.document_count("empty"), 0);
        assert!(stats.theme("empty").unwrap().word_counts.is_empty());
    }

    #[test]
    fn test_count_never_exceeds_documents() {
        let stats = CorpusStatistics::from_documents(
            [("t", "x x y"), ("t", "x"), ("t", "z z z")],
            &tok(),
        );
        let theme = stats.theme("t").unwrap();
        for count in theme.word_counts.values() {
            assert!(*count <= theme.documents);
        }
    }

    #[test]
    fn test_unreadable_document_is_not_counted() {
        let dir = tempfile::TempDir::new().unwrap();
        let readable = dir.path().join("1");
        std::fs::write(&readable, "ball game").unwrap();
        let documents = vec![readable, dir.path().join("vanished")];

        let mut builder = StatisticsBuilder::default();
        builder.add_theme("sports");
        add_theme_documents(&mut builder, "sports", &documents, &tok());
        let stats = builder.finish();

        assert_eq!(stats.document_count("sports"), 1);
        assert_eq!(stats.word_count("sports", "ball"), 1);
    }

    #[test]
    fn test_missing_document_reads_as_unreadable() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = tok()
            .read_distinct_words(&dir.path().join("vanished"))
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Unreadable { .. }));
    }
}
