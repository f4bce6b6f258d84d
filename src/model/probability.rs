// Smoothed word-presence probabilities per theme.
//
//   P(word | theme) = (count(word, theme) + 1) / (documents(theme) + 1)
//
// Only words observed in a theme get an entry. A word the theme never saw is
// evaluated on demand with count = 0, i.e. 1 / (documents + 1). Since
// count <= documents, every stored probability lies in (0, 1] and equals 1
// exactly when the word appeared in every training document of the theme.

use std::collections::HashMap;

use crate::corpus::stats::CorpusStatistics;

/// Probabilities for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeProbabilities {
    pub name: String,
    pub documents: u32,
    pub probabilities: HashMap<String, f64>,
}

impl ThemeProbabilities {
    /// Probability for a word this theme never saw during training.
    pub fn fallback(&self) -> f64 {
        smoothed(0, self.documents)
    }

    /// Stored probability, or the fallback for unseen words.
    pub fn presence_probability(&self, word: &str) -> f64 {
        self.probabilities
            .get(word)
            .copied()
            .unwrap_or_else(|| self.fallback())
    }
}

/// Immutable per-theme probability tables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProbabilityModel {
    themes: Vec<ThemeProbabilities>,
}

impl ProbabilityModel {
    /// Derive the model from corpus statistics. Theme order is preserved.
    pub fn from_statistics(stats: &CorpusStatistics) -> Self {
        let themes = stats
            .themes()
            .iter()
            .map(|theme| ThemeProbabilities {
                name: theme.name.clone(),
                documents: theme.documents,
                probabilities: theme
                    .word_counts
                    .iter()
                    .map(|(word, &count)| (word.clone(), smoothed(count, theme.documents)))
                    .collect(),
            })
            .collect();
        Self { themes }
    }

    pub fn themes(&self) -> &[ThemeProbabilities] {
        &self.themes
    }

    pub fn theme(&self, name: &str) -> Option<&ThemeProbabilities> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn theme_count(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Stored probability for an observed (theme, word) pair.
    pub fn probability(&self, theme: &str, word: &str) -> Option<f64> {
        self.theme(theme)
            .and_then(|t| t.probabilities.get(word).copied())
    }

    /// Fallback probability for words `theme` never saw.
    pub fn fallback(&self, theme: &str) -> Option<f64> {
        self.theme(theme).map(ThemeProbabilities::fallback)
    }
}

/// Additive smoothing with a pseudo-count of one.
pub fn smoothed(count: u32, documents: u32) -> f64 {
    (count as f64 + 1.0) / (documents as f64 + 1.0)
}
