// Bernoulli Naive Bayes log-score of one document against one theme.
//
// Starting from a uniform prior ln(1 / themes), every word of the global
// vocabulary contributes exactly once:
//
//   present in the document  ->  ln(p)
//   absent from the document ->  ln(1 - p)
//
// where p is the theme's smoothed presence probability (or its fallback for
// unseen words). Absent-word terms are what penalize a theme for "expected"
// words the document lacks. When p == 1 the absent term would be ln(0); the
// configured floor is added instead.
//
// Scores only rank themes for the same document. They are not probabilities.

use std::collections::BTreeSet;

use super::probability::{ProbabilityModel, ThemeProbabilities};

/// Score used for "cannot score" and for a single ln(0) term.
pub const DEFAULT_FLOOR: f64 = -1e12;

/// Scoring knobs, passed explicitly so the scorer has no ambient state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    /// Sentinel very-negative score
    pub floor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            floor: DEFAULT_FLOOR,
        }
    }
}

/// Log-score of `document` for `theme`.
///
/// Returns `config.floor` when the model has no themes or does not know
/// `theme`. Always finite for finite `floor`.
pub fn score(
    document: &BTreeSet<String>,
    model: &ProbabilityModel,
    theme: &str,
    vocabulary: &BTreeSet<String>,
    config: &ScoringConfig,
) -> f64 {
    let nb_themes = model.theme_count();
    if nb_themes == 0 {
        return config.floor;
    }
    match model.theme(theme) {
        Some(probs) => score_theme(document, probs, nb_themes, vocabulary, config),
        None => config.floor,
    }
}

pub(crate) fn score_theme(
    document: &BTreeSet<String>,
    theme: &ThemeProbabilities,
    nb_themes: usize,
    vocabulary: &BTreeSet<String>,
    config: &ScoringConfig,
) -> f64 {
    let mut score = (1.0 / nb_themes as f64).ln();

    for word in vocabulary {
        let p = theme.presence_probability(word);
        if document.contains(word) {
            score += p.ln();
        } else {
            let q = 1.0 - p;
            score += if q == 0.0 { config.floor } else { q.ln() };
        }
    }

    score
}
