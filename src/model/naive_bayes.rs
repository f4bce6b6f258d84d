// Bernoulli Naive Bayes classifier over a frozen model.
//
// Training turns corpus statistics into a ProbabilityModel once; the
// classifier then owns that model, the global vocabulary and the scoring
// config, and is read-only for every document of the batch.

use std::collections::BTreeSet;

use tracing::info;

use super::probability::ProbabilityModel;
use super::scorer::{score_theme, ScoringConfig};
use super::traits::{ThemeClassifier, ThemeScore};
use crate::corpus::stats::CorpusStatistics;
use crate::error::ClassifyError;

/// Pick the best theme for `document`.
///
/// Themes are visited in model order and a later theme only replaces the
/// incumbent with a strictly higher score, so the first of several tied
/// themes wins. Themes with no training documents are not candidates while
/// any other theme has documents; they still count toward the prior.
/// Returns None when the model has no themes.
pub fn classify<'m>(
    document: &BTreeSet<String>,
    model: &'m ProbabilityModel,
    vocabulary: &BTreeSet<String>,
    config: &ScoringConfig,
) -> Option<&'m str> {
    let nb_themes = model.theme_count();
    let trained_only = has_trained_theme(model);
    let mut best: Option<(&str, f64)> = None;

    for theme in model.themes() {
        if trained_only && theme.documents == 0 {
            continue;
        }
        let s = score_theme(document, theme, nb_themes, vocabulary, config);
        if best.map_or(true, |(_, best_score)| s > best_score) {
            best = Some((theme.name.as_str(), s));
        }
    }

    best.map(|(name, _)| name)
}

fn has_trained_theme(model: &ProbabilityModel) -> bool {
    model.themes().iter().any(|theme| theme.documents > 0)
}

#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    model: ProbabilityModel,
    vocabulary: BTreeSet<String>,
    config: ScoringConfig,
}

impl NaiveBayesClassifier {
    /// Freeze statistics into a classifier.
    ///
    /// Fails with `NoThemes` when there is nothing to choose between and with
    /// `EmptyVocabulary` when no training document contributed a word, since
    /// every score would be uninformative.
    pub fn train(stats: &CorpusStatistics, config: ScoringConfig) -> Result<Self, ClassifyError> {
        if stats.is_empty() {
            return Err(ClassifyError::NoThemes);
        }
        if stats.vocabulary().is_empty() {
            return Err(ClassifyError::EmptyVocabulary);
        }

        let model = ProbabilityModel::from_statistics(stats);
        info!(
            themes = model.theme_count(),
            vocabulary = stats.vocabulary().len(),
            "Naive Bayes model trained"
        );

        Ok(Self {
            model,
            vocabulary: stats.vocabulary().clone(),
            config,
        })
    }

    pub fn model(&self) -> &ProbabilityModel {
        &self.model
    }

    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }
}

impl ThemeClassifier for NaiveBayesClassifier {
    fn classify(&self, words: &BTreeSet<String>) -> Option<String> {
        classify(words, &self.model, &self.vocabulary, &self.config).map(str::to_string)
    }

    fn rank(&self, words: &BTreeSet<String>) -> Vec<ThemeScore> {
        let nb_themes = self.model.theme_count();
        let trained_only = has_trained_theme(&self.model);
        let mut scored: Vec<(bool, ThemeScore)> = self
            .model
            .themes()
            .iter()
            .map(|theme| {
                let candidate = !trained_only || theme.documents > 0;
                let score = score_theme(words, theme, nb_themes, &self.vocabulary, &self.config);
                (
                    candidate,
                    ThemeScore {
                        theme: theme.name.clone(),
                        score,
                    },
                )
            })
            .collect();

        // Non-candidates go last; stable sort keeps theme order among equal scores
        scored.sort_by(|(ca, a), (cb, b)| cb.cmp(ca).then_with(|| b.score.total_cmp(&a.score)));
        scored.into_iter().map(|(_, score)| score).collect()
    }
}
