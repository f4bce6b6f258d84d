// Theme classifier trait: swap-ready abstraction.
//
// The sorting pipeline and the CLI only talk to this trait, so the Naive
// Bayes engine could be replaced by another model without touching them.

use std::collections::BTreeSet;

use serde::Serialize;

/// One theme's score for a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeScore {
    pub theme: String,
    pub score: f64,
}

/// Trait for assigning a theme to a document's distinct-word set.
pub trait ThemeClassifier {
    /// Best theme, or None when the model has no themes.
    fn classify(&self, words: &BTreeSet<String>) -> Option<String>;

    /// Every theme with its score, best first. Ties keep theme order.
    fn rank(&self, words: &BTreeSet<String>) -> Vec<ThemeScore>;
}
