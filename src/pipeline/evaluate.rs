// Accuracy of a sorting run against ground-truth labels.
//
// Only candidates that have a label count toward the totals. A labeled
// candidate the engine could not classify counts as a miss.

use std::collections::BTreeMap;

use serde::Serialize;

use super::sort::SortReport;
use crate::labels::Labels;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThemeAccuracy {
    pub theme: String,
    pub total: usize,
    pub correct: usize,
}

impl ThemeAccuracy {
    pub fn rate(&self) -> f64 {
        ratio(self.correct, self.total)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Accuracy {
    /// Labeled candidates
    pub total: usize,
    /// Labeled candidates whose prediction matched
    pub correct: usize,
    /// Candidates with no entry in the labels file
    pub unlabeled: usize,
    /// Labeled candidates that received no prediction
    pub unclassified: usize,
    /// Per expected theme, sorted by theme name
    pub per_theme: Vec<ThemeAccuracy>,
}

impl Accuracy {
    pub fn rate(&self) -> f64 {
        ratio(self.correct, self.total)
    }
}

pub fn evaluate(report: &SortReport, labels: &Labels) -> Accuracy {
    let mut accuracy = Accuracy::default();
    let mut per_theme: BTreeMap<&str, ThemeAccuracy> = BTreeMap::new();

    for entry in &report.entries {
        let file_name = entry.file_name();
        let Some(expected) = labels.get(&file_name) else {
            accuracy.unlabeled += 1;
            continue;
        };

        let bucket = per_theme.entry(expected).or_insert_with(|| ThemeAccuracy {
            theme: expected.to_string(),
            ..Default::default()
        });
        accuracy.total += 1;
        bucket.total += 1;

        match entry.theme.as_deref() {
            Some(predicted) if predicted == expected => {
                accuracy.correct += 1;
                bucket.correct += 1;
            }
            Some(_) => {}
            None => accuracy.unclassified += 1,
        }
    }

    accuracy.per_theme = per_theme.into_values().collect();
    accuracy
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
