// Unit tests for the classification engine.
//
// Tests isolated pure functions: smoothing bounds, fallback monotonicity,
// degenerate-input safety and tie-break stability. Everything here is built
// from in-memory documents; no filesystem access.

use std::collections::BTreeSet;

use themesort::corpus::stats::{CorpusStatistics, StatisticsBuilder};
use themesort::model::naive_bayes::{classify, NaiveBayesClassifier};
use themesort::model::probability::{smoothed, ProbabilityModel};
use themesort::model::scorer::{score, ScoringConfig, DEFAULT_FLOOR};
use themesort::model::traits::ThemeClassifier;
use themesort::text::tokenizer::{StopWords, Tokenizer};

fn tok() -> Tokenizer {
    Tokenizer::new(StopWords::None)
}

fn sports_and_politics() -> CorpusStatistics {
    CorpusStatistics::from_documents(
        [
            ("sports", "ball game"),
            ("sports", "ball score"),
            ("politics", "vote law"),
            ("politics", "vote policy"),
        ],
        &tok(),
    )
}

// ============================================================
// ProbabilityModel: smoothing bounds
// ============================================================

#[test]
fn observed_probabilities_in_unit_interval() {
    let stats = sports_and_politics();
    let model = ProbabilityModel::from_statistics(&stats);
    for theme in model.themes() {
        for (word, p) in &theme.probabilities {
            assert!(*p > 0.0 && *p <= 1.0, "{}/{word} = {p}", theme.name);
        }
    }
}

#[test]
fn probability_one_iff_word_in_every_document() {
    let stats = sports_and_politics();
    let model = ProbabilityModel::from_statistics(&stats);
    for theme in stats.themes() {
        for (word, &count) in &theme.word_counts {
            let p = model.probability(&theme.name, word).unwrap();
            assert_eq!(p == 1.0, count == theme.documents, "{}/{word}", theme.name);
        }
    }
    assert_eq!(model.probability("sports", "ball"), Some(1.0));
    assert_eq!(model.probability("politics", "vote"), Some(1.0));
}

#[test]
fn fallback_matches_zero_count_formula() {
    let model = ProbabilityModel::from_statistics(&sports_and_politics());
    assert_eq!(model.fallback("sports"), Some(1.0 / 3.0));
    assert_eq!(model.fallback("sports"), Some(smoothed(0, 2)));
}

#[test]
fn fallback_strictly_below_any_observed() {
    for documents in 1..20u32 {
        let fallback = smoothed(0, documents);
        for count in 1..=documents {
            assert!(fallback < smoothed(count, documents));
        }
    }
}

#[test]
fn model_is_sparse_per_theme() {
    let model = ProbabilityModel::from_statistics(&sports_and_politics());
    assert_eq!(model.probability("sports", "vote"), None);
    assert_eq!(model.probability("politics", "ball"), None);
    assert_eq!(model.theme("sports").unwrap().probabilities.len(), 3);
}

// ============================================================
// Scorer: degenerate inputs
// ============================================================

#[test]
fn empty_document_scores_finite_for_every_theme() {
    let stats = sports_and_politics();
    let model = ProbabilityModel::from_statistics(&stats);
    let empty = BTreeSet::new();
    for theme in model.themes() {
        let s = score(
            &empty,
            &model,
            &theme.name,
            stats.vocabulary(),
            &ScoringConfig::default(),
        );
        assert!(s.is_finite(), "{} scored {s}", theme.name);
    }
}

#[test]
fn unknown_theme_scores_floor() {
    let stats = sports_and_politics();
    let model = ProbabilityModel::from_statistics(&stats);
    let s = score(
        &tok().distinct_words("ball"),
        &model,
        "weather",
        stats.vocabulary(),
        &ScoringConfig::default(),
    );
    assert_eq!(s, DEFAULT_FLOOR);
}

#[test]
fn custom_floor_is_respected() {
    // One document with one word: p = 1, so its absence costs exactly the floor.
    let stats = CorpusStatistics::from_documents([("only", "word")], &tok());
    let model = ProbabilityModel::from_statistics(&stats);
    let config = ScoringConfig { floor: -1000.0 };
    let s = score(&BTreeSet::new(), &model, "only", stats.vocabulary(), &config);
    // ln(1/1) + floor
    assert_eq!(s, -1000.0);
}

#[test]
fn absent_expected_words_are_penalized() {
    // Same present words, but one theme expects an extra word the document lacks.
    let stats = CorpusStatistics::from_documents(
        [
            ("loose", "apple"),
            ("loose", "banana"),
            ("strict", "apple cherry"),
            ("strict", "banana cherry"),
        ],
        &tok(),
    );
    let clf = NaiveBayesClassifier::train(&stats, ScoringConfig::default()).unwrap();
    assert_eq!(
        clf.classify(&tok().distinct_words("apple")).as_deref(),
        Some("loose")
    );
    assert_eq!(
        clf.classify(&tok().distinct_words("apple cherry")).as_deref(),
        Some("strict")
    );
}

// ============================================================
// Classifier: scenarios and tie-breaking
// ============================================================

#[test]
fn sports_document_picks_sports() {
    let stats = sports_and_politics();
    let clf = NaiveBayesClassifier::train(&stats, ScoringConfig::default()).unwrap();
    let doc = tok().distinct_words("ball game");

    let ranked = clf.rank(&doc);
    assert_eq!(ranked[0].theme, "sports");
    assert!(ranked[0].score > ranked[1].score);
    assert_eq!(clf.classify(&doc).as_deref(), Some("sports"));
}

#[test]
fn politics_document_picks_politics() {
    let clf = NaiveBayesClassifier::train(&sports_and_politics(), ScoringConfig::default()).unwrap();
    let doc = tok().distinct_words("vote law");
    assert_eq!(clf.classify(&doc).as_deref(), Some("politics"));
}

#[test]
fn theme_without_documents_never_wins() {
    let mut builder = StatisticsBuilder::default();
    builder.add_theme("abandoned");
    for (theme, text) in [
        ("sports", "ball game"),
        ("sports", "ball score"),
        ("politics", "vote law"),
        ("politics", "vote policy"),
    ] {
        builder.add_document(theme, &tok().distinct_words(text));
    }
    let stats = builder.finish();
    assert_eq!(stats.document_count("abandoned"), 0);

    let clf = NaiveBayesClassifier::train(&stats, ScoringConfig::default()).unwrap();
    for text in ["ball", "vote", "ball vote", "game law policy", "score", "nothing known"] {
        let predicted = clf.classify(&tok().distinct_words(text));
        assert_ne!(predicted.as_deref(), Some("abandoned"), "document {text:?}");
    }
}

#[test]
fn theme_without_documents_loses_to_fully_expected_words() {
    // Both themes pay the floor for the absent "x"; only "a" pays ln(2/3) for "y".
    let mut builder = StatisticsBuilder::default();
    builder.add_theme("abandoned");
    builder.add_document("a", &tok().distinct_words("x y"));
    builder.add_document("a", &tok().distinct_words("x"));
    let clf = NaiveBayesClassifier::train(&builder.finish(), ScoringConfig::default()).unwrap();
    let doc = tok().distinct_words("y");

    assert_eq!(clf.classify(&doc).as_deref(), Some("a"));
    let ranked = clf.rank(&doc);
    assert_eq!(ranked.last().map(|s| s.theme.as_str()), Some("abandoned"));
}

#[test]
fn ties_resolve_to_first_theme_in_order() {
    let stats = CorpusStatistics::from_documents(
        [("beta", "same text"), ("alpha", "same text")],
        &tok(),
    );
    let model = ProbabilityModel::from_statistics(&stats);
    let doc = tok().distinct_words("same");
    // Theme order is first appearance, so "beta" comes first
    assert_eq!(
        classify(&doc, &model, stats.vocabulary(), &ScoringConfig::default()),
        Some("beta")
    );
}

#[test]
fn classify_is_deterministic() {
    let stats = sports_and_politics();
    let clf = NaiveBayesClassifier::train(&stats, ScoringConfig::default()).unwrap();
    let doc = tok().distinct_words("ball vote policy");
    let first = clf.rank(&doc);
    for _ in 0..10 {
        assert_eq!(clf.rank(&doc), first);
    }
}

#[test]
fn rebuilt_model_is_bit_identical() {
    let a = ProbabilityModel::from_statistics(&sports_and_politics());
    let b = ProbabilityModel::from_statistics(&sports_and_politics());
    assert_eq!(a, b);
}
