// Colored terminal output for training summaries, predictions and reports.
//
// The main.rs command handlers delegate all formatting here.

use std::path::Path;

use colored::Colorize;

use crate::corpus::stats::CorpusStatistics;
use crate::model::traits::ThemeScore;
use crate::pipeline::evaluate::Accuracy;
use crate::pipeline::sort::{Outcome, RelocateMode, SortReport};

/// Display per-theme training statistics.
pub fn display_statistics(stats: &CorpusStatistics) {
    println!(
        "\n{}",
        format!(
            "=== Training Corpus ({} themes, {} documents) ===",
            stats.themes().len(),
            stats.total_documents()
        )
        .bold()
    );
    println!();
    println!(
        "  {:<32} {:>9}  {:>7}",
        "Theme".dimmed(),
        "Documents".dimmed(),
        "Words".dimmed()
    );
    println!("  {}", "-".repeat(52).dimmed());

    for theme in stats.themes() {
        let docs = if theme.documents == 0 {
            theme.documents.to_string().yellow()
        } else {
            theme.documents.to_string().normal()
        };
        println!(
            "  {:<32} {:>9}  {:>7}",
            super::truncate_chars(&theme.name, 32),
            docs,
            theme.word_counts.len()
        );
    }

    println!();
    println!("  Global vocabulary: {} words", stats.vocabulary().len());

    let empty = stats.themes().iter().filter(|t| t.documents == 0).count();
    if empty > 0 {
        println!(
            "  {} {} theme(s) have no training documents and are ranked last, never chosen",
            "~".yellow(),
            empty
        );
    }
}

/// Display the prediction for a single file, optionally with every theme's score.
pub fn display_prediction(path: &Path, ranked: &[ThemeScore], show_scores: bool) {
    match ranked.first() {
        Some(best) => println!("{}  {}", path.display(), best.theme.green().bold()),
        None => println!("{}  {}", path.display(), "unclassifiable".red()),
    }

    if show_scores {
        for (i, s) in ranked.iter().enumerate() {
            println!("    {:>2}. {:<32} {:>16.4}", i + 1, s.theme, s.score);
        }
    }
}

/// Display the outcome of a sorting run.
pub fn display_sort_report(report: &SortReport) {
    let title = match report.mode {
        RelocateMode::Move => "Sorted",
        RelocateMode::Copy => "Copied",
        RelocateMode::DryRun => "Dry run",
    };
    println!(
        "\n{}",
        format!("=== {} ({} files) ===", title, report.entries.len()).bold()
    );
    println!();

    for entry in &report.entries {
        let name = entry.file_name();
        match &entry.outcome {
            Outcome::Moved { destination }
            | Outcome::Copied { destination }
            | Outcome::Planned { destination } => {
                println!(
                    "  {:<28} -> {}",
                    name,
                    destination.display().to_string().green()
                );
            }
            Outcome::Unclassified => {
                println!("  {:<28} {}", name, "unclassified".yellow());
            }
            Outcome::Failed { error } => {
                println!("  {:<28} {}", name, format!("Error: {error}").red());
            }
        }
    }

    println!();
    println!("  Sorted:       {}", report.sorted_count());
    println!("  Unclassified: {}", report.unclassified_count());
    println!("  Failed:       {}", report.failed_count());
}

/// Display accuracy against a labels file.
pub fn display_accuracy(accuracy: &Accuracy) {
    println!("\n{}", "=== Accuracy ===".bold());
    println!();

    if accuracy.total == 0 {
        println!("  No classified file has a label. Check the labels file names.");
        return;
    }

    println!(
        "  {:<32} {:>7} {:>7} {:>8}",
        "Theme".dimmed(),
        "Correct".dimmed(),
        "Total".dimmed(),
        "Rate".dimmed()
    );
    println!("  {}", "-".repeat(58).dimmed());
    for theme in &accuracy.per_theme {
        println!(
            "  {:<32} {:>7} {:>7} {:>8}",
            super::truncate_chars(&theme.theme, 32),
            theme.correct,
            theme.total,
            colorize_rate(theme.rate()),
        );
    }

    println!();
    println!(
        "  Overall: {}/{} correct ({})",
        accuracy.correct,
        accuracy.total,
        colorize_rate(accuracy.rate())
    );
    if accuracy.unclassified > 0 {
        println!("  Labeled but unclassified: {}", accuracy.unclassified);
    }
    if accuracy.unlabeled > 0 {
        println!("  {}", format!("Not in labels file: {}", accuracy.unlabeled).dimmed());
    }
}

fn colorize_rate(rate: f64) -> colored::ColoredString {
    let text = format!("{:.1}%", rate * 100.0);
    if rate >= 0.8 {
        text.green()
    } else if rate >= 0.5 {
        text.yellow()
    } else {
        text.red()
    }
}
