use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use themesort::config::Config;
use themesort::corpus::stats::{build_statistics, CorpusStatistics};
use themesort::model::naive_bayes::NaiveBayesClassifier;
use themesort::model::scorer::ScoringConfig;
use themesort::model::traits::ThemeClassifier;
use themesort::pipeline::sort::RelocateMode;
use themesort::text::tokenizer::{StopWords, Tokenizer};
use themesort::ClassifyError;

/// Themesort: file plain-text documents under the theme they are about.
///
/// Learns themes from a training directory (one subdirectory per theme) with
/// a Bernoulli Naive Bayes model, then classifies and moves new documents.
#[derive(Parser)]
#[command(name = "themesort", version, about)]
struct Cli {
    /// Training corpus root (overrides THEMESORT_TRAINING_DIR)
    #[arg(long, global = true)]
    training_dir: Option<PathBuf>,

    /// Directory of documents to classify (overrides THEMESORT_INBOX_DIR)
    #[arg(long, global = true)]
    inbox_dir: Option<PathBuf>,

    /// Where theme directories are created (overrides THEMESORT_OUTPUT_DIR)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Ground-truth labels file (overrides THEMESORT_LABELS)
    #[arg(long, global = true)]
    labels: Option<PathBuf>,

    /// Stop-word list: basic, english or none (overrides THEMESORT_STOP_WORDS)
    #[arg(long, global = true)]
    stop_words: Option<StopWords>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the model and show per-theme training statistics
    Train,

    /// Print the predicted theme of specific files
    Classify {
        /// Files to classify
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Also print every theme's log-score
        #[arg(long)]
        scores: bool,
    },

    /// Classify the inbox and move each file into its theme directory
    Sort {
        /// Copy instead of move
        #[arg(long, conflicts_with = "dry_run")]
        copy: bool,

        /// Show where files would go without touching them
        #[arg(long)]
        dry_run: bool,

        /// Also write the run report as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Classify the inbox without moving anything and report accuracy against the labels file
    Evaluate,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("themesort=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = merge_config(Config::load()?, &cli);
    let tokenizer = Tokenizer::new(config.stop_words);

    match cli.command {
        Commands::Train => {
            let stats = load_statistics(&config.training_dir, &tokenizer)?;
            themesort::output::terminal::display_statistics(&stats);
            let classifier = train_from(&stats, &config.training_dir)?;
            info!(
                vocabulary = classifier.vocabulary().len(),
                "Training pass complete"
            );
            println!("\n{}", "Model is ready to classify.".bold());
        }

        Commands::Classify { files, scores } => {
            let classifier = train(&config.training_dir, &tokenizer)?;
            for path in &files {
                match tokenizer.read_distinct_words(path) {
                    Ok(words) => {
                        let ranked = classifier.rank(&words);
                        themesort::output::terminal::display_prediction(path, &ranked, scores);
                    }
                    Err(e) => {
                        warn!(error = %e, "Skipping file");
                        println!("{}  {}", path.display(), format!("Error: {e}").red());
                    }
                }
            }
        }

        Commands::Sort {
            copy,
            dry_run,
            json,
        } => {
            let mode = if dry_run {
                RelocateMode::DryRun
            } else if copy {
                RelocateMode::Copy
            } else {
                RelocateMode::Move
            };

            let classifier = train(&config.training_dir, &tokenizer)?;
            println!("Classifying {}...", config.inbox_dir.display());

            let report = themesort::pipeline::sort::run(
                &classifier,
                &tokenizer,
                &config.inbox_dir,
                &config.output_dir,
                mode,
            )?;
            themesort::output::terminal::display_sort_report(&report);

            if let Some(path) = json {
                themesort::output::write_json_report(&report, &path)?;
                println!(
                    "\n{}",
                    format!("JSON report saved to: {}", path.display()).bold()
                );
            }
        }

        Commands::Evaluate => {
            let labels_path = config.require_labels()?;
            let labels = themesort::labels::Labels::load(labels_path)?;
            info!(labels = labels.len(), "Loaded labels");

            let classifier = train(&config.training_dir, &tokenizer)?;
            let report = themesort::pipeline::sort::run(
                &classifier,
                &tokenizer,
                &config.inbox_dir,
                &config.output_dir,
                RelocateMode::DryRun,
            )?;

            let accuracy = themesort::pipeline::evaluate::evaluate(&report, &labels);
            themesort::output::terminal::display_accuracy(&accuracy);
        }
    }

    Ok(())
}

/// Apply command-line overrides on top of the environment configuration.
fn merge_config(mut config: Config, cli: &Cli) -> Config {
    if let Some(dir) = &cli.training_dir {
        config.training_dir = dir.clone();
    }
    if let Some(dir) = &cli.inbox_dir {
        config.inbox_dir = dir.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(path) = &cli.labels {
        config.labels_path = Some(path.clone());
    }
    if let Some(stop_words) = cli.stop_words {
        config.stop_words = stop_words;
    }
    config
}

/// Read the training corpus, turning engine errors into actionable messages.
fn load_statistics(training_dir: &Path, tokenizer: &Tokenizer) -> Result<CorpusStatistics> {
    println!("Reading training corpus from {}...", training_dir.display());
    match build_statistics(training_dir, tokenizer) {
        Ok(stats) => Ok(stats),
        Err(ClassifyError::MissingTrainingRoot(path)) => anyhow::bail!(
            "Training directory {} does not exist.\n\
             Create one subdirectory per theme and fill each with example documents,\n\
             or point --training-dir / THEMESORT_TRAINING_DIR at an existing corpus.",
            path.display()
        ),
        Err(e) if e.is_fatal() => Err(anyhow::Error::new(e).context("No usable training corpus")),
        Err(e) => Err(anyhow::Error::new(e).context(format!(
            "Failed to read training corpus in {}",
            training_dir.display()
        ))),
    }
}

/// Build the classifier for this run. Aborts before any document is scored
/// when the corpus has no themes or no words.
fn train(training_dir: &Path, tokenizer: &Tokenizer) -> Result<NaiveBayesClassifier> {
    let stats = load_statistics(training_dir, tokenizer)?;
    train_from(&stats, training_dir)
}

fn train_from(stats: &CorpusStatistics, training_dir: &Path) -> Result<NaiveBayesClassifier> {
    match NaiveBayesClassifier::train(stats, ScoringConfig::default()) {
        Ok(classifier) => Ok(classifier),
        Err(ClassifyError::NoThemes) => anyhow::bail!(
            "No themes found in {}. Each theme must be a subdirectory of the training directory.",
            training_dir.display()
        ),
        Err(ClassifyError::EmptyVocabulary) => anyhow::bail!(
            "The training documents in {} contain no usable words. Nothing can be classified.",
            training_dir.display()
        ),
        Err(e) if e.is_fatal() => Err(anyhow::Error::new(e).context("No usable model")),
        Err(e) => Err(e.into()),
    }
}
