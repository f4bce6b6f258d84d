// Inbox sorting pipeline: classify every candidate and file it under its theme.
//
// The classifier is built once and shared read-only across the batch. A
// candidate that cannot be read or relocated is recorded as failed and the
// batch moves on; only a missing inbox aborts the run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::corpus::reader;
use crate::error::ClassifyError;
use crate::model::traits::ThemeClassifier;
use crate::text::tokenizer::Tokenizer;

/// What to do with a classified file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelocateMode {
    /// Rename into the theme directory (copy + remove across filesystems)
    Move,
    /// Copy into the theme directory, leaving the inbox untouched
    Copy,
    /// Compute destinations only
    DryRun,
}

/// Per-candidate result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Moved { destination: PathBuf },
    Copied { destination: PathBuf },
    Planned { destination: PathBuf },
    Unclassified,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SortEntry {
    pub file: PathBuf,
    pub theme: Option<String>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl SortEntry {
    /// File name used to match the entry against a labels file.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Everything that happened during one sorting run.
#[derive(Debug, Clone, Serialize)]
pub struct SortReport {
    pub generated_at: String,
    pub inbox: PathBuf,
    pub output_root: PathBuf,
    pub mode: RelocateMode,
    pub entries: Vec<SortEntry>,
}

impl SortReport {
    /// Entries that received a theme and were (or would be) relocated.
    pub fn sorted_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome,
                    Outcome::Moved { .. } | Outcome::Copied { .. } | Outcome::Planned { .. }
                )
            })
            .count()
    }

    pub fn unclassified_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == Outcome::Unclassified)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Failed { .. }))
            .count()
    }
}

/// Classify every regular file in `inbox` and relocate it under
/// `output_root/<theme>/`.
pub fn run(
    classifier: &dyn ThemeClassifier,
    tokenizer: &Tokenizer,
    inbox: &Path,
    output_root: &Path,
    mode: RelocateMode,
) -> Result<SortReport> {
    if !inbox.is_dir() {
        anyhow::bail!("Inbox directory not found: {}", inbox.display());
    }
    let candidates = reader::list_candidates(inbox)
        .with_context(|| format!("Failed to list inbox {}", inbox.display()))?;

    info!(candidates = candidates.len(), mode = ?mode, "Sorting inbox");

    let pb = ProgressBar::new(candidates.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("  Sorting [{bar:30}] {pos}/{len} ({eta})")?);

    let mut entries = Vec::with_capacity(candidates.len());
    for path in candidates {
        entries.push(sort_one(classifier, tokenizer, &path, output_root, mode));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let report = SortReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        inbox: inbox.to_path_buf(),
        output_root: output_root.to_path_buf(),
        mode,
        entries,
    };
    info!(
        sorted = report.sorted_count(),
        unclassified = report.unclassified_count(),
        failed = report.failed_count(),
        "Inbox sorted"
    );
    Ok(report)
}

fn sort_one(
    classifier: &dyn ThemeClassifier,
    tokenizer: &Tokenizer,
    path: &Path,
    output_root: &Path,
    mode: RelocateMode,
) -> SortEntry {
    let words = match tokenizer.read_distinct_words(path) {
        Ok(words) => words,
        Err(e) => {
            warn!(error = %e, "Skipping unreadable candidate");
            return SortEntry {
                file: path.to_path_buf(),
                theme: None,
                outcome: Outcome::Failed {
                    error: e.to_string(),
                },
            };
        }
    };

    let Some(theme) = classifier.classify(&words) else {
        return SortEntry {
            file: path.to_path_buf(),
            theme: None,
            outcome: Outcome::Unclassified,
        };
    };

    let outcome = match relocate(path, output_root, &theme, mode) {
        Ok(destination) => match mode {
            RelocateMode::Move => Outcome::Moved { destination },
            RelocateMode::Copy => Outcome::Copied { destination },
            RelocateMode::DryRun => Outcome::Planned { destination },
        },
        Err(e) => {
            warn!(error = %e, theme = %theme, "Failed to relocate candidate");
            Outcome::Failed {
                error: e.to_string(),
            }
        }
    };

    SortEntry {
        file: path.to_path_buf(),
        theme: Some(theme),
        outcome,
    }
}

/// Place `path` into `output_root/<theme>/<file name>`, returning the destination.
///
/// Existing files at the destination are never overwritten.
pub fn relocate(
    path: &Path,
    output_root: &Path,
    theme: &str,
    mode: RelocateMode,
) -> Result<PathBuf, ClassifyError> {
    let relocate_err = |source: io::Error| ClassifyError::Relocate {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path.file_name().ok_or_else(|| {
        relocate_err(io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))
    })?;
    let theme_dir = output_root.join(theme);
    let destination = theme_dir.join(file_name);

    if mode == RelocateMode::DryRun {
        return Ok(destination);
    }

    if destination.exists() {
        return Err(relocate_err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", destination.display()),
        )));
    }

    fs::create_dir_all(&theme_dir).map_err(relocate_err)?;

    match mode {
        RelocateMode::Move => move_file(path, &destination).map_err(relocate_err)?,
        RelocateMode::Copy => {
            fs::copy(path, &destination).map_err(relocate_err)?;
        }
        RelocateMode::DryRun => {}
    }

    Ok(destination)
}

/// Rename, falling back to copy + remove only when the rename crosses
/// filesystems. A failed remove takes the copy back out so the file is never
/// left in both places.
fn move_file(path: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(path, destination) {
        Ok(()) => Ok(()),
        Err(e) if crosses_devices(&e) => {
            fs::copy(path, destination)?;
            if let Err(e) = fs::remove_file(path) {
                let _ = fs::remove_file(destination);
                return Err(e);
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// EXDEV on Unix, ERROR_NOT_SAME_DEVICE on Windows.
fn crosses_devices(e: &io::Error) -> bool {
    let code = if cfg!(windows) { 17 } else { 18 };
    e.raw_os_error() == Some(code)
}
