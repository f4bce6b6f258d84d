use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::text::tokenizer::StopWords;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// flags override whatever is set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the labeled corpus: one subdirectory per theme
    pub training_dir: PathBuf,
    /// Directory of documents waiting to be classified
    pub inbox_dir: PathBuf,
    /// Where theme directories are created for sorted documents
    pub output_dir: PathBuf,
    /// Optional ground-truth labels for `evaluate`
    pub labels_path: Option<PathBuf>,
    /// Stop-word list used by the tokenizer (training and classification alike)
    pub stop_words: StopWords,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            training_dir: PathBuf::from("./training"),
            inbox_dir: PathBuf::from("./inbox"),
            output_dir: PathBuf::from("./sorted"),
            labels_path: None,
            stop_words: StopWords::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let stop_words = match env::var("THEMESORT_STOP_WORDS") {
            Ok(raw) => raw.parse::<StopWords>().map_err(anyhow::Error::msg)?,
            Err(_) => defaults.stop_words,
        };

        Ok(Self {
            training_dir: env::var("THEMESORT_TRAINING_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.training_dir),
            inbox_dir: env::var("THEMESORT_INBOX_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.inbox_dir),
            output_dir: env::var("THEMESORT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            labels_path: env::var("THEMESORT_LABELS").ok().map(PathBuf::from),
            stop_words,
        })
    }

    /// Check that a labels file is configured.
    /// Call this before any accuracy evaluation.
    pub fn require_labels(&self) -> Result<&PathBuf> {
        match &self.labels_path {
            Some(path) => Ok(path),
            None => anyhow::bail!(
                "No labels file configured. Pass --labels <FILE> or set THEMESORT_LABELS\n\
                 in your .env file (one '<file name> <theme>' pair per line)."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_labels() {
        let mut config = Config::default();
        assert!(config.require_labels().is_err());
        config.labels_path = Some(PathBuf::from("labels.txt"));
        assert_eq!(config.require_labels().unwrap(), &PathBuf::from("labels.txt"));
    }
}
