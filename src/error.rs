// Engine error taxonomy.
//
// Everything the training/classification pipeline can fail with. The CLI
// wraps these in anyhow at the boundary; library callers can match on the
// variant to decide whether to abort the run or skip a single file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The training root does not exist (or is not a directory).
    #[error("training directory not found: {}", .0.display())]
    MissingTrainingRoot(PathBuf),

    /// Training found no theme directories at all.
    #[error("no themes found in the training corpus")]
    NoThemes,

    /// Themes exist but no words were observed in any training document.
    #[error("training corpus produced an empty vocabulary")]
    EmptyVocabulary,

    /// A document could not be read. Per-file, the batch continues.
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A classified document could not be moved or copied into its theme directory.
    #[error("cannot relocate {}: {source}", path.display())]
    Relocate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A malformed line in the labels file.
    #[error("labels file line {line}: {reason}")]
    Labels { line: usize, reason: String },
}

impl ClassifyError {
    /// True for errors that mean "there is no usable model", as opposed to a
    /// single bad input file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ClassifyError::MissingTrainingRoot(_)
                | ClassifyError::NoThemes
                | ClassifyError::EmptyVocabulary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_kinds() {
        assert!(ClassifyError::NoThemes.is_fatal());
        assert!(ClassifyError::EmptyVocabulary.is_fatal());
        assert!(ClassifyError::MissingTrainingRoot(PathBuf::from("x")).is_fatal());
        let unreadable = ClassifyError::Unreadable {
            path: PathBuf::from("doc.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(!unreadable.is_fatal());
    }

    #[test]
    fn test_messages_name_the_path() {
        let err = ClassifyError::MissingTrainingRoot(PathBuf::from("/nope/training"));
        assert!(err.to_string().contains("/nope/training"));
        let err = ClassifyError::Labels {
            line: 3,
            reason: "missing theme".to_string(),
        };
        assert_eq!(err.to_string(), "labels file line 3: missing theme");
    }
}
