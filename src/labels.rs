// Ground-truth labels for accuracy reporting.
//
// Format: one `<file name> <theme>` pair per line, separated by whitespace.
// Blank lines and lines starting with '#' are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ClassifyError;

/// file name -> expected theme
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Labels {
    entries: HashMap<String, String>,
}

impl Labels {
    pub fn parse(text: &str) -> Result<Self, ClassifyError> {
        let mut entries = HashMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (Some(file), Some(theme)) = (fields.next(), fields.next()) else {
                return Err(ClassifyError::Labels {
                    line: idx + 1,
                    reason: "expected '<file name> <theme>'".to_string(),
                });
            };
            if fields.next().is_some() {
                return Err(ClassifyError::Labels {
                    line: idx + 1,
                    reason: "too many fields".to_string(),
                });
            }

            entries.insert(file.to_string(), theme.to_string());
        }

        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read labels file {}", path.display()))?;
        Ok(Self::parse(&text)?)
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.entries.get(file_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
