// Directory listing for the training corpus and the inbox.
//
// Only regular files are documents. Nested directories, symlinks to
// directories and other special entries are skipped without comment.
// Results are sorted so theme order and document order are reproducible
// across platforms and runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Theme names under a training root: one per immediate subdirectory, sorted.
pub fn list_themes(root: &Path) -> io::Result<Vec<String>> {
    let mut themes = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            themes.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    themes.sort();
    Ok(themes)
}

/// Regular files directly inside `dir`, sorted by path.
pub fn list_documents(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Candidate documents waiting in an inbox directory.
pub fn list_candidates(inbox: &Path) -> io::Result<Vec<PathBuf>> {
    list_documents(inbox)
}
