// Training corpus: directory listing and per-theme document statistics.

pub mod reader;
pub mod stats;
