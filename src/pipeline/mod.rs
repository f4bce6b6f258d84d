// Batch pipelines built on the classification engine.

pub mod evaluate;
pub mod sort;
