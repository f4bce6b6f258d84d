// Themesort: sort plain-text documents into theme directories.
//
// This is the library root. The engine (corpus statistics, smoothed
// probabilities, Bernoulli Naive Bayes scoring) lives in `corpus` and
// `model`; `pipeline` and `output` are the batch and display layers the
// binary is built from.

pub mod config;
pub mod corpus;
pub mod error;
pub mod labels;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod text;

pub use error::ClassifyError;
