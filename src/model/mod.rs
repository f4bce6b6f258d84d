// Classification engine: smoothed probabilities, log-scoring and arg-max.

pub mod naive_bayes;
pub mod probability;
pub mod scorer;
pub mod traits;
