// Text handling: the tokenizer shared by training and classification.

pub mod tokenizer;
