pub mod analyzer;
pub mod tokenizer;
pub mod filters;
