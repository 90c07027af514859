//! The line-oriented crossword DSL: line grammar and tokenizer.

pub mod clue_line;
pub mod line;
pub mod tokenizer;

pub use line::{classify_line, strip_comment, validate_internal_regexes, LineKind};
pub use tokenizer::parse_dsl;
