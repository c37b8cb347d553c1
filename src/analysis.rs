//! Text analysis for newsrank.
//!
//! Raw article text and user queries go through the same pipeline:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Filters → Tokens
//! ```
//!
//! Documents and queries must share one analyzer instance, otherwise their
//! BM25 scores are not comparable.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
