//! # newsrank
//!
//! Rank a collection of news articles against a query with BM25, expand
//! the query with a text-generation service, evaluate both rankings and
//! chart the results.
//!
//! ## Features
//!
//! - English text analysis pipeline (punctuation stripping, Unicode word
//!   segmentation, stopwords, Porter stemming)
//! - BM25 scoring with configurable IDF
//! - Query expansion through an OpenAI-compatible chat completions API
//! - Precision, recall and F1 against pluggable relevance judgments
//! - PNG bar charts of the top-ranked articles

pub mod analysis;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod evaluation;
pub mod expansion;
pub mod pipeline;
pub mod preprocess;
pub mod report;
pub mod scoring;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
