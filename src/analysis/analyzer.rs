//! Analyzer implementations that combine char filters, a tokenizer and
//! token filters.
//!
//! # Available Analyzers
//!
//! - [`pipeline::PipelineAnalyzer`] - Custom tokenizer + filter chains
//! - [`language::english::EnglishAnalyzer`] - The article normalization pipeline

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod language;
pub mod pipeline;
