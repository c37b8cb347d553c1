//! Language-specific analyzers.
//!
//! - [`english`] - English text normalization: punctuation removal, Unicode
//!   word tokenization, lowercasing, English stop words and Porter stemming
//!
//! # Examples
//!
//! ```
//! use newsrank::analysis::analyzer::analyzer::Analyzer;
//! use newsrank::analysis::analyzer::language::english::EnglishAnalyzer;
//!
//! let analyzer = EnglishAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Hello the world").unwrap().collect();
//!
//! // "the" is filtered as a stop word
//! assert_eq!(tokens.len(), 2);
//! ```

pub mod english;
