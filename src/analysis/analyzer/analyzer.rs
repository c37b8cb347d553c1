//! Core analyzer trait definition.
//!
//! Analyzers are the complete text processing pipeline:
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → BM25 index / query terms
//! ```
//!
//! # Examples
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use newsrank::analysis::analyzer::analyzer::Analyzer;
//! use newsrank::analysis::token::TokenStream;
//! use newsrank::error::Result;
//!
//! struct MyAnalyzer;
//!
//! impl Analyzer for MyAnalyzer {
//!     fn analyze(&self, text: &str) -> Result<TokenStream> {
//!         Ok(Box::new(std::iter::empty()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "my_analyzer"
//!     }
//! }
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so one analyzer can be shared between
/// the preprocessing step and query analysis.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use newsrank::analysis::analyzer::analyzer::Analyzer;
    /// use newsrank::analysis::analyzer::language::english::EnglishAnalyzer;
    ///
    /// let analyzer = EnglishAnalyzer::new().unwrap();
    /// let tokens: Vec<_> = analyzer.analyze("The quick brown foxes").unwrap().collect();
    ///
    /// assert_eq!(tokens.len(), 3);
    /// assert_eq!(tokens[2].text, "fox");
    /// ```
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Analyze `text` and join the surviving terms with single spaces.
    ///
    /// This is the normalized form stored as `processed_text` and the form
    /// queries are scored in.
    fn normalize(&self, text: &str) -> Result<String> {
        let terms: Vec<String> = self
            .analyze(text)?
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect();
        Ok(terms.join(" "))
    }
}
