//! Stemming.
//!
//! [`StemFilter`] replaces each token with its stem. The algorithm is
//! pluggable through the [`Stemmer`] trait; [`PorterStemmer`] is the
//! default.

use std::fmt;
use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

pub mod porter;

pub use porter::PorterStemmer;

/// A stemming algorithm.
///
/// Must be deterministic: documents and queries are stemmed separately
/// and only match when equal words give equal stems.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;

    fn name(&self) -> &'static str;
}

/// Token filter applying a [`Stemmer`] to every token that is not stopped.
#[derive(Clone)]
pub struct StemFilter {
    stemmer: Arc<dyn Stemmer>,
}

impl StemFilter {
    /// A filter using the Porter stemmer.
    pub fn new() -> Self {
        Self::with_stemmer(Arc::new(PorterStemmer::new()))
    }

    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }

    pub fn stemmer(&self) -> &Arc<dyn Stemmer> {
        &self.stemmer
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmer = Arc::clone(&self.stemmer);
        Ok(Box::new(tokens.map(move |token| {
            if token.is_stopped() {
                return token;
            }
            let stem = stemmer.stem(&token.text);
            token.with_text(stem)
        })))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    struct SuffixStripper;

    impl Stemmer for SuffixStripper {
        fn stem(&self, word: &str) -> String {
            word.trim_end_matches('s').to_string()
        }

        fn name(&self) -> &'static str {
            "suffix_stripper"
        }
    }

    fn stem_all(filter: &StemFilter, tokens: Vec<Token>) -> Vec<String> {
        filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|token| token.text)
            .collect()
    }

    #[test]
    fn test_porter_by_default() {
        let stems = stem_all(
            &StemFilter::new(),
            vec![
                Token::new("running", 0),
                Token::new("elections", 1),
                Token::new("flies", 2).stop(),
            ],
        );

        assert_eq!(stems, vec!["run", "elect", "flies"]);
    }

    #[test]
    fn test_custom_stemmer() {
        let filter = StemFilter::with_stemmer(Arc::new(SuffixStripper));

        assert_eq!(stem_all(&filter, vec![Token::new("pets", 0)]), vec!["pet"]);
        assert_eq!(
            format!("{filter:?}"),
            "StemFilter { stemmer: \"suffix_stripper\" }"
        );
    }
}
