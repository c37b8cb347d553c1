use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// The normalization applied to both article text and queries.
///
/// The text is lowercased and stripped of punctuation before tokenization.
/// English stop words are then dropped and the rest are Porter-stemmed.
pub struct EnglishAnalyzer {
    inner: PipelineAnalyzer,
}

impl EnglishAnalyzer {
    pub fn new() -> Result<Self> {
        let tokenizer = Arc::new(UnicodeWordTokenizer::new());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::strip_punctuation()?))
            .add_filter(Arc::new(StopFilter::english()))
            .add_filter(Arc::new(StemFilter::new()))
            .with_name("english");

        Ok(Self { inner: analyzer })
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for EnglishAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

impl Debug for EnglishAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnglishAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_english_analyzer() {
        let analyzer = EnglishAnalyzer::new().unwrap();

        let tokens: Vec<Token> = analyzer
            .analyze("Hello the world and test")
            .unwrap()
            .collect();

        // "the" and "and" should be filtered out
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
    }

    #[test]
    fn test_normalize_article_text() {
        let analyzer = EnglishAnalyzer::new().unwrap();

        assert_eq!(
            analyzer.normalize("The Cats are running!").unwrap(),
            "cat run"
        );
        assert_eq!(analyzer.normalize("Cats, CATS!!").unwrap(), "cat cat");
        assert_eq!(analyzer.normalize("Elections: the economy").unwrap(), "elect economi");
    }

    #[test]
    fn test_normalize_degenerate_input() {
        let analyzer = EnglishAnalyzer::new().unwrap();

        assert_eq!(analyzer.normalize("").unwrap(), "");
        assert_eq!(analyzer.normalize("!!! ... ???").unwrap(), "");
        assert_eq!(analyzer.normalize("the and of").unwrap(), "");
    }

    #[test]
    fn test_contractions_lose_apostrophe() {
        let analyzer = EnglishAnalyzer::new().unwrap();

        // "don't" becomes "dont", which is not on the stop list.
        assert_eq!(analyzer.normalize("don't").unwrap(), "dont");
    }

    #[test]
    fn test_normalize_is_idempotent_on_vocabulary() {
        let analyzer = EnglishAnalyzer::new().unwrap();
        let once = analyzer.normalize("cat run").unwrap();

        assert_eq!(analyzer.normalize(&once).unwrap(), once);
    }

    #[test]
    fn test_non_latin_text_survives() {
        let analyzer = EnglishAnalyzer::new().unwrap();

        assert_eq!(analyzer.normalize("Müller in Zürich").unwrap(), "müller zürich");
    }

    #[test]
    fn test_dotted_capital_matches_plain_query() {
        let analyzer = EnglishAnalyzer::new().unwrap();

        assert_eq!(analyzer.normalize("İstanbul").unwrap(), "istanbul");
        assert_eq!(
            analyzer.normalize("Floods in İSTANBUL").unwrap(),
            analyzer.normalize("floods in istanbul").unwrap()
        );
    }

    #[test]
    fn test_english_analyzer_name() {
        let analyzer = EnglishAnalyzer::new().unwrap();

        assert_eq!(analyzer.name(), "english");
        assert_eq!(analyzer.inner().pipeline_name(), "english");
    }
}
