//! Okapi BM25 over an in-memory token matrix.
//!
//! The score of document `d` for query terms `q1..qn` (duplicates counted) is
//!
//! ```text
//! Σ IDF(t) · tf(t, d) · (k1 + 1) / (tf(t, d) + k1 · (1 − b + b · |d| / avgdl))
//! ```
//!
//! # Examples
//!
//! ```
//! use newsrank::scoring::bm25::{Bm25Config, Bm25Index};
//!
//! let documents = vec![
//!     vec!["cat".to_string(), "great".to_string(), "pet".to_string()],
//!     vec!["dog".to_string(), "loyal".to_string(), "companion".to_string()],
//! ];
//! let index = Bm25Index::build(&documents, Bm25Config::default());
//!
//! let scores = index.score(&["cat"]);
//! assert!(scores[0] > 0.0);
//! assert_eq!(scores[1], 0.0);
//! ```

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// How inverse document frequency is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdfVariant {
    /// `ln(1 + (N − df + 0.5) / (df + 0.5))`, positive for every term.
    #[default]
    Plus1,
    /// `ln((N − df + 0.5) / (df + 0.5))`; negative values are replaced by
    /// `epsilon` times the mean IDF of the vocabulary.
    ///
    /// Terms present in exactly half of the documents get an IDF of zero,
    /// so on very small corpora a matching document can score 0.
    Okapi { epsilon: f32 },
}

impl IdfVariant {
    /// The Okapi variant with its customary epsilon of 0.25.
    pub fn okapi() -> Self {
        IdfVariant::Okapi { epsilon: 0.25 }
    }
}

/// BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Config {
    /// Term frequency saturation.
    pub k1: f32,
    /// Document length normalization.
    pub b: f32,
    pub idf: IdfVariant,
}

impl Default for Bm25Config {
    fn default() -> Self {
        Bm25Config {
            k1: 1.5,
            b: 0.75,
            idf: IdfVariant::Plus1,
        }
    }
}

/// Corpus statistics needed to score queries with BM25.
#[derive(Debug, Clone)]
pub struct Bm25Index {
    config: Bm25Config,
    term_frequencies: Vec<AHashMap<String, u32>>,
    doc_lengths: Vec<usize>,
    avg_doc_length: f32,
    document_frequencies: AHashMap<String, usize>,
    idf: AHashMap<String, f32>,
}

impl Bm25Index {
    /// Build the index from one token list per document.
    pub fn build<D: AsRef<[String]>>(documents: &[D], config: Bm25Config) -> Self {
        let mut term_frequencies = Vec::with_capacity(documents.len());
        let mut doc_lengths = Vec::with_capacity(documents.len());
        let mut document_frequencies: AHashMap<String, usize> = AHashMap::new();

        for tokens in documents {
            let tokens = tokens.as_ref();
            let mut frequencies: AHashMap<String, u32> = AHashMap::new();
            for token in tokens {
                *frequencies.entry(token.clone()).or_insert(0) += 1;
            }
            for term in frequencies.keys() {
                *document_frequencies.entry(term.clone()).or_insert(0) += 1;
            }
            doc_lengths.push(tokens.len());
            term_frequencies.push(frequencies);
        }

        let total_length: usize = doc_lengths.iter().sum();
        let avg_doc_length = if documents.is_empty() {
            0.0
        } else {
            total_length as f32 / documents.len() as f32
        };

        let idf = Self::compute_idf(&document_frequencies, documents.len(), config.idf);

        Bm25Index {
            config,
            term_frequencies,
            doc_lengths,
            avg_doc_length,
            document_frequencies,
            idf,
        }
    }

    fn compute_idf(
        document_frequencies: &AHashMap<String, usize>,
        num_docs: usize,
        variant: IdfVariant,
    ) -> AHashMap<String, f32> {
        let n = num_docs as f32;
        match variant {
            IdfVariant::Plus1 => document_frequencies
                .iter()
                .map(|(term, &df)| {
                    let df = df as f32;
                    (term.clone(), (1.0 + (n - df + 0.5) / (df + 0.5)).ln())
                })
                .collect(),
            IdfVariant::Okapi { epsilon } => {
                let mut idf: AHashMap<String, f32> = document_frequencies
                    .iter()
                    .map(|(term, &df)| {
                        let df = df as f32;
                        (term.clone(), ((n - df + 0.5) / (df + 0.5)).ln())
                    })
                    .collect();

                if !idf.is_empty() {
                    let mean = idf.values().sum::<f32>() / idf.len() as f32;
                    let floor = epsilon * mean;
                    for value in idf.values_mut() {
                        if *value < 0.0 {
                            *value = floor;
                        }
                    }
                }
                idf
            }
        }
    }

    /// Score every document for the query terms, indexed by document id.
    pub fn score<S: AsRef<str>>(&self, query_terms: &[S]) -> Vec<f32> {
        (0..self.num_docs())
            .map(|doc_id| self.score_document(doc_id, query_terms))
            .collect()
    }

    /// Score one document. Unknown document ids score 0.
    pub fn score_document<S: AsRef<str>>(&self, doc_id: usize, query_terms: &[S]) -> f32 {
        let Some(frequencies) = self.term_frequencies.get(doc_id) else {
            return 0.0;
        };
        let doc_length = self.doc_lengths[doc_id] as f32;
        let Bm25Config { k1, b, .. } = self.config;

        let mut total_score = 0.0;
        for term in query_terms {
            let term = term.as_ref();
            let tf = frequencies.get(term).copied().unwrap_or(0) as f32;
            // tf > 0 implies avgdl > 0.
            if tf == 0.0 {
                continue;
            }

            let idf = self.idf(term);
            let tf_component =
                (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * (doc_length / self.avg_doc_length)));
            total_score += idf * tf_component;
        }

        total_score
    }

    /// IDF of a term; 0 for terms outside the vocabulary.
    pub fn idf(&self, term: &str) -> f32 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Number of documents containing the term.
    pub fn doc_freq(&self, term: &str) -> usize {
        self.document_frequencies.get(term).copied().unwrap_or(0)
    }

    /// Occurrences of the term in a document.
    pub fn term_freq(&self, doc_id: usize, term: &str) -> u32 {
        self.term_frequencies
            .get(doc_id)
            .and_then(|frequencies| frequencies.get(term).copied())
            .unwrap_or(0)
    }

    pub fn doc_length(&self, doc_id: usize) -> Option<usize> {
        self.doc_lengths.get(doc_id).copied()
    }

    pub fn num_docs(&self) -> usize {
        self.doc_lengths.len()
    }

    pub fn avg_doc_length(&self) -> f32 {
        self.avg_doc_length
    }

    pub fn vocabulary_size(&self) -> usize {
        self.document_frequencies.len()
    }

    pub fn config(&self) -> &Bm25Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn pets() -> Vec<Vec<String>> {
        vec![tokens("cat great pet"), tokens("dog loyal companion")]
    }

    #[test]
    fn test_statistics() {
        let index = Bm25Index::build(&pets(), Bm25Config::default());

        assert_eq!(index.num_docs(), 2);
        assert_eq!(index.avg_doc_length(), 3.0);
        assert_eq!(index.vocabulary_size(), 6);
        assert_eq!(index.doc_freq("cat"), 1);
        assert_eq!(index.doc_freq("bird"), 0);
        assert_eq!(index.term_freq(0, "cat"), 1);
        assert_eq!(index.doc_length(1), Some(3));
        assert_eq!(index.doc_length(2), None);
    }

    #[test]
    fn test_matching_document_scores_positive() {
        let index = Bm25Index::build(&pets(), Bm25Config::default());
        let scores = index.score(&["cat"]);

        // idf = ln(2), tf component = 1 for an average-length document
        assert!((scores[0] - 2f32.ln()).abs() < 1e-6);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn test_unknown_terms_contribute_nothing() {
        let index = Bm25Index::build(&pets(), Bm25Config::default());

        assert_eq!(index.score(&["bird"]), vec![0.0, 0.0]);
        assert_eq!(index.score(&["cat", "bird"]), index.score(&["cat"]));
        assert_eq!(index.score::<&str>(&[]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_duplicate_query_terms_count_twice() {
        let index = Bm25Index::build(&pets(), Bm25Config::default());
        let once = index.score(&["cat"])[0];
        let twice = index.score(&["cat", "cat"])[0];

        assert!((twice - 2.0 * once).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic_in_term_frequency() {
        let documents = vec![
            tokens("vote vote vote poll"),
            tokens("vote vote poll poll"),
            tokens("vote poll poll poll"),
            tokens("sport game match team"),
        ];
        let index = Bm25Index::build(&documents, Bm25Config::default());
        let scores = index.score(&["vote"]);

        assert!(scores[0] > scores[1]);
        assert!(scores[1] > scores[2]);
        assert!(scores[2] > scores[3]);
    }

    #[test]
    fn test_longer_documents_score_lower() {
        let documents = vec![
            tokens("storm"),
            tokens("storm coast wind rain flood"),
            tokens("market"),
        ];
        let index = Bm25Index::build(&documents, Bm25Config::default());
        let scores = index.score(&["storm"]);

        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn test_b_zero_ignores_length() {
        let documents = vec![tokens("storm"), tokens("storm coast wind rain flood")];
        let config = Bm25Config {
            b: 0.0,
            ..Bm25Config::default()
        };
        let index = Bm25Index::build(&documents, config);
        let scores = index.score(&["storm"]);

        assert!((scores[0] - scores[1]).abs() < 1e-6);
    }

    #[test]
    fn test_okapi_idf_floor() {
        let config = Bm25Config {
            idf: IdfVariant::okapi(),
            ..Bm25Config::default()
        };

        // Two documents, every term in one of them: every raw IDF is 0.
        let index = Bm25Index::build(&pets(), config);
        assert_eq!(index.idf("cat"), 0.0);
        assert_eq!(index.score(&["cat"]), vec![0.0, 0.0]);

        // "common" is in 3 of 4 documents: raw IDF is negative and gets floored.
        let documents = vec![
            tokens("common alpha"),
            tokens("common beta"),
            tokens("common gamma"),
            tokens("delta"),
        ];
        let index = Bm25Index::build(&documents, config);
        let rare = ((4.0f32 - 1.0 + 0.5) / 1.5).ln();
        let common = ((4.0f32 - 3.0 + 0.5) / 3.5).ln();
        let mean = (4.0 * rare + common) / 5.0;

        assert!((index.idf("alpha") - rare).abs() < 1e-6);
        assert!((index.idf("common") - 0.25 * mean).abs() < 1e-6);
        assert!(index.idf("common") > 0.0);
    }

    #[test]
    fn test_empty_corpus_and_empty_documents() {
        let empty: Vec<Vec<String>> = Vec::new();
        let index = Bm25Index::build(&empty, Bm25Config::default());
        assert!(index.score(&["cat"]).is_empty());
        assert_eq!(index.avg_doc_length(), 0.0);

        let blank = vec![Vec::new(), Vec::new()];
        let index = Bm25Index::build(&blank, Bm25Config::default());
        assert_eq!(index.score(&["cat"]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_config_serde() {
        let config: Bm25Config =
            serde_json::from_str(r#"{"idf": {"kind": "plus1"}, "k1": 2.0}"#).unwrap();

        assert_eq!(config.k1, 2.0);
        assert_eq!(config.b, 0.75);
        assert_eq!(config.idf, IdfVariant::Plus1);
    }
}
