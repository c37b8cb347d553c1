//! Query ranking over a preprocessed corpus.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use newsrank::analysis::analyzer::language::english::EnglishAnalyzer;
//! use newsrank::document::corpus::Corpus;
//! use newsrank::document::document::Document;
//! use newsrank::scoring::bm25::Bm25Config;
//! use newsrank::scoring::ranking::{QueryVariant, Ranker};
//!
//! let corpus = Corpus::new(vec![
//!     Document::new("A", "cats are great pets"),
//!     Document::new("B", "dogs are loyal companions"),
//! ]);
//! let ranker = Ranker::new(Arc::new(EnglishAnalyzer::new().unwrap()), &corpus, Bm25Config::default()).unwrap();
//!
//! let scores = ranker.score_query("cats", QueryVariant::Simple).unwrap();
//! let top = scores.top_k(10);
//! assert_eq!(top[0].doc_id, 0);
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::document::corpus::Corpus;
use crate::error::Result;
use crate::scoring::bm25::{Bm25Config, Bm25Index};

/// Which form of the user's query a ranking was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryVariant {
    /// The query exactly as entered.
    Simple,
    /// The query replaced by the expansion service's output.
    Expanded,
}

impl QueryVariant {
    /// Both variants, in reporting order.
    pub const ALL: [QueryVariant; 2] = [QueryVariant::Expanded, QueryVariant::Simple];

    /// Human-readable label used in chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            QueryVariant::Simple => "Simple Query",
            QueryVariant::Expanded => "Extended Query",
        }
    }

    /// Identifier used in file names.
    pub fn slug(&self) -> &'static str {
        match self {
            QueryVariant::Simple => "simple_query",
            QueryVariant::Expanded => "expanded_query",
        }
    }
}

impl fmt::Display for QueryVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryVariant::Simple => write!(f, "simple"),
            QueryVariant::Expanded => write!(f, "expanded"),
        }
    }
}

/// One entry of a top-k list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedDocument {
    /// 1-based rank.
    pub rank: usize,
    pub doc_id: usize,
    pub score: f32,
}

/// One score per document, indexed by document id.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSet {
    variant: QueryVariant,
    scores: Vec<f32>,
}

impl ScoreSet {
    pub fn new(variant: QueryVariant, scores: Vec<f32>) -> Self {
        ScoreSet { variant, scores }
    }

    pub fn variant(&self) -> QueryVariant {
        self.variant
    }

    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Score of a document, if the id is in range.
    pub fn get(&self, doc_id: usize) -> Option<f32> {
        self.scores.get(doc_id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The `k` highest scoring documents, best first.
    ///
    /// Equal scores keep corpus order. Documents scoring 0 are included
    /// when fewer than `k` documents match, so the result always has
    /// `min(k, len)` entries.
    pub fn top_k(&self, k: usize) -> Vec<RankedDocument> {
        let mut doc_ids: Vec<usize> = (0..self.scores.len()).collect();
        // sort_by is stable, so ties stay in ascending doc id order.
        doc_ids.sort_by(|&a, &b| self.scores[b].total_cmp(&self.scores[a]));

        doc_ids
            .into_iter()
            .take(k)
            .enumerate()
            .map(|(position, doc_id)| RankedDocument {
                rank: position + 1,
                doc_id,
                score: self.scores[doc_id],
            })
            .collect()
    }
}

/// BM25 ranker bound to one corpus and one analyzer.
///
/// Queries are normalized with the same analyzer that produced the
/// corpus' `processed_text`, so query and document terms line up.
pub struct Ranker {
    analyzer: Arc<dyn Analyzer>,
    index: Bm25Index,
}

impl Ranker {
    /// Build the ranker.
    ///
    /// Documents are tokenized by splitting `processed_text` on whitespace.
    /// A document that was never preprocessed is normalized from its
    /// `content` on the fly.
    pub fn new(analyzer: Arc<dyn Analyzer>, corpus: &Corpus, config: Bm25Config) -> Result<Self> {
        let mut token_lists: Vec<Vec<String>> = Vec::with_capacity(corpus.len());
        for document in corpus {
            let tokens = match document.processed_text() {
                Some(processed) => split_terms(processed),
                None => {
                    debug!(
                        "Document {} has no processed_text, normalizing content",
                        document.doc_id()
                    );
                    split_terms(&analyzer.normalize(document.content())?)
                }
            };
            token_lists.push(tokens);
        }

        let index = Bm25Index::build(&token_lists, config);
        debug!(
            "Built BM25 index: {} documents, {} terms, average length {:.2}",
            index.num_docs(),
            index.vocabulary_size(),
            index.avg_doc_length()
        );

        Ok(Ranker { analyzer, index })
    }

    /// Normalize a query into the terms it is scored with.
    pub fn analyze_query(&self, text: &str) -> Result<Vec<String>> {
        Ok(split_terms(&self.analyzer.normalize(text)?))
    }

    /// Score every document against the query text.
    pub fn score_query(&self, text: &str, variant: QueryVariant) -> Result<ScoreSet> {
        let terms = self.analyze_query(text)?;
        debug!("Scoring {variant} query terms {terms:?}");
        Ok(ScoreSet::new(variant, self.index.score(&terms)))
    }

    pub fn index(&self) -> &Bm25Index {
        &self.index
    }

    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }
}

impl fmt::Debug for Ranker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ranker")
            .field("analyzer", &self.analyzer.name())
            .field("documents", &self.index.num_docs())
            .finish()
    }
}

fn split_terms(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
