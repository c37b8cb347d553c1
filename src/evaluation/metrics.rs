//! Precision, recall and F1 of a top-k list.
//!
//! Every document of the corpus is labelled relevant or not by a
//! [`RelevanceJudge`]; the prediction for a document is "it is in the top k".
//! Ratios with a zero denominator are reported as 0.
//!
//! # Examples
//!
//! ```
//! use newsrank::evaluation::metrics::Metrics;
//!
//! let metrics = Metrics::from_counts(2, 4, 2);
//! assert_eq!(metrics.precision, 0.5);
//! assert_eq!(metrics.recall, 1.0);
//! ```

use std::fmt;

use ahash::AHashSet;
use serde::Serialize;

use crate::document::corpus::Corpus;
use crate::evaluation::relevance::RelevanceJudge;
use crate::scoring::ranking::RankedDocument;

/// Evaluation of one ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Relevant documents in the top k.
    pub true_positives: usize,
    /// Size of the top k.
    pub predicted: usize,
    /// Relevant documents in the corpus.
    pub relevant: usize,
}

impl Metrics {
    /// Compute the metrics from confusion counts.
    pub fn from_counts(true_positives: usize, predicted: usize, relevant: usize) -> Self {
        let precision = ratio(true_positives, predicted);
        let recall = ratio(true_positives, relevant);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Metrics {
            precision,
            recall,
            f1,
            true_positives,
            predicted,
            relevant,
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Precision: {:.4}, Recall: {:.4}, F1-Score: {:.4}",
            self.precision, self.recall, self.f1
        )
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Evaluate a top-k list against the judge's labels over the whole corpus.
///
/// Entries whose id is outside the corpus are ignored; duplicates count once.
pub fn evaluate(corpus: &Corpus, top: &[RankedDocument], judge: &dyn RelevanceJudge) -> Metrics {
    let predicted: AHashSet<usize> = top
        .iter()
        .map(|ranked| ranked.doc_id)
        .filter(|&doc_id| doc_id < corpus.len())
        .collect();

    let mut relevant = 0;
    let mut true_positives = 0;
    for document in corpus {
        if judge.is_relevant(document) {
            relevant += 1;
            if predicted.contains(&document.doc_id()) {
                true_positives += 1;
            }
        }
    }

    Metrics::from_counts(true_positives, predicted.len(), relevant)
}
