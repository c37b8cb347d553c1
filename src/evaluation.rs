//! Ranking quality evaluation.
//!
//! - [`relevance`] - Relevance judges deciding which documents count as relevant
//! - [`metrics`] - Precision, recall and F1 of a top-k list

pub mod metrics;
pub mod relevance;
