//! Ranking of the corpus against a query.
//!
//! - [`bm25`] - Corpus statistics and the BM25 scoring function
//! - [`ranking`] - The [`Ranker`](ranking::Ranker), score sets and top-k selection

pub mod bm25;
pub mod ranking;
