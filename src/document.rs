//! Article documents and the corpus they form.
//!
//! # Core Components
//!
//! - [`document::Document`] - One article: `title`, `content`, optional
//!   `processed_text`, plus any other JSON fields of the input line
//! - [`corpus::Corpus`] - The ordered collection of articles
//! - [`jsonl`] - Reading and writing newline-delimited JSON collections
//!
//! # Examples
//!
//! ```
//! use newsrank::document::corpus::Corpus;
//! use newsrank::document::document::Document;
//!
//! let corpus = Corpus::new(vec![
//!     Document::new("Cats", "cats are great pets"),
//!     Document::new("Dogs", "dogs are loyal companions"),
//! ]);
//!
//! assert_eq!(corpus.len(), 2);
//! assert_eq!(corpus.get(1).unwrap().title(), "Dogs");
//! ```

pub mod corpus;
#[allow(clippy::module_inception)]
pub mod document;
pub mod jsonl;
