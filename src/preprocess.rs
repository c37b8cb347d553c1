//! Corpus preprocessing.
//!
//! Adds a `processed_text` field, the analyzer's normalized form of
//! `content`, to every article of a collection.
//!
//! # Examples
//!
//! ```
//! use newsrank::analysis::analyzer::language::english::EnglishAnalyzer;
//! use newsrank::preprocess::normalize;
//!
//! let analyzer = EnglishAnalyzer::new().unwrap();
//! assert_eq!(normalize(&analyzer, "Cats, CATS!! running").unwrap(), "cat cat run");
//! ```

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::document::corpus::Corpus;
use crate::document::jsonl::{read_corpus, write_corpus};
use crate::error::Result;

/// Outcome of [`preprocess_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessReport {
    /// Documents written to the output file.
    pub documents: usize,
    /// Documents whose normalized text is empty.
    pub empty_documents: usize,
    /// Where the preprocessed collection was written.
    pub output_path: PathBuf,
}

/// Normalize a text into space-separated terms.
pub fn normalize(analyzer: &dyn Analyzer, text: &str) -> Result<String> {
    analyzer.normalize(text)
}

/// Set `processed_text` on every document of the corpus.
///
/// Returns the number of documents that normalized to an empty string.
pub fn preprocess_corpus(analyzer: &dyn Analyzer, corpus: &mut Corpus) -> Result<usize> {
    let mut empty = 0;
    for document in corpus.iter_mut() {
        let processed = normalize(analyzer, document.content())?;
        if processed.is_empty() {
            debug!(
                "Document {} ({:?}) has no terms left after normalization",
                document.doc_id(),
                document.title()
            );
            empty += 1;
        }
        document.set_processed_text(processed);
    }
    Ok(empty)
}

/// Preprocess a newline-delimited JSON collection into a new file.
///
/// The whole input is read and normalized before the output is created, so
/// a missing or malformed input leaves no output file behind. An existing
/// output file is overwritten.
pub fn preprocess_file<I, O>(analyzer: &dyn Analyzer, input: I, output: O) -> Result<PreprocessReport>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    info!("Reading raw documents from {}", input.display());
    let mut corpus = read_corpus(input)?;

    info!(
        "Normalizing {} documents with the {} analyzer",
        corpus.len(),
        analyzer.name()
    );
    let empty_documents = preprocess_corpus(analyzer, &mut corpus)?;
    if empty_documents > 0 {
        warn!("{empty_documents} documents have an empty processed_text");
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_corpus(output, &corpus)?;
    info!("Wrote {} documents to {}", corpus.len(), output.display());

    Ok(PreprocessReport {
        documents: corpus.len(),
        empty_documents,
        output_path: output.to_path_buf(),
    })
}
