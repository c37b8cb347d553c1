//! Newline-delimited JSON article collections.
//!
//! Each non-blank line holds one JSON object:
//! ```jsonl
//! {"title": "Rust 2024 released", "content": "The Rust team announced ..."}
//! {"title": "Elections", "content": "Voters went to the polls ...", "source": "wire"}
//! ```
//!
//! Reading is all-or-nothing: the first malformed line aborts with a
//! [`RankError::Dataset`] naming its 1-based line number.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::document::corpus::Corpus;
use crate::document::document::Document;
use crate::error::{RankError, Result};

/// Read a corpus from a file.
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let corpus = parse_corpus(BufReader::new(file))?;
    debug!("Read {} documents from {}", corpus.len(), path.display());
    Ok(corpus)
}

/// Parse a corpus from any buffered reader.
pub fn parse_corpus<R: BufRead>(reader: R) -> Result<Corpus> {
    let mut documents = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        documents.push(parse_json_line(index + 1, &line)?);
    }

    Ok(Corpus::new(documents))
}

/// Parse a single JSON line into a Document.
fn parse_json_line(line_number: usize, line: &str) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| RankError::dataset(line_number, format!("invalid JSON: {e}")))?;

    Document::from_value(value).map_err(|e| match e {
        RankError::Parse(message) => RankError::dataset(line_number, message),
        other => other,
    })
}

/// Write a corpus, one document per line, replacing any existing file.
pub fn write_corpus<P: AsRef<Path>>(path: P, corpus: &Corpus) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_documents(&mut writer, corpus)?;
    writer.flush()?;
    debug!("Wrote {} documents to {}", corpus.len(), path.display());
    Ok(())
}

/// Serialize documents as newline-delimited JSON.
pub fn write_documents<W: Write>(writer: &mut W, corpus: &Corpus) -> Result<()> {
    for document in corpus {
        serde_json::to_writer(&mut *writer, document)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
