//! Relevance judges.
//!
//! A judge labels each document of the corpus relevant or not for the
//! current evaluation. Closures over `&Document` are judges:
//!
//! ```
//! use newsrank::document::document::Document;
//! use newsrank::evaluation::relevance::RelevanceJudge;
//!
//! let judge = |doc: &Document| doc.title().contains("Election");
//! assert!(judge.is_relevant(&Document::new("Election night", "...")));
//! ```

use std::fs;
use std::path::Path;

use ahash::AHashSet;
use log::{debug, warn};

use crate::config::Config;
use crate::document::document::Document;
use crate::error::{RankError, Result};

/// Decides whether a document is relevant.
pub trait RelevanceJudge: Send + Sync {
    fn is_relevant(&self, document: &Document) -> bool;

    /// Get the name of this judge for logging.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> RelevanceJudge for F
where
    F: Fn(&Document) -> bool + Send + Sync,
{
    fn is_relevant(&self, document: &Document) -> bool {
        self(document)
    }
}

/// Treats every document as relevant.
///
/// With this judge precision is 1 whenever anything is ranked and recall
/// is `k / |corpus|`; the numbers say nothing about the query.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRelevant;

impl RelevanceJudge for AllRelevant {
    fn is_relevant(&self, _document: &Document) -> bool {
        true
    }

    fn name(&self) -> &str {
        "all_relevant"
    }
}

/// Relevance judgments given as a list of relevant article titles.
///
/// The file format is one title per line; surrounding whitespace is
/// ignored, as are blank lines and lines starting with `#`.
#[derive(Debug, Clone, Default)]
pub struct TitleJudgments {
    titles: AHashSet<String>,
}

impl TitleJudgments {
    /// Build judgments from titles.
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        TitleJudgments {
            titles: titles
                .into_iter()
                .map(|title| title.as_ref().trim().to_string())
                .filter(|title| !title.is_empty())
                .collect(),
        }
    }

    /// Parse the judgment file format.
    pub fn parse(text: &str) -> Self {
        Self::from_titles(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Load judgments from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            RankError::config(format!(
                "Failed to read relevance judgments {}: {e}",
                path.display()
            ))
        })?;
        let judgments = Self::parse(&text);
        debug!(
            "Loaded {} relevant titles from {}",
            judgments.len(),
            path.display()
        );
        Ok(judgments)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl RelevanceJudge for TitleJudgments {
    fn is_relevant(&self, document: &Document) -> bool {
        self.titles.contains(document.title().trim())
    }

    fn name(&self) -> &str {
        "title_judgments"
    }
}

/// The judge configured for a run.
///
/// Uses the judgment file when one is configured, otherwise falls back to
/// [`AllRelevant`] with a warning.
pub fn judge_from_config(config: &Config) -> Result<Box<dyn RelevanceJudge>> {
    match &config.relevance_judgments_path {
        Some(path) => Ok(Box::new(TitleJudgments::from_file(path)?)),
        None => {
            warn!(
                "No relevance judgments configured; every document counts as relevant, \
                 so precision and recall do not reflect ranking quality"
            );
            Ok(Box::new(AllRelevant))
        }
    }
}
