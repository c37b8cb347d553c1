//! End-to-end runs of the two pipeline modes.
//!
//! [`preprocess`] turns the raw collection into the preprocessed one.
//! [`search`] expands a query, ranks the corpus for the expanded and the
//! simple form of the query, evaluates both rankings and renders a chart
//! for each. Every input is passed in explicitly, so the same run can be
//! driven by the command line, by tests with stub collaborators, or by
//! another program.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use newsrank::analysis::analyzer::language::english::EnglishAnalyzer;
//! use newsrank::config::Config;
//! use newsrank::evaluation::relevance::AllRelevant;
//! use newsrank::expansion::ExpansionError;
//! use newsrank::pipeline::{load_preprocessed, search};
//! use newsrank::scoring::ranking::Ranker;
//!
//! # fn example() -> newsrank::error::Result<()> {
//! let config = Config::default();
//! let corpus = load_preprocessed(&config)?;
//! let ranker = Ranker::new(Arc::new(EnglishAnalyzer::new()?), &corpus, config.bm25)?;
//! let expander = |query: &str| -> Result<String, ExpansionError> { Ok(format!("{query} vote ballot")) };
//!
//! let outcome = search(&config, &corpus, &ranker, &expander, &AllRelevant, "elections")?;
//! for variant in &outcome.variants {
//!     println!("{}: {}", variant.variant, variant.metrics);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use log::{debug, info};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::config::Config;
use crate::document::corpus::Corpus;
use crate::document::jsonl::read_corpus;
use crate::error::Result;
use crate::evaluation::metrics::{Metrics, evaluate};
use crate::evaluation::relevance::RelevanceJudge;
use crate::expansion::QueryExpander;
use crate::preprocess::{PreprocessReport, preprocess_file};
use crate::report::render_top_results;
use crate::scoring::ranking::{RankedDocument, Ranker};

pub use crate::scoring::ranking::QueryVariant;

/// Results for one form of the query.
#[derive(Debug, Clone)]
pub struct VariantOutcome {
    pub variant: QueryVariant,
    /// The query text that was scored.
    pub query: String,
    /// Best documents first.
    pub top: Vec<RankedDocument>,
    pub metrics: Metrics,
    pub plot_path: PathBuf,
}

/// Results of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub original_query: String,
    pub expanded_query: String,
    /// One entry per variant, expanded first.
    pub variants: Vec<VariantOutcome>,
}

impl SearchOutcome {
    /// The outcome of a given variant.
    pub fn variant(&self, variant: QueryVariant) -> Option<&VariantOutcome> {
        self.variants.iter().find(|outcome| outcome.variant == variant)
    }
}

/// Preprocess the configured raw collection into the configured output.
pub fn preprocess(config: &Config, analyzer: &dyn Analyzer) -> Result<PreprocessReport> {
    preprocess_file(
        analyzer,
        &config.raw_dataset_path,
        &config.preprocessed_dataset_path,
    )
}

/// Load the collection written by [`preprocess`].
pub fn load_preprocessed(config: &Config) -> Result<Corpus> {
    let corpus = read_corpus(&config.preprocessed_dataset_path)?;
    info!(
        "Loaded {} preprocessed documents from {}",
        corpus.len(),
        config.preprocessed_dataset_path.display()
    );
    Ok(corpus)
}

/// Rank, evaluate and chart the corpus for a query and its expansion.
///
/// The expansion is requested first; when it fails nothing is ranked or
/// written. The ranker must have been built over `corpus`.
pub fn search(
    config: &Config,
    corpus: &Corpus,
    ranker: &Ranker,
    expander: &dyn QueryExpander,
    judge: &dyn RelevanceJudge,
    query: &str,
) -> Result<SearchOutcome> {
    info!("Expanding query {query:?} with the {} expander", expander.name());
    let expanded_query = expander.expand(query)?;
    debug!("Expanded query: {expanded_query:?}");

    let mut variants = Vec::with_capacity(QueryVariant::ALL.len());
    for variant in QueryVariant::ALL {
        let text = match variant {
            QueryVariant::Expanded => expanded_query.as_str(),
            QueryVariant::Simple => query,
        };
        variants.push(run_variant(config, corpus, ranker, judge, variant, text)?);
    }

    Ok(SearchOutcome {
        original_query: query.to_string(),
        expanded_query,
        variants,
    })
}

fn run_variant(
    config: &Config,
    corpus: &Corpus,
    ranker: &Ranker,
    judge: &dyn RelevanceJudge,
    variant: QueryVariant,
    text: &str,
) -> Result<VariantOutcome> {
    let top = ranker.score_query(text, variant)?.top_k(config.top_k);
    let metrics = evaluate(corpus, &top, judge);
    info!(
        "{variant} query: {} results, {metrics} (judge: {})",
        top.len(),
        judge.name()
    );

    let plot_path = render_top_results(
        corpus,
        &top,
        variant,
        &config.plots_directory,
        &config.chart,
    )?;

    Ok(VariantOutcome {
        variant,
        query: text.to_string(),
        top,
        metrics,
        plot_path,
    })
}
