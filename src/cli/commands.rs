//! Command implementations for the newsrank CLI.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use log::info;

use crate::analysis::analyzer::language::english::EnglishAnalyzer;
use crate::cli::args::{Mode, NewsrankArgs};
use crate::cli::output::*;
use crate::config::{Config, CredentialSource};
use crate::error::{RankError, Result};
use crate::evaluation::relevance::judge_from_config;
use crate::expansion::OpenAiExpander;
use crate::pipeline::{self, QueryVariant};
use crate::scoring::ranking::Ranker;

/// Documents shown in the overview before prompting.
const OVERVIEW_ROWS: usize = 5;

/// Execute the selected pipeline mode.
pub fn execute_command(args: NewsrankArgs) -> Result<()> {
    let config = load_config(&args)?;
    info!("Running {} mode", args.mode);

    match args.mode {
        Mode::Preprocess => run_preprocess(&config),
        Mode::Search => run_search(&config, &args),
    }
}

fn load_config(args: &NewsrankArgs) -> Result<Config> {
    match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::from_file(path)
        }
        None => Ok(Config::default()),
    }
}

fn run_preprocess(config: &Config) -> Result<()> {
    println!("Preprocessing data...");
    let analyzer = EnglishAnalyzer::new()?;
    let report = pipeline::preprocess(config, &analyzer)?;
    print_preprocess_summary(&report);
    Ok(())
}

fn run_search(config: &Config, args: &NewsrankArgs) -> Result<()> {
    check_credential(&config.credential_source);

    let corpus = pipeline::load_preprocessed(config)?;
    print_overview(corpus.head(OVERVIEW_ROWS));

    let analyzer = Arc::new(EnglishAnalyzer::new()?);
    let ranker = Ranker::new(analyzer, &corpus, config.bm25)?;
    let judge = judge_from_config(config)?;

    let query = match &args.query {
        Some(query) => query.clone(),
        None => prompt_query(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let expander = OpenAiExpander::from_credential(&config.credential_source, &config.expansion)?;
    let outcome = pipeline::search(config, &corpus, &ranker, &expander, judge.as_ref(), &query)?;

    println!("Original Query: {}", outcome.original_query);
    println!("Expanded Query: {}", outcome.expanded_query);
    for variant in QueryVariant::ALL {
        if let Some(result) = outcome.variant(variant) {
            print_top_results(&corpus, result);
        }
    }
    for result in &outcome.variants {
        print_evaluation(result);
    }

    Ok(())
}

/// Report whether the expansion credential is present, showing only a prefix.
fn check_credential(source: &CredentialSource) {
    match source.preview() {
        Some(prefix) => println!("{} is set: {prefix}...", source.env_var),
        None => println!("{} is not set.", source.env_var),
    }
}

/// Ask for the search term on `output` and read one line from `input`.
fn prompt_query<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "Please enter your search term: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(RankError::invalid_argument(
            "no search term given (stdin closed)",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
