//! Command line argument parsing for the newsrank CLI using clap.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// newsrank - BM25 ranking of news articles with LLM query expansion
#[derive(Parser, Debug, Clone)]
#[command(name = "newsrank")]
#[command(about = "Rank news articles with BM25 and LLM query expansion")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct NewsrankArgs {
    /// Pipeline mode to run
    #[arg(value_enum, ignore_case = true)]
    pub mode: Mode,

    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Search term; prompted for on stdin when absent
    #[arg(long, env = "NEWSRANK_QUERY", value_name = "TEXT")]
    pub query: Option<String>,
}

impl NewsrankArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to warnings
                n => n + 1,
            }
        }
    }
}

/// Pipeline modes.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normalize the raw collection into the preprocessed collection
    Preprocess,
    /// Expand a query, rank, evaluate and chart the results
    Search,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Preprocess => write!(f, "preprocess"),
            Mode::Search => write!(f, "search"),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn test_modes() {
        let args = NewsrankArgs::try_parse_from(["newsrank", "preprocess"]).unwrap();
        assert_eq!(args.mode, Mode::Preprocess);

        let args = NewsrankArgs::try_parse_from(["newsrank", "search"]).unwrap();
        assert_eq!(args.mode, Mode::Search);
    }

    #[test]
    fn test_mode_is_case_insensitive() {
        let args = NewsrankArgs::try_parse_from(["newsrank", "PreProcess"]).unwrap();
        assert_eq!(args.mode, Mode::Preprocess);

        let args = NewsrankArgs::try_parse_from(["newsrank", "SEARCH"]).unwrap();
        assert_eq!(args.mode, Mode::Search);
    }

    #[test]
    fn test_usage_errors() {
        let err = NewsrankArgs::try_parse_from(["newsrank"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = NewsrankArgs::try_parse_from(["newsrank", "index"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        let err = NewsrankArgs::try_parse_from(["newsrank", "search", "extra"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_options() {
        let args = NewsrankArgs::try_parse_from([
            "newsrank",
            "search",
            "--config",
            "newsrank.json",
            "--query",
            "elections",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("newsrank.json")));
        assert_eq!(args.query.as_deref(), Some("elections"));
    }

    #[test]
    fn test_verbosity_levels() {
        let args = NewsrankArgs::try_parse_from(["newsrank", "search"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = NewsrankArgs::try_parse_from(["newsrank", "-v", "search"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = NewsrankArgs::try_parse_from(["newsrank", "-vv", "search"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = NewsrankArgs::try_parse_from(["newsrank", "--quiet", "-v", "search"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
