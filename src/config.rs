//! Runtime configuration.
//!
//! Every stage of the pipeline receives its settings from a [`Config`]
//! value instead of reading process-wide constants. A configuration file is
//! plain JSON; keys that are missing fall back to the defaults below.
//!
//! # Examples
//!
//! ```
//! use newsrank::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.top_k, 10);
//! assert_eq!(config.credential_source.env_var, "OPENAI_API_KEY");
//!
//! let custom: Config = serde_json::from_str(r#"{"top_k": 5}"#).unwrap();
//! assert_eq!(custom.top_k, 5);
//! assert_eq!(custom.bm25.k1, 1.5);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};
use crate::scoring::bm25::{Bm25Config, IdfVariant};

/// Default location of the raw article collection.
pub const DEFAULT_RAW_DATASET: &str = "data/dataset.jsonl";

/// Default location of the preprocessed article collection.
pub const DEFAULT_PREPROCESSED_DATASET: &str = "data/preprocessed_dataset.jsonl";

/// Default directory for rendered charts.
pub const DEFAULT_PLOTS_DIRECTORY: &str = "plots";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Newline-delimited JSON input of `preprocess`.
    pub raw_dataset_path: PathBuf,
    /// Output of `preprocess`, input of `search`.
    pub preprocessed_dataset_path: PathBuf,
    /// Directory the charts are written to.
    pub plots_directory: PathBuf,
    /// Where the expansion service credential comes from.
    pub credential_source: CredentialSource,
    /// Query expansion service settings.
    pub expansion: ExpansionConfig,
    /// BM25 parameters.
    pub bm25: Bm25Config,
    /// Number of documents kept per ranking.
    pub top_k: usize,
    /// File of relevant titles, one per line.
    pub relevance_judgments_path: Option<PathBuf>,
    /// Chart rendering settings.
    pub chart: ChartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            raw_dataset_path: PathBuf::from(DEFAULT_RAW_DATASET),
            preprocessed_dataset_path: PathBuf::from(DEFAULT_PREPROCESSED_DATASET),
            plots_directory: PathBuf::from(DEFAULT_PLOTS_DIRECTORY),
            credential_source: CredentialSource::default(),
            expansion: ExpansionConfig::default(),
            bm25: Bm25Config::default(),
            top_k: 10,
            relevance_judgments_path: None,
            chart: ChartConfig::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RankError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            RankError::config(format!("Failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(RankError::config("top_k must be at least 1"));
        }

        if !self.bm25.k1.is_finite() || self.bm25.k1 < 0.0 {
            return Err(RankError::config(format!(
                "bm25.k1 must be a non-negative number, got {}",
                self.bm25.k1
            )));
        }

        if !(0.0..=1.0).contains(&self.bm25.b) {
            return Err(RankError::config(format!(
                "bm25.b must be within [0, 1], got {}",
                self.bm25.b
            )));
        }

        if let IdfVariant::Okapi { epsilon } = self.bm25.idf {
            if !epsilon.is_finite() || epsilon < 0.0 {
                return Err(RankError::config(format!(
                    "bm25.idf.epsilon must be a non-negative number, got {epsilon}"
                )));
            }
        }

        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(RankError::config(format!(
                "chart dimensions must be positive, got {}x{}",
                self.chart.width, self.chart.height
            )));
        }

        if self.expansion.timeout_secs == 0 {
            return Err(RankError::config("expansion.timeout_secs must be positive"));
        }

        if self.credential_source.env_var.trim().is_empty() {
            return Err(RankError::config(
                "credential_source.env_var must name an environment variable",
            ));
        }

        Ok(())
    }
}

/// Names the environment variable holding the expansion service key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialSource {
    pub env_var: String,
}

impl Default for CredentialSource {
    fn default() -> Self {
        CredentialSource {
            env_var: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl CredentialSource {
    /// Read the credential. Unset and empty variables both count as absent.
    pub fn read(&self) -> Option<String> {
        std::env::var(&self.env_var)
            .ok()
            .filter(|value| !value.is_empty())
    }

    /// The first five characters of the credential, for display.
    pub fn preview(&self) -> Option<String> {
        self.read()
            .map(|value| value.chars().take(5).collect::<String>())
    }
}

/// Settings of the chat-completion request used for query expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            model: "gpt-4o".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Chart rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// TrueType/OpenType font for labels; system fonts are probed when unset.
    pub font_path: Option<PathBuf>,
    /// Titles longer than this many characters are cut and suffixed with "...".
    pub title_truncate: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 1200,
            height: 800,
            font_path: None,
            title_truncate: 30,
        }
    }
}
