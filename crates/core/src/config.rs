//! Ranking configuration via `ranklab.toml`
//!
//! Every key is optional; a missing file section falls back to the scoring
//! defaults (`k1 = 1.5`, `b = 0.75`, standard IDF, whitespace tokenization,
//! unlimited results, all-results mode).

use crate::error::{Error, Result};
use crate::search_types::{
    Bm25Params, IdfSmoothing, SearchOptions, Tokenization, DEFAULT_B, DEFAULT_K1,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "ranklab.toml";

/// Ranking configuration loaded from `ranklab.toml`.
///
/// # Example
///
/// ```toml
/// k1 = 1.2
/// b = 0.75
/// idf_smoothing = "plus_one"
/// tokenizer = "words"
/// limit = 10
/// matches_only = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankConfig {
    /// Term-frequency saturation.
    #[serde(default = "default_k1")]
    pub k1: f64,
    /// Length normalization strength.
    #[serde(default = "default_b")]
    pub b: f64,
    /// IDF variant: `"standard"` or `"plus_one"`.
    #[serde(default)]
    pub idf_smoothing: IdfSmoothing,
    /// Tokenization policy: `"whitespace"` or `"words"`.
    #[serde(default)]
    pub tokenizer: Tokenization,
    /// Default result limit (0 = unlimited).
    #[serde(default)]
    pub limit: usize,
    /// Default to matching-only mode.
    #[serde(default)]
    pub matches_only: bool,
}

fn default_k1() -> f64 {
    DEFAULT_K1
}

fn default_b() -> f64 {
    DEFAULT_B
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            b: default_b(),
            idf_smoothing: IdfSmoothing::default(),
            tokenizer: Tokenization::default(),
            limit: 0,
            matches_only: false,
        }
    }
}

impl RankConfig {
    /// Scoring params described by this config.
    pub fn params(&self) -> Bm25Params {
        Bm25Params::new(self.k1, self.b).with_idf_smoothing(self.idf_smoothing)
    }

    /// Search options described by this config.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::new()
            .with_params(self.params())
            .with_limit(self.limit)
            .matches_only(self.matches_only)
    }

    /// Reject values that cannot produce a score at all.
    ///
    /// Out-of-range but finite values are accepted as given.
    ///
    /// # Errors
    ///
    /// Returns an error if `k1` or `b` is NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        self.params().validate()
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# ranklab configuration
#
# BM25 term-frequency saturation (default 1.5)
k1 = 1.5

# BM25 length normalization, 0 = none, 1 = full (default 0.75)
b = 0.75

# IDF formula: "standard" = ln((N - df + 0.5) / (df + 0.5))
#              "plus_one" = ln((N - df + 0.5) / (df + 0.5) + 1)
idf_smoothing = "standard"

# Tokenizer: "whitespace" keeps punctuation attached, "words" splits on
# Unicode word boundaries
tokenizer = "whitespace"

# Result limit, 0 = unlimited
limit = 0

# Only return documents containing at least one query term
matches_only = false
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            Error::Config(msg) => {
                Error::Config(format!("Invalid config file '{}': {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: RankConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
