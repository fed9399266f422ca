//! libngram-core
//!
//! N-gram counting and Witten-Bell smoothed language modeling over a fixed
//! vocabulary. A model is built in one pass over a whitespace-tokenized
//! training corpus and then serves read-only conditional probability
//! queries; the raw count tables can be dumped to a labeled text file.
//!
//! Public API:
//! - `LangModel` - Trained model: probability queries, scoring, prediction
//! - `SymbolTable` - Token string <-> dense index mapping
//! - `NGramCounter` - Total map from index sequences to counts
//! - `SmoothingCounts` - The three count tables one model order needs
//! - `WittenBell` - Recursive interpolation estimator over those tables
//! - `Config` - Model parameters (paths, markers, order)
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Core modules
pub mod symbol_table;
pub use symbol_table::SymbolTable;

pub mod counter;
pub use counter::NGramCounter;

pub mod counts;
pub use counts::SmoothingCounts;

pub mod witten_bell;
pub use witten_bell::WittenBell;

pub mod text;

pub mod model;
pub use model::LangModel;

/// Parameters for building a `LangModel`.
///
/// Only the two corpus paths are required; marker strings and the model
/// order carry conventional defaults, so a TOML file (or caller) may set
/// `vocab` and `train` alone.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Vocabulary file: one token per line. Must contain the BOS, EOS and
    /// unknown-word tokens configured below.
    pub vocab: PathBuf,

    /// Training corpus: one sentence per line, whitespace tokenized.
    pub train: PathBuf,

    /// Beginning-of-sentence marker prepended n-1 times to each sentence.
    #[serde(default = "default_bos")]
    pub bos: String,
    /// End-of-sentence marker appended once to each sentence.
    #[serde(default = "default_eos")]
    pub eos: String,
    /// Token that out-of-vocabulary corpus words are mapped to.
    #[serde(default = "default_unk")]
    pub unk: String,

    /// Model order (the n in n-gram). Must be at least 1.
    #[serde(default = "default_order")]
    pub order: usize,

    /// When set, the count tables are written here after training.
    #[serde(default)]
    pub count_file: Option<PathBuf>,
}

fn default_bos() -> String {
    "<s>".to_string()
}

fn default_eos() -> String {
    "</s>".to_string()
}

fn default_unk() -> String {
    "<UNK>".to_string()
}

fn default_order() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Paths have no sensible default; LangModel::new rejects them empty.
            vocab: PathBuf::new(),
            train: PathBuf::new(),
            bos: default_bos(),
            eos: default_eos(),
            unk: default_unk(),
            order: default_order(),
            count_file: None,
        }
    }
}

impl Config {
    /// Create a config with the given corpus paths and default markers/order.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(vocab: P, train: Q) -> Self {
        Self {
            vocab: vocab.into(),
            train: train.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
