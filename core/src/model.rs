//! Model construction, training and queries.

use anyhow::{anyhow, bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::{text, Config, SmoothingCounts, SymbolTable, WittenBell};

/// A Witten-Bell smoothed n-gram language model.
///
/// `new` runs the whole training pipeline: vocabulary load, marker
/// resolution, one counting pass over the corpus, estimator setup and the
/// optional count dump. A constructed model is immutable and every query
/// takes `&self`.
#[derive(Debug)]
pub struct LangModel {
    config: Config,
    symbols: SymbolTable,
    counts: SmoothingCounts,
    estimator: WittenBell,
    bos: u32,
    eos: u32,
    unk: u32,
}

impl LangModel {
    /// Build and train a model from the given configuration.
    ///
    /// Fails on an unusable configuration: missing paths, order 0, an
    /// unreadable file, or marker tokens absent from the vocabulary.
    pub fn new(config: Config) -> Result<Self> {
        if config.vocab.as_os_str().is_empty() {
            bail!("config: vocabulary path is required");
        }
        if config.train.as_os_str().is_empty() {
            bail!("config: training corpus path is required");
        }
        if config.order == 0 {
            bail!("config: model order must be at least 1");
        }

        let symbols = SymbolTable::load(&config.vocab)?;
        debug!(symbols = symbols.size(), "vocabulary loaded");
        let bos = resolve_marker(&symbols, &config.bos)?;
        let eos = resolve_marker(&symbols, &config.eos)?;
        let unk = resolve_marker(&symbols, &config.unk)?;

        let mut counts = SmoothingCounts::new(config.order);
        let file = File::open(&config.train)
            .with_context(|| format!("opening training corpus {}", config.train.display()))?;
        let reader = BufReader::new(file);
        let mut sentences = 0u64;
        for line in reader.lines() {
            let line = line
                .with_context(|| format!("reading training corpus {}", config.train.display()))?;
            let padded = text::encode_sentence(&line, &symbols, config.order, bos, eos, unk);
            counts.count_sentence(&padded);
            sentences += 1;
        }
        debug!(sentences, distinct = counts.pred().len(), "counting finished");

        let estimator = WittenBell::from_counts(&counts, symbols.vocab_size());
        let model = Self {
            config,
            symbols,
            counts,
            estimator,
            bos,
            eos,
            unk,
        };
        if let Some(path) = model.config.count_file.clone() {
            model.write_counts(&path)?;
        }
        info!(order = model.config.order, "language model ready");
        Ok(model)
    }

    /// Conditional probability of the last index of `ngram` given the
    /// preceding ones. The query length must be between 1 and the model
    /// order; anything else is rejected.
    pub fn get_prob(&self, ngram: &[u32]) -> Result<f64> {
        if ngram.is_empty() || ngram.len() > self.config.order {
            bail!(
                "invalid n-gram length {} for a model of order {}",
                ngram.len(),
                self.config.order
            );
        }
        Ok(self.estimator.prob(&self.counts, ngram))
    }

    /// Natural-log probability of a raw sentence line.
    ///
    /// The line is tokenized and padded like a training sentence, then
    /// every predicted position (each real word and the end marker) is
    /// scored conditioned on the n-1 tokens before it.
    pub fn score_sentence(&self, line: &str) -> f64 {
        let padded = text::encode_sentence(
            line,
            &self.symbols,
            self.config.order,
            self.bos,
            self.eos,
            self.unk,
        );
        let order = self.config.order;
        let mut total = 0.0;
        for pos in (order - 1)..padded.len() {
            let window = &padded[pos + 1 - order..=pos];
            total += self.estimator.prob(&self.counts, window).ln();
        }
        total
    }

    /// Rank continuations of a context by conditional probability.
    ///
    /// # Arguments
    /// * `history` - Context indices, most recent last; shorter than the
    ///   model order.
    /// * `limit` - Maximum number of candidates returned.
    ///
    /// # Returns
    /// `(token, probability)` pairs sorted by probability descending. The
    /// epsilon slot and the BOS marker are excluded: BOS is padding and is
    /// never predicted.
    pub fn predict_next(&self, history: &[u32], limit: usize) -> Result<Vec<(String, f64)>> {
        if history.len() >= self.config.order {
            bail!(
                "history of length {} leaves no room in a model of order {}",
                history.len(),
                self.config.order
            );
        }
        let mut query = Vec::with_capacity(history.len() + 1);
        query.extend_from_slice(history);
        query.push(SymbolTable::EPSILON_INDEX);

        let mut ranked: Vec<(String, f64)> = Vec::new();
        for (idx, token) in self.symbols.iter() {
            if idx == SymbolTable::EPSILON_INDEX || idx == self.bos {
                continue;
            }
            query[history.len()] = idx;
            let p = self.estimator.prob(&self.counts, &query);
            ranked.push((token.to_string(), p));
        }
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(limit);
        Ok(ranked)
    }

    /// Write the labeled count dump (see `SmoothingCounts::write`).
    pub fn write_counts<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("creating count file {}", path.display()))?;
        let mut out = BufWriter::new(file);
        self.counts.write(&mut out, &self.symbols)?;
        out.flush()
            .with_context(|| format!("flushing count file {}", path.display()))?;
        Ok(())
    }

    pub fn order(&self) -> usize {
        self.config.order
    }

    pub fn bos_index(&self) -> u32 {
        self.bos
    }

    pub fn eos_index(&self) -> u32 {
        self.eos
    }

    pub fn unk_index(&self) -> u32 {
        self.unk
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn counts(&self) -> &SmoothingCounts {
        &self.counts
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn resolve_marker(symbols: &SymbolTable, token: &str) -> Result<u32> {
    symbols
        .get_index(token)
        .ok_or_else(|| anyhow!("vocabulary does not contain the marker token {:?}", token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_resolution_requires_vocabulary_entry() {
        let mut symbols = SymbolTable::new();
        symbols.insert("<s>");
        assert!(resolve_marker(&symbols, "<s>").is_ok());
        let err = resolve_marker(&symbols, "</s>").unwrap_err();
        assert!(err.to_string().contains("</s>"));
    }

    #[test]
    fn empty_paths_are_fatal() {
        let err = LangModel::new(Config::default()).unwrap_err();
        assert!(err.to_string().contains("vocabulary path"));

        let mut cfg = Config::default();
        cfg.vocab = "vocab.txt".into();
        let err = LangModel::new(cfg).unwrap_err();
        assert!(err.to_string().contains("training corpus path"));
    }

    #[test]
    fn zero_order_is_fatal() {
        let mut cfg = Config::new("vocab.txt", "train.txt");
        cfg.order = 0;
        let err = LangModel::new(cfg).unwrap_err();
        assert!(err.to_string().contains("order"));
    }
}
