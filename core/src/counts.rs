// core/src/counts.rs
//
// The three count tables a Witten-Bell model of one order needs, filled in
// a single pass over padded sentences:
//   predictive  - how often each index sequence occurred,
//   history     - how often it occurred with a token following it,
//   one-plus    - how many distinct continuations were observed after it.

use anyhow::Result;
use std::io::Write;

use crate::{NGramCounter, SymbolTable};

/// Count tables for one model order.
#[derive(Debug, Clone)]
pub struct SmoothingCounts {
    order: usize,
    pred: NGramCounter,
    hist: NGramCounter,
    hist_one_plus: NGramCounter,
}

impl SmoothingCounts {
    /// Create empty tables for a model of the given order.
    pub fn new(order: usize) -> Self {
        Self {
            order,
            pred: NGramCounter::new(),
            hist: NGramCounter::new(),
            hist_one_plus: NGramCounter::new(),
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn pred(&self) -> &NGramCounter {
        &self.pred
    }

    pub fn hist(&self) -> &NGramCounter {
        &self.hist
    }

    pub fn hist_one_plus(&self) -> &NGramCounter {
        &self.hist_one_plus
    }

    /// Count every window of one padded sentence.
    ///
    /// At each start position, windows of length 0 through the model order
    /// are taken, bounded by the sentence end so that each distinct slice
    /// is counted exactly once. A window followed by a token is also an
    /// occurrence of that window as a history; the first time a window of
    /// length i is observed this way, the distinct-continuation count of
    /// its length i-1 history goes up by one.
    pub fn count_sentence(&mut self, sentence: &[u32]) {
        for start in 0..sentence.len() {
            let max_len = self.order.min(sentence.len() - start);
            for len in 0..=max_len {
                let window = &sentence[start..start + len];
                let seen = self.pred.increment(window);
                if start + len < sentence.len() {
                    self.hist.increment(window);
                    if len > 0 && seen < 2 {
                        self.hist_one_plus.increment(&window[..len - 1]);
                    }
                }
            }
        }
    }

    /// Summed history and one-plus counts over all single-token keys.
    ///
    /// The estimator weighs the empty context with these inventory-wide
    /// sums, since there is no single context to read a weight from.
    pub fn unigram_aggregates(&self) -> (u64, u64) {
        (
            self.hist.total_of_len(1),
            self.hist_one_plus.total_of_len(1),
        )
    }

    /// Write all three tables as one labeled dump.
    pub fn write<W: Write>(&self, out: &mut W, symbols: &SymbolTable) -> Result<()> {
        writeln!(out, "# Pred counts.")?;
        self.pred.write(out, symbols)?;
        writeln!(out, "# Hist counts.")?;
        self.hist.write(out, symbols)?;
        writeln!(out, "# Hist 1+ counts.")?;
        self.hist_one_plus.write(out, symbols)?;
        Ok(())
    }
}
