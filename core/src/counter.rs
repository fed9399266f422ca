//! Total occurrence counter over n-gram index sequences.

use anyhow::Result;
use std::collections::BTreeMap;
use std::io::Write;

use crate::SymbolTable;

/// Counts keyed by index sequences (length 0 is the empty history).
///
/// Lookup is total: sequences never observed report count 0. Keys are held
/// in an ordered map, so enumeration and the text export are in sorted key
/// order and two identical training runs produce identical bytes.
#[derive(Debug, Clone, Default)]
pub struct NGramCounter {
    counts: BTreeMap<Vec<u32>, u64>,
}

impl NGramCounter {
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Record one occurrence and return the updated count.
    pub fn increment(&mut self, ngram: &[u32]) -> u64 {
        let count = self.counts.entry(ngram.to_vec()).or_insert(0);
        *count += 1;
        *count
    }

    /// Stored count, or 0 for sequences never observed.
    pub fn get_count(&self, ngram: &[u32]) -> u64 {
        self.counts.get(ngram).copied().unwrap_or(0)
    }

    /// Number of distinct sequences observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(sequence, count)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u32], u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_slice(), v))
    }

    /// Sum of counts over all keys of the given length.
    pub fn total_of_len(&self, len: usize) -> u64 {
        self.counts
            .iter()
            .filter(|(k, _)| k.len() == len)
            .map(|(_, &v)| v)
            .sum()
    }

    /// Write one line per key: the tokens rendered through `symbols`,
    /// space-separated, then the count. The empty sequence is written as
    /// its count alone.
    pub fn write<W: Write>(&self, out: &mut W, symbols: &SymbolTable) -> Result<()> {
        for (ngram, count) in self.counts.iter() {
            for &idx in ngram {
                write!(out, "{} ", symbols.get_symbol(idx).unwrap_or("<?>"))?;
            }
            writeln!(out, "{}", count)?;
        }
        Ok(())
    }
}
