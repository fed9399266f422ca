//! Symbol table for libngram-core
//!
//! Maps token strings to dense integer indices and back. Index 0 is always
//! the epsilon slot `<eps>`: it never occurs in a sentence, exists only so
//! downstream consumers have an out-of-band index, and is excluded from the
//! vocabulary size the smoothing floor divides by.
//!
//! Public API:
//! - `SymbolTable` — insert/lookup both directions, vocabulary-file loading

use ahash::AHashMap;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::text;

/// Token string <-> dense index mapping with a reserved epsilon slot.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    index: AHashMap<String, u32>,
    symbols: Vec<String>,
}

impl SymbolTable {
    /// The reserved index-0 token.
    pub const EPSILON: &'static str = "<eps>";
    /// Index of the epsilon slot.
    pub const EPSILON_INDEX: u32 = 0;

    /// Create a table holding only the epsilon slot.
    pub fn new() -> Self {
        let mut table = Self {
            index: AHashMap::new(),
            symbols: Vec::new(),
        };
        table.insert(Self::EPSILON);
        table
    }

    /// Insert a token and return its index. Tokens already present keep the
    /// index they were first assigned.
    pub fn insert(&mut self, token: &str) -> u32 {
        if let Some(&idx) = self.index.get(token) {
            return idx;
        }
        let idx = self.symbols.len() as u32;
        self.symbols.push(token.to_string());
        self.index.insert(token.to_string(), idx);
        idx
    }

    /// Load a vocabulary file: one token per line (the first whitespace
    /// field of it), NFC-normalized. Blank lines are skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("opening vocabulary {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut table = Self::new();
        for line in reader.lines() {
            let line =
                line.with_context(|| format!("reading vocabulary {}", path.display()))?;
            let normalized = text::normalize(&line);
            if let Some(token) = normalized.split_whitespace().next() {
                table.insert(token);
            }
        }
        Ok(table)
    }

    /// Index of a token, if present.
    pub fn get_index(&self, token: &str) -> Option<u32> {
        self.index.get(token).copied()
    }

    /// Token at an index, if present.
    pub fn get_symbol(&self, index: u32) -> Option<&str> {
        self.symbols.get(index as usize).map(String::as_str)
    }

    /// Number of symbols, epsilon slot included.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Vocabulary size for smoothing: every symbol except epsilon.
    pub fn vocab_size(&self) -> usize {
        self.symbols.len() - 1
    }

    /// Iterate `(index, token)` pairs in index order, epsilon included.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (i as u32, s.as_str()))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
