//! Raw-text handling: normalization, tokenization, sentence padding.

use unicode_normalization::UnicodeNormalization;

use crate::SymbolTable;

/// Normalize external text (NFC) and trim surrounding whitespace.
pub fn normalize(s: &str) -> String {
    let composed: String = s.nfc().collect();
    composed.trim().to_owned()
}

/// Split a raw line into whitespace-separated, NFC-normalized tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    normalize(line)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Convert a raw sentence line into a padded index sequence: `order - 1`
/// beginning-of-sentence markers, the tokens themselves (out-of-vocabulary
/// words map to `unk`), and one end-of-sentence marker.
pub fn encode_sentence(
    line: &str,
    symbols: &SymbolTable,
    order: usize,
    bos: u32,
    eos: u32,
    unk: u32,
) -> Vec<u32> {
    let tokens = tokenize(line);
    let lead = order.saturating_sub(1);
    let mut padded = Vec::with_capacity(lead + tokens.len() + 1);
    padded.resize(lead, bos);
    for token in &tokens {
        padded.push(symbols.get_index(token).unwrap_or(unk));
    }
    padded.push(eos);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SymbolTable {
        let mut t = SymbolTable::new();
        for tok in ["a", "b", "<s>", "</s>", "<UNK>"] {
            t.insert(tok);
        }
        t
    }

    #[test]
    fn tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  a\tb  c "), vec!["a", "b", "c"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn encode_pads_with_markers() {
        let t = table();
        let (bos, eos, unk) = (3, 4, 5);
        let padded = encode_sentence("a b", &t, 3, bos, eos, unk);
        assert_eq!(padded, vec![3, 3, 1, 2, 4], "two BOS for a trigram model");
    }

    #[test]
    fn encode_maps_oov_to_unk() {
        let t = table();
        let padded = encode_sentence("a xyzzy b", &t, 2, 3, 4, 5);
        assert_eq!(padded, vec![3, 1, 5, 2, 4]);
    }

    #[test]
    fn encode_empty_line_is_markers_only() {
        let t = table();
        assert_eq!(encode_sentence("", &t, 3, 3, 4, 5), vec![3, 3, 4]);
        // A unigram model gets no BOS padding at all.
        assert_eq!(encode_sentence("", &t, 1, 3, 4, 5), vec![4]);
    }
}
