//! Witten-Bell smoothed probability estimation.
//!
//! A query probability interpolates the maximum-likelihood estimates of
//! every order, each weighted by how reliable its context is: a context
//! seen often with few distinct continuations gets a weight near 1, a
//! context never seen as a history gets weight 0 and falls through to the
//! next shorter context. The recursion bottoms out at the uniform
//! distribution over the vocabulary, so the result is a single value that
//! is finite and positive for any input, trained or not.

use crate::SmoothingCounts;

/// Estimator state frozen at the end of training.
#[derive(Debug, Clone)]
pub struct WittenBell {
    vocab_size: usize,
    agg_hist: u64,
    agg_one_plus: u64,
}

impl WittenBell {
    /// Snapshot the unigram-level aggregates from finished count tables.
    pub fn from_counts(counts: &SmoothingCounts, vocab_size: usize) -> Self {
        let (agg_hist, agg_one_plus) = counts.unigram_aggregates();
        Self {
            vocab_size,
            agg_hist,
            agg_one_plus,
        }
    }

    /// The floor probability: 1 over the vocabulary size (epsilon slot
    /// excluded).
    pub fn uniform(&self) -> f64 {
        1.0 / self.vocab_size as f64
    }

    /// Mixing weight for a context with history count `h` and `t` recorded
    /// continuation types. Zero when the context was never followed, and
    /// strictly below 1 otherwise: a followed context has at least one
    /// continuation even when the tables missed it at the sentence end, so
    /// `t` is clamped to 1 and some weight always reaches the lower order.
    fn lambda(h: u64, t: u64) -> f64 {
        if h == 0 {
            return 0.0;
        }
        h as f64 / (h + t.max(1)) as f64
    }

    /// Smoothed probability of the last index of `ngram` given the rest.
    ///
    /// Levels are combined bottom-up, starting from the uniform floor and
    /// the empty context, then lengthening the context one token at a
    /// time. Every division is guarded by a positive history count, so the
    /// result is in (0, 1] for any query against any tables.
    pub fn prob(&self, counts: &SmoothingCounts, ngram: &[u32]) -> f64 {
        let mut est = self.uniform();
        if ngram.is_empty() {
            return est;
        }
        let last = ngram.len() - 1;

        // Empty context: the unigram relative frequency, weighted by the
        // inventory-wide aggregates rather than a single context's counts.
        let h0 = counts.hist().get_count(&[]);
        if h0 > 0 {
            let lam = Self::lambda(self.agg_hist, self.agg_one_plus);
            let p = counts.pred().get_count(&ngram[last..]) as f64 / h0 as f64;
            est = lam * p + (1.0 - lam) * est;
        }

        // Longer contexts, shortest first.
        for m in 1..ngram.len() {
            let ctx = &ngram[last - m..last];
            let h = counts.hist().get_count(ctx);
            if h == 0 {
                continue;
            }
            let lam = Self::lambda(h, counts.hist_one_plus().get_count(ctx));
            let p = counts.pred().get_count(&ngram[last - m..]) as f64 / h as f64;
            est = lam * p + (1.0 - lam) * est;
        }
        est
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    // Corpus ["a b a", "a a b"] at order 2 with indices
    // a=1 b=2 <s>=3 </s>=4 <UNK>=5 (vocabulary size 5).
    fn trained_bigram() -> (SmoothingCounts, WittenBell) {
        let mut counts = SmoothingCounts::new(2);
        counts.count_sentence(&[3, 1, 2, 1, 4]);
        counts.count_sentence(&[3, 1, 1, 2, 4]);
        let wb = WittenBell::from_counts(&counts, 5);
        (counts, wb)
    }

    #[test]
    fn untrained_model_is_uniform() {
        let counts = SmoothingCounts::new(3);
        let wb = WittenBell::from_counts(&counts, 5);
        assert_eq!(wb.prob(&counts, &[1]), 0.2);
        assert_eq!(wb.prob(&counts, &[2, 1]), 0.2);
        assert_eq!(wb.prob(&counts, &[5, 5, 5]), 0.2);
    }

    #[test]
    fn unigram_probability_mixes_frequency_and_floor() {
        let (counts, wb) = trained_bigram();
        // hist([])=10, pred([a])=4, aggregates (8, 4): lambda 2/3, so
        // P(a) = 2/3 * 4/10 + 1/3 * 1/5 = 1/3.
        assert!((wb.prob(&counts, &[1]) - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn bigram_probability_hand_checked() {
        let (counts, wb) = trained_bigram();
        // ctx [a]: hist 4, one-plus 2, lambda 2/3; pred([a b]) = 2.
        // P(b|a) = 2/3 * 2/4 + 1/3 * P(b) and P(b) = 1/5, so 2/5.
        assert!((wb.prob(&counts, &[1, 2]) - 0.4).abs() < EPS);
        // ctx [b]: hist 2, one-plus 1, lambda 2/3; pred([b a]) = 1.
        // P(a|b) = 2/3 * 1/2 + 1/3 * 1/3 = 4/9.
        assert!((wb.prob(&counts, &[2, 1]) - 4.0 / 9.0).abs() < EPS);
    }

    #[test]
    fn unseen_context_falls_through() {
        let (counts, wb) = trained_bigram();
        // [<UNK>] was never a history, so P(a|<UNK>) = P(a).
        let unigram = wb.prob(&counts, &[1]);
        assert!((wb.prob(&counts, &[5, 1]) - unigram).abs() < EPS);
    }

    #[test]
    fn all_queries_are_proper_probabilities() {
        let (counts, wb) = trained_bigram();
        for w in 1..=5u32 {
            let p = wb.prob(&counts, &[w]);
            assert!(p > 0.0 && p <= 1.0, "P([{}]) = {} out of range", w, p);
            for c in 1..=5u32 {
                let p = wb.prob(&counts, &[c, w]);
                assert!(p > 0.0 && p <= 1.0, "P([{},{}]) = {} out of range", c, w, p);
            }
        }
    }

    #[test]
    fn conditionals_normalize_over_the_inventory() {
        let (counts, wb) = trained_bigram();
        // Sum P(w | a) over every non-epsilon symbol.
        let sum: f64 = (1..=5u32).map(|w| wb.prob(&counts, &[1, w])).sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum was {}", sum);
    }

    #[test]
    fn eos_only_continuations_keep_backoff_mass() {
        // One sentence "a" at order 3: [a] is followed only by the end
        // marker, which one-plus never records. The clamped weight must
        // still leave room for unseen continuations.
        let mut counts = SmoothingCounts::new(3);
        counts.count_sentence(&[3, 3, 1, 4]);
        let wb = WittenBell::from_counts(&counts, 5);
        let p_unseen = wb.prob(&counts, &[1, 2]);
        assert!(p_unseen > 0.0, "unseen continuation must keep mass");
        let p_eos = wb.prob(&counts, &[1, 4]);
        assert!(p_eos > 0.0 && p_eos <= 1.0);
        assert!(p_eos > p_unseen, "the observed continuation outranks");
    }
}
