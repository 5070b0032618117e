//! Frequency tables over (lemma, part-of-speech) keys.

use crate::lemmatize::Token;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;

/// One row of the frequency report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreqRow {
    pub lemma: String,
    pub pos: String,
    pub frequency: u64,
}

/// Mapping from (lemma, pos) to an occurrence count.
///
/// Counts only grow while tokens stream through, and accumulation is
/// commutative, so the token order never affects the result.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<(String, String), u64>,
}

impl FrequencyTable {
    pub fn new() -> FrequencyTable {
        FrequencyTable::default()
    }

    /// Counts one token; punctuation and whitespace tokens are discarded.
    pub fn feed_token(&mut self, token: &Token) {
        if token.is_punct || token.is_space {
            return;
        }
        self.increment(&token.lemma, &token.pos);
    }

    /// Increments the count at (lemma, pos) by 1. No case normalization.
    pub fn increment(&mut self, lemma: &str, pos: &str) {
        *self
            .counts
            .entry((lemma.to_owned(), pos.to_owned()))
            .or_insert(0) += 1;
    }

    /// Key-wise sum; a key absent from `other` contributes 0.
    /// Associative and commutative.
    pub fn merge(&mut self, other: FrequencyTable) {
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
    }

    pub fn get(&self, lemma: &str, pos: &str) -> u64 {
        self.counts
            .get(&(lemma.to_owned(), pos.to_owned()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct (lemma, pos) keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of counted tokens.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Rows sorted by descending frequency. Equal frequencies are ordered by
    /// ascending lemma, then ascending pos, so the report is deterministic
    /// even though the table itself has no useful order.
    pub fn sorted_rows(&self) -> Vec<FreqRow> {
        self.counts
            .iter()
            .map(|((lemma, pos), &frequency)| FreqRow {
                lemma: lemma.clone(),
                pos: pos.clone(),
                frequency,
            })
            .sorted_by(|a, b| {
                b.frequency
                    .cmp(&a.frequency)
                    .then_with(|| a.lemma.cmp(&b.lemma))
                    .then_with(|| a.pos.cmp(&b.pos))
            })
            .collect_vec()
    }
}

/// Aggregates one token stream into a fresh table.
pub fn aggregate<'a, I>(tokens: I) -> FrequencyTable
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut table = FrequencyTable::new();
    for token in tokens {
        table.feed_token(token);
    }
    table
}
