//! Cleanup helpers for vocabulary note fields.

use itertools::Itertools;
use std::collections::HashSet;

/// The middle whitespace-separated word of an entry.
///
/// Vocabulary entries put the headword between articles and particles
/// ("der Hund", "sich freuen auf"), so the middle word is the word worth
/// lemmatizing. An entry without any word is returned as-is.
pub fn extract_main_word(entry: &str) -> &str {
    let words = entry.split_whitespace().collect_vec();
    if words.is_empty() {
        return entry;
    }
    words[words.len() / 2]
}

/// Splits an entry into single words, stripping characters that are neither
/// alphanumeric, underscore nor whitespace.
pub fn clean_words(entry: &str) -> Vec<String> {
    let cleaned: String = entry
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().map(str::to_owned).collect_vec()
}

/// One single word extracted from a note entry, with its origin.
pub struct WordItem {
    pub notetype: String,
    pub entry: String,
    pub word: String,
}

/// Explodes (notetype, entry) pairs into deduplicated lowercase single words.
///
/// A word of a multi-word entry that is itself a whole entry in the
/// collection is skipped, since it is covered by its own note. Duplicates
/// keep the first occurrence.
pub fn extract_items(entries: &[(String, String)]) -> Vec<WordItem> {
    let whole_entries: HashSet<&str> = entries.iter().map(|(_, entry)| entry.as_str()).collect();
    let mut items = Vec::new();
    let mut seen = HashSet::new();
    for (notetype, entry) in entries {
        let words = clean_words(entry);
        let multi = words.len() > 1;
        for word in words {
            if multi && whole_entries.contains(word.as_str()) {
                continue;
            }
            let word = word.trim().to_lowercase();
            if !seen.insert(word.clone()) {
                continue;
            }
            items.push(WordItem {
                notetype: notetype.clone(),
                entry: entry.clone(),
                word,
            });
        }
    }
    items
}
