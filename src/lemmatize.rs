//! The lemmatization adapter: batches of text records in, token sequences out.

use crate::errors::{Result, invalid_input};
use itertools::Itertools;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Part-of-speech tag for surface forms the lexicon does not know.
pub const UNKNOWN_POS: &str = "X";

/// One unit of text as produced by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub lemma: String,
    pub pos: String,
    pub is_punct: bool,
    pub is_space: bool,
}

/// Batch lemmatization interface.
///
/// The aggregation, merge and report logic depends only on this trait, so it
/// can be driven by a deterministic stub in tests and backed by any NLP
/// pipeline in production.
pub trait Lemmatizer {
    /// Processes one batch of records, yielding one token sequence per
    /// record, in positional order.
    fn process_batch(&self, records: &[String]) -> Vec<Vec<Token>>;
}

/// Surface form to (lemma, pos) mapping loaded from a TSV file.
pub struct Lexicon {
    entries: HashMap<String, (String, String)>,
}

impl Lexicon {
    /// Reads a lexicon with `surface<TAB>lemma<TAB>pos` rows.
    /// Empty lines and lines starting with `#` are skipped.
    pub fn from_tsv_file(path: &Path) -> Result<Lexicon> {
        let data = fs::read_to_string(path)?;
        Lexicon::from_tsv(&data)
    }

    pub fn from_tsv(data: &str) -> Result<Lexicon> {
        let mut entries = HashMap::new();
        for (i, line) in data.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split('\t').collect_vec()[..] {
                [surface, lemma, pos] => {
                    entries.insert(surface.to_owned(), (lemma.to_owned(), pos.to_owned()));
                }
                _ => {
                    return Err(invalid_input(format!(
                        "lexicon line {}: expected 3 tab-separated fields",
                        i + 1
                    )));
                }
            }
        }
        Ok(Lexicon { entries })
    }

    /// Exact lookup first, then case-insensitive.
    fn lookup(&self, surface: &str) -> Option<&(String, String)> {
        self.entries
            .get(surface)
            .or_else(|| self.entries.get(&surface.to_lowercase()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A lemmatizer backed by a static lexicon.
///
/// Word boundaries come from Unicode segmentation. Pieces consisting of
/// whitespace become space tokens, pieces without any alphanumeric character
/// become punctuation tokens, and everything else is looked up in the
/// lexicon; unknown surface forms keep their own form as the lemma, tagged
/// [UNKNOWN_POS].
pub struct LexiconLemmatizer {
    lexicon: Lexicon,
}

impl LexiconLemmatizer {
    pub fn new(lexicon: Lexicon) -> LexiconLemmatizer {
        LexiconLemmatizer { lexicon }
    }

    fn classify(&self, piece: &str) -> Token {
        if piece.chars().all(char::is_whitespace) {
            return Token {
                surface: piece.to_owned(),
                lemma: piece.to_owned(),
                pos: String::new(),
                is_punct: false,
                is_space: true,
            };
        }
        if !piece.chars().any(char::is_alphanumeric) {
            return Token {
                surface: piece.to_owned(),
                lemma: piece.to_owned(),
                pos: String::new(),
                is_punct: true,
                is_space: false,
            };
        }
        let (lemma, pos) = match self.lexicon.lookup(piece) {
            Some((lemma, pos)) => (lemma.clone(), pos.clone()),
            None => (piece.to_owned(), UNKNOWN_POS.to_owned()),
        };
        Token {
            surface: piece.to_owned(),
            lemma,
            pos,
            is_punct: false,
            is_space: false,
        }
    }

    fn tokenize(&self, record: &str) -> Vec<Token> {
        record
            .split_word_bounds()
            .map(|piece| self.classify(piece))
            .collect_vec()
    }
}

impl Lemmatizer for LexiconLemmatizer {
    fn process_batch(&self, records: &[String]) -> Vec<Vec<Token>> {
        records.iter().map(|r| self.tokenize(r)).collect_vec()
    }
}

/// Lemmatizes single-word records: the lemma of the first word token of each
/// record, or the record itself when the adapter produces no word token.
pub fn lemmatize_words(
    lemmatizer: &dyn Lemmatizer,
    words: &[String],
    batch_size: usize,
) -> Vec<String> {
    let mut lemmas = Vec::with_capacity(words.len());
    for batch in words.chunks(batch_size.max(1)) {
        for (record, tokens) in batch.iter().zip(lemmatizer.process_batch(batch)) {
            let lemma = tokens
                .into_iter()
                .find(|t| !t.is_punct && !t.is_space)
                .map(|t| t.lemma)
                .unwrap_or_else(|| record.clone());
            lemmas.push(lemma);
        }
    }
    lemmas
}

#[cfg(test)]
mod test {
    use super::*;

    const LEXICON: &str = "Hund\tHund\tNOUN\nHunde\tHund\tNOUN\nläuft\tlaufen\tVERB\nlaufen\tlaufen\tVERB\nder\tder\tDET\ndie\tder\tDET\n";

    fn lemmatizer() -> LexiconLemmatizer {
        LexiconLemmatizer::new(Lexicon::from_tsv(LEXICON).unwrap())
    }

    #[test]
    fn lexicon_rejects_bad_rows() {
        assert!(Lexicon::from_tsv("Hund\tHund\n").is_err());
        assert!(Lexicon::from_tsv("# comment\n\nHund\tHund\tNOUN\n").is_ok());
    }

    #[test]
    fn tokenize_classifies_pieces() {
        let l = lemmatizer();
        let tokens = &l.process_batch(&["Der Hund läuft.".to_owned()])[0];
        let kinds = tokens
            .iter()
            .map(|t| (t.surface.as_str(), t.is_space, t.is_punct))
            .collect_vec();
        assert_eq!(
            kinds,
            vec![
                ("Der", false, false),
                (" ", true, false),
                ("Hund", false, false),
                (" ", true, false),
                ("läuft", false, false),
                (".", false, true),
            ]
        );
    }

    #[test]
    fn lookup_is_case_insensitive_as_fallback() {
        let l = lemmatizer();
        let tokens = &l.process_batch(&["Der".to_owned()])[0];
        assert_eq!(tokens[0].lemma, "der");
        assert_eq!(tokens[0].pos, "DET");
    }

    #[test]
    fn unknown_words_keep_their_surface() {
        let l = lemmatizer();
        let tokens = &l.process_batch(&["Katze".to_owned()])[0];
        assert_eq!(tokens[0].lemma, "Katze");
        assert_eq!(tokens[0].pos, UNKNOWN_POS);
    }

    #[test]
    fn lemmatize_words_batched() {
        let l = lemmatizer();
        let words = ["Hunde", "läuft", "Katze", "..."]
            .iter()
            .map(|w| w.to_string())
            .collect_vec();
        let expected = vec!["Hund", "laufen", "Katze", "..."];
        for batch_size in [1, 2, 1000] {
            assert_eq!(lemmatize_words(&l, &words, batch_size), expected);
        }
    }
}
