//! CSV reports and the reference frequency/rank table.

use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// One row of the Anki frequency report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnkiRow {
    pub notetype: String,
    pub entry: String,
    pub word: String,
    pub lemma: String,
    pub frequency: u64,
    pub rank: u64,
}

/// Writes rows as UTF-8 CSV with a header derived from the row type.
///
/// The file is only created here, after the whole input has been consumed
/// and aggregated, so a failed run leaves no partial report behind.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Deserialize)]
struct RefRecord {
    lemma: String,
    frequency: u64,
    rank: u64,
}

/// Precomputed per-lemma frequency and rank, joined against by lemma.
pub struct ReferenceTable {
    by_lemma: HashMap<String, (u64, u64)>,
}

impl ReferenceTable {
    pub fn from_csv_file(path: &Path) -> Result<ReferenceTable> {
        let file = std::fs::File::open(path)?;
        ReferenceTable::from_reader(file)
    }

    /// Reads the `lemma`, `frequency` and `rank` columns by header name;
    /// other columns are ignored. The first occurrence of a lemma wins.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<ReferenceTable> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut by_lemma = HashMap::new();
        for record in csv_reader.deserialize() {
            let record: RefRecord = record?;
            by_lemma
                .entry(record.lemma)
                .or_insert((record.frequency, record.rank));
        }
        Ok(ReferenceTable { by_lemma })
    }

    /// (frequency, rank) for a lemma, or (0, 0) when the lemma is absent.
    pub fn lookup(&self, lemma: &str) -> (u64, u64) {
        self.by_lemma.get(lemma).copied().unwrap_or((0, 0))
    }

    pub fn len(&self) -> usize {
        self.by_lemma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_lemma.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::freqs::FreqRow;
    use std::fs;

    #[test]
    fn write_freq_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freqs.csv");
        let rows = vec![
            FreqRow {
                lemma: "Hund".to_owned(),
                pos: "NOUN".to_owned(),
                frequency: 2,
            },
            FreqRow {
                lemma: "laufen, gehen".to_owned(),
                pos: "VERB".to_owned(),
                frequency: 1,
            },
        ];
        write_csv(&path, &rows).unwrap();
        let data = fs::read_to_string(&path).unwrap();
        assert_eq!(
            data,
            "lemma,pos,frequency\nHund,NOUN,2\n\"laufen, gehen\",VERB,1\n"
        );
    }

    #[test]
    fn reference_lookup_with_default() {
        let data = "lemma,pos,frequency,rank\nHund,NOUN,120,17\nlaufen,VERB,300,5\n";
        let table = ReferenceTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("Hund"), (120, 17));
        assert_eq!(table.lookup("laufen"), (300, 5));
        // a missing lemma is not an error
        assert_eq!(table.lookup("Katze"), (0, 0));
    }

    #[test]
    fn reference_keeps_first_duplicate() {
        let data = "lemma,frequency,rank\nHund,120,17\nHund,99,40\n";
        let table = ReferenceTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.lookup("Hund"), (120, 17));
    }

    #[test]
    fn reference_rejects_missing_columns() {
        let data = "lemma,pos\nHund,NOUN\n";
        assert!(ReferenceTable::from_reader(data.as_bytes()).is_err());
    }
}
