//! Corpus files: one free-text record per line, UTF-8.

use crate::errors::Result;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Counts the records in a corpus without keeping them.
///
/// This is the pre-pass that gives progress reporting its denominator; the
/// file is opened again by [records] for the main pass.
pub fn count_records(path: &Path) -> Result<u64> {
    let file = fs::File::open(path)?;
    let mut count = 0;
    for line in BufReader::new(file).lines() {
        line?;
        count += 1;
    }
    Ok(count)
}

/// Opens a corpus for one streaming pass over its records.
pub fn records(path: &Path) -> Result<impl Iterator<Item = io::Result<String>>> {
    let file = fs::File::open(path)?;
    Ok(BufReader::new(file).lines())
}
