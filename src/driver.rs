//! Main entry points for the batch pipelines.

use crate::corpus;
use crate::errors::Result;
use crate::freqs::FrequencyTable;
use crate::lemmatize::Lemmatizer;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// How often progress is reported, in records.
const PROGRESS_EVERY: u64 = 10_000;

/// What to process.
pub struct DriverArgs<'a> {
    /// Corpus files, processed in order. The order does not affect the
    /// result; per-corpus tables are merged key-wise.
    pub input_paths: &'a [PathBuf],

    /// Records per lemmatizer batch. A tuning knob for the adapter's
    /// internal pipelining, not a concurrency contract.
    pub batch_size: usize,
}

/// Aggregates all corpora and merges the per-corpus tables into one.
///
/// This is the main entry point for the frequency builder.
pub fn build_freq_table(lemmatizer: &dyn Lemmatizer, args: &DriverArgs) -> Result<FrequencyTable> {
    let mut global = FrequencyTable::new();
    for path in args.input_paths {
        info!(target: "wortfreq", "lemmatizing: {}", path.display());
        let table = lemmatize_corpus(lemmatizer, path, args.batch_size)?;
        info!(
            target: "wortfreq",
            "{}: {} distinct keys, {} tokens",
            path.display(),
            table.len(),
            table.total()
        );
        global.merge(table);
    }
    Ok(global)
}

/// Aggregates one corpus into a fresh table.
///
/// The file is read twice: a pre-pass counts the records so that progress
/// can be reported against a total, then the main pass streams records
/// through the lemmatizer in batches.
pub fn lemmatize_corpus(
    lemmatizer: &dyn Lemmatizer,
    path: &Path,
    batch_size: usize,
) -> Result<FrequencyTable> {
    let batch_size = batch_size.max(1);
    let total = corpus::count_records(path)?;
    debug!(target: "wortfreq", "{}: {} records", path.display(), total);

    let mut table = FrequencyTable::new();
    let mut batch = Vec::with_capacity(batch_size);
    let mut done: u64 = 0;
    for record in corpus::records(path)? {
        batch.push(record?);
        if batch.len() == batch_size {
            feed_batch(lemmatizer, &mut table, &batch);
            let before = done;
            done += batch.len() as u64;
            batch.clear();
            if done / PROGRESS_EVERY != before / PROGRESS_EVERY {
                info!(target: "wortfreq", "{}: {}/{} records", path.display(), done, total);
            }
        }
    }
    if !batch.is_empty() {
        feed_batch(lemmatizer, &mut table, &batch);
    }
    Ok(table)
}

fn feed_batch(lemmatizer: &dyn Lemmatizer, table: &mut FrequencyTable, batch: &[String]) {
    for tokens in lemmatizer.process_batch(batch) {
        for token in &tokens {
            table.feed_token(token);
        }
    }
}
