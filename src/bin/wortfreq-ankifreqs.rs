use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use itertools::Itertools;
use log::{error, info};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use wortfreq::anki::{self, Client};
use wortfreq::errors::{Result, invalid_input};
use wortfreq::lemmatize::{self, Lexicon, LexiconLemmatizer};
use wortfreq::report::{AnkiRow, ReferenceTable, write_csv};
use wortfreq::vocab;

const DEFAULT_BATCH_SIZE: usize = 1000;

const DEFAULT_QUERY: &str =
    "note:My-German-Noun OR note:My-German-Verb OR note:My-German-Modifier";

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Reference frequency table (CSV with lemma, frequency, rank columns)
    #[arg(long)]
    freqs: PathBuf,
    /// Output file (CSV)
    #[arg(short, long)]
    output: PathBuf,
    /// Lemma lexicon (TSV: surface, lemma, pos)
    #[arg(long)]
    lexicon: PathBuf,
    /// AnkiConnect URL
    #[arg(long, default_value = anki::DEFAULT_URL)]
    api_url: String,
    /// AnkiConnect request timeout (seconds)
    #[arg(long, default_value_t = anki::DEFAULT_TIMEOUT_SECS)]
    api_timeout: u64,
    /// Anki search query selecting the vocabulary notes
    #[arg(long, default_value = DEFAULT_QUERY)]
    query: String,
    /// Note field holding the vocabulary entry
    #[arg(long, default_value = "Deutsch")]
    word_field: String,
    /// Records per lemmatizer batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn process(args: &Args) -> Result<()> {
    info!("reading reference table: {}", args.freqs.display());
    let reference = ReferenceTable::from_csv_file(&args.freqs)?;
    info!("reference lemmas: {}", reference.len());

    let client = Client::new(&args.api_url, Duration::from_secs(args.api_timeout))?;
    info!("fetching note IDs: {}", args.query);
    let note_ids = client.find_notes(&args.query)?;
    info!("total of {} notes found", note_ids.len());
    let notes = client.notes_info(&note_ids)?;

    let mut entries = Vec::new();
    for note in &notes {
        let field = note.fields.get(&args.word_field).ok_or_else(|| {
            invalid_input(format!(
                "note {} has no field {}",
                note.note_id, args.word_field
            ))
        })?;
        entries.push((note.model_name.clone(), field.value.clone()));
    }

    let items = vocab::extract_items(&entries);
    info!("{} distinct words extracted from {} notes", items.len(), notes.len());

    info!("lexicon: {}", args.lexicon.display());
    let lexicon = Lexicon::from_tsv_file(&args.lexicon)?;
    let lemmatizer = LexiconLemmatizer::new(lexicon);

    info!("extracting lemmas");
    let words = items.iter().map(|item| item.word.clone()).collect_vec();
    let lemmas = lemmatize::lemmatize_words(&lemmatizer, &words, args.batch_size)
        .into_iter()
        .map(|lemma| lemma.to_lowercase())
        .collect_vec();

    let mut rows = items
        .into_iter()
        .zip(lemmas)
        .map(|(item, lemma)| {
            let (frequency, rank) = reference.lookup(&lemma);
            AnkiRow {
                notetype: item.notetype,
                entry: item.entry,
                word: item.word,
                lemma,
                frequency,
                rank,
            }
        })
        .collect_vec();
    rows.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| a.lemma.cmp(&b.lemma))
            .then_with(|| a.word.cmp(&b.word))
    });

    write_csv(&args.output, &rows)?;
    info!("wrote {} rows: {}", rows.len(), args.output.display());
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}
