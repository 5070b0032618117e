use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use itertools::{Itertools, izip};
use log::{error, info};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use wortfreq::anki::{self, Client, NotetypePos};
use wortfreq::errors::{Result, invalid_input};
use wortfreq::lemmatize::{self, Lexicon, LexiconLemmatizer};
use wortfreq::report;
use wortfreq::vocab;

const DEFAULT_BATCH_SIZE: usize = 1000;

/// Vocabulary note types and the pos label each one maps to.
fn default_notetypes() -> Vec<NotetypePos> {
    [
        ("My-German-Noun", "NOUN"),
        ("My-German-Verb", "VERB"),
        ("My-German-Modifier", "MODIFIER"),
    ]
    .into_iter()
    .map(|(notetype, pos)| NotetypePos {
        notetype: notetype.to_owned(),
        pos: pos.to_owned(),
    })
    .collect()
}

#[derive(Serialize)]
struct DictRow {
    pos: String,
    word: String,
    lemma: String,
}

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
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
    /// Note type and the pos label it maps to (repeatable)
    #[arg(long = "notetype", value_name = "NOTETYPE=POS", default_values_t = default_notetypes())]
    notetypes: Vec<NotetypePos>,
    /// Note field holding the vocabulary entry
    #[arg(long, default_value = "Deutsch")]
    word_field: String,
    /// Records per lemmatizer batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn pos_for_notetype<'a>(mappings: &'a [NotetypePos], notetype: &str) -> Option<&'a str> {
    mappings
        .iter()
        .find(|mapping| mapping.notetype == notetype)
        .map(|mapping| mapping.pos.as_str())
}

fn process(args: &Args) -> Result<()> {
    let client = Client::new(&args.api_url, Duration::from_secs(args.api_timeout))?;
    let query = anki::notetype_query(args.notetypes.iter().map(|m| m.notetype.as_str()));
    info!("fetching note IDs: {query}");
    let note_ids = client.find_notes(&query)?;
    info!("fetching info for {} notes", note_ids.len());
    let notes = client.notes_info(&note_ids)?;

    let mut poses = Vec::new();
    let mut words = Vec::new();
    for note in &notes {
        let pos = pos_for_notetype(&args.notetypes, &note.model_name)
            .ok_or_else(|| invalid_input(format!("unexpected note type: {}", note.model_name)))?;
        let field = note.fields.get(&args.word_field).ok_or_else(|| {
            invalid_input(format!(
                "note {} has no field {}",
                note.note_id, args.word_field
            ))
        })?;
        poses.push(pos);
        words.push(field.value.clone());
    }

    info!("lexicon: {}", args.lexicon.display());
    let lexicon = Lexicon::from_tsv_file(&args.lexicon)?;
    let lemmatizer = LexiconLemmatizer::new(lexicon);

    info!("extracting lemmas for {} words", words.len());
    let main_words = words
        .iter()
        .map(|word| vocab::extract_main_word(word).to_owned())
        .collect_vec();
    let lemmas = lemmatize::lemmatize_words(&lemmatizer, &main_words, args.batch_size);

    let rows = izip!(poses, words, lemmas)
        .map(|(pos, word, lemma)| DictRow {
            pos: pos.to_owned(),
            word,
            lemma,
        })
        .collect_vec();
    report::write_csv(&args.output, &rows)?;
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
