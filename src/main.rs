use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{error, info};
use std::path::PathBuf;
use std::process;
use wortfreq::driver::{self, DriverArgs};
use wortfreq::errors::Result;
use wortfreq::lemmatize::{Lexicon, LexiconLemmatizer};
use wortfreq::report;

const DEFAULT_BATCH_SIZE: usize = 1000;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input corpus files (one record per line)
    #[arg(required = true)]
    infiles: Vec<PathBuf>,
    /// Output file (CSV)
    #[arg(short, long)]
    output: PathBuf,
    /// Lemma lexicon (TSV: surface, lemma, pos)
    #[arg(long)]
    lexicon: PathBuf,
    /// Records per lemmatizer batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn process(args: &Args) -> Result<()> {
    info!("lexicon: {}", args.lexicon.display());
    let lexicon = Lexicon::from_tsv_file(&args.lexicon)?;
    info!("lexicon entries: {}", lexicon.len());
    let lemmatizer = LexiconLemmatizer::new(lexicon);

    let driver_args = DriverArgs {
        input_paths: &args.infiles,
        batch_size: args.batch_size,
    };
    let table = driver::build_freq_table(&lemmatizer, &driver_args)?;
    info!(
        "total: {} distinct (lemma, pos) keys, {} tokens",
        table.len(),
        table.total()
    );

    report::write_csv(&args.output, &table.sorted_rows())?;
    info!("wrote: {}", args.output.display());
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
