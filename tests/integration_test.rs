use std::fs;
use std::path::{Path, PathBuf};
use wortfreq::driver::{self, DriverArgs};
use wortfreq::lemmatize::{Lexicon, LexiconLemmatizer};
use wortfreq::report::{self, ReferenceTable};

fn init() {
    let _ = pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

const LEXICON: &str = "\
Hund\tHund\tNOUN
Hunde\tHund\tNOUN
läuft\tlaufen\tVERB
laufen\tlaufen\tVERB
der\tder\tDET
die\tder\tDET
";

fn write_file(dir: &Path, name: &str, data: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn corpus_to_csv() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let lexicon_path = write_file(dir.path(), "lexicon.tsv", LEXICON);
    let corpus_a = write_file(dir.path(), "a.txt", "Der Hund läuft.\n");
    let corpus_b = write_file(dir.path(), "b.txt", "Die Hunde laufen.\n");

    let lexicon = Lexicon::from_tsv_file(&lexicon_path).unwrap();
    let lemmatizer = LexiconLemmatizer::new(lexicon);

    let paths = vec![corpus_a, corpus_b];
    let driver_args = DriverArgs {
        input_paths: &paths,
        batch_size: 1000,
    };
    let table = driver::build_freq_table(&lemmatizer, &driver_args).unwrap();
    assert_eq!(table.get("Hund", "NOUN"), 2);
    assert_eq!(table.get("laufen", "VERB"), 2);
    assert_eq!(table.get("der", "DET"), 2);
    assert_eq!(table.len(), 3);
    assert_eq!(table.total(), 6);

    let output = dir.path().join("freqs.csv");
    report::write_csv(&output, &table.sorted_rows()).unwrap();
    let data = fs::read_to_string(&output).unwrap();
    assert_eq!(
        data,
        "lemma,pos,frequency\nHund,NOUN,2\nder,DET,2\nlaufen,VERB,2\n"
    );
}

#[test]
fn merge_order_does_not_matter() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let lexicon_path = write_file(dir.path(), "lexicon.tsv", LEXICON);
    let corpus_a = write_file(dir.path(), "a.txt", "Der Hund läuft.\nDie Hunde laufen.\n");
    let corpus_b = write_file(dir.path(), "b.txt", "Hunde laufen.\n");

    let lexicon = Lexicon::from_tsv_file(&lexicon_path).unwrap();
    let lemmatizer = LexiconLemmatizer::new(lexicon);

    let forward = vec![corpus_a.clone(), corpus_b.clone()];
    let backward = vec![corpus_b, corpus_a];
    let table_forward = driver::build_freq_table(
        &lemmatizer,
        &DriverArgs {
            input_paths: &forward,
            batch_size: 2,
        },
    )
    .unwrap();
    let table_backward = driver::build_freq_table(
        &lemmatizer,
        &DriverArgs {
            input_paths: &backward,
            batch_size: 1000,
        },
    )
    .unwrap();
    assert_eq!(table_forward, table_backward);
}

#[test]
fn frequency_output_joins_back_as_reference() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let lexicon_path = write_file(dir.path(), "lexicon.tsv", LEXICON);
    let corpus = write_file(dir.path(), "a.txt", "Der Hund läuft.\nDie Hunde laufen.\n");

    let lexicon = Lexicon::from_tsv_file(&lexicon_path).unwrap();
    let lemmatizer = LexiconLemmatizer::new(lexicon);
    let paths = vec![corpus];
    let table = driver::build_freq_table(
        &lemmatizer,
        &DriverArgs {
            input_paths: &paths,
            batch_size: 1000,
        },
    )
    .unwrap();

    // rank is the 1-based position in the sorted report
    let mut csv = String::from("lemma,pos,frequency,rank\n");
    for (i, row) in table.sorted_rows().iter().enumerate() {
        csv.push_str(&format!("{},{},{},{}\n", row.lemma, row.pos, row.frequency, i + 1));
    }
    let reference_path = write_file(dir.path(), "reference.csv", &csv);
    let reference = ReferenceTable::from_csv_file(&reference_path).unwrap();

    assert_eq!(reference.lookup("Hund"), (2, 1));
    assert_eq!(reference.lookup("der"), (2, 2));
    assert_eq!(reference.lookup("laufen"), (2, 3));
    assert_eq!(reference.lookup("Katze"), (0, 0));
}
