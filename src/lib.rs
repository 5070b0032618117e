pub mod anki;
pub mod corpus;
pub mod driver;
pub mod errors;
pub mod freqs;
pub mod lemmatize;
pub mod report;
pub mod vocab;
