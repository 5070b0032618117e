//! AnkiConnect client: fetches vocabulary notes over the local HTTP API.
//!
//! Anki must be running with the AnkiConnect add-on enabled. Failures are
//! fatal; there are no retries.

use crate::errors::{Result, api_failure};
use itertools::Itertools;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use std::{fmt, str};

pub type NoteId = u64;

pub const DEFAULT_URL: &str = "http://127.0.0.1:8765";

pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

const API_VERSION: u32 = 6;

// AnkiConnect is local, so a slow connect means it is not there at all.
const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Every AnkiConnect response carries both fields; exactly one is non-null.
#[derive(Deserialize)]
struct Response<T> {
    result: Option<T>,
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteField {
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteInfo {
    #[serde(rename = "noteId")]
    pub note_id: NoteId,
    #[serde(rename = "modelName")]
    pub model_name: String,
    pub fields: HashMap<String, NoteField>,
}

pub struct Client {
    url: String,
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new(url: &str, timeout: Duration) -> Result<Client> {
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()?;
        Ok(Client {
            url: url.to_owned(),
            http,
        })
    }

    fn invoke<T>(&self, action: &str, params: serde_json::Value) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = json!({
            "action": action,
            "version": API_VERSION,
            "params": params,
        });
        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()?
            .error_for_status()?;
        let response: Response<T> = response.json()?;
        if let Some(error) = response.error {
            return Err(api_failure(format!("{action}: {error}")));
        }
        response
            .result
            .ok_or_else(|| api_failure(format!("{action}: response has no result")))
    }

    /// IDs of the notes matching an Anki search query.
    pub fn find_notes(&self, query: &str) -> Result<Vec<NoteId>> {
        self.invoke("findNotes", json!({ "query": query }))
    }

    /// Model name and field values for the given notes.
    pub fn notes_info(&self, notes: &[NoteId]) -> Result<Vec<NoteInfo>> {
        self.invoke("notesInfo", json!({ "notes": notes }))
    }
}

/// Builds a `findNotes` query matching any of the given note types.
pub fn notetype_query<'a, I>(notetypes: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    notetypes
        .into_iter()
        .map(|notetype| format!("note:{notetype}"))
        .join(" OR ")
}

/// A note type and the pos label it maps to.
///
/// Parsed from a `NOTETYPE=POS` command line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotetypePos {
    pub notetype: String,
    pub pos: String,
}

impl str::FromStr for NotetypePos {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<NotetypePos, String> {
        match s.split_once('=') {
            Some((notetype, pos)) if !notetype.is_empty() && !pos.is_empty() => Ok(NotetypePos {
                notetype: notetype.to_owned(),
                pos: pos.to_owned(),
            }),
            _ => Err(format!("expected NOTETYPE=POS, got: {s}")),
        }
    }
}

impl fmt::Display for NotetypePos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.notetype, self.pos)
    }
}
