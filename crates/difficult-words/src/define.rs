//! Attach dictionary definitions to an extracted word list.
//!
//! Works through the list sequentially, appending one row per word to the
//! output table so an interrupted run can resume: words already present in
//! the output (compared case-insensitively) are skipped. A word the
//! dictionary does not know is recorded with blank fields, and so is a word
//! whose lookups kept failing after the retry budget ran out.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";
pub const DEFAULT_INPUT: &str = "difficult_words.csv";
pub const DEFAULT_OUTPUT: &str = "difficult_words_with_defs.csv";
pub const OUTPUT_HEADER: [&str; 5] = ["Word", "Phonetic", "POS", "Definition", "Example"];

const USER_AGENT: &str = "word-fetcher/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub definitions: Vec<Sense>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sense {
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
}

/// One output row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionRecord {
    pub word: String,
    pub phonetic: String,
    pub pos: String,
    pub definition: String,
    pub example: String,
}

impl DefinitionRecord {
    pub fn blank(word: &str) -> Self {
        Self {
            word: word.to_string(),
            ..Self::default()
        }
    }
}

/// Decode a dictionary response body; anything but a JSON entry list is empty.
pub fn decode_entries(body: &[u8]) -> Vec<Entry> {
    serde_json::from_slice(body).unwrap_or_default()
}

/// Phonetic of the first entry plus the first sense of its first meaning.
pub fn first_sense(word: &str, entries: &[Entry]) -> DefinitionRecord {
    let mut record = DefinitionRecord::blank(word);
    let Some(entry) = entries.first() else {
        return record;
    };
    record.phonetic = entry.phonetic.clone().unwrap_or_default();
    if let Some(meaning) = entry.meanings.first() {
        record.pos = meaning.part_of_speech.clone().unwrap_or_default();
        if let Some(sense) = meaning.definitions.first() {
            record.definition = trimmed(&sense.definition);
            record.example = trimmed(&sense.example);
        }
    }
    record
}

fn trimmed(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_string()
}

#[derive(Debug)]
pub enum Lookup {
    Found(Vec<Entry>),
    NotFound,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request for {word:?} failed: {source}")]
    Transport {
        word: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("dictionary returned HTTP {status} for {word:?}")]
    Status { word: String, status: u16 },
}

/// Anything that can look a word up.
pub trait DefinitionSource {
    fn lookup(&self, word: &str) -> impl Future<Output = Result<Lookup, LookupError>> + Send;
}

/// The free dictionaryapi.dev service, or anything that speaks its format.
#[derive(Clone, Debug)]
pub struct DictionaryApi {
    client: reqwest::Client,
    base_url: Url,
}

impl DictionaryApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid dictionary URL {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("dictionary URL {base_url} cannot take a path");
        }
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, base_url })
    }

    /// Base URL with `word` appended as a percent-encoded path segment.
    pub fn word_url(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url
    }
}

impl DefinitionSource for DictionaryApi {
    async fn lookup(&self, word: &str) -> Result<Lookup, LookupError> {
        let transport = |source| LookupError::Transport {
            word: word.to_string(),
            source,
        };
        let response = self
            .client
            .get(self.word_url(word))
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                word: word.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(transport)?;
        Ok(Lookup::Found(decode_entries(&body)))
    }
}

#[derive(Clone, Debug)]
pub struct DefineOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Stop after this many newly processed words.
    pub limit: Option<usize>,
    /// Pause between words; failed attempt `n` waits `delay * n`.
    pub delay: Duration,
    pub max_retries: u32,
}

impl Default for DefineOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            limit: None,
            delay: Duration::from_millis(300),
            max_retries: 3,
        }
    }
}

/// Words from the first column of a table with a header row.
pub fn load_words(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut words = Vec::new();
    for_each_first_cell(path, |cell| words.push(cell.to_string()))
        .with_context(|| format!("reading word list {}", path.display()))?;
    Ok(words)
}

/// Lowercased words already present in an output table; empty if it does not exist.
pub fn load_done(path: impl AsRef<Path>) -> Result<HashSet<String>> {
    let path = path.as_ref();
    let mut done = HashSet::new();
    if !path.exists() {
        return Ok(done);
    }
    for_each_first_cell(path, |cell| {
        done.insert(cell.to_lowercase());
    })
    .with_context(|| format!("reading finished words from {}", path.display()))?;
    Ok(done)
}

fn for_each_first_cell(path: &Path, mut visit: impl FnMut(&str)) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    for record in reader.records() {
        let record = record?;
        if let Some(cell) = record.get(0).map(str::trim)
            && !cell.is_empty()
        {
            visit(cell);
        }
    }
    Ok(())
}

/// Append one row, writing the header first when the file is new.
pub fn append_record(path: impl AsRef<Path>, record: &DefinitionRecord) -> Result<()> {
    let path = path.as_ref();
    let exists = path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {} for append", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    if !exists {
        writer.write_record(OUTPUT_HEADER)?;
    }
    writer.write_record([
        &record.word,
        &record.phonetic,
        &record.pos,
        &record.definition,
        &record.example,
    ])?;
    writer.flush()?;
    Ok(())
}

/// Look up every pending word and append the results; returns rows written.
pub async fn fetch_definitions<S: DefinitionSource>(
    source: &S,
    options: &DefineOptions,
) -> Result<usize> {
    let words = load_words(&options.input)?;
    let mut done = load_done(&options.output)?;
    info!(
        "{} words in {}, {} already defined in {}",
        words.len(),
        options.input.display(),
        done.len(),
        options.output.display()
    );

    let mut fetched = 0usize;
    for word in words {
        let key = word.to_lowercase();
        if done.contains(&key) {
            continue;
        }
        if options.limit.is_some_and(|limit| fetched >= limit) {
            break;
        }

        let record = lookup_with_retry(source, &word, options).await;
        append_record(&options.output, &record)?;
        done.insert(key);
        fetched += 1;
        sleep(options.delay).await;
    }

    info!("wrote {fetched} definitions to {}", options.output.display());
    Ok(fetched)
}

async fn lookup_with_retry<S: DefinitionSource>(
    source: &S,
    word: &str,
    options: &DefineOptions,
) -> DefinitionRecord {
    for attempt in 1..=options.max_retries {
        match source.lookup(word).await {
            Ok(Lookup::Found(entries)) => return first_sense(word, &entries),
            Ok(Lookup::NotFound) => return DefinitionRecord::blank(word),
            Err(err) => {
                warn!("attempt {attempt}/{}: {err}", options.max_retries);
                sleep(options.delay * attempt).await;
            }
        }
    }
    warn!(
        "no definition for {word:?} after {} attempts; recording blank",
        options.max_retries
    );
    DefinitionRecord::blank(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "word": "gunwale",
            "phonetic": "/ˈɡʌnəl/",
            "meanings": [
                {
                    "partOfSpeech": "noun",
                    "definitions": [
                        {"definition": "  The top edge of the side of a boat. ", "example": " Water came over the gunwale."},
                        {"definition": "A second sense."}
                    ]
                },
                {"partOfSpeech": "verb", "definitions": []}
            ]
        },
        {"phonetic": "/other/"}
    ]"#;

    #[test]
    fn extracts_first_sense() {
        let entries = decode_entries(SAMPLE.as_bytes());
        let record = first_sense("gunwale", &entries);
        assert_eq!(
            record,
            DefinitionRecord {
                word: "gunwale".into(),
                phonetic: "/ˈɡʌnəl/".into(),
                pos: "noun".into(),
                definition: "The top edge of the side of a boat.".into(),
                example: "Water came over the gunwale.".into(),
            }
        );
    }

    #[test]
    fn missing_fields_stay_blank() {
        let entries = decode_entries(br#"[{"phonetic": null, "meanings": [{"definitions": []}]}]"#);
        assert_eq!(first_sense("brine", &entries), DefinitionRecord::blank("brine"));
        assert_eq!(first_sense("brine", &[]), DefinitionRecord::blank("brine"));
    }

    #[test]
    fn malformed_bodies_decode_to_nothing() {
        assert!(decode_entries(b"not json").is_empty());
        assert!(decode_entries(br#"{"title": "No Definitions Found"}"#).is_empty());
    }

    #[test]
    fn word_url_encodes_segment() {
        let api = DictionaryApi::new(DEFAULT_API_URL).unwrap();
        assert_eq!(
            api.word_url("ice cream").as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/ice%20cream"
        );
        let bare = DictionaryApi::new("http://localhost:8080/define").unwrap();
        assert_eq!(
            bare.word_url("brine").as_str(),
            "http://localhost:8080/define/brine"
        );
    }

    #[test]
    fn rejects_unusable_urls() {
        assert!(DictionaryApi::new("not a url").is_err());
        assert!(DictionaryApi::new("mailto:someone@example.com").is_err());
    }
}
