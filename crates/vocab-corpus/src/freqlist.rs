use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};
use vocab_types::NormalizedWord;

use crate::CorpusError;

const FREQ_HEADER: &str = "Freq";
const HEADWORD_HEADER: &str = "Headword";
const TYPE_HEADER: &str = "Type";

/// How cells are separated, decided from the header line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Delimiter {
    Tab,
    Whitespace,
}

/// Column roles resolved from a header line.
///
/// `freq` is `None` when no `Freq` column exists; rows then fall back to the
/// last numeric cell. `word` is the `Type` column, or column 0 without one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnPlan {
    pub delimiter: Delimiter,
    pub freq: Option<usize>,
    pub headword: Option<usize>,
    pub word: usize,
}

impl ColumnPlan {
    pub fn from_header(header: &str) -> Self {
        let delimiter = if header.contains('\t') {
            Delimiter::Tab
        } else {
            Delimiter::Whitespace
        };
        let cells = split_cells(delimiter, header);
        let find = |name: &str| cells.iter().position(|cell| *cell == name);
        Self {
            delimiter,
            freq: find(FREQ_HEADER),
            headword: find(HEADWORD_HEADER),
            word: find(TYPE_HEADER).unwrap_or(0),
        }
    }

    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        split_cells(self.delimiter, line)
    }

    /// Resolve one data row, or `None` if it has no usable frequency or word.
    ///
    /// The `Freq` cell is used whenever it parses as a number; other cells are
    /// scanned (last first) only when it does not. A number that is negative
    /// or not finite drops the row rather than sending it to the scan.
    pub fn resolve(&self, cells: &[&str]) -> Option<(NormalizedWord, f64)> {
        let number = self
            .freq
            .and_then(|idx| cells.get(idx))
            .and_then(|cell| parse_number(cell))
            .or_else(|| cells.iter().rev().find_map(|cell| parse_number(cell)))?;
        let frequency = valid_frequency(number)?;

        let raw = match self.headword.and_then(|idx| cells.get(idx)) {
            Some(cell) if !cell.is_empty() => *cell,
            _ => cells.get(self.word).copied()?,
        };
        let word = NormalizedWord::new(raw)?;
        Some((word, frequency))
    }
}

fn split_cells(delimiter: Delimiter, line: &str) -> Vec<&str> {
    let line = line.trim();
    match delimiter {
        Delimiter::Tab => line.split('\t').map(str::trim).collect(),
        Delimiter::Whitespace => line.split_whitespace().collect(),
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

/// Frequencies are finite and non-negative.
fn valid_frequency(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Outcome of parsing one frequency export.
#[derive(Clone, Debug, Default)]
pub struct ParsedFile {
    /// `None` for an empty file.
    pub plan: Option<ColumnPlan>,
    pub records: Vec<(NormalizedWord, f64)>,
    /// Non-blank data rows dropped for lacking a number or a word.
    pub skipped: usize,
}

/// Parse a frequency export from disk.
///
/// Fails only when the file cannot be opened or read; malformed rows are
/// skipped and counted in [`ParsedFile::skipped`].
pub fn parse_frequency_file(path: impl AsRef<Path>) -> Result<ParsedFile, CorpusError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| CorpusError::io(path, err))?;
    let parsed =
        parse_frequency_reader(BufReader::new(file)).map_err(|err| CorpusError::io(path, err))?;
    if let Some(plan) = &parsed.plan {
        debug!("{}: column plan {:?}", path.display(), plan);
    }
    info!(
        "parsed {} records from {} ({} rows skipped)",
        parsed.records.len(),
        path.display(),
        parsed.skipped
    );
    Ok(parsed)
}

/// Parse a frequency export from any buffered reader.
///
/// Lines are decoded lossily so stray bytes in one row cannot sink the file.
pub fn parse_frequency_reader<R: BufRead>(mut reader: R) -> std::io::Result<ParsedFile> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(ParsedFile::default());
    }
    let plan = ColumnPlan::from_header(&String::from_utf8_lossy(&buf));

    let mut records = Vec::new();
    let mut skipped = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let cells = plan.split(&line);
        if cells.is_empty() || cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        match plan.resolve(&cells) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    Ok(ParsedFile {
        plan: Some(plan),
        records,
        skipped,
    })
}
