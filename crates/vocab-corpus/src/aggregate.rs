use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use vocab_types::FrequencyMap;

use crate::CorpusError;
use crate::freqlist::parse_frequency_file;

/// Merge every export into one frequency mapping, summing repeated words.
///
/// Each file is fully read and closed before the next is opened. The first
/// unreadable file aborts the merge.
pub fn aggregate<P: AsRef<Path>>(paths: &[P]) -> Result<FrequencyMap, CorpusError> {
    let mut merged = FrequencyMap::new();
    let mut total_records = 0usize;
    for path in paths {
        let parsed = parse_frequency_file(path)?;
        total_records += parsed.records.len();
        merged.extend(parsed.records);
    }
    info!(
        "aggregated {} records from {} files into {} unique words",
        total_records,
        paths.len(),
        merged.len()
    );
    Ok(merged)
}

/// Find the canonical export in `dir` plus its numbered companions.
///
/// For a canonical name `Word_results.txt` the companions are every
/// `Word_results_*.txt`, sorted by path. The canonical file comes first when
/// present. With nothing found the canonical path is returned alone, so the
/// subsequent read fails naming the file that was expected.
pub fn discover_inputs(
    dir: impl AsRef<Path>,
    canonical: &str,
) -> Result<Vec<PathBuf>, CorpusError> {
    let dir = dir.as_ref();
    let canonical_path = dir.join(canonical);
    let (stem, ext) = split_name(canonical);
    let prefix = format!("{stem}_");

    let mut companions = Vec::new();
    let entries = fs::read_dir(dir).map_err(|err| CorpusError::io(dir, err))?;
    for entry in entries {
        let entry = entry.map_err(|err| CorpusError::io(dir, err))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with(&prefix) && name.ends_with(ext) && name.len() >= prefix.len() + ext.len()
        {
            companions.push(entry.path());
        }
    }
    companions.sort();

    let mut candidates = Vec::with_capacity(companions.len() + 1);
    if canonical_path.is_file() {
        candidates.push(canonical_path.clone());
    }
    candidates.extend(companions);

    let found = dedup_paths(candidates);
    if found.is_empty() {
        warn!(
            "no frequency exports found in {}; expecting {}",
            dir.display(),
            canonical
        );
        return Ok(vec![canonical_path]);
    }
    info!("discovered {} frequency exports in {}", found.len(), dir.display());
    Ok(found)
}

/// Drop repeated paths, keeping the first occurrence of each.
pub fn dedup_paths<I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// `Word_results.txt` -> (`Word_results`, `.txt`); no extension -> (`name`, ``).
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}
