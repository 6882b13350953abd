use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use vocab_types::DifficultWord;

pub const WORD_HEADER: &str = "Word";

/// Write the ranked list as a single-column table headed `Word`.
pub fn write_difficult_words(path: impl AsRef<Path>, words: &[DifficultWord]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("create output file {}", path.display()))?;
    write_words_to(file, words).with_context(|| format!("write {}", path.display()))?;
    info!("{} difficult words saved to {}", words.len(), path.display());
    Ok(())
}

pub fn write_words_to<W: Write>(writer: W, words: &[DifficultWord]) -> csv::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record([WORD_HEADER])?;
    for entry in words {
        out.write_record([entry.word.as_str()])?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_types::NormalizedWord;

    #[test]
    fn writes_header_then_one_word_per_row() {
        let words: Vec<DifficultWord> = [("whale", 1.0), ("ice cream", 2.0)]
            .into_iter()
            .map(|(raw, frequency)| DifficultWord {
                word: NormalizedWord::new(raw).unwrap(),
                frequency,
            })
            .collect();
        let mut buf = Vec::new();
        write_words_to(&mut buf, &words).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Word\nwhale\nice cream\n");
    }

    #[test]
    fn empty_list_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("difficult_words.csv");
        write_difficult_words(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Word\n");
    }
}
