mod delimited;
mod json;
mod xml;

use std::fs;
use std::io;
use std::path::Path;

use bndict_core::dict::Candidate;
use bndict_core::settings::SourceFormat;
use tracing::debug;

pub use delimited::{CsvSource, PipeSource};
pub use json::{PairJsonSource, RichJsonSource, SynonymGroupSource};
pub use xml::XmlRowsSource;

/// A pluggable dictionary source that turns one raw file into candidates.
pub trait DictSource {
    /// Parse `path` and return its candidates in file order.
    fn read(&self, path: &Path) -> Result<Vec<Candidate>, DictSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DictSourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Create the reader for a configured source format.
pub fn from_format(format: SourceFormat) -> Box<dyn DictSource> {
    match format {
        SourceFormat::Pipe => Box::new(PipeSource),
        SourceFormat::CsvComma => Box::new(CsvSource::comma()),
        SourceFormat::CsvSemicolon => Box::new(CsvSource::semicolon()),
        SourceFormat::XmlRows => Box::new(XmlRowsSource),
        SourceFormat::JsonRich => Box::new(RichJsonSource),
        SourceFormat::JsonPairs => Box::new(PairJsonSource),
        SourceFormat::JsonSynonymGroups => Box::new(SynonymGroupSource),
    }
}

/// Read a source file as text, dropping a leading byte-order mark.
pub(super) fn read_source(path: &Path) -> Result<String, DictSourceError> {
    debug!("Reading {}...", path.display());
    let mut content = fs::read_to_string(path)?;
    if content.starts_with('\u{feff}') {
        content.drain(..'\u{feff}'.len_utf8());
    }
    Ok(content)
}

/// Parse a line-oriented file with shared boilerplate: reading, line
/// iteration, delimiter splitting and stats logging.
///
/// `parse_line` receives the split fields of every line, including empty
/// ones. Return `Some(Candidate)` to emit it, `None` to skip the line.
pub(super) fn parse_lines(
    path: &Path,
    delimiter: char,
    parse_line: impl Fn(&[&str]) -> Option<Candidate>,
) -> Result<Vec<Candidate>, DictSourceError> {
    let content = read_source(path)?;

    let mut candidates = Vec::new();
    let mut total_lines = 0u64;
    let mut skipped = 0u64;
    for line in content.lines() {
        total_lines += 1;
        let fields = split_outside_quotes(line, delimiter);
        match parse_line(&fields) {
            Some(candidate) => candidates.push(candidate),
            None => skipped += 1,
        }
    }

    debug!("  (skipped {skipped} of {total_lines} lines)");
    Ok(candidates)
}

/// Split `line` on `delimiter`, except where the delimiter sits inside a
/// double-quoted span.
///
/// A delimiter counts as a separator when an even number of `"` follow it
/// on the line. Quotes are kept in the returned fields.
pub(super) fn split_outside_quotes(line: &str, delimiter: char) -> Vec<&str> {
    let mut quotes_after = 0usize;
    let mut cuts = Vec::new();
    for (i, c) in line.char_indices().rev() {
        if c == '"' {
            quotes_after += 1;
        } else if c == delimiter && quotes_after % 2 == 0 {
            cuts.push(i);
        }
    }

    let mut fields = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for &cut in cuts.iter().rev() {
        fields.push(&line[start..cut]);
        start = cut + delimiter.len_utf8();
    }
    fields.push(&line[start..]);
    fields
}
