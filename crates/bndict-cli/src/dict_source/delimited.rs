use std::path::Path;

use bndict_core::dict::Candidate;

use super::{parse_lines, DictSource, DictSourceError};

/// Build a candidate from two columns. Lines too short to hold both are
/// skipped; the merge would reject them anyway.
fn pair(fields: &[&str], en_col: usize, bn_col: usize) -> Option<Candidate> {
    let en = fields.get(en_col)?;
    let bn = fields.get(bn_col)?;
    Some(Candidate::Primary {
        en: Some(en.to_string()),
        bn: Some(bn.to_string()),
        synonyms_en: Vec::new(),
    })
}

/// Pipe-delimited text source.
///
/// Line format: `ignored|en|bn`. The leading column is never read.
pub struct PipeSource;

impl DictSource for PipeSource {
    fn read(&self, path: &Path) -> Result<Vec<Candidate>, DictSourceError> {
        parse_lines(path, '|', |fields| pair(fields, 1, 2))
    }
}

/// Quote-aware delimited source with configurable columns.
///
/// Delimiters inside double-quoted spans are kept; the quotes themselves are
/// left for the normalizer to strip. Extra columns are ignored.
pub struct CsvSource {
    delimiter: char,
    en_col: usize,
    bn_col: usize,
}

impl CsvSource {
    /// `en,bn` per line.
    pub fn comma() -> Self {
        Self {
            delimiter: ',',
            en_col: 0,
            bn_col: 1,
        }
    }

    /// `id;en;bn;pron_bn` per line.
    pub fn semicolon() -> Self {
        Self {
            delimiter: ';',
            en_col: 1,
            bn_col: 2,
        }
    }
}

impl DictSource for CsvSource {
    fn read(&self, path: &Path) -> Result<Vec<Candidate>, DictSourceError> {
        parse_lines(path, self.delimiter, |fields| {
            pair(fields, self.en_col, self.bn_col)
        })
    }
}
