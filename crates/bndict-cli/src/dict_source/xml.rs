use std::borrow::Cow;
use std::path::Path;

use bndict_core::dict::Candidate;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use tracing::debug;

use super::{read_source, DictSource, DictSourceError};

const ROW_TAG: &[u8] = b"row";
const FIELD_TAG: &[u8] = b"field";
const EN_FIELD: &str = "en_word";
const BN_FIELD: &str = "bn_word";

/// XML table-dump source.
///
/// Reads every `<row>` element and takes the text of its
/// `<field name="en_word">` and `<field name="bn_word">` children. Other
/// fields are ignored; a missing field yields an absent side.
pub struct XmlRowsSource;

impl DictSource for XmlRowsSource {
    fn read(&self, path: &Path) -> Result<Vec<Candidate>, DictSourceError> {
        let content = read_source(path)?;
        let candidates = parse_rows(&content)?;
        debug!("  ({} rows)", candidates.len());
        Ok(candidates)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    En,
    Bn,
    Other,
}

#[derive(Default)]
struct Row {
    en: Option<String>,
    bn: Option<String>,
}

impl Row {
    fn set(&mut self, column: Column, value: String) {
        match column {
            Column::En => self.en = Some(value),
            Column::Bn => self.bn = Some(value),
            Column::Other => {}
        }
    }

    fn into_candidate(self) -> Candidate {
        Candidate::Primary {
            en: self.en,
            bn: self.bn,
            synonyms_en: Vec::new(),
        }
    }
}

fn parse_rows(xml: &str) -> Result<Vec<Candidate>, DictSourceError> {
    let mut reader = Reader::from_str(xml);
    let mut candidates = Vec::new();
    let mut row: Option<Row> = None;
    let mut column: Option<Column> = None;
    let mut text = String::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            DictSourceError::Parse(format!(
                "XML error at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;
        match event {
            Event::Start(e) if e.local_name().as_ref() == ROW_TAG => {
                row = Some(Row::default());
                column = None;
            }
            Event::End(e) if e.local_name().as_ref() == ROW_TAG => {
                if let Some(finished) = row.take() {
                    candidates.push(finished.into_candidate());
                }
                column = None;
            }
            Event::Start(e) if e.local_name().as_ref() == FIELD_TAG && row.is_some() => {
                column = Some(column_of(&e)?);
                text.clear();
            }
            Event::Empty(e) if e.local_name().as_ref() == FIELD_TAG => {
                if let Some(current) = row.as_mut() {
                    current.set(column_of(&e)?, String::new());
                }
            }
            Event::End(e) if e.local_name().as_ref() == FIELD_TAG => {
                if let (Some(current), Some(col)) = (row.as_mut(), column.take()) {
                    current.set(col, std::mem::take(&mut text));
                }
            }
            Event::Text(t) if column.is_some() => text.push_str(&unescape_lossy(&t)),
            Event::CData(t) if column.is_some() => text.push_str(&String::from_utf8_lossy(&t)),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(candidates)
}

fn column_of(e: &BytesStart<'_>) -> Result<Column, DictSourceError> {
    let attr = e
        .try_get_attribute("name")
        .map_err(|err| DictSourceError::Parse(format!("XML attribute error: {err}")))?;
    let Some(attr) = attr else {
        return Ok(Column::Other);
    };
    let name = attr
        .unescape_value()
        .map_err(|err| DictSourceError::Parse(format!("XML attribute error: {err}")))?;
    Ok(match name.as_ref() {
        EN_FIELD => Column::En,
        BN_FIELD => Column::Bn,
        _ => Column::Other,
    })
}

/// Unescape entities, keeping the raw text when an entity is unknown.
fn unescape_lossy<'a>(t: &'a BytesText<'a>) -> Cow<'a, str> {
    match t.unescape() {
        Ok(s) => s,
        Err(_) => String::from_utf8_lossy(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary(en: Option<&str>, bn: Option<&str>) -> Candidate {
        Candidate::Primary {
            en: en.map(str::to_string),
            bn: bn.map(str::to_string),
            synonyms_en: Vec::new(),
        }
    }

    #[test]
    fn test_parse_rows() {
        let xml = r#"<?xml version="1.0"?>
<mysqldump>
  <database name="dict">
    <table_data name="words">
      <row>
        <field name="id">1</field>
        <field name="en_word">Apple</field>
        <field name="bn_word">আপেল (noun)</field>
      </row>
      <row>
        <field name="bn_word">কলা</field>
        <field name="en_word">banana</field>
      </row>
    </table_data>
  </database>
</mysqldump>"#;
        let candidates = parse_rows(xml).unwrap();
        assert_eq!(
            candidates,
            vec![
                primary(Some("Apple"), Some("আপেল (noun)")),
                primary(Some("banana"), Some("কলা")),
            ]
        );
    }

    #[test]
    fn test_entities_and_cdata() {
        let xml = r#"<rows>
<row><field name="en_word">salt &amp; pepper</field><field name="bn_word"><![CDATA[লবণ "ও" মরিচ]]></field></row>
</rows>"#;
        let candidates = parse_rows(xml).unwrap();
        assert_eq!(
            candidates,
            vec![primary(Some("salt & pepper"), Some("লবণ \"ও\" মরিচ"))]
        );
    }

    #[test]
    fn test_missing_and_empty_fields() {
        let xml = r#"<rows>
<row><field name="en_word">ghost</field></row>
<row><field name="en_word">void</field><field name="bn_word" xsi:nil="true" /></row>
</rows>"#;
        let candidates = parse_rows(xml).unwrap();
        assert_eq!(
            candidates,
            vec![
                primary(Some("ghost"), None),
                primary(Some("void"), Some("")),
            ]
        );
    }

    #[test]
    fn test_multiline_field_text() {
        let xml = "<rows><row><field name=\"en_word\">line\nbreak</field>\
                   <field name=\"bn_word\">লাইন\nভাঙা</field></row></rows>";
        let candidates = parse_rows(xml).unwrap();
        assert_eq!(
            candidates,
            vec![primary(Some("line\nbreak"), Some("লাইন\nভাঙা"))]
        );
    }

    #[test]
    fn test_malformed_xml_is_error() {
        let xml = "<rows><row><field name=\"en_word\">x</row></rows>";
        assert!(matches!(parse_rows(xml), Err(DictSourceError::Parse(_))));
    }
}
