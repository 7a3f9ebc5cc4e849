use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use bndict_core::dict::Candidate;
use serde::de::{DeserializeOwned, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{read_source, DictSource, DictSourceError};

/// Array of `{en, bn, bn_syns, en_syns}` objects.
///
/// Each record yields its primary pair (carrying `en_syns`), then one pair
/// per element of `bn_syns`.
pub struct RichJsonSource;

/// Array of `{en, bn}` objects.
pub struct PairJsonSource;

/// Object mapping `en` to named synonym groups.
///
/// ```json
/// { "happy": { "adjective": ["glad", "joyful"], "slang": ["stoked"] } }
/// ```
///
/// The groups of each headword are flattened in document order into one
/// English synonym list.
pub struct SynonymGroupSource;

#[derive(Debug, Deserialize)]
struct RichRecord {
    #[serde(default, deserialize_with = "lenient_str")]
    en: Option<String>,
    #[serde(default, deserialize_with = "lenient_str")]
    bn: Option<String>,
    #[serde(default, deserialize_with = "lenient_strs")]
    bn_syns: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strs")]
    en_syns: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PairRecord {
    #[serde(default, deserialize_with = "lenient_str")]
    en: Option<String>,
    #[serde(default, deserialize_with = "lenient_str")]
    bn: Option<String>,
}

/// The named groups of one headword. Anything other than an object carries
/// no synonyms.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SynonymGroups {
    Named(OrderedMap<Strings>),
    Other(IgnoredAny),
}

/// A JSON value read as a list of strings: arrays keep their string
/// elements, a lone string is a one-element list, anything else is empty.
#[derive(Debug)]
struct Strings(Vec<String>);

impl<'de> Deserialize<'de> for Strings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Strings(strings_of(Value::deserialize(deserializer)?)))
    }
}

/// JSON object entries in document order.
#[derive(Debug)]
struct OrderedMap<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for MapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(MapVisitor(PhantomData))
    }
}

fn lenient_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_strs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Array(_) => strings_of(value),
        _ => Vec::new(),
    })
}

fn strings_of(value: Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DictSourceError> {
    Ok(serde_json::from_str(&read_source(path)?)?)
}

/// Read a JSON array, converting each element to `T`. Elements that are not
/// objects of the expected shape are skipped.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DictSourceError> {
    let items: Vec<Value> = read_json(path)?;
    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    debug!("  (skipped {} of {total} records)", total - records.len());
    Ok(records)
}

impl DictSource for RichJsonSource {
    fn read(&self, path: &Path) -> Result<Vec<Candidate>, DictSourceError> {
        let mut candidates = Vec::new();
        for record in read_records::<RichRecord>(path)? {
            candidates.push(Candidate::Primary {
                en: record.en.clone(),
                bn: record.bn,
                synonyms_en: record.en_syns,
            });
            for syn in record.bn_syns {
                candidates.push(Candidate::Primary {
                    en: record.en.clone(),
                    bn: Some(syn),
                    synonyms_en: Vec::new(),
                });
            }
        }
        Ok(candidates)
    }
}

impl DictSource for PairJsonSource {
    fn read(&self, path: &Path) -> Result<Vec<Candidate>, DictSourceError> {
        Ok(read_records::<PairRecord>(path)?
            .into_iter()
            .map(|record| Candidate::Primary {
                en: record.en,
                bn: record.bn,
                synonyms_en: Vec::new(),
            })
            .collect())
    }
}

impl DictSource for SynonymGroupSource {
    fn read(&self, path: &Path) -> Result<Vec<Candidate>, DictSourceError> {
        let OrderedMap(words) = read_json::<OrderedMap<SynonymGroups>>(path)?;
        Ok(words
            .into_iter()
            .map(|(en, groups)| {
                let synonyms_en = match groups {
                    SynonymGroups::Named(OrderedMap(named)) => named
                        .into_iter()
                        .flat_map(|(_, Strings(list))| list)
                        .collect(),
                    SynonymGroups::Other(_) => Vec::new(),
                };
                Candidate::Synonyms {
                    en: Some(en),
                    synonyms_en,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_rich_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "list5.json",
            r#"[
                {"en": "run", "bn": "দৌড়", "bn_syns": ["ছোটা", 7], "en_syns": ["sprint"], "pron": "dour"},
                {"en": 42, "bn": "বিয়াল্লিশ"},
                "not an object",
                {"bn": "শুধু বাংলা", "en_syns": "solo"}
            ]"#,
        );

        let candidates = RichJsonSource.read(&path).unwrap();
        assert_eq!(
            candidates,
            vec![
                Candidate::Primary {
                    en: Some("run".into()),
                    bn: Some("দৌড়".into()),
                    synonyms_en: vec!["sprint".into()],
                },
                Candidate::Primary {
                    en: Some("run".into()),
                    bn: Some("ছোটা".into()),
                    synonyms_en: vec![],
                },
                Candidate::Primary {
                    en: None,
                    bn: Some("বিয়াল্লিশ".into()),
                    synonyms_en: vec![],
                },
                Candidate::Primary {
                    en: None,
                    bn: Some("শুধু বাংলা".into()),
                    synonyms_en: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_pair_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "list6.json",
            r#"[{"en": "sky", "bn": "আকাশ"}, {"en": "sea", "bn": null}]"#,
        );

        let candidates = PairJsonSource.read(&path).unwrap();
        assert_eq!(
            candidates,
            vec![
                Candidate::pair("sky", "আকাশ"),
                Candidate::Primary {
                    en: Some("sea".into()),
                    bn: None,
                    synonyms_en: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_synonym_groups_keep_document_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "list7.json",
            r#"{
                "zebra": {"noun": ["equid"]},
                "happy": {"verb": ["gladden"], "adjective": ["glad", "joyful", 3], "note": "cheery"},
                "odd": ["not", "groups"]
            }"#,
        );

        let candidates = SynonymGroupSource.read(&path).unwrap();
        assert_eq!(
            candidates,
            vec![
                Candidate::Synonyms {
                    en: Some("zebra".into()),
                    synonyms_en: vec!["equid".into()],
                },
                Candidate::Synonyms {
                    en: Some("happy".into()),
                    synonyms_en: vec![
                        "gladden".into(),
                        "glad".into(),
                        "joyful".into(),
                        "cheery".into()
                    ],
                },
                Candidate::Synonyms {
                    en: Some("odd".into()),
                    synonyms_en: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "broken.json", "[{\"en\": ");
        assert!(matches!(
            PairJsonSource.read(&path),
            Err(DictSourceError::Json(_))
        ));
    }

    #[test]
    fn test_wrong_top_level_shape_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "obj.json", r#"{"en": "sky"}"#);
        assert!(PairJsonSource.read(&path).is_err());
        let path = write(&dir, "arr.json", r#"[1, 2]"#);
        assert!(SynonymGroupSource.read(&path).is_err());
    }
}
