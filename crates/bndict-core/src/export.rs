//! Writing the merged dictionary to disk and reading exports back.
//!
//! An export directory holds:
//! - `words.json`: every key, sorted
//! - `<group>.json`: the entries of one [`Group`]
//! - `all.json`: the whole dictionary keyed by `en`

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dict::partition::{self, Group};
use crate::dict::{DictError, Entry, MasterDictionary};

pub const WORDS_FILE: &str = "words.json";
pub const ALL_FILE: &str = "all.json";

/// Counts describing one export directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub words: usize,
    pub groups: Vec<(Group, usize)>,
}

/// Clear `out_dir` and write every artifact for `dict` into it.
///
/// Everything already in `out_dir` is deleted first. A failure part-way
/// leaves the directory in an unspecified state.
pub fn export(dict: &MasterDictionary, out_dir: &Path) -> Result<ExportSummary, DictError> {
    clear_dir(out_dir)?;

    let keys = dict.sorted_keys();
    write_json(&out_dir.join(WORDS_FILE), &keys)?;
    info!("Total words: {}", keys.len());

    let mut groups = Vec::new();
    for (group, members) in partition::partition(dict) {
        write_json(&out_dir.join(group.file_name()), &members)?;
        debug!("{group}: {}", members.len());
        groups.push((group, members.len()));
    }

    write_json(&out_dir.join(ALL_FILE), dict)?;
    info!(
        "Wrote {} group files to {}",
        groups.len(),
        out_dir.display()
    );

    Ok(ExportSummary {
        words: keys.len(),
        groups,
    })
}

/// Summarize an existing export directory from its `words.json` and group
/// files. Groups are listed in file-name order.
pub fn read_summary(dir: &Path) -> Result<ExportSummary, DictError> {
    let words: Vec<String> = read_json(&dir.join(WORDS_FILE))?;

    let mut files: Vec<(String, Group)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let group = Group::from_stem(name.strip_suffix(".json")?)?;
            Some((name, group))
        })
        .collect();
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut groups = Vec::with_capacity(files.len());
    for (name, group) in files {
        let members: Vec<Entry> = read_json(&dir.join(name))?;
        groups.push((group, members.len()));
    }

    Ok(ExportSummary {
        words: words.len(),
        groups,
    })
}

/// Load a dictionary dump.
///
/// Accepts either a JSON array of entries or an `all.json` style object
/// keyed by `en`. Entries are kept as exported, in document order (see
/// [`MasterDictionary::from_entries`]).
pub fn load_dump(path: &Path) -> Result<MasterDictionary, DictError> {
    let DumpEntries(entries) = read_json(path)?;
    Ok(MasterDictionary::from_entries(entries))
}

fn clear_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DictError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, DictError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Entries of a dump in document order, from either an array or an object.
struct DumpEntries(Vec<Entry>);

impl<'de> Deserialize<'de> for DumpEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DumpVisitor;

        impl<'de> Visitor<'de> for DumpVisitor {
            type Value = DumpEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array of entries or an object keyed by headword")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(entry) = seq.next_element()? {
                    entries.push(entry);
                }
                Ok(DumpEntries(entries))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((_, entry)) = map.next_entry::<de::IgnoredAny, Entry>()? {
                    entries.push(entry);
                }
                Ok(DumpEntries(entries))
            }
        }

        deserializer.deserialize_any(DumpVisitor)
    }
}
