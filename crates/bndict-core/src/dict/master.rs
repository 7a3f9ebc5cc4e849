use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::normalize::{self, Normalized};
use super::{Candidate, Entry};

/// What a merge did with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was created for the key.
    Created,
    /// The key already existed; its synonym lists were updated.
    Merged,
    /// The candidate failed a cleaning rule and was skipped.
    Rejected,
}

/// The merged English→Bangla mapping.
///
/// Entries are stored in creation order and indexed by their cleaned `en`
/// key, so traversal and serialization follow the order in which headwords
/// were first seen.
#[derive(Debug, Default, Clone)]
pub struct MasterDictionary {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl MasterDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a dictionary from exported entries.
    ///
    /// Entries are taken as they were exported, without re-running the
    /// cleaning rules. Synonym lists are deduplicated on the way in and a
    /// repeated key keeps its first entry.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut dict = Self::new();
        for entry in entries {
            if dict.index.contains_key(entry.en()) {
                continue;
            }
            let mut rebuilt = Entry::new(entry.en().to_string(), entry.bn().to_string());
            for syn in entry.synonyms_bn() {
                rebuilt.push_synonym_bn(syn);
            }
            for syn in entry.synonyms_en() {
                rebuilt.push_synonym_en(syn);
            }
            dict.index.insert(rebuilt.en().to_string(), dict.entries.len());
            dict.entries.push(rebuilt);
        }
        dict
    }

    /// Merge one candidate from a source reader.
    pub fn apply(&mut self, candidate: &Candidate) -> AddOutcome {
        match candidate {
            Candidate::Primary {
                en,
                bn,
                synonyms_en,
            } => self.add(en.as_deref(), bn.as_deref(), synonyms_en),
            Candidate::Synonyms { en, synonyms_en } => {
                // Raw key: a group keyed "Happy" does not find `happy`.
                let primary = en
                    .as_deref()
                    .and_then(|key| self.get(key))
                    .map(|entry| entry.bn().to_string());
                self.add(en.as_deref(), primary.as_deref(), synonyms_en)
            }
        }
    }

    /// Normalize a raw `(en, bn, synonyms_en)` triple and merge it.
    ///
    /// The first accepted pair for a key creates the entry and fixes its
    /// `bn`; English synonyms arriving with that first pair are not kept.
    /// Later pairs only contribute synonyms: every comma-separated piece of
    /// `bn` and every English synonym.
    pub fn add(
        &mut self,
        en: Option<&str>,
        bn: Option<&str>,
        synonyms_en: &[String],
    ) -> AddOutcome {
        let Some(Normalized { en, bn }) = normalize::normalize(en, bn) else {
            return AddOutcome::Rejected;
        };

        let Some(&idx) = self.index.get(&en) else {
            self.index.insert(en.clone(), self.entries.len());
            self.entries.push(Entry::new(en, bn));
            return AddOutcome::Created;
        };

        let entry = &mut self.entries[idx];
        for piece in normalize::split_synonyms(&bn) {
            entry.push_synonym_bn(piece);
        }
        for syn in synonyms_en {
            entry.push_synonym_en(syn);
        }
        AddOutcome::Merged
    }

    pub fn get(&self, en: &str) -> Option<&Entry> {
        self.index.get(en).map(|&idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// All keys, sorted lexicographically.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.iter().map(Entry::en).collect();
        keys.sort_unstable();
        keys
    }

    /// Total number of `(bn synonyms, en synonyms)` across all entries.
    pub fn synonym_counts(&self) -> (usize, usize) {
        self.entries.iter().fold((0, 0), |(bn, en), e| {
            (bn + e.synonyms_bn().len(), en + e.synonyms_en().len())
        })
    }
}

/// Serializes as a JSON object keyed by `en`, in creation order.
impl Serialize for MasterDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.en(), entry)?;
        }
        map.end()
    }
}
