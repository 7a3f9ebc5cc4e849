use serde::{Deserialize, Serialize};

/// Canonical merged record for one English headword.
///
/// `bn` is fixed at creation. The synonym lists only grow, never hold the
/// primary value and never hold duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    en: String,
    bn: String,
    #[serde(default)]
    synonyms_bn: Vec<String>,
    #[serde(default)]
    synonyms_en: Vec<String>,
}

impl Entry {
    pub(crate) fn new(en: String, bn: String) -> Self {
        Self {
            en,
            bn,
            synonyms_bn: Vec::new(),
            synonyms_en: Vec::new(),
        }
    }

    pub fn en(&self) -> &str {
        &self.en
    }

    pub fn bn(&self) -> &str {
        &self.bn
    }

    pub fn synonyms_bn(&self) -> &[String] {
        &self.synonyms_bn
    }

    pub fn synonyms_en(&self) -> &[String] {
        &self.synonyms_en
    }

    /// Append a Bangla synonym. Returns `true` if it was added.
    pub(crate) fn push_synonym_bn(&mut self, value: &str) -> bool {
        push_unique(&mut self.synonyms_bn, &self.bn, value)
    }

    /// Append an English synonym. Returns `true` if it was added.
    pub(crate) fn push_synonym_en(&mut self, value: &str) -> bool {
        push_unique(&mut self.synonyms_en, &self.en, value)
    }
}

fn push_unique(list: &mut Vec<String>, primary: &str, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value == primary || list.iter().any(|s| s == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_skips_primary_and_duplicates() {
        let mut entry = Entry::new("run".into(), "দৌড়".into());
        assert!(entry.push_synonym_bn("চালানো"));
        assert!(!entry.push_synonym_bn(" চালানো "));
        assert!(!entry.push_synonym_bn("দৌড়"));
        assert!(!entry.push_synonym_bn("   "));
        assert!(entry.push_synonym_en("jog"));
        assert!(!entry.push_synonym_en("run"));
        assert_eq!(entry.synonyms_bn(), ["চালানো"]);
        assert_eq!(entry.synonyms_en(), ["jog"]);
    }

    #[test]
    fn serializes_fields_in_order() {
        let entry = Entry::new("run".into(), "দৌড়".into());
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"en":"run","bn":"দৌড়","synonyms_bn":[],"synonyms_en":[]}"#
        );
    }

    #[test]
    fn deserialize_tolerates_missing_synonyms_and_extra_fields() {
        let entry: Entry =
            serde_json::from_str(r#"{"en":"run","bn":"দৌড়","pron":"dour"}"#).unwrap();
        assert_eq!(entry.en(), "run");
        assert!(entry.synonyms_bn().is_empty());
        assert!(entry.synonyms_en().is_empty());
    }
}
