//! First-character classification used to split the export into files.

use std::fmt;

use super::{Entry, MasterDictionary};

/// Output group an entry belongs to, derived from the first character of its
/// `en` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Key starts with an ASCII digit.
    Number,
    /// Key starts with this ASCII lowercase letter.
    Letter(char),
    /// Anything else, including an empty key.
    Special,
}

impl Group {
    pub fn classify(en: &str) -> Self {
        match en.chars().next() {
            Some(c) if c.is_ascii_digit() => Self::Number,
            Some(c) if c.is_ascii_lowercase() => Self::Letter(c),
            _ => Self::Special,
        }
    }

    /// Inverse of the file stem produced by [`file_name`](Self::file_name).
    pub fn from_stem(stem: &str) -> Option<Self> {
        match stem {
            "number" => Some(Self::Number),
            "special" => Some(Self::Special),
            _ => {
                let mut chars = stem.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_lowercase() => Some(Self::Letter(c)),
                    _ => None,
                }
            }
        }
    }

    /// File name of this group's export, e.g. `a.json` or `number.json`.
    pub fn file_name(&self) -> String {
        format!("{self}.json")
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => f.write_str("number"),
            Self::Letter(c) => write!(f, "{c}"),
            Self::Special => f.write_str("special"),
        }
    }
}

/// Group entries by [`Group::classify`].
///
/// Groups are returned in the order they are first encountered; each group
/// keeps the dictionary's traversal order.
pub fn partition(dict: &MasterDictionary) -> Vec<(Group, Vec<&Entry>)> {
    let mut groups: Vec<(Group, Vec<&Entry>)> = Vec::new();
    for entry in dict.iter() {
        let group = Group::classify(entry.en());
        match groups.iter_mut().find(|(g, _)| *g == group) {
            Some((_, members)) => members.push(entry),
            None => groups.push((group, vec![entry])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_first_char() {
        assert_eq!(Group::classify("7up"), Group::Number);
        assert_eq!(Group::classify("apple"), Group::Letter('a'));
        assert_eq!(Group::classify("café"), Group::Letter('c'));
        assert_eq!(Group::classify("éclair"), Group::Special);
        assert_eq!(Group::classify("#tag"), Group::Special);
        assert_eq!(Group::classify(""), Group::Special);
    }

    #[test]
    fn file_names() {
        assert_eq!(Group::Number.file_name(), "number.json");
        assert_eq!(Group::Letter('q').file_name(), "q.json");
        assert_eq!(Group::Special.file_name(), "special.json");
        assert_eq!(Group::from_stem("number"), Some(Group::Number));
        assert_eq!(Group::from_stem("q"), Some(Group::Letter('q')));
        assert_eq!(Group::from_stem("words"), None);
        assert_eq!(Group::from_stem("Q"), None);
    }

    #[test]
    fn partition_keeps_first_seen_order() {
        let mut dict = MasterDictionary::new();
        for (en, bn) in [
            ("banana", "কলা"),
            ("apple", "আপেল"),
            ("7up", "সেভেন আপ"),
            ("bat", "বাদুড়"),
        ] {
            dict.add(Some(en), Some(bn), &[]);
        }

        let groups = partition(&dict);
        let summary: Vec<(Group, Vec<&str>)> = groups
            .iter()
            .map(|(g, members)| (*g, members.iter().map(|e| e.en()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Group::Letter('b'), vec!["banana", "bat"]),
                (Group::Letter('a'), vec!["apple"]),
                (Group::Number, vec!["7up"]),
            ]
        );
    }

    #[test]
    fn partition_is_a_disjoint_cover() {
        let mut dict = MasterDictionary::new();
        for en in ["a1", "b2", "3c", "a4", "zz", "9"] {
            dict.add(Some(en), Some("ক"), &[]);
        }
        let groups = partition(&dict);
        let mut seen: Vec<&str> = groups
            .iter()
            .flat_map(|(_, members)| members.iter().map(|e| e.en()))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, dict.sorted_keys());
    }
}
