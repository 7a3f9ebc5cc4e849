/// One raw record extracted from a source file, before normalization.
///
/// Fields are passed through exactly as the reader found them; all cleaning
/// happens in [`MasterDictionary::apply`](super::MasterDictionary::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A record that carries its own Bangla translation.
    Primary {
        en: Option<String>,
        bn: Option<String>,
        synonyms_en: Vec<String>,
    },
    /// A synonym-group record with no Bangla text of its own. It borrows the
    /// primary `bn` already merged for its key and is dropped when none exists.
    Synonyms {
        en: Option<String>,
        synonyms_en: Vec<String>,
    },
}

impl Candidate {
    pub fn pair(en: impl Into<String>, bn: impl Into<String>) -> Self {
        Self::Primary {
            en: Some(en.into()),
            bn: Some(bn.into()),
            synonyms_en: Vec::new(),
        }
    }

    pub fn en(&self) -> Option<&str> {
        match self {
            Self::Primary { en, .. } | Self::Synonyms { en, .. } => en.as_deref(),
        }
    }
}
