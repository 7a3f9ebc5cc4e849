//! Build settings loaded from TOML.
//!
//! - `Settings::load(None)` uses the embedded `default_settings.toml`
//! - `Settings::load(Some(path))` reads and validates a custom file
//! - `[[sources]]` order is the merge order

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub output: OutputSettings,
    pub sources: Vec<SourceSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub format: SourceFormat,
}

/// On-disk layout of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// `ignored|en|bn` per line.
    Pipe,
    /// `en,bn` per line, commas inside quotes kept.
    CsvComma,
    /// `id;en;bn;pron_bn` per line, semicolons inside quotes kept.
    CsvSemicolon,
    /// `<row>` elements with `en_word` / `bn_word` fields.
    XmlRows,
    /// Array of `{en, bn, bn_syns, en_syns}` objects.
    JsonRich,
    /// Array of `{en, bn}` objects.
    JsonPairs,
    /// Object of `en` → named synonym groups.
    JsonSynonymGroups,
}

impl SourceFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Pipe => "pipe",
            Self::CsvComma => "csv-comma",
            Self::CsvSemicolon => "csv-semicolon",
            Self::XmlRows => "xml-rows",
            Self::JsonRich => "json-rich",
            Self::JsonPairs => "json-pairs",
            Self::JsonSynonymGroups => "json-synonym-groups",
        }
    }

    /// Whether records of this format carry no Bangla text of their own.
    pub fn is_synonym_only(self) -> bool {
        matches!(self, Self::JsonSynonymGroups)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Settings {
    /// Load settings from `path`, or the embedded defaults when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => parse_settings_toml(&fs::read_to_string(path)?),
            None => parse_settings_toml(DEFAULT_SETTINGS_TOML),
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    fn invalid(field: String, reason: &str) -> SettingsError {
        SettingsError::InvalidValue {
            field,
            reason: reason.to_string(),
        }
    }

    if s.output.dir.as_os_str().is_empty() {
        return Err(invalid("output.dir".into(), "must not be empty"));
    }
    if s.sources.is_empty() {
        return Err(invalid("sources".into(), "at least one source is required"));
    }
    for (i, source) in s.sources.iter().enumerate() {
        if source.path.as_os_str().is_empty() {
            return Err(invalid(format!("sources[{i}].path"), "must not be empty"));
        }
    }

    // A synonym-only source can only attach to headwords created before it.
    let first_primary = s.sources.iter().position(|src| !src.format.is_synonym_only());
    if let Some(i) = s
        .sources
        .iter()
        .position(|src| src.format.is_synonym_only())
        .filter(|&i| first_primary.map_or(true, |p| i < p))
    {
        return Err(invalid(
            format!("sources[{i}].format"),
            "synonym-only source must come after a primary source",
        ));
    }

    Ok(())
}
