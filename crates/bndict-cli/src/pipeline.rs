//! The build pipeline: configured sources → master dictionary → export.

use std::path::{Path, PathBuf};

use bndict_core::dict::{AddOutcome, DictError, MasterDictionary};
use bndict_core::export::{self, ExportSummary};
use bndict_core::settings::Settings;
use tracing::info;

use crate::dict_source::{self, DictSourceError};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("reading {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: DictSourceError,
    },

    #[error("writing output: {0}")]
    Export(#[from] DictError),
}

/// Per-source merge counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceStats {
    pub created: usize,
    pub merged: usize,
    pub rejected: usize,
}

impl SourceStats {
    fn record(&mut self, outcome: AddOutcome) {
        match outcome {
            AddOutcome::Created => self.created += 1,
            AddOutcome::Merged => self.merged += 1,
            AddOutcome::Rejected => self.rejected += 1,
        }
    }
}

/// Read every configured source in order and merge it into one dictionary.
///
/// Source paths are resolved against `data_dir`. The first unreadable or
/// unparsable source aborts the merge.
pub fn merge_sources(settings: &Settings, data_dir: &Path) -> Result<MasterDictionary, BuildError> {
    let mut dict = MasterDictionary::new();
    for spec in &settings.sources {
        let path = data_dir.join(&spec.path);
        let reader = dict_source::from_format(spec.format);
        let candidates = reader.read(&path).map_err(|source| BuildError::Source {
            path: path.clone(),
            source,
        })?;

        let mut stats = SourceStats::default();
        for candidate in &candidates {
            stats.record(dict.apply(candidate));
        }
        info!(
            "{} [{}]: {} new, {} merged, {} skipped",
            path.display(),
            spec.format,
            stats.created,
            stats.merged,
            stats.rejected
        );
    }

    let (bn_syns, en_syns) = dict.synonym_counts();
    info!(
        "Merged {} headwords ({bn_syns} Bangla synonyms, {en_syns} English synonyms)",
        dict.len()
    );
    Ok(dict)
}

/// Run the full pipeline and export into `output_dir`.
pub fn build(
    settings: &Settings,
    data_dir: &Path,
    output_dir: &Path,
) -> Result<ExportSummary, BuildError> {
    let dict = merge_sources(settings, data_dir)?;
    info!("Writing to {}...", output_dir.display());
    Ok(export::export(&dict, output_dir)?)
}

/// Name of the data directory when none is given.
pub const DATA_DIR: &str = "data";

/// Data directory for a build without `--data-dir`.
///
/// Looks for `data` one level above the directory holding the executable
/// (`<root>/bin/bndict` → `<root>/data`), then falls back to `data` under the
/// working directory.
pub fn default_data_dir(exe: Option<&Path>) -> PathBuf {
    exe.and_then(Path::parent)
        .and_then(Path::parent)
        .map(|root| root.join(DATA_DIR))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(DATA_DIR))
}

/// Output directory for a build: `override_dir` if given, otherwise the
/// configured `output.dir` under `data_dir`.
pub fn resolve_output_dir(
    settings: &Settings,
    data_dir: &Path,
    override_dir: Option<&Path>,
) -> PathBuf {
    match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => data_dir.join(&settings.output.dir),
    }
}
