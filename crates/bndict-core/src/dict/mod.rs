//! English→Bangla master dictionary.
//!
//! Raw records from every source become [`Candidate`]s, pass through the
//! normalizer and are folded into a single [`MasterDictionary`] keyed by the
//! cleaned English headword.

mod candidate;
mod entry;
mod master;
pub mod normalize;
pub mod partition;

pub use candidate::Candidate;
pub use entry::Entry;
pub use master::{AddOutcome, MasterDictionary};

use std::io;

/// Error type for reading and writing dictionary JSON artifacts.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
