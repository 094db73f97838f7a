use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a tournament document.
///
/// Lookups never fail; a key that matches nothing is reported as `None`.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate stadium id: {0}")]
    DuplicateStadiumId(i32),

    #[error("Duplicate team id: {0}")]
    DuplicateTeamId(i32),
}

pub type DatasetResult<T> = Result<T, DatasetError>;
