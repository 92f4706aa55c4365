use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnonymizeError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to anonymize {path}: {source}")]
    Processing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save mappings to {path}: {message}")]
    Mapping { path: PathBuf, message: String },

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, AnonymizeError>;
