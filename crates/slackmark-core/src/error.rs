use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown channel type: {0}")]
    UnknownChannelType(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
