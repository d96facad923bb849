use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the application's fallible boundaries
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate record id {0} in dataset")]
    DuplicateId(i64),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Could not determine the user {0} directory")]
    MissingUserDir(&'static str),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl CatalogError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
