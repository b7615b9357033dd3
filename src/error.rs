use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TraceError>;

#[derive(Error, Debug)]
pub enum TraceError {
    /// Trace or map file does not exist
    #[error("Trace file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Any other failure while reading an input file
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed
    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A deserialized id map is not a bijection
    #[error("Invalid id map: {0}")]
    InvalidIdMap(String),
}

impl TraceError {
    /// Map an `io::Error` from reading `path` to the matching variant.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            TraceError::FileNotFound { path }
        } else {
            TraceError::Io { path, source }
        }
    }
}
