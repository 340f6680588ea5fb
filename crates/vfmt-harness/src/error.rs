//! Harness error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fixture {path}: {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid argument '{raw}': {reason}")]
    InvalidArg { raw: String, reason: &'static str },
    #[error("no fixture JSON files found in {0}")]
    NoFixtures(PathBuf),
}
