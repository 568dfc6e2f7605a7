use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the stores and the quiz engine.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("question {0} not found")]
    NotFound(i64),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = QuizError> = std::result::Result<T, E>;
