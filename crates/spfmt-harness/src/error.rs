//! Harness error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid argument '{spec}': {reason}")]
    InvalidArgument { spec: String, reason: String },
    #[error("no fixture JSON files found in {dir}")]
    NoFixtures { dir: String },
    #[error("conformance verification failed: {failed} of {total} cases")]
    VerificationFailed { failed: usize, total: usize },
}
