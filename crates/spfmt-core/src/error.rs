//! Error types surfaced by the stream entry points.
//!
//! Field-level problems (bad index, unknown spec tail, type mismatch) are not
//! errors: the field is left in the output as literal text. Only a failing
//! sink ends up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),
}
