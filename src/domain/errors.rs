use std::path::PathBuf;

use thiserror::Error;

/// Failures a generation run can end with. Every variant is terminal: the
/// run never retries and never leaves a partial output file behind.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("input table not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error(
        "could not decode {path} with any supported encoding ({tried}); \
         re-save the file as UTF-8 and retry"
    )]
    Encoding { path: PathBuf, tried: String },

    #[error(
        "input table must have exactly the columns 'server' and 'database', \
         found: {found}"
    )]
    Schema { found: String },

    #[error("row {row}: required field '{field}' is blank")]
    BlankField { row: usize, field: &'static str },

    #[error("row {row}: expected {expected} fields, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerationError {
    /// True for errors caused by one specific data row rather than the
    /// table as a whole. These are the errors `RowPolicy::SkipInvalid`
    /// is allowed to swallow.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            GenerationError::BlankField { .. } | GenerationError::MalformedRow { .. }
        )
    }
}
