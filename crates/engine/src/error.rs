//! Engine error types

/// Errors that abort a tuning run
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TuneError {
    #[error("Unsupported GC type: {0:?} (expected one of CMS, G1GC)")]
    UnsupportedGcType(String),
}

pub type TuneResult<T> = Result<T, TuneError>;
