use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Failures surfaced by block creation and mining.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("transaction could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("proof-of-work search exhausted after {attempts} attempts")]
    ExhaustedSearch { attempts: u64 },
    #[error("proof-of-work search cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },
}
