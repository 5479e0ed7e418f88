use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Block size must be a positive number of megabytes")]
    InvalidSize,

    #[error("Pool cap exceeded: {requested_mb} MB requested, {available_mb} MB available")]
    CapExceeded {
        requested_mb: u64,
        available_mb: u64,
    },
}

pub type LedgerResult<T> = Result<T, LedgerError>;
