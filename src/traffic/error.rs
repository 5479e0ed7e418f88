use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrafficError {
    #[error("Invalid destination address: {0}")]
    InvalidAddress(String),

    #[error("Payload volume must be greater than zero (got {0})")]
    InvalidMagnitude(f64),

    #[error("Unknown size unit: {0} (expected MB or GB)")]
    InvalidUnit(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type TrafficResult<T> = Result<T, TrafficError>;
