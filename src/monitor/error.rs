use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MonitorError {
    #[error("Refresh interval must be at least 1 ms (got {0})")]
    InvalidRefreshInterval(u64),
}

pub type MonitorResult<T> = Result<T, MonitorError>;
