use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Autostart is not supported on this platform")]
    AutostartUnsupported,

    #[error("Tray integration is not supported on this platform")]
    TrayUnsupported,

    #[error("Platform call failed: {0}")]
    CallFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type PlatformResult<T> = Result<T, PlatformError>;
