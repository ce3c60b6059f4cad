use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum KcsError {
    #[error("Invalid serial format: {0}")]
    InvalidFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Empty input")]
    EmptyInput,

    #[error("Failed to allocate {samples} output samples")]
    AllocationFailed { samples: usize },
}

pub type Result<T> = std::result::Result<T, KcsError>;
