use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("OAuth2 authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lookup error: {0}")]
    Lookup(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit status for this error.
    ///
    /// A payload that fails to serialize is reported but ends the run normally,
    /// every other failure is fatal.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Serialization(_) => 0,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
