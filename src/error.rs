use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Invalid replay script: {0}")]
    InvalidScript(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
