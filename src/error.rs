use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("remote error: {0}")]
    Remote(String),
    #[error("unknown entity: no ticket with id '{0}' in the store")]
    UnknownEntity(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
