use placetrust_core::{
    repositories::Error as RepoError,
    usecases::{Error as ParameterError, ErrorKind},
};
use std::io;
use thiserror::Error;

pub use placetrust_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Classification of business errors, `None` for infrastructure failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Business(BError::Parameter(err)) => Some(err.kind()),
            Self::Business(BError::Repo(RepoError::NotFound)) => Some(ErrorKind::NotFound),
            Self::Business(BError::Repo(RepoError::AlreadyExists)) => {
                Some(ErrorKind::ConflictAlreadyExists)
            }
            Self::Business(_) => Some(ErrorKind::Internal),
            Self::Other(_) | Self::Io(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<String> for BError {
    fn from(s: String) -> Self {
        Self::Internal(s)
    }
}
