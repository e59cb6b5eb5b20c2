use derive_more::Display;
use refcascade_core::{
    config::ConfigError,
    error::{ErrorClass, ErrorDetail, ErrorOrigin as CoreErrorOrigin, InternalError, StorageError},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match (&err.detail, err.class) {
            (Some(ErrorDetail::Config(_)), _) => ErrorKind::Config,
            (Some(ErrorDetail::Storage(StorageError::NotFound { .. })), _)
            | (None, ErrorClass::NotFound) => ErrorKind::NotFound,
            (Some(ErrorDetail::Storage(StorageError::SaveRejected { .. })), _) => {
                ErrorKind::SaveRejected
            }
            _ => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        InternalError::from(err).into()
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Host form state could not be read as configuration.
    Config,

    /// An entity or its field metadata does not exist.
    NotFound,

    /// Storage refused to persist an entity.
    SaveRejected,

    /// The caller cannot remediate this.
    Internal,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Apply,
    Config,
    Metadata,
    Storage,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Apply => Self::Apply,
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Metadata => Self::Metadata,
            CoreErrorOrigin::Storage => Self::Storage,
        }
    }
}

///
/// TESTS
///
