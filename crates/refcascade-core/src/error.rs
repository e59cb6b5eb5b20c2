use crate::config::ConfigError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without origin-specific detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a storage-origin internal error.
    pub fn storage_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Storage, message)
    }

    /// Construct a storage-origin not-found error for one entity.
    pub fn storage_not_found(key: impl Into<String>) -> Self {
        let key = key.into();

        Self {
            class: ErrorClass::NotFound,
            origin: ErrorOrigin::Storage,
            message: format!("entity not found: {key}"),
            detail: Some(ErrorDetail::Storage(StorageError::NotFound { key })),
        }
    }

    /// Construct a storage-origin error for a save the backend refused.
    pub fn storage_save_rejected(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        let entity = entity.into();
        let reason = reason.into();

        Self {
            class: ErrorClass::Internal,
            origin: ErrorOrigin::Storage,
            message: format!("save rejected for {entity}: {reason}"),
            detail: Some(ErrorDetail::Storage(StorageError::SaveRejected { reason })),
        }
    }

    /// Construct a metadata-origin error for a bundle whose field
    /// definitions could not be resolved.
    pub fn metadata_unresolved(entity_type: &str, bundle: &str) -> Self {
        Self::new(
            ErrorClass::NotFound,
            ErrorOrigin::Metadata,
            format!("no field definitions for bundle '{entity_type}_{bundle}'"),
        )
    }

    /// Construct an apply-origin invariant violation.
    pub(crate) fn apply_invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, ErrorOrigin::Apply, message)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self {
            class: ErrorClass::Unsupported,
            origin: ErrorOrigin::Config,
            message: err.to_string(),
            detail: Some(ErrorDetail::Config(err)),
        }
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Config(ConfigError),
    #[error("{0}")]
    Storage(StorageError),
}

///
/// StorageError
///
/// Storage-specific structured error detail.
/// Never returned directly; always wrapped in [`ErrorDetail::Storage`].
///

#[derive(Debug, ThisError)]
pub enum StorageError {
    #[error("entity not found: {key}")]
    NotFound { key: String },

    #[error("save rejected: {reason}")]
    SaveRejected { reason: String },
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Internal,
    InvariantViolation,
    NotFound,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Internal => "internal",
            Self::InvariantViolation => "invariant_violation",
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Apply,
    Config,
    Metadata,
    Storage,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Apply => "apply",
            Self::Config => "config",
            Self::Metadata => "metadata",
            Self::Storage => "storage",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
