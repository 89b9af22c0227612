//! Unified application error types for PrivyCode.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
///
/// Viewer-facing denial reasons are deliberately distinct kinds: a caller
/// must be able to tell an unknown link from an expired one from an
/// exhausted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Authentication failed (missing or invalid owner credential).
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// The viewer link exists but its expiry time has passed.
    LinkExpired,
    /// The viewer link exists but its view quota is exhausted.
    ViewLimitExceeded,
    /// The target repository could not be reached with the owner credential.
    RepositoryUnreachable,
    /// The upstream content service returned a failure.
    ExternalService,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::LinkExpired => write!(f, "LINK_EXPIRED"),
            Self::ViewLimitExceeded => write!(f, "VIEW_LIMIT_EXCEEDED"),
            Self::RepositoryUnreachable => write!(f, "REPOSITORY_UNREACHABLE"),
            Self::ExternalService => write!(f, "UPSTREAM_ERROR"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout PrivyCode.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// HTTP status returned by the upstream service, when the error
    /// originated there. Relayed to the caller by the API layer.
    pub upstream_status: Option<u16>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            upstream_status: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            upstream_status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a link-expired denial.
    pub fn link_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LinkExpired, message)
    }

    /// Create a view-limit denial.
    pub fn view_limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ViewLimitExceeded, message)
    }

    /// Create a repository-unreachable error (link creation precondition).
    pub fn repository_unreachable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RepositoryUnreachable, message)
    }

    /// Create an upstream error carrying the remote service's status and body.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ExternalService,
            message: body.into(),
            upstream_status: Some(status),
            source: None,
        }
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            upstream_status: self.upstream_status,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_distinct() {
        let kinds = [
            ErrorKind::NotFound,
            ErrorKind::LinkExpired,
            ErrorKind::ViewLimitExceeded,
            ErrorKind::RepositoryUnreachable,
            ErrorKind::ExternalService,
        ];
        let codes: std::collections::HashSet<String> =
            kinds.iter().map(|k| k.to_string()).collect();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_upstream_carries_status() {
        let err = AppError::upstream(403, "rate limited");
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert_eq!(err.upstream_status, Some(403));
        assert_eq!(err.message, "rate limited");
    }

}
