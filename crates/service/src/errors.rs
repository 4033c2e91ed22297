use std::time::Duration;

use models::errors::ModelError;
use thiserror::Error;

/// Errors surfaced to callers of the service layer.
///
/// Storage failures keep the driver's text untouched; the HTTP layer
/// forwards it as-is.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Db(String),
    #[error("{op} timed out after {}s", .after.as_secs())]
    Timeout { op: &'static str, after: Duration },
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ServiceError {
    /// True when the caller sent something unusable (bad id, bad body).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Model(ModelError::InvalidId { .. }))
    }
}

impl From<mongodb::error::Error> for ServiceError {
    fn from(e: mongodb::error::Error) -> Self {
        Self::Db(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_is_client_error() {
        let e: ServiceError = ModelError::InvalidId { id: "x".into(), reason: "bad".into() }.into();
        assert!(e.is_client_error());
        assert!(!ServiceError::Db("boom".into()).is_client_error());
    }

    #[test]
    fn db_error_text_is_not_wrapped() {
        assert_eq!(ServiceError::Db("connection reset".into()).to_string(), "connection reset");
    }

    #[test]
    fn timeout_names_the_operation() {
        let e = ServiceError::Timeout { op: "list", after: Duration::from_secs(10) };
        assert_eq!(e.to_string(), "list timed out after 10s");
    }
}
