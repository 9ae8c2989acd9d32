use std::fmt;

use inv_client::ClientError;
use inv_model::{FieldError, Id};
use thiserror::Error;

/// Why a page operation did not complete.
///
/// By the time one of these is returned the page has already put the
/// matching message in its banner; callers only need it for control flow.
#[derive(Error, Debug)]
pub enum AdminError {
    /// A collection could not be loaded. Pages keep their previous data.
    #[error("failed to load data: {0}")]
    Fetch(#[source] ClientError),
    /// A create, update or delete request failed
    #[error("request failed: {0}")]
    Mutation(#[source] ClientError),
    /// The target record is not in the page's in-memory collection
    #[error("{label} #{id} not found")]
    NotFound { label: &'static str, id: Id },
    /// Input was rejected, either before sending or by the backend
    #[error("{0}")]
    Validation(ValidationFailure),
    /// No signed-in session; the caller should navigate to `login_url`
    #[error("authentication required")]
    AuthRequired { login_url: String },
    /// The backend answered but refused the operation
    #[error("{0}")]
    Refused(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Field errors collected from client-side rules or a `400` response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationFailure {
    pub message: Option<String>,
    pub fields: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn from_fields(fields: Vec<FieldError>) -> Self {
        Self {
            message: None,
            fields,
        }
    }

    /// Message attached to `field`, if any
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return f.write_str(self.message.as_deref().unwrap_or("Invalid data"));
        }
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", fields.join("; "))
    }
}
