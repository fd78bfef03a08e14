mod error_kind;

use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError, http::StatusCode};
use anyhow::anyhow;
use serde_json::json;
use std::fmt::{Debug, Display, Formatter};

pub use error_kind::ErrorKind;

/// SafeEnv native error type.
#[derive(thiserror::Error)]
pub struct Error {
    root_cause: anyhow::Error,
    kind: ErrorKind,
}

impl Error {
    /// Creates an invalid input error instance with the given message.
    pub fn invalid_input<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            root_cause: anyhow!(message),
            kind: ErrorKind::InvalidInput,
        }
    }

    /// Creates an unauthorized error instance.
    pub fn unauthorized() -> Self {
        Self {
            root_cause: anyhow!("Unauthorized"),
            kind: ErrorKind::Unauthorized,
        }
    }

    /// Creates a conflict error instance with the given message.
    pub fn conflict<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            root_cause: anyhow!(message),
            kind: ErrorKind::Conflict,
        }
    }

    /// Creates a not found error instance. The message is the same for absent and foreign
    /// resources.
    pub fn not_found() -> Self {
        Self {
            root_cause: anyhow!("Not Found"),
            kind: ErrorKind::NotFound,
        }
    }

    /// Creates an error instance for unknown, consumed or expired tokens.
    pub fn invalid_or_expired_token() -> Self {
        Self {
            root_cause: anyhow!("Invalid or expired token"),
            kind: ErrorKind::InvalidOrExpiredToken,
        }
    }

    /// Creates a corrupt data error instance with the given root cause.
    pub fn corrupt_data(root_cause: anyhow::Error) -> Self {
        Self {
            root_cause,
            kind: ErrorKind::CorruptData,
        }
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.root_cause, f)
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::InvalidInput | ErrorKind::InvalidOrExpiredToken => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::CorruptData | ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).json(json!({
            "message": match self.kind {
                ErrorKind::InvalidInput
                | ErrorKind::Unauthorized
                | ErrorKind::Conflict
                | ErrorKind::NotFound
                | ErrorKind::InvalidOrExpiredToken => self.root_cause.to_string(),
                ErrorKind::CorruptData | ErrorKind::Unknown => "Internal Server Error".to_string(),
            }
        }))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        err.downcast::<Error>().unwrap_or_else(|root_cause| Error {
            root_cause,
            kind: ErrorKind::Unknown,
        })
    }
}
