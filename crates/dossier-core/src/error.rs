use thiserror::Error;

/// Application-wide error type. HTTP conversion lives in the api crate.
#[derive(Debug, Error)]
pub enum AppError {
    /// User-correctable input problem (blank rejection reason, short process
    /// number, malformed upload fields). Never changes state.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A record's stored payload is missing or fails to decode. Caught
    /// per-item during batch operations and reported in aggregate counts.
    #[error("Payload error: {0}")]
    Payload(String),

    /// The backing store could not be read or written. Recoverable: reads
    /// fall back to an empty collection, writes keep in-memory state
    /// authoritative.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Payload(_) => "PAYLOAD_ERROR",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) | AppError::InvalidInput(_) => 400,
            AppError::Unauthorized(_) => 401,
            AppError::Forbidden(_) => 403,
            AppError::NotFound(_) => 404,
            AppError::Conflict(_) => 409,
            AppError::Payload(_) => 422,
            AppError::Persistence(_) | AppError::Internal(_) => 500,
        }
    }

    /// Server-side faults are logged at error; everything else is the
    /// client's problem and logged at warn.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, AppError::Persistence(_) | AppError::Internal(_))
    }
}
