//! Error types for socialgram.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Constraint Violations ===
    #[error("Unique constraint violation: {0}")]
    UniqueConstraintViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Not-null violation: {0}")]
    NotNullViolation(String),

    // === Lookups ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(i32),

    #[error("Post not found: {0}")]
    PostNotFound(i32),

    // === Server Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns the error code for callers that surface errors over a wire.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UniqueConstraintViolation(_) => "UNIQUE_CONSTRAINT_VIOLATION",
            Self::ForeignKeyViolation(_) => "FOREIGN_KEY_VIOLATION",
            Self::NotNullViolation(_) => "NOT_NULL_VIOLATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::PostNotFound(_) => "POST_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Returns whether this error is an infrastructure failure rather than
    /// a rejected request.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Config(_))
    }

    /// Returns whether this error is a storage constraint violation.
    #[must_use]
    pub const fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::UniqueConstraintViolation(_)
                | Self::ForeignKeyViolation(_)
                | Self::NotNullViolation(_)
        )
    }
}

// === From implementations ===

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_violations_are_client_errors() {
        let errors = [
            AppError::UniqueConstraintViolation("email".to_string()),
            AppError::ForeignKeyViolation("post.user_id".to_string()),
            AppError::NotNullViolation("user.password".to_string()),
        ];

        for err in errors {
            assert!(err.is_constraint_violation());
            assert!(!err.is_server_error());
        }
    }

    #[test]
    fn test_server_errors() {
        assert!(AppError::Database("connection reset".to_string()).is_server_error());
        assert!(AppError::Config("missing url".to_string()).is_server_error());
        assert!(!AppError::UserNotFound(1).is_server_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::UniqueConstraintViolation(String::new()).error_code(),
            "UNIQUE_CONSTRAINT_VIOLATION"
        );
        assert_eq!(
            AppError::ForeignKeyViolation(String::new()).error_code(),
            "FOREIGN_KEY_VIOLATION"
        );
        assert_eq!(AppError::PostNotFound(7).error_code(), "POST_NOT_FOUND");
    }

    #[test]
    fn test_display_includes_id() {
        assert_eq!(AppError::UserNotFound(42).to_string(), "User not found: 42");
    }
}
