//! Classification of storage errors into [`AppError`] kinds.

use sea_orm::{DbErr, RuntimeErr, SqlErr};
use socialgram_common::AppError;

/// SQLSTATE `not_null_violation` (PostgreSQL).
const PG_NOT_NULL_VIOLATION: &str = "23502";

/// Extended result code `SQLITE_CONSTRAINT_NOTNULL`.
const SQLITE_CONSTRAINT_NOTNULL: &str = "1299";

/// Convert a sea-orm error into an [`AppError`].
///
/// Unique, foreign-key and not-null violations get their own kinds so callers
/// can tell a rejected write from an infrastructure failure. A write that
/// matched no row is [`AppError::NotFound`]. Everything else becomes
/// [`AppError::Database`].
#[must_use]
pub fn db_err(err: DbErr) -> AppError {
    match err {
        DbErr::RecordNotFound(message) => return AppError::NotFound(message),
        DbErr::RecordNotUpdated => return AppError::NotFound("no matching record".to_string()),
        _ => {}
    }

    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            return AppError::UniqueConstraintViolation(message);
        }
        Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
            return AppError::ForeignKeyViolation(message);
        }
        _ => {}
    }

    if let Some((code, message)) = database_error(&err) {
        if code == PG_NOT_NULL_VIOLATION || code == SQLITE_CONSTRAINT_NOTNULL {
            return AppError::NotNullViolation(message);
        }
    }

    AppError::Database(err.to_string())
}

/// Extract the driver error code and message, if the error came from the
/// database server itself.
fn database_error(err: &DbErr) -> Option<(String, String)> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(e))) => {
            let code = e.code()?.into_owned();
            Some((code, e.message().to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_records_map_to_not_found() {
        let err = db_err(DbErr::RecordNotFound("user".to_string()));
        assert!(matches!(err, AppError::NotFound(msg) if msg == "user"));

        let err = db_err(DbErr::RecordNotUpdated);
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_non_driver_errors_map_to_database() {
        let err = db_err(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, AppError::Database(msg) if msg.contains("boom")));
    }

    #[test]
    fn test_connection_errors_are_server_errors() {
        let err = db_err(DbErr::Conn(RuntimeErr::Internal("refused".to_string())));
        assert!(err.is_server_error());
        assert!(!err.is_constraint_violation());
    }
}
