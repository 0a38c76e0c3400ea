// src/infrastructure/repositories/error.rs
use crate::domain::errors::DomainError;

/// Central translation of driver errors. Constraint violations keep the
/// database message so the offending column shows up in the error.
pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                return DomainError::Conflict(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return DomainError::NotFound("referenced record not found".into());
            }
            if db_err.is_check_violation() {
                return DomainError::Validation(db_err.message().to_string());
            }
            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
