use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

/// SQLite reports RESTRICT violations as `SQLITE_CONSTRAINT_FOREIGNKEY` (787)
/// or `SQLITE_CONSTRAINT_TRIGGER` (1811), which `DbErr::sql_err` leaves
/// unclassified.
fn is_sqlite_foreign_key_violation(message: &str) -> bool {
    message.contains("FOREIGN KEY constraint failed")
        && (message.contains("(code: 787)") || message.contains("(code: 1811)"))
}

impl From<DbErr> for ModelError {
    /// Constraint violations become conflicts; everything else stays a
    /// database error.
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => ModelError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => ModelError::Conflict(msg),
            _ => {
                let msg = e.to_string();
                if is_sqlite_foreign_key_violation(&msg) {
                    ModelError::Conflict(msg)
                } else {
                    ModelError::Db(msg)
                }
            }
        }
    }
}

pub fn require_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), ModelError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ModelError::Validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

pub fn optional_max_len(field: &str, value: Option<&str>, max: usize) -> Result<(), ModelError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ModelError::Validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}
