use sea_orm::{DbErr, SqlErr};

/// Classify storage errors that callers translate into domain errors.
pub trait DbErrExt {
    fn is_unique_violation(&self) -> bool;
    /// Database message of a foreign-key violation. Postgres names the constraint in it.
    fn foreign_key_violation(&self) -> Option<String>;
}

impl DbErrExt for DbErr {
    fn is_unique_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }

    fn foreign_key_violation(&self) -> Option<String> {
        match self.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => Some(message),
            _ => None,
        }
    }
}
