use thiserror::Error;

/// Represents errors that can occur while writing to or reading from the
/// destination store.
///
/// Constraint failures are split out of the generic database error so the
/// migration can report which table rejected a row.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Schema migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Uniqueness violation in {table}: {message}")]
    UniqueViolation { table: &'static str, message: String },

    #[error("Foreign key violation in {table}: {message}")]
    ForeignKeyViolation { table: &'static str, message: String },
}

impl RepositoryError {
    /// Builds a mapper that tags constraint failures with the table written to.
    pub(crate) fn on_table(table: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
        move |error| {
            if let sqlx::Error::Database(db_error) = &error {
                let message = db_error.message().to_string();
                if db_error.is_unique_violation() {
                    return RepositoryError::UniqueViolation { table, message };
                }
                if db_error.is_foreign_key_violation() {
                    return RepositoryError::ForeignKeyViolation { table, message };
                }
            }
            RepositoryError::DatabaseError(error)
        }
    }

    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            RepositoryError::UniqueViolation { .. } | RepositoryError::ForeignKeyViolation { .. }
        )
    }
}
