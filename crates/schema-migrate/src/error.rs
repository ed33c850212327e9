//! Error types for the migration library.

use thiserror::Error;

/// Boxed driver error preserved as the cause of an execution failure.
pub type BoxedDriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for migration operations.
///
/// Builder invariant violations surface as [`Definition`](MigrateError::Definition)
/// before any database interaction. Statement execution failures are wrapped in
/// [`CouldNotProcess`](MigrateError::CouldNotProcess) with the original driver
/// error kept as the source; statements are never retried.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// A definition builder invariant was violated (e.g. a new column without a type).
    #[error("Invalid definition: {0}")]
    Definition(String),

    /// The underlying driver rejected a statement.
    #[error("Could not process statement `{statement}`: {source}")]
    CouldNotProcess {
        statement: String,
        #[source]
        source: BoxedDriverError,
    },

    /// The database catalog did not contain an expected object.
    #[error("Catalog lookup failed: {0}")]
    Catalog(String),
}

impl MigrateError {
    /// Create a Definition error.
    pub fn definition(message: impl Into<String>) -> Self {
        MigrateError::Definition(message.into())
    }

    /// Wrap a driver error for a statement that could not be processed.
    pub fn could_not_process(
        statement: impl Into<String>,
        source: impl Into<BoxedDriverError>,
    ) -> Self {
        MigrateError::CouldNotProcess {
            statement: statement.into(),
            source: source.into(),
        }
    }

    /// Create a Catalog error.
    pub fn catalog(message: impl Into<String>) -> Self {
        MigrateError::Catalog(message.into())
    }
}

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn could_not_process_preserves_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "connection lost");
        let err = MigrateError::could_not_process("ALTER TABLE users DROP COLUMN age", cause);

        assert!(err.to_string().contains("ALTER TABLE users DROP COLUMN age"));
        let source = std::error::Error::source(&err).expect("source should be preserved");
        assert!(source.to_string().contains("connection lost"));
    }

    #[test]
    fn definition_error_message() {
        let err = MigrateError::definition("new column `age` has no type");
        assert_eq!(
            err.to_string(),
            "Invalid definition: new column `age` has no type"
        );
    }
}
