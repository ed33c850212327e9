//! Collaborator traits for statement execution and catalog introspection.
//!
//! The core needs only two capabilities from a database connection: execute
//! one SQL string ([`SqlExecutor`]) and read column/constraint metadata for a
//! table ([`CatalogReader`]). Connection acquisition and pooling stay with
//! the caller; implementations live in [`drivers`](crate::drivers).
//!
//! DDL statements carry identifiers and type text that standard SQL cannot
//! parameter-bind, so execution takes literal statement strings.

use async_trait::async_trait;

use crate::error::Result;

/// Execute a single SQL statement against the database.
///
/// Implementations open a short-lived statement scope per call and release it
/// on every exit path. Failures are wrapped in
/// [`CouldNotProcess`](crate::error::MigrateError::CouldNotProcess) with the
/// driver error preserved as the cause.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<()>;
}

/// One column as reported by the database catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumn {
    /// Column name.
    pub name: String,

    /// Native type text, e.g. `varchar(255)`.
    pub native_type: String,

    /// Whether the column allows NULL.
    pub is_nullable: bool,

    /// Default value text, when one is set.
    pub default: Option<String>,
}

/// Read-only access to column and constraint metadata for a table.
///
/// Used by dialects whose syntax requires re-specifying live column state
/// (MySQL rename) and by the [`TableValidator`](crate::validator::TableValidator).
/// Implementations must not mutate database state.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Column metadata for a table, in ordinal position order.
    async fn describe_columns(&self, table: &str) -> Result<Vec<CatalogColumn>>;

    /// Names of the constraints defined on a table.
    async fn constraint_names(&self, table: &str) -> Result<Vec<String>>;
}
