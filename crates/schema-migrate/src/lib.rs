//! # schema-migrate
//!
//! Declarative schema migrations with dialect-specific DDL translation.
//!
//! Callers describe a schema change with immutable definition objects
//! (tables, columns, constraints, foreign keys) built via builders. The
//! [`Migrator`] turns each migration intent into an ordered sequence of DDL
//! phrases, renders it through the active dialect [`Translator`], and
//! executes the resulting statements over the caller's connection.
//!
//! - **Phrase IR**: DDL clauses as opaque tokens, rendered phrase by phrase
//! - **Dialect translators**: a default translator implements every phrase;
//!   dialects override only where their syntax diverges
//! - **Validation**: [`TableValidator`] compares an expected definition
//!   against the live catalog after a migration
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use schema_migrate::{Column, ColumnType, DefaultTranslator, Migrator, Table};
//! # use schema_migrate::{PostgresConnection, Result};
//!
//! # async fn run(client: tokio_postgres::Client) -> Result<()> {
//! let connection = Arc::new(PostgresConnection::new(client));
//! let migrator = Migrator::new(connection, Arc::new(DefaultTranslator::new()));
//!
//! let table = Table::builder("users")
//!     .add_column(Column::new("id", ColumnType::Integer).primary(true))
//!     .add_column(Column::new("email", ColumnType::Varchar).size(120).not_null(true))
//!     .build()?;
//! migrator.add_columns_with_create_table(&table).await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod definition;
pub mod drivers;
pub mod engine;
pub mod error;
pub mod query;
pub mod translator;
pub mod validator;

// Re-exports for convenient access
pub use connection::{CatalogColumn, CatalogReader, SqlExecutor};
pub use definition::{
    CascadeAction, Column, ColumnBuilder, ColumnType, Constraint, ConstraintBuilder,
    ConstraintType, ForeignKey, ForeignKeyBuilder, Table, TableBuilder,
};
pub use drivers::{MysqlConnection, PostgresConnection};
pub use engine::Migrator;
pub use error::{MigrateError, Result};
pub use query::{Phrase, Query};
pub use translator::{DefaultTranslator, MysqlTranslator, Translator};
pub use validator::{Finding, TableValidator, ValidationReport};
