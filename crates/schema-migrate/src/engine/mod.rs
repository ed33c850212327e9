//! Migration engine: one operation per migration intent.
//!
//! Each operation builds exactly one [`Query`] with the phrase sequence and
//! bound operands for its intent, renders it through the active translator,
//! and executes the resulting statement(s) sequentially against the
//! connection. Statements are never retried and operations are never wrapped
//! in an implicit transaction; a multi-statement operation stops at the first
//! failing statement with the preceding ones already applied.

use std::sync::Arc;

use tracing::debug;

use crate::connection::SqlExecutor;
use crate::definition::{Column, Constraint, ForeignKey, Table};
use crate::error::Result;
use crate::query::{Phrase, Query};
use crate::translator::Translator;

/// Executes declarative schema changes through a dialect translator.
///
/// The connection and translator are supplied at construction and shared for
/// the duration of a migration run. Operations execute one at a time; the
/// engine assumes no concurrent use of the connection.
pub struct Migrator {
    executor: Arc<dyn SqlExecutor>,
    translator: Arc<dyn Translator>,
}

impl Migrator {
    /// Create a migrator over a connection and dialect translator.
    pub fn new(executor: Arc<dyn SqlExecutor>, translator: Arc<dyn Translator>) -> Self {
        Self {
            executor,
            translator,
        }
    }

    /// The active dialect translator.
    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    /// Create the table with all of its new columns in one statement.
    ///
    /// No-op when the table has no new columns, so an empty
    /// `CREATE TABLE ()` is never emitted.
    pub async fn add_columns_with_create_table(&self, table: &Table) -> Result<()> {
        if table.new_columns().is_empty() {
            debug!(table = table.name(), "no new columns, skipping CREATE TABLE");
            return Ok(());
        }

        let query = Query::new([Phrase::CreateTable]).with_table(table);
        self.execute(&query).await
    }

    /// Add each new column with its own `ALTER TABLE ... ADD COLUMN`
    /// statement. Each column addition is its own failure unit.
    pub async fn add_columns_with_alter_table(&self, table: &Table) -> Result<()> {
        for column in table.new_columns() {
            let query = Query::new([Phrase::AlterTable, Phrase::AddColumn])
                .with_table(table)
                .with_column(column);
            self.execute(&query).await?;
        }

        Ok(())
    }

    /// Drop a column by name.
    pub async fn drop_column(&self, table: &Table, column_name: &str) -> Result<()> {
        let query = Query::new([Phrase::AlterTable, Phrase::DropColumn])
            .with_table(table)
            .with_column_name(column_name);
        self.execute(&query).await
    }

    /// Add an index or unique constraint.
    pub async fn add_constraint(&self, table: &Table, constraint: &Constraint) -> Result<()> {
        let query = Query::new([Phrase::AlterTable, Phrase::AddConstraint])
            .with_table(table)
            .with_constraint(constraint);
        self.execute(&query).await
    }

    /// Drop a named constraint.
    pub async fn drop_constraint(&self, table: &Table, constraint_name: &str) -> Result<()> {
        let query = Query::new([Phrase::AlterTable, Phrase::DropConstraint])
            .with_table(table)
            .with_constraint_name(constraint_name);
        self.execute(&query).await
    }

    /// Add a foreign key constraint.
    pub async fn add_foreign_key(&self, table: &Table, foreign_key: &ForeignKey) -> Result<()> {
        let query = Query::new([Phrase::AlterTable, Phrase::AddForeignKey])
            .with_table(table)
            .with_foreign_key(foreign_key);
        self.execute(&query).await
    }

    /// Drop a foreign key by constraint name.
    pub async fn drop_foreign_key(&self, table: &Table, constraint_name: &str) -> Result<()> {
        let query = Query::new([Phrase::AlterTable, Phrase::DropForeignKey])
            .with_table(table)
            .with_constraint_name(constraint_name);
        self.execute(&query).await
    }

    /// Change a column's type.
    pub async fn alter_column_type(&self, table: &Table, column: &Column) -> Result<()> {
        let query = Query::new([Phrase::AlterTable, Phrase::AlterColumn, Phrase::Type])
            .with_table(table)
            .with_column(column);
        self.execute(&query).await
    }

    /// Rename a column. The column carries its rename target.
    pub async fn alter_column_name(&self, table: &Table, column: &Column) -> Result<()> {
        let query = Query::new([Phrase::AlterTable, Phrase::AlterColumn, Phrase::Rename])
            .with_table(table)
            .with_column(column);
        self.execute(&query).await
    }

    /// Change a column's default value.
    pub async fn alter_column_default(&self, table: &Table, column: &Column) -> Result<()> {
        let query = Query::new([Phrase::AlterTable, Phrase::AlterColumn, Phrase::SetDefault])
            .with_table(table)
            .with_column(column);
        self.execute(&query).await
    }

    async fn execute(&self, query: &Query<'_>) -> Result<()> {
        for statement in self.translator.statements(query).await? {
            debug!(
                dialect = self.translator.dialect(),
                statement = %statement,
                "executing migration statement"
            );
            self.executor.execute(&statement).await?;
        }

        Ok(())
    }
}
