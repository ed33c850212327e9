//! MySQL/MariaDB translator.
//!
//! Overrides only the phrases where MySQL syntax diverges from the defaults:
//! dropping constraints and foreign keys, the change-type statement form, and
//! column rename. Rename is not a purely additive clause in MySQL — the
//! `CHANGE` syntax re-specifies the full column definition, so this dialect
//! requires a read-only [`CatalogReader`] at construction to look up the
//! column's live type, default and nullability.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::connection::CatalogReader;
use crate::definition::{Column, ColumnType};
use crate::error::{MigrateError, Result};
use crate::query::{Phrase, Query};

use super::default::required_type;
use super::{render_query, size_or_default, DefaultTranslator, Translator};

/// MySQL/MariaDB dialect translator.
///
/// Compatible with MySQL 5.7+, 8.0+, and MariaDB 10.2+.
pub struct MysqlTranslator {
    fallback: DefaultTranslator,
    catalog: Arc<dyn CatalogReader>,
}

impl MysqlTranslator {
    /// Create a MySQL translator with the catalog reader rename support needs.
    pub fn new(catalog: Arc<dyn CatalogReader>) -> Self {
        Self {
            fallback: DefaultTranslator::new(),
            catalog,
        }
    }

    /// MySQL rename: `ALTER TABLE t CHANGE old new <type> [DEFAULT ..] [NOT NULL]`.
    ///
    /// The live column definition comes from the catalog because the CHANGE
    /// syntax re-specifies it in full.
    async fn rename_statement(&self, query: &Query<'_>) -> Result<String> {
        let table = query.table();
        let column = query.column();
        let target = column.rename_to().unwrap_or_else(|| {
            panic!("RENAME rendered for column `{}` without a rename target", column.name())
        });

        let live = self
            .catalog
            .describe_columns(table.name())
            .await?
            .into_iter()
            .find(|catalog_column| catalog_column.name == column.name())
            .ok_or_else(|| {
                MigrateError::catalog(format!(
                    "column `{}` not found in table `{}`",
                    column.name(),
                    table.name()
                ))
            })?;

        let mut parts = vec![format!(
            "ALTER TABLE {} CHANGE {} {} {}",
            table.name(),
            column.name(),
            target,
            live.native_type
        )];
        match live.default.as_deref() {
            Some(default) if !default.is_empty() => {
                parts.push(format!("DEFAULT '{}'", default));
            }
            _ => {}
        }
        if !live.is_nullable {
            parts.push("NOT NULL".to_string());
        }

        Ok(parts.join(" "))
    }

    /// MySQL change-type: `ALTER TABLE t MODIFY COLUMN c <type>`.
    fn modify_column_statement(&self, query: &Query<'_>) -> String {
        let column = query.column();
        format!(
            "ALTER TABLE {} MODIFY COLUMN {} {}",
            query.table().name(),
            column.name(),
            self.native_type(column)
        )
    }
}

#[async_trait]
impl Translator for MysqlTranslator {
    fn dialect(&self) -> &str {
        "mysql"
    }

    fn phrase_override(&self, phrase: Phrase, query: &Query<'_>) -> Option<String> {
        match phrase {
            Phrase::DropForeignKey => {
                Some(format!("DROP FOREIGN KEY {}", query.constraint_name()))
            }
            Phrase::DropConstraint => Some(format!("DROP INDEX {}", query.constraint_name())),
            _ => None,
        }
    }

    fn native_type(&self, column: &Column) -> String {
        match required_type(column) {
            ColumnType::Integer => {
                if column.auto_increment().unwrap_or(false) {
                    "INTEGER AUTO_INCREMENT".to_string()
                } else {
                    "INTEGER".to_string()
                }
            }
            ColumnType::Uuid => {
                warn!(
                    column = column.name(),
                    "UUID not supported, creating CHAR(36) instead"
                );
                "CHAR(36)".to_string()
            }
            ColumnType::Char => format!("CHAR{}", size_or_default(column, 255)),
            ColumnType::Varchar => format!("VARCHAR{}", size_or_default(column, 255)),
            _ => self.fallback.native_type(column),
        }
    }

    async fn statements(&self, query: &Query<'_>) -> Result<Vec<String>> {
        match query.phrases().last() {
            Some(Phrase::Rename) => Ok(vec![self.rename_statement(query).await?]),
            Some(Phrase::Type) => Ok(vec![self.modify_column_statement(query)]),
            _ => Ok(vec![render_query(self, query)]),
        }
    }
}
