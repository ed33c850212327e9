//! Default translator: ANSI-leaning rendering for every phrase.

use crate::definition::{Column, ColumnType};
use crate::query::{Phrase, Query};

use super::{size_if_present, Translator};

/// Translator implementing the complete phrase vocabulary with
/// ANSI-leaning syntax. Dialect translators delegate to this rendering for
/// every phrase they do not override.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl DefaultTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl Translator for DefaultTranslator {
    fn dialect(&self) -> &str {
        "default"
    }

    fn phrase_override(&self, _phrase: Phrase, _query: &Query<'_>) -> Option<String> {
        None
    }

    fn native_type(&self, column: &Column) -> String {
        match required_type(column) {
            ColumnType::Integer => {
                if column.auto_increment().unwrap_or(false) {
                    "INTEGER GENERATED ALWAYS AS IDENTITY".to_string()
                } else {
                    "INTEGER".to_string()
                }
            }
            ColumnType::Char => format!("CHAR{}", size_if_present(column)),
            ColumnType::Varchar => format!("VARCHAR{}", size_if_present(column)),
            ColumnType::Uuid => "UUID".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Time => "TIME".to_string(),
            ColumnType::Timestamp => "TIMESTAMP".to_string(),
        }
    }
}

/// Shared default rendering for every phrase of the vocabulary.
///
/// Type and default-value text goes through `translator` so that a dialect's
/// overrides apply even when the phrase itself is rendered by the defaults.
pub(crate) fn render_default<T: Translator + ?Sized>(
    translator: &T,
    phrase: Phrase,
    query: &Query<'_>,
) -> String {
    match phrase {
        Phrase::AlterTable => format!("ALTER TABLE {}", query.table().name()),
        Phrase::AlterColumn => format!("ALTER COLUMN {}", query.column().name()),
        Phrase::Rename => {
            let column = query.column();
            let target = column.rename_to().unwrap_or_else(|| {
                panic!("RENAME rendered for column `{}` without a rename target", column.name())
            });
            format!("RENAME TO {}", target)
        }
        Phrase::Type => format!("TYPE {}", translator.native_type(query.column())),
        Phrase::SetDefault => {
            let column = query.column();
            let value = column.default_value().unwrap_or_else(|| {
                panic!("SET_DEFAULT rendered for column `{}` without a default value", column.name())
            });
            format!("SET DEFAULT {}", default_literal(column, value))
        }
        Phrase::DropColumn => format!("DROP COLUMN {}", query.column_name()),
        Phrase::DropConstraint | Phrase::DropForeignKey => {
            format!("DROP CONSTRAINT {}", query.constraint_name())
        }
        Phrase::AddConstraint => {
            let constraint = query.constraint();
            format!(
                "ADD CONSTRAINT {} {} ({})",
                constraint.name(),
                constraint.constraint_type().as_sql(),
                constraint.columns().join(",")
            )
        }
        Phrase::AddForeignKey => {
            let foreign_key = query.foreign_key();
            let mut sql = format!(
                "ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
                foreign_key.constraint_name(),
                foreign_key.local_keys().join(","),
                foreign_key.foreign_table(),
                foreign_key.foreign_keys().join(",")
            );

            if let Some(action) = foreign_key.on_delete() {
                sql.push_str(&format!(" ON DELETE {}", action.as_sql()));
            }
            if let Some(action) = foreign_key.on_update() {
                sql.push_str(&format!(" ON UPDATE {}", action.as_sql()));
            }

            sql
        }
        Phrase::CreateTable => {
            // Each new column is rendered through a sub-query whose head is
            // not AlterTable, so AddColumn omits the "ADD COLUMN" keyword.
            let table = query.table();
            let columns: Vec<String> = table
                .new_columns()
                .iter()
                .map(|column| {
                    let sub_query = Query::new([Phrase::AddColumn]).with_column(column);
                    translator.render(Phrase::AddColumn, &sub_query)
                })
                .collect();

            format!("CREATE TABLE {} ({})", table.name(), columns.join(","))
        }
        Phrase::AddColumn => {
            let column = query.column();
            let mut parts = Vec::new();

            if query.first_phrase() == Some(Phrase::AlterTable) {
                parts.push("ADD COLUMN".to_string());
            }
            parts.push(column.name().to_string());
            parts.push(translator.native_type(column));
            if let Some(value) = column.default_value() {
                parts.push(format!("DEFAULT {}", default_literal(column, value)));
            }
            if column.not_null().unwrap_or(false) {
                parts.push("NOT NULL".to_string());
            }
            if column.primary().unwrap_or(false) {
                parts.push("PRIMARY KEY".to_string());
            }

            parts.join(" ")
        }
    }
}

/// Default-value literal, quoted for character-like types.
///
/// Numeric and date/time literals are never quoted. A change column without
/// a type is treated as character-like.
pub(crate) fn default_literal(column: &Column, value: &str) -> String {
    let unquoted = matches!(
        column.column_type(),
        Some(ColumnType::Integer)
            | Some(ColumnType::Date)
            | Some(ColumnType::Time)
            | Some(ColumnType::Timestamp)
    );

    if unquoted {
        value.to_string()
    } else {
        format!("'{}'", value)
    }
}

/// The column type, required for rendering. A typeless column reaching a
/// type mapping is a programming error.
pub(crate) fn required_type(column: &Column) -> ColumnType {
    column
        .column_type()
        .unwrap_or_else(|| panic!("column `{}` has no type bound for rendering", column.name()))
}
