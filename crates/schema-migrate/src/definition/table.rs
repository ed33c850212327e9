//! Table definitions grouping the column and key changes of one migration.

use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, Result};

use super::column::{Column, ColumnBuilder};
use super::foreign_key::{ForeignKey, ForeignKeyBuilder};

/// An immutable table definition.
///
/// Groups the new columns, changed columns, dropped columns and foreign key
/// changes a migration applies to one physical table. Every new column is
/// guaranteed to carry a type; [`TableBuilder::build`] rejects the definition
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    new_columns: Vec<Column>,
    change_columns: Vec<Column>,
    drop_columns: Vec<String>,
    new_foreign_keys: Vec<ForeignKey>,
    drop_foreign_keys: Vec<String>,
}

impl Table {
    /// Start a builder for a table definition.
    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder {
            name: name.into(),
            new_columns: Vec::new(),
            change_columns: Vec::new(),
            drop_columns: Vec::new(),
            new_foreign_keys: Vec::new(),
            drop_foreign_keys: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// New columns in declaration order.
    pub fn new_columns(&self) -> &[Column] {
        &self.new_columns
    }

    pub fn change_columns(&self) -> &[Column] {
        &self.change_columns
    }

    pub fn drop_columns(&self) -> &[String] {
        &self.drop_columns
    }

    pub fn new_foreign_keys(&self) -> &[ForeignKey] {
        &self.new_foreign_keys
    }

    pub fn drop_foreign_keys(&self) -> &[String] {
        &self.drop_foreign_keys
    }
}

/// Single-use builder for [`Table`].
#[derive(Debug)]
pub struct TableBuilder {
    name: String,
    new_columns: Vec<ColumnBuilder>,
    change_columns: Vec<ColumnBuilder>,
    drop_columns: Vec<String>,
    new_foreign_keys: Vec<ForeignKeyBuilder>,
    drop_foreign_keys: Vec<String>,
}

impl TableBuilder {
    /// Add a new column, typically built via [`Column::new`].
    pub fn add_column(mut self, column: ColumnBuilder) -> Self {
        self.new_columns.push(column);
        self
    }

    /// Add a change to an existing column, built via [`Column::change`].
    pub fn change_column(mut self, column: ColumnBuilder) -> Self {
        self.change_columns.push(column);
        self
    }

    /// Drop a column by name.
    pub fn drop_column(mut self, name: impl Into<String>) -> Self {
        self.drop_columns.push(name.into());
        self
    }

    /// Add a foreign key constraint.
    pub fn add_foreign_key(mut self, foreign_key: ForeignKeyBuilder) -> Self {
        self.new_foreign_keys.push(foreign_key);
        self
    }

    /// Drop a foreign key by constraint name.
    pub fn drop_foreign_key(mut self, constraint_name: impl Into<String>) -> Self {
        self.drop_foreign_keys.push(constraint_name.into());
        self
    }

    /// Build the table definition.
    ///
    /// Fails when any accumulated new column has no type set.
    pub fn build(self) -> Result<Table> {
        if let Some(untyped) = self.new_columns.iter().find(|column| !column.has_type()) {
            return Err(MigrateError::definition(format!(
                "new column `{}` in table `{}` has no type",
                untyped.name_ref(),
                self.name
            )));
        }

        let new_columns = self
            .new_columns
            .into_iter()
            .map(ColumnBuilder::build)
            .collect::<Result<Vec<_>>>()?;
        let change_columns = self
            .change_columns
            .into_iter()
            .map(ColumnBuilder::build)
            .collect::<Result<Vec<_>>>()?;
        let new_foreign_keys = self
            .new_foreign_keys
            .into_iter()
            .map(ForeignKeyBuilder::build)
            .collect::<Result<Vec<_>>>()?;

        Ok(Table {
            name: self.name,
            new_columns,
            change_columns,
            drop_columns: self.drop_columns,
            new_foreign_keys,
            drop_foreign_keys: self.drop_foreign_keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::column::ColumnType;
    use super::super::foreign_key::CascadeAction;
    use super::*;

    #[test]
    fn builds_table_with_typed_columns() {
        let table = Table::builder("users")
            .add_column(Column::new("id", ColumnType::Integer).primary(true))
            .add_column(Column::new("email", ColumnType::Varchar).size(120))
            .build()
            .unwrap();

        assert_eq!(table.name(), "users");
        assert_eq!(table.new_columns().len(), 2);
        assert_eq!(table.new_columns()[0].name(), "id");
        assert_eq!(table.new_columns()[1].size(), Some(120));
    }

    #[test]
    fn rejects_new_column_without_type() {
        // A change-column builder has no type; adding it as a new column must
        // fail at build time.
        let err = Table::builder("users")
            .add_column(Column::new("id", ColumnType::Integer))
            .add_column(Column::change("age"))
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("`age`"));
        assert!(err.to_string().contains("no type"));
    }

    #[test]
    fn change_columns_allow_absent_type() {
        let table = Table::builder("users")
            .change_column(Column::change("name").rename_to("full_name"))
            .build()
            .unwrap();

        assert_eq!(table.change_columns().len(), 1);
        assert_eq!(table.change_columns()[0].column_type(), None);
    }

    #[test]
    fn carries_foreign_key_changes() {
        let table = Table::builder("orders")
            .add_foreign_key(
                ForeignKey::builder("fk_orders_user", "users", ["user_id"], ["id"])
                    .on_delete(CascadeAction::Cascade),
            )
            .drop_foreign_key("fk_orders_legacy")
            .drop_column("legacy_ref")
            .build()
            .unwrap();

        assert_eq!(table.new_foreign_keys().len(), 1);
        assert_eq!(table.drop_foreign_keys(), ["fk_orders_legacy"]);
        assert_eq!(table.drop_columns(), ["legacy_ref"]);
    }

    #[test]
    fn invalid_foreign_key_fails_table_build() {
        let err = Table::builder("orders")
            .add_foreign_key(ForeignKey::builder("fk_bad", "users", ["a", "b"], ["id"]))
            .build()
            .unwrap_err();

        assert!(matches!(err, MigrateError::Definition(_)));
    }
}
