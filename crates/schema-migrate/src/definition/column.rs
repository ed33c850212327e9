//! Column definitions for new and changed columns.

use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, Result};

/// Dialect-neutral column type.
///
/// The translator maps each variant to the native type text of its dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Char,
    Varchar,
    Uuid,
    Date,
    Time,
    Timestamp,
}

/// An immutable column definition.
///
/// For a *new* column the type is always present. For a *change* column only
/// the fields that should be altered are set; an absent field means
/// "leave as-is", never a false/zero default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    column_type: Option<ColumnType>,
    size: Option<u32>,
    default_value: Option<String>,
    not_null: Option<bool>,
    primary: Option<bool>,
    auto_increment: Option<bool>,
    rename_to: Option<String>,
}

impl Column {
    /// Start a builder for a new column. The type is mandatory on this path.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> ColumnBuilder {
        ColumnBuilder {
            name: name.into(),
            column_type: Some(column_type),
            requires_type: true,
            size: None,
            default_value: None,
            not_null: None,
            primary: None,
            auto_increment: None,
            rename_to: None,
        }
    }

    /// Start a builder describing a change to an existing column.
    ///
    /// The type is optional here: only the fields that are set will be altered.
    pub fn change(name: impl Into<String>) -> ColumnBuilder {
        ColumnBuilder {
            name: name.into(),
            column_type: None,
            requires_type: false,
            size: None,
            default_value: None,
            not_null: None,
            primary: None,
            auto_increment: None,
            rename_to: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> Option<ColumnType> {
        self.column_type
    }

    pub fn size(&self) -> Option<u32> {
        self.size
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn not_null(&self) -> Option<bool> {
        self.not_null
    }

    pub fn primary(&self) -> Option<bool> {
        self.primary
    }

    pub fn auto_increment(&self) -> Option<bool> {
        self.auto_increment
    }

    pub fn rename_to(&self) -> Option<&str> {
        self.rename_to.as_deref()
    }
}

/// Single-use builder for [`Column`]. Every setter consumes the builder.
#[derive(Debug)]
pub struct ColumnBuilder {
    name: String,
    column_type: Option<ColumnType>,
    requires_type: bool,
    size: Option<u32>,
    default_value: Option<String>,
    not_null: Option<bool>,
    primary: Option<bool>,
    auto_increment: Option<bool>,
    rename_to: Option<String>,
}

impl ColumnBuilder {
    /// Set the column type (used on the change-column path).
    pub fn column_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    /// Set the size for sized types such as CHAR and VARCHAR.
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the default value literal.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn not_null(mut self, not_null: bool) -> Self {
        self.not_null = Some(not_null);
        self
    }

    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = Some(auto_increment);
        self
    }

    /// Set the rename target for a change column.
    pub fn rename_to(mut self, name: impl Into<String>) -> Self {
        self.rename_to = Some(name.into());
        self
    }

    pub(crate) fn name_ref(&self) -> &str {
        &self.name
    }

    pub(crate) fn has_type(&self) -> bool {
        self.column_type.is_some()
    }

    /// Build the column, reporting a construction error when a new column
    /// lacks a type.
    pub fn build(self) -> Result<Column> {
        if self.requires_type && self.column_type.is_none() {
            return Err(MigrateError::definition(format!(
                "new column `{}` has no type",
                self.name
            )));
        }

        Ok(Column {
            name: self.name,
            column_type: self.column_type,
            size: self.size,
            default_value: self.default_value,
            not_null: self.not_null,
            primary: self.primary,
            auto_increment: self.auto_increment,
            rename_to: self.rename_to,
        })
    }
}
