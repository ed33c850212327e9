//! Index and unique constraint definitions.

use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, Result};

/// Kind of named constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintType {
    Index,
    Unique,
}

impl ConstraintType {
    /// Uppercase SQL keyword for this constraint type.
    pub fn as_sql(self) -> &'static str {
        match self {
            ConstraintType::Index => "INDEX",
            ConstraintType::Unique => "UNIQUE",
        }
    }
}

/// An immutable named constraint covering an ordered list of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    name: String,
    constraint_type: ConstraintType,
    columns: Vec<String>,
}

impl Constraint {
    /// Start a builder for a named constraint.
    pub fn builder(name: impl Into<String>, constraint_type: ConstraintType) -> ConstraintBuilder {
        ConstraintBuilder {
            name: name.into(),
            constraint_type,
            columns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint_type(&self) -> ConstraintType {
        self.constraint_type
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Single-use builder for [`Constraint`].
#[derive(Debug)]
pub struct ConstraintBuilder {
    name: String,
    constraint_type: ConstraintType,
    columns: Vec<String>,
}

impl ConstraintBuilder {
    /// Append one covered column.
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.columns.push(name.into());
        self
    }

    /// Append several covered columns in order.
    pub fn columns<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.columns.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Constraint> {
        if self.columns.is_empty() {
            return Err(MigrateError::definition(format!(
                "constraint `{}` covers no columns",
                self.name
            )));
        }

        Ok(Constraint {
            name: self.name,
            constraint_type: self.constraint_type,
            columns: self.columns,
        })
    }
}
