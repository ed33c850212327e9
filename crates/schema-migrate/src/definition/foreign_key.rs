//! Foreign key definitions.

use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, Result};

/// Referential-integrity behavior applied on delete/update of a referenced row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CascadeAction {
    Restrict,
    SetNull,
    SetDefault,
    NoAction,
    Cascade,
}

impl CascadeAction {
    /// Uppercase SQL keyword for this action.
    pub fn as_sql(self) -> &'static str {
        match self {
            CascadeAction::Restrict => "RESTRICT",
            CascadeAction::SetNull => "SET NULL",
            CascadeAction::SetDefault => "SET DEFAULT",
            CascadeAction::NoAction => "NO ACTION",
            CascadeAction::Cascade => "CASCADE",
        }
    }
}

/// An immutable foreign key definition.
///
/// Local and foreign key columns pair up by position; the builder rejects
/// lists of unequal length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    constraint_name: String,
    foreign_table: String,
    local_keys: Vec<String>,
    foreign_keys: Vec<String>,
    on_delete: Option<CascadeAction>,
    on_update: Option<CascadeAction>,
}

impl ForeignKey {
    /// Start a builder for a foreign key constraint.
    pub fn builder<L, F>(
        constraint_name: impl Into<String>,
        foreign_table: impl Into<String>,
        local_keys: L,
        foreign_keys: F,
    ) -> ForeignKeyBuilder
    where
        L: IntoIterator,
        L::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        ForeignKeyBuilder {
            constraint_name: constraint_name.into(),
            foreign_table: foreign_table.into(),
            local_keys: local_keys.into_iter().map(Into::into).collect(),
            foreign_keys: foreign_keys.into_iter().map(Into::into).collect(),
            on_delete: None,
            on_update: None,
        }
    }

    pub fn constraint_name(&self) -> &str {
        &self.constraint_name
    }

    pub fn foreign_table(&self) -> &str {
        &self.foreign_table
    }

    pub fn local_keys(&self) -> &[String] {
        &self.local_keys
    }

    pub fn foreign_keys(&self) -> &[String] {
        &self.foreign_keys
    }

    pub fn on_delete(&self) -> Option<CascadeAction> {
        self.on_delete
    }

    pub fn on_update(&self) -> Option<CascadeAction> {
        self.on_update
    }
}

/// Single-use builder for [`ForeignKey`].
#[derive(Debug)]
pub struct ForeignKeyBuilder {
    constraint_name: String,
    foreign_table: String,
    local_keys: Vec<String>,
    foreign_keys: Vec<String>,
    on_delete: Option<CascadeAction>,
    on_update: Option<CascadeAction>,
}

impl ForeignKeyBuilder {
    pub fn on_delete(mut self, action: CascadeAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    pub fn on_update(mut self, action: CascadeAction) -> Self {
        self.on_update = Some(action);
        self
    }

    pub fn build(self) -> Result<ForeignKey> {
        if self.local_keys.is_empty() {
            return Err(MigrateError::definition(format!(
                "foreign key `{}` has no key columns",
                self.constraint_name
            )));
        }
        if self.local_keys.len() != self.foreign_keys.len() {
            return Err(MigrateError::definition(format!(
                "foreign key `{}` has {} local key(s) but {} foreign key(s)",
                self.constraint_name,
                self.local_keys.len(),
                self.foreign_keys.len()
            )));
        }

        Ok(ForeignKey {
            constraint_name: self.constraint_name,
            foreign_table: self.foreign_table,
            local_keys: self.local_keys,
            foreign_keys: self.foreign_keys,
            on_delete: self.on_delete,
            on_update: self.on_update,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_keywords() {
        assert_eq!(CascadeAction::Restrict.as_sql(), "RESTRICT");
        assert_eq!(CascadeAction::SetNull.as_sql(), "SET NULL");
        assert_eq!(CascadeAction::SetDefault.as_sql(), "SET DEFAULT");
        assert_eq!(CascadeAction::NoAction.as_sql(), "NO ACTION");
        assert_eq!(CascadeAction::Cascade.as_sql(), "CASCADE");
    }

    #[test]
    fn builds_with_paired_keys() {
        let fk = ForeignKey::builder("fk_orders_user", "users", ["user_id"], ["id"])
            .on_delete(CascadeAction::Cascade)
            .build()
            .unwrap();

        assert_eq!(fk.local_keys(), ["user_id"]);
        assert_eq!(fk.foreign_keys(), ["id"]);
        assert_eq!(fk.on_delete(), Some(CascadeAction::Cascade));
        assert_eq!(fk.on_update(), None);
    }

    #[test]
    fn rejects_unpaired_keys() {
        let err = ForeignKey::builder("fk_bad", "users", ["a", "b"], ["id"])
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("fk_bad"));
    }

    #[test]
    fn rejects_empty_keys() {
        let keys: [&str; 0] = [];
        assert!(ForeignKey::builder("fk_empty", "users", keys, keys)
            .build()
            .is_err());
    }
}
