//! Definition model: immutable value objects describing migration intent.
//!
//! These types carry no database knowledge. They describe *what* a migration
//! operation targets and with which parameters; the translator layer decides
//! how that intent is spelled in a given SQL dialect.
//!
//! Builders are the only construction path. Invariants (a new column must
//! carry a type, foreign key column lists must pair up) are enforced at the
//! single `build()` boundary, which reports a
//! [`Definition`](crate::error::MigrateError::Definition) error rather than
//! falling back to a silent default.

pub mod column;
pub mod constraint;
pub mod foreign_key;
pub mod table;

pub use column::{Column, ColumnBuilder, ColumnType};
pub use constraint::{Constraint, ConstraintBuilder, ConstraintType};
pub use foreign_key::{CascadeAction, ForeignKey, ForeignKeyBuilder};
pub use table::{Table, TableBuilder};
