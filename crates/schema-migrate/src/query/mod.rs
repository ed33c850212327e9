//! Phrase and query intermediate representation.
//!
//! A [`Phrase`] is an opaque token naming one DDL clause fragment, not a SQL
//! string itself. A [`Query`] is an ordered sequence of phrases plus the
//! definition-model operands they apply to. Phrase order is semantically
//! meaningful: `AlterTable` precedes `AlterColumn` precedes the clause phrase.
//!
//! Queries are transient: the engine builds one per operation, the translator
//! renders it, and it is discarded. Operands are borrowed from the caller,
//! who owns the definition model for the duration of the operation.
//!
//! Binding the operands a phrase sequence needs is the engine's job. A phrase
//! renderer dereferencing a missing operand is a programming error and panics
//! with a message naming the missing piece; it is not a recoverable condition.

use crate::definition::{Column, Constraint, ForeignKey, Table};

/// Opaque token identifying one DDL clause fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phrase {
    AlterTable,
    AlterColumn,
    AddColumn,
    DropColumn,
    AddConstraint,
    DropConstraint,
    AddForeignKey,
    DropForeignKey,
    Type,
    Rename,
    SetDefault,
    CreateTable,
}

/// Ordered phrase sequence plus bound operands for one renderable statement.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    phrases: Vec<Phrase>,
    table: Option<&'a Table>,
    column: Option<&'a Column>,
    column_name: Option<&'a str>,
    constraint: Option<&'a Constraint>,
    constraint_name: Option<&'a str>,
    foreign_key: Option<&'a ForeignKey>,
}

impl<'a> Query<'a> {
    /// Create a query with the given phrase sequence and no bound operands.
    pub fn new(phrases: impl IntoIterator<Item = Phrase>) -> Self {
        Query {
            phrases: phrases.into_iter().collect(),
            table: None,
            column: None,
            column_name: None,
            constraint: None,
            constraint_name: None,
            foreign_key: None,
        }
    }

    pub fn with_table(mut self, table: &'a Table) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_column(mut self, column: &'a Column) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_column_name(mut self, column_name: &'a str) -> Self {
        self.column_name = Some(column_name);
        self
    }

    pub fn with_constraint(mut self, constraint: &'a Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn with_constraint_name(mut self, constraint_name: &'a str) -> Self {
        self.constraint_name = Some(constraint_name);
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: &'a ForeignKey) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }

    /// The phrase sequence in rendering order.
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    /// The head of the phrase sequence, used to disambiguate rendering
    /// contexts (an `AddColumn` inside `ALTER TABLE` versus `CREATE TABLE`).
    pub fn first_phrase(&self) -> Option<Phrase> {
        self.phrases.first().copied()
    }

    /// The bound table. Panics when no table was bound.
    pub fn table(&self) -> &'a Table {
        self.table
            .unwrap_or_else(|| panic!("query {:?} has no bound table", self.phrases))
    }

    /// The bound column. Panics when no column was bound.
    pub fn column(&self) -> &'a Column {
        self.column
            .unwrap_or_else(|| panic!("query {:?} has no bound column", self.phrases))
    }

    /// The bound column name. Panics when no column name was bound.
    pub fn column_name(&self) -> &'a str {
        self.column_name
            .unwrap_or_else(|| panic!("query {:?} has no bound column name", self.phrases))
    }

    /// The bound constraint. Panics when no constraint was bound.
    pub fn constraint(&self) -> &'a Constraint {
        self.constraint
            .unwrap_or_else(|| panic!("query {:?} has no bound constraint", self.phrases))
    }

    /// The bound constraint name. Panics when no constraint name was bound.
    pub fn constraint_name(&self) -> &'a str {
        self.constraint_name
            .unwrap_or_else(|| panic!("query {:?} has no bound constraint name", self.phrases))
    }

    /// The bound foreign key. Panics when no foreign key was bound.
    pub fn foreign_key(&self) -> &'a ForeignKey {
        self.foreign_key
            .unwrap_or_else(|| panic!("query {:?} has no bound foreign key", self.phrases))
    }
}
