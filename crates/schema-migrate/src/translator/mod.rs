//! Dialect translators: phrase-by-phrase rendering of queries into SQL.
//!
//! [`DefaultTranslator`] implements every phrase of the vocabulary with
//! ANSI-leaning syntax. Dialect translators override only the phrases where
//! their syntax diverges and delegate everything else to the shared defaults
//! (composition over the default, not inheritance). Resolution is an explicit
//! two-level lookup: the dialect's [`phrase_override`](Translator::phrase_override)
//! first, the shared default rendering second — never a deeper chain.
//!
//! # Design Pattern
//!
//! This is a **Strategy** pattern: translators are interchangeable syntax
//! rules behind one trait, selected when the engine is constructed.

pub mod default;
pub mod mysql;

pub use default::DefaultTranslator;
pub use mysql::MysqlTranslator;

use async_trait::async_trait;

use crate::definition::Column;
use crate::error::Result;
use crate::query::{Phrase, Query};

/// SQL syntax strategy for one database dialect.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Dialect identifier (e.g. "default", "mysql").
    fn dialect(&self) -> &str;

    /// Dialect-specific phrase renderings.
    ///
    /// Returns `None` for every phrase the dialect does not override, which
    /// falls the lookup through to the shared default rendering.
    fn phrase_override(&self, phrase: Phrase, query: &Query<'_>) -> Option<String>;

    /// Native type text for a column definition.
    fn native_type(&self, column: &Column) -> String;

    /// Render one phrase in the context of a query.
    ///
    /// Dialect override first, shared defaults second. Every phrase of the
    /// vocabulary resolves through this two-level lookup.
    fn render(&self, phrase: Phrase, query: &Query<'_>) -> String {
        match self.phrase_override(phrase, query) {
            Some(fragment) => fragment,
            None => default::render_default(self, phrase, query),
        }
    }

    /// Render a whole query into executable statements.
    ///
    /// The default concatenates the per-phrase fragments of the sequence into
    /// a single statement. Dialects whose syntax for an operation is not a
    /// phrase-for-phrase substitution (e.g. MySQL rename, which must consult
    /// the live catalog) override this instead.
    async fn statements(&self, query: &Query<'_>) -> Result<Vec<String>> {
        Ok(vec![render_query(self, query)])
    }
}

/// Join the rendered fragments of a query's phrase sequence with single
/// spaces and trim the result.
pub(crate) fn render_query<T: Translator + ?Sized>(translator: &T, query: &Query<'_>) -> String {
    let fragments: Vec<String> = query
        .phrases()
        .iter()
        .map(|&phrase| translator.render(phrase, query))
        .collect();

    fragments.join(" ").trim().to_string()
}

/// Size suffix like `(36)` when the column specifies a size, empty otherwise.
pub(crate) fn size_if_present(column: &Column) -> String {
    column
        .size()
        .map(|size| format!("({})", size))
        .unwrap_or_default()
}

/// Size suffix using the dialect default when the caller specified none.
pub(crate) fn size_or_default(column: &Column, default_size: u32) -> String {
    format!("({})", column.size().unwrap_or(default_size))
}
