//! Post-migration state validation.
//!
//! [`TableValidator`] reads the live catalog through a [`CatalogReader`] and
//! reports whether it matches an expected [`Table`] definition, per column
//! (presence, type, nullability, default) and per foreign key constraint.
//! It is consumed by callers, typically tests confirming a migration reached
//! its intended end state; the engine never invokes it. Catalog access is
//! strictly read-only.

use std::sync::Arc;

use crate::connection::CatalogReader;
use crate::definition::{Column, Table};
use crate::error::Result;
use crate::translator::Translator;

/// One validation mismatch between the expected definition and the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// An expected column is missing from the physical table.
    MissingColumn { column: String },

    /// A column's native type differs from the expected type.
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    /// A column's nullability differs from the expected definition.
    NullabilityMismatch {
        column: String,
        expected_not_null: bool,
    },

    /// A column's default differs from the expected definition.
    DefaultMismatch {
        column: String,
        expected: String,
        actual: Option<String>,
    },

    /// An expected constraint is missing from the physical table.
    MissingConstraint { constraint: String },
}

/// Result of validating one table definition against the catalog.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Validated table name.
    pub table: String,

    /// Mismatches found; empty when the table matches.
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Whether the live table matches the expected definition.
    pub fn is_match(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Compares an expected table definition with the live database catalog.
pub struct TableValidator {
    catalog: Arc<dyn CatalogReader>,
}

impl TableValidator {
    /// Create a validator over a read-only catalog reader.
    pub fn new(catalog: Arc<dyn CatalogReader>) -> Self {
        Self { catalog }
    }

    /// Validate the expected table's new columns and foreign keys against
    /// the catalog. Expected native types are derived through `translator`
    /// so dialect type substitutions (e.g. UUID as CHAR(36)) compare
    /// correctly.
    pub async fn validate(
        &self,
        expected: &Table,
        translator: &dyn Translator,
    ) -> Result<ValidationReport> {
        let live_columns = self.catalog.describe_columns(expected.name()).await?;
        let mut findings = Vec::new();

        for column in expected.new_columns() {
            let live = live_columns
                .iter()
                .find(|live| live.name.eq_ignore_ascii_case(column.name()));

            let Some(live) = live else {
                findings.push(Finding::MissingColumn {
                    column: column.name().to_string(),
                });
                continue;
            };

            let expected_type = translator.native_type(column);
            if base_type(&expected_type) != base_type(&live.native_type) {
                findings.push(Finding::TypeMismatch {
                    column: column.name().to_string(),
                    expected: expected_type,
                    actual: live.native_type.clone(),
                });
            }

            if let Some(expected_not_null) = expected_not_null(column) {
                let actual_not_null = !live.is_nullable;
                if expected_not_null != actual_not_null {
                    findings.push(Finding::NullabilityMismatch {
                        column: column.name().to_string(),
                        expected_not_null,
                    });
                }
            }

            if let Some(expected_default) = column.default_value() {
                let matches = live
                    .default
                    .as_deref()
                    .map(|actual| normalize_default(actual) == expected_default)
                    .unwrap_or(false);
                if !matches {
                    findings.push(Finding::DefaultMismatch {
                        column: column.name().to_string(),
                        expected: expected_default.to_string(),
                        actual: live.default.clone(),
                    });
                }
            }
        }

        if !expected.new_foreign_keys().is_empty() {
            let live_constraints = self.catalog.constraint_names(expected.name()).await?;
            for foreign_key in expected.new_foreign_keys() {
                let present = live_constraints
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(foreign_key.constraint_name()));
                if !present {
                    findings.push(Finding::MissingConstraint {
                        constraint: foreign_key.constraint_name().to_string(),
                    });
                }
            }
        }

        Ok(ValidationReport {
            table: expected.name().to_string(),
            findings,
        })
    }
}

/// Whether the expected definition expresses an opinion on nullability.
///
/// A primary key column is expected NOT NULL even when the flag is unset.
fn expected_not_null(column: &Column) -> Option<bool> {
    match (column.not_null(), column.primary()) {
        (Some(not_null), primary) => Some(not_null || primary.unwrap_or(false)),
        (None, Some(true)) => Some(true),
        _ => None,
    }
}

/// Reduce a native type string to a comparable base keyword.
///
/// Catalogs spell types differently from DDL (`character varying` vs
/// `VARCHAR(120)`); sizes and spelling variants are normalized away.
fn base_type(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let without_size = match lowered.find('(') {
        Some(open) => lowered[..open].trim().to_string(),
        None => lowered.trim().to_string(),
    };

    match without_size.as_str() {
        "character varying" => "varchar".to_string(),
        "character" | "bpchar" => "char".to_string(),
        other if other.starts_with("timestamp") => "timestamp".to_string(),
        other if other.starts_with("int") => "integer".to_string(),
        other => other
            .split_whitespace()
            .next()
            .unwrap_or(other)
            .to_string(),
    }
}

/// Strip catalog decoration from a default value, e.g. `'x'::character
/// varying` to `x`.
fn normalize_default(raw: &str) -> String {
    if let Some(open) = raw.find('\'') {
        if let Some(close) = raw[open + 1..].find('\'') {
            return raw[open + 1..open + 1 + close].to_string();
        }
    }

    raw.split("::").next().unwrap_or(raw).trim().to_string()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::connection::CatalogColumn;
    use crate::definition::{ColumnType, ForeignKey};
    use crate::translator::DefaultTranslator;

    use super::*;

    struct FixedCatalog {
        columns: Vec<CatalogColumn>,
        constraints: Vec<String>,
    }

    #[async_trait]
    impl CatalogReader for FixedCatalog {
        async fn describe_columns(&self, _table: &str) -> Result<Vec<CatalogColumn>> {
            Ok(self.columns.clone())
        }

        async fn constraint_names(&self, _table: &str) -> Result<Vec<String>> {
            Ok(self.constraints.clone())
        }
    }

    fn validator(columns: Vec<CatalogColumn>, constraints: Vec<String>) -> TableValidator {
        TableValidator::new(Arc::new(FixedCatalog {
            columns,
            constraints,
        }))
    }

    fn live_column(name: &str, native_type: &str, is_nullable: bool) -> CatalogColumn {
        CatalogColumn {
            name: name.to_string(),
            native_type: native_type.to_string(),
            is_nullable,
            default: None,
        }
    }

    #[tokio::test]
    async fn matching_table_has_no_findings() {
        let validator = validator(
            vec![
                live_column("id", "integer", false),
                live_column("email", "character varying(120)", true),
            ],
            vec![],
        );
        let expected = Table::builder("users")
            .add_column(Column::new("id", ColumnType::Integer).primary(true))
            .add_column(Column::new("email", ColumnType::Varchar).size(120))
            .build()
            .unwrap();

        let report = validator
            .validate(&expected, &DefaultTranslator::new())
            .await
            .unwrap();

        assert!(report.is_match(), "unexpected findings: {:?}", report.findings);
    }

    #[tokio::test]
    async fn reports_missing_column() {
        let validator = validator(vec![live_column("id", "integer", false)], vec![]);
        let expected = Table::builder("users")
            .add_column(Column::new("id", ColumnType::Integer).not_null(true))
            .add_column(Column::new("email", ColumnType::Varchar))
            .build()
            .unwrap();

        let report = validator
            .validate(&expected, &DefaultTranslator::new())
            .await
            .unwrap();

        assert_eq!(
            report.findings,
            [Finding::MissingColumn {
                column: "email".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn reports_type_and_nullability_mismatch() {
        let validator = validator(vec![live_column("age", "character varying(10)", true)], vec![]);
        let expected = Table::builder("users")
            .add_column(Column::new("age", ColumnType::Integer).not_null(true))
            .build()
            .unwrap();

        let report = validator
            .validate(&expected, &DefaultTranslator::new())
            .await
            .unwrap();

        assert_eq!(report.findings.len(), 2);
        assert!(matches!(report.findings[0], Finding::TypeMismatch { .. }));
        assert!(matches!(
            report.findings[1],
            Finding::NullabilityMismatch {
                expected_not_null: true,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn compares_defaults_through_catalog_decoration() {
        let mut with_default = live_column("status", "character varying(16)", true);
        with_default.default = Some("'new'::character varying".to_string());
        let validator = validator(vec![with_default], vec![]);

        let expected = Table::builder("jobs")
            .add_column(
                Column::new("status", ColumnType::Varchar)
                    .size(16)
                    .default_value("new"),
            )
            .build()
            .unwrap();

        let report = validator
            .validate(&expected, &DefaultTranslator::new())
            .await
            .unwrap();

        assert!(report.is_match(), "unexpected findings: {:?}", report.findings);
    }

    #[tokio::test]
    async fn reports_missing_foreign_key_constraint() {
        let validator = validator(vec![], vec!["pk_orders".to_string()]);
        let expected = Table::builder("orders")
            .add_foreign_key(ForeignKey::builder("fk_orders_user", "users", ["user_id"], ["id"]))
            .build()
            .unwrap();

        let report = validator
            .validate(&expected, &DefaultTranslator::new())
            .await
            .unwrap();

        assert_eq!(
            report.findings,
            [Finding::MissingConstraint {
                constraint: "fk_orders_user".to_string()
            }]
        );
    }

    #[test]
    fn base_type_normalization() {
        assert_eq!(base_type("VARCHAR(255)"), "varchar");
        assert_eq!(base_type("character varying(120)"), "varchar");
        assert_eq!(base_type("character"), "char");
        assert_eq!(base_type("timestamp without time zone"), "timestamp");
        assert_eq!(base_type("int4"), "integer");
        assert_eq!(base_type("INTEGER GENERATED ALWAYS AS IDENTITY"), "integer");
        assert_eq!(base_type("uuid"), "uuid");
    }

    #[test]
    fn default_normalization() {
        assert_eq!(normalize_default("'x'::character varying"), "x");
        assert_eq!(normalize_default("'queued'"), "queued");
        assert_eq!(normalize_default("5"), "5");
    }
}
