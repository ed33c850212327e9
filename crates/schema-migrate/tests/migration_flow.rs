//! End-to-end migration flow over in-memory collaborators.
//!
//! Drives the engine through a realistic migration sequence and checks the
//! exact statements each dialect produces, plus validator agreement with a
//! catalog reflecting the end state.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use schema_migrate::{
    CascadeAction, CatalogColumn, CatalogReader, Column, ColumnType, DefaultTranslator,
    ForeignKey, Migrator, MysqlTranslator, Result, SqlExecutor, Table, TableValidator,
};

/// Records every executed statement.
#[derive(Default)]
struct RecordingExecutor {
    statements: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    fn executed(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlExecutor for RecordingExecutor {
    async fn execute(&self, sql: &str) -> Result<()> {
        self.statements.lock().unwrap().push(sql.to_string());
        Ok(())
    }
}

/// Serves fixed catalog contents.
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

fn orders_table() -> Table {
    Table::builder("orders")
        .add_column(Column::new("id", ColumnType::Integer).primary(true).auto_increment(true))
        .add_column(Column::new("reference", ColumnType::Uuid).not_null(true))
        .add_column(Column::new("status", ColumnType::Varchar).size(16).default_value("new"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn default_dialect_migration_run() {
    let executor = Arc::new(RecordingExecutor::default());
    let migrator = Migrator::new(executor.clone(), Arc::new(DefaultTranslator::new()));

    let table = orders_table();
    migrator.add_columns_with_create_table(&table).await.unwrap();

    let foreign_key = ForeignKey::builder("fk_orders_user", "users", ["user_id"], ["id"])
        .on_delete(CascadeAction::Cascade)
        .build()
        .unwrap();
    migrator.add_foreign_key(&table, &foreign_key).await.unwrap();

    let widened = Column::change("status")
        .column_type(ColumnType::Varchar)
        .size(32)
        .build()
        .unwrap();
    migrator.alter_column_type(&table, &widened).await.unwrap();

    assert_eq!(
        executor.executed(),
        [
            "CREATE TABLE orders (id INTEGER GENERATED ALWAYS AS IDENTITY PRIMARY KEY,\
             reference UUID NOT NULL,status VARCHAR(16) DEFAULT 'new')",
            "ALTER TABLE orders ADD CONSTRAINT fk_orders_user FOREIGN KEY (user_id) \
             REFERENCES users (id) ON DELETE CASCADE",
            "ALTER TABLE orders ALTER COLUMN status TYPE VARCHAR(32)"
        ]
    );
}

#[tokio::test]
async fn mysql_dialect_migration_run() {
    let executor = Arc::new(RecordingExecutor::default());
    let catalog = Arc::new(FixedCatalog {
        columns: vec![CatalogColumn {
            name: "status".to_string(),
            native_type: "varchar(16)".to_string(),
            is_nullable: true,
            default: Some("new".to_string()),
        }],
        constraints: Vec::new(),
    });
    let migrator = Migrator::new(executor.clone(), Arc::new(MysqlTranslator::new(catalog)));

    let table = orders_table();
    migrator.add_columns_with_create_table(&table).await.unwrap();

    let renamed = Column::change("status").rename_to("state").build().unwrap();
    migrator.alter_column_name(&table, &renamed).await.unwrap();

    migrator.drop_constraint(&table, "idx_reference").await.unwrap();
    migrator.drop_foreign_key(&table, "fk_orders_user").await.unwrap();

    assert_eq!(
        executor.executed(),
        [
            "CREATE TABLE orders (id INTEGER AUTO_INCREMENT PRIMARY KEY,\
             reference CHAR(36) NOT NULL,status VARCHAR(16) DEFAULT 'new')",
            "ALTER TABLE orders CHANGE status state varchar(16) DEFAULT 'new'",
            "ALTER TABLE orders DROP INDEX idx_reference",
            "ALTER TABLE orders DROP FOREIGN KEY fk_orders_user"
        ]
    );
}

#[tokio::test]
async fn validator_confirms_end_state() {
    let catalog = Arc::new(FixedCatalog {
        columns: vec![
            CatalogColumn {
                name: "id".to_string(),
                native_type: "integer".to_string(),
                is_nullable: false,
                default: None,
            },
            CatalogColumn {
                name: "reference".to_string(),
                native_type: "uuid".to_string(),
                is_nullable: false,
                default: None,
            },
            CatalogColumn {
                name: "status".to_string(),
                native_type: "character varying(16)".to_string(),
                is_nullable: true,
                default: Some("'new'::character varying".to_string()),
            },
        ],
        constraints: vec!["orders_pkey".to_string()],
    });

    let validator = TableValidator::new(catalog);
    let report = validator
        .validate(&orders_table(), &DefaultTranslator::new())
        .await
        .unwrap();

    assert!(report.is_match(), "unexpected findings: {:?}", report.findings);
}
