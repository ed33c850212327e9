//! PostgreSQL connection adapter.

use async_trait::async_trait;
use tokio_postgres::Client;

use crate::connection::{CatalogColumn, CatalogReader, SqlExecutor};
use crate::error::{MigrateError, Result};

/// Adapter implementing statement execution and catalog reads over a
/// caller-supplied [`tokio_postgres::Client`].
pub struct PostgresConnection {
    client: Client,
}

impl PostgresConnection {
    /// Wrap an established client. Connecting and TLS policy stay with the
    /// caller.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl SqlExecutor for PostgresConnection {
    async fn execute(&self, sql: &str) -> Result<()> {
        self.client
            .batch_execute(sql)
            .await
            .map_err(|e| MigrateError::could_not_process(sql, e))
    }
}

#[async_trait]
impl CatalogReader for PostgresConnection {
    async fn describe_columns(&self, table: &str) -> Result<Vec<CatalogColumn>> {
        const SQL: &str = "SELECT column_name, data_type, is_nullable, column_default \
             FROM information_schema.columns WHERE table_name = $1 \
             ORDER BY ordinal_position";

        let rows = self
            .client
            .query(SQL, &[&table])
            .await
            .map_err(|e| MigrateError::could_not_process(SQL, e))?;

        Ok(rows
            .into_iter()
            .map(|row| CatalogColumn {
                name: row.get("column_name"),
                native_type: row.get("data_type"),
                is_nullable: row.get::<_, String>("is_nullable") == "YES",
                default: row.get("column_default"),
            })
            .collect())
    }

    async fn constraint_names(&self, table: &str) -> Result<Vec<String>> {
        const SQL: &str = "SELECT constraint_name FROM information_schema.table_constraints \
             WHERE table_name = $1";

        let rows = self
            .client
            .query(SQL, &[&table])
            .await
            .map_err(|e| MigrateError::could_not_process(SQL, e))?;

        Ok(rows.into_iter().map(|row| row.get(0)).collect())
    }
}
