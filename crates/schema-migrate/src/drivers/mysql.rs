//! MySQL/MariaDB connection adapter.

use async_trait::async_trait;
use mysql_async::prelude::Queryable;
use mysql_async::{Pool, Row};

use crate::connection::{CatalogColumn, CatalogReader, SqlExecutor};
use crate::error::{MigrateError, Result};

/// Adapter implementing statement execution and catalog reads over a
/// caller-supplied [`mysql_async::Pool`].
///
/// Each call checks a connection out of the pool for the duration of one
/// statement and returns it on every exit path.
pub struct MysqlConnection {
    pool: Pool,
}

impl MysqlConnection {
    /// Wrap a caller-configured pool. Pool sizing and TLS policy stay with
    /// the caller.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

#[async_trait]
impl SqlExecutor for MysqlConnection {
    async fn execute(&self, sql: &str) -> Result<()> {
        let mut conn = self
            .pool
            .get_conn()
            .await
            .map_err(|e| MigrateError::could_not_process(sql, e))?;

        conn.query_drop(sql)
            .await
            .map_err(|e| MigrateError::could_not_process(sql, e))
    }
}

#[async_trait]
impl CatalogReader for MysqlConnection {
    async fn describe_columns(&self, table: &str) -> Result<Vec<CatalogColumn>> {
        let sql = format!("DESCRIBE {}", table);
        let mut conn = self
            .pool
            .get_conn()
            .await
            .map_err(|e| MigrateError::could_not_process(&sql, e))?;

        let rows: Vec<Row> = conn
            .query(sql.as_str())
            .await
            .map_err(|e| MigrateError::could_not_process(&sql, e))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let nullable: Option<String> = row.get("Null");
                CatalogColumn {
                    name: row.get("Field").unwrap_or_default(),
                    native_type: row.get("Type").unwrap_or_default(),
                    is_nullable: nullable.as_deref() != Some("NO"),
                    default: row.get::<Option<String>, _>("Default").flatten(),
                }
            })
            .collect())
    }

    async fn constraint_names(&self, table: &str) -> Result<Vec<String>> {
        const SQL: &str = "SELECT DISTINCT constraint_name \
             FROM information_schema.table_constraints WHERE table_name = ?";

        let mut conn = self
            .pool
            .get_conn()
            .await
            .map_err(|e| MigrateError::could_not_process(SQL, e))?;

        conn.exec(SQL, (table,))
            .await
            .map_err(|e| MigrateError::could_not_process(SQL, e))
    }
}
