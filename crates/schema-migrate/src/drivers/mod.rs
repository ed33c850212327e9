//! Database driver adapters.
//!
//! Thin implementations of the collaborator traits over real clients:
//!
//! - [`postgres`]: tokio-postgres client, information-schema catalog reads
//! - [`mysql`]: mysql_async pool, `DESCRIBE`-based catalog reads
//!
//! The adapters own no connection lifecycle policy: the caller constructs
//! and configures the client or pool and hands it in. Each executed
//! statement uses a short-lived scope that is released on every exit path.

pub mod mysql;
pub mod postgres;

pub use mysql::MysqlConnection;
pub use postgres::PostgresConnection;
