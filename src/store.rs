//! Database access: the row source seam and its PostgreSQL implementation.

use crate::config::DatabaseConfig;
use crate::row::{row_to_map, Row};
use crate::sql::QueryBuf;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Runs SQL and hands back row mappings. Errors are the driver's, untouched.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Row>, sqlx::Error>;

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Row>, sqlx::Error>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.fetch_optional(&crate::sql::ping()).await.map(|_| ())
    }
}

pub struct PgRowSource {
    pool: PgPool,
}

impl PgRowSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RowSource for PgRowSource {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Row>, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql).persistent(q.persistent);
        for p in &q.params {
            query = query.bind(p.as_str());
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_map).collect())
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Row>, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql).persistent(q.persistent);
        for p in &q.params {
            query = query.bind(p.as_str());
        }
        let row = query.fetch_optional(&self.pool).await?;
        Ok(row.map(|r| row_to_map(&r)))
    }
}

/// Connection options from config; unset fields keep sqlx's defaults (`PGHOST`, `PGPORT`, ...).
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let mut opts = PgConnectOptions::new();
    if let Some(host) = &config.host {
        opts = opts.host(host);
    }
    if let Some(port) = config.port {
        opts = opts.port(port);
    }
    if let Some(name) = &config.name {
        opts = opts.database(name);
    }
    if let Some(user) = &config.user {
        opts = opts.username(user);
    }
    if let Some(password) = &config.password {
        opts = opts.password(password);
    }
    opts
}

/// Pool that connects on first use, so the server comes up while the database is down.
pub fn connect_pool(config: &DatabaseConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(connect_options(config))
}
