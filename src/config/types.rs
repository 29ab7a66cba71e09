//! Raw config types read from the environment.

use std::time::Duration;

/// Tables served out of the box: (table name, id column).
pub const DEFAULT_TABLES: &[(&str, &str)] = &[
    ("users", "user_id"),
    ("providers", "provider_id"),
    ("offerings", "offering_id"),
    ("service_offerings", "service_offering_id"),
    ("bookings", "booking_id"),
    ("service_types", "type_id"),
    ("service_categories", "category_id"),
    ("conversations", "message_id"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    pub name: String,
    pub id_column: String,
    /// Postgres type name of the id column (`uuid`, `int4`, ...). Looked up in the catalog when unset.
    pub id_type: Option<String>,
}

impl TableConfig {
    pub fn new(name: impl Into<String>, id_column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_column: id_column.into(),
            id_type: None,
        }
    }

    pub fn with_id_type(mut self, id_type: impl Into<String>) -> Self {
        self.id_type = Some(id_type.into());
        self
    }
}

/// Connection settings. Unset fields fall back to sqlx's defaults (which honour `PG*` variables).
#[derive(Clone, Debug, Default)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            max_body_bytes: 1024 * 1024,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    /// Default tables followed by any extra registrations.
    pub tables: Vec<TableConfig>,
}
