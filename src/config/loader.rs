//! Load gateway config from environment variables.

use crate::config::types::*;
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

impl GatewayConfig {
    /// Read config from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read config through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = DatabaseConfig {
            host: get("DB_HOST"),
            port: parse_var(&get, "DB_PORT")?,
            name: get("DB_NAME"),
            user: get("DB_USER"),
            password: lookup("DB_PASSWORD"),
            max_connections: parse_var(&get, "DB_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_MAX_CONNECTIONS),
            acquire_timeout: Duration::from_secs(
                parse_var(&get, "DB_ACQUIRE_TIMEOUT_SECS")?.unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            ),
        };

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: get("GATEWAY_HOST").unwrap_or(defaults.host),
            port: parse_var(&get, "GATEWAY_PORT")?.unwrap_or(defaults.port),
            max_body_bytes: parse_var(&get, "GATEWAY_MAX_BODY_BYTES")?.unwrap_or(defaults.max_body_bytes),
        };

        let mut tables: Vec<TableConfig> = DEFAULT_TABLES
            .iter()
            .map(|(name, id_column)| TableConfig::new(*name, *id_column))
            .collect();
        if let Some(extra) = get("GATEWAY_EXTRA_TABLES") {
            tables.extend(parse_table_list(&extra)?);
        }

        Ok(GatewayConfig {
            database,
            server,
            tables,
        })
    }
}

fn parse_var<T, G>(get: &G, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { var, value: raw }),
    }
}

/// Parse `name:id_column[:id_type]` entries separated by commas. Empty entries are skipped.
pub fn parse_table_list(raw: &str) -> Result<Vec<TableConfig>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = || ConfigError::InvalidTableEntry(entry.to_string());
            let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
            if parts.iter().any(|p| p.is_empty()) {
                return Err(invalid());
            }
            match parts.as_slice() {
                [name, id_column] => Ok(TableConfig::new(*name, *id_column)),
                [name, id_column, id_type] => Ok(TableConfig::new(*name, *id_column).with_id_type(*id_type)),
                _ => Err(invalid()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<GatewayConfig, ConfigError> {
        let env: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        GatewayConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server.address(), "127.0.0.1:8000");
        assert_eq!(config.server.max_body_bytes, 1024 * 1024);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(10));
        assert!(config.database.host.is_none());
        assert!(config.database.port.is_none());
        assert_eq!(config.tables.len(), DEFAULT_TABLES.len());
        assert_eq!(config.tables[0], TableConfig::new("users", "user_id"));
    }

    #[test]
    fn reads_database_vars() {
        let config = load(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_NAME", "marketplace"),
            ("DB_USER", "reader"),
            ("DB_PASSWORD", "s3cret"),
            ("DB_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(config.database.host.as_deref(), Some("db.internal"));
        assert_eq!(config.database.port, Some(6543));
        assert_eq!(config.database.name.as_deref(), Some("marketplace"));
        assert_eq!(config.database.user.as_deref(), Some("reader"));
        assert_eq!(config.database.password.as_deref(), Some("s3cret"));
        assert_eq!(config.database.max_connections, 12);
    }

    #[test]
    fn bad_port_names_the_variable() {
        let err = load(&[("DB_PORT", "five")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "DB_PORT", .. }));
        let err = load(&[("GATEWAY_PORT", "70000")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "GATEWAY_PORT", .. }));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[("DB_HOST", "  "), ("GATEWAY_PORT", "")]).unwrap();
        assert!(config.database.host.is_none());
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn extra_tables_are_appended() {
        let config = load(&[("GATEWAY_EXTRA_TABLES", "reviews:review_id, payouts : payout_id,")]).unwrap();
        let names: Vec<&str> = config.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), DEFAULT_TABLES.len() + 2);
        assert_eq!(&names[names.len() - 2..], &["reviews", "payouts"]);
        assert_eq!(config.tables.last().unwrap().id_column, "payout_id");
    }

    #[test]
    fn extra_table_may_name_the_id_type() {
        let tables = parse_table_list("reviews:review_id:uuid, payouts:payout_id").unwrap();
        assert_eq!(tables[0], TableConfig::new("reviews", "review_id").with_id_type("uuid"));
        assert_eq!(tables[1].id_type, None);
    }

    #[test]
    fn malformed_table_entry() {
        assert!(matches!(parse_table_list("reviews"), Err(ConfigError::InvalidTableEntry(_))));
        assert!(matches!(parse_table_list("reviews:"), Err(ConfigError::InvalidTableEntry(_))));
        assert!(matches!(parse_table_list("reviews:id:"), Err(ConfigError::InvalidTableEntry(_))));
        assert!(matches!(parse_table_list("reviews:id:int8:x"), Err(ConfigError::InvalidTableEntry(_))));
        assert!(parse_table_list(" , ").unwrap().is_empty());
    }
}
