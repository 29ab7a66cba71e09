//! Table registry validation: identifiers, duplicates, route collisions.

use crate::config::TableConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// First path segments owned by built-in routes.
pub const RESERVED_SEGMENTS: &[&str] = &["query", "health", "ready", "version", "openapi.json"];

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"))
}

pub fn is_identifier(s: &str) -> bool {
    identifier_re().is_match(s)
}

pub fn validate_tables(tables: &[TableConfig]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for t in tables {
        for ident in [&t.name, &t.id_column].into_iter().chain(&t.id_type) {
            if !is_identifier(ident) {
                return Err(ConfigError::InvalidIdentifier(ident.clone()));
            }
        }
        if RESERVED_SEGMENTS.contains(&t.name.as_str()) {
            return Err(ConfigError::ReservedName(t.name.clone()));
        }
        if !seen.insert(t.name.as_str()) {
            return Err(ConfigError::DuplicateTable(t.name.clone()));
        }
    }
    Ok(())
}
