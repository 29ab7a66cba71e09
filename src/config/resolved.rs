//! Resolved table registry: config validated and indexed for runtime lookup.

use crate::config::{validate_tables, TableConfig};
use crate::error::ConfigError;
use std::collections::HashMap;
use std::sync::OnceLock;

/// How a path id is parsed and cast before it is compared with the id column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdType {
    Text,
    SmallInt,
    Int,
    BigInt,
    Uuid,
    /// Any other type: the id is sent as text and cast by Postgres.
    Other { schema: Option<String>, name: String },
}

impl IdType {
    /// Map a Postgres type name (`uuid`, `int4`, `bigint`, ...) to an id type.
    pub fn from_type_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "text" | "varchar" => IdType::Text,
            "int2" | "smallint" => IdType::SmallInt,
            "int4" | "int" | "integer" => IdType::Int,
            "int8" | "bigint" => IdType::BigInt,
            "uuid" => IdType::Uuid,
            _ => IdType::Other {
                schema: None,
                name: name.to_string(),
            },
        }
    }

    /// Type as found in `pg_type`. Only built-in types get the typed parse.
    pub fn from_catalog(schema: &str, name: &str) -> Self {
        match (schema, IdType::from_type_name(name)) {
            ("pg_catalog", IdType::Other { name, .. }) => IdType::Other {
                schema: Some(schema.to_string()),
                name,
            },
            ("pg_catalog", builtin) => builtin,
            _ => IdType::Other {
                schema: Some(schema.to_string()),
                name: name.to_string(),
            },
        }
    }

    /// Canonical text of `id` for this type, or `None` when no row could have it.
    pub fn parse_id(&self, id: &str) -> Option<String> {
        match self {
            IdType::Uuid => uuid::Uuid::parse_str(id).ok().map(|u| u.to_string()),
            IdType::SmallInt => id.parse::<i16>().ok().map(|n| n.to_string()),
            IdType::Int => id.parse::<i32>().ok().map(|n| n.to_string()),
            IdType::BigInt => id.parse::<i64>().ok().map(|n| n.to_string()),
            IdType::Text | IdType::Other { .. } => Some(id.to_string()),
        }
    }
}

/// One servable table. Both identifiers are validated, never taken from a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub id_column: String,
    /// Set from config, or on the first by-id read from the catalog.
    pub id_type: OnceLock<IdType>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, id_column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_column: id_column.into(),
            id_type: OnceLock::new(),
        }
    }

    pub fn with_id_type(self, id_type: IdType) -> Self {
        let _ = self.id_type.set(id_type);
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct TableRegistry {
    pub tables: Vec<TableSpec>,
    by_name: HashMap<String, usize>,
}

impl TableRegistry {
    pub fn resolve(tables: &[TableConfig]) -> Result<Self, ConfigError> {
        validate_tables(tables)?;
        let tables: Vec<TableSpec> = tables
            .iter()
            .map(|t| {
                let spec = TableSpec::new(t.name.clone(), t.id_column.clone());
                match &t.id_type {
                    Some(name) => spec.with_id_type(IdType::from_type_name(name)),
                    None => spec,
                }
            })
            .collect();
        let by_name = tables.iter().enumerate().map(|(i, t)| (t.name.clone(), i)).collect();
        Ok(Self { tables, by_name })
    }

    pub fn get(&self, name: &str) -> Option<&TableSpec> {
        self.by_name.get(name).map(|&i| &self.tables[i])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
