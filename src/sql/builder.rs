//! Builds the fixed table SELECTs. Identifiers come from the registry, values are parameters.

use crate::config::{IdType, TableSpec};

/// Quote identifier for PostgreSQL (safe: only from config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryBuf {
    pub sql: String,
    /// Bound as text, in order, to `$1..$n`.
    pub params: Vec<String>,
    /// Whether the driver may cache the prepared statement on the connection.
    pub persistent: bool,
}

impl QueryBuf {
    fn new(sql: String) -> Self {
        QueryBuf {
            sql,
            params: Vec::new(),
            persistent: true,
        }
    }

    fn push_param(&mut self, v: impl Into<String>) -> u32 {
        self.params.push(v.into());
        self.params.len() as u32
    }

    /// Caller-supplied statement: executed verbatim, no parameters, never cached.
    pub fn adhoc(sql: impl Into<String>) -> Self {
        QueryBuf {
            sql: sql.into(),
            params: Vec::new(),
            persistent: false,
        }
    }
}

pub fn select_all(table: &TableSpec) -> QueryBuf {
    QueryBuf::new(format!("SELECT * FROM {}", quoted(&table.name)))
}

/// SQL type the bound id is cast to.
fn cast_target(id_type: &IdType) -> String {
    match id_type {
        IdType::Text => "text".into(),
        IdType::SmallInt => "int2".into(),
        IdType::Int => "int4".into(),
        IdType::BigInt => "int8".into(),
        IdType::Uuid => "uuid".into(),
        IdType::Other { schema: Some(schema), name } => format!("{}.{}", quoted(schema), quoted(name)),
        IdType::Other { schema: None, name } => quoted(name),
    }
}

/// The id column stays bare; the bound id is cast to the column type.
pub fn select_by_id(table: &TableSpec, id_type: &IdType, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new(String::new());
    let ph = q.push_param(id);
    q.sql = format!(
        "SELECT * FROM {} WHERE {} = ${}::{}",
        quoted(&table.name),
        quoted(&table.id_column),
        ph,
        cast_target(id_type)
    );
    q
}

/// Type of the table's id column, resolved through the search path like the table reads.
pub fn id_column_type(table: &TableSpec) -> QueryBuf {
    let mut q = QueryBuf::new(String::new());
    let rel = q.push_param(quoted(&table.name));
    let col = q.push_param(table.id_column.as_str());
    q.sql = format!(
        "SELECT n.nspname AS type_schema, t.typname AS type_name \
         FROM pg_catalog.pg_attribute a \
         JOIN pg_catalog.pg_type t ON t.oid = a.atttypid \
         JOIN pg_catalog.pg_namespace n ON n.oid = t.typnamespace \
         WHERE a.attrelid = to_regclass(${rel}::text) AND a.attname = ${col}::name AND NOT a.attisdropped"
    );
    q
}

/// Readiness probe.
pub fn ping() -> QueryBuf {
    QueryBuf::new("SELECT 1".into())
}
