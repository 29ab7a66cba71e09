//! Fixed table reads: list all rows, fetch one by id.

use crate::config::{IdType, TableSpec};
use crate::error::AppError;
use crate::row::Row;
use crate::sql::{id_column_type, select_all, select_by_id};
use crate::store::RowSource;
use serde_json::Value;

/// SQLSTATEs Postgres raises when the id text cannot become the column type.
const REJECTED_LITERAL: &[&str] = &["22P02", "22003", "22007", "22008"];

pub struct TableService;

impl TableService {
    /// Every row of the table. An empty table is an empty vec, not an error.
    pub async fn list(source: &dyn RowSource, table: &TableSpec) -> Result<Vec<Row>, AppError> {
        let q = select_all(table);
        Ok(source.fetch_all(&q).await?)
    }

    /// First row whose id column equals `id`, compared in the column's own type.
    /// An id that cannot be read as that type matches nothing.
    pub async fn read(source: &dyn RowSource, table: &TableSpec, id: &str) -> Result<Row, AppError> {
        let not_found = || AppError::NotFound(format!("{} not found", table.name));
        let id_type = Self::id_type(source, table).await?;
        let Some(id) = id_type.parse_id(id) else {
            return Err(not_found());
        };
        let q = select_by_id(table, &id_type, &id);
        match source.fetch_optional(&q).await {
            Ok(Some(row)) => Ok(row),
            Ok(None) => Err(not_found()),
            Err(sqlx::Error::Database(db)) if is_rejected_literal(db.code().as_deref()) => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }

    /// Configured type, else the catalog's answer (kept for later reads). Unknown columns compare as text.
    async fn id_type(source: &dyn RowSource, table: &TableSpec) -> Result<IdType, AppError> {
        if let Some(known) = table.id_type.get() {
            return Ok(known.clone());
        }
        let found = source
            .fetch_optional(&id_column_type(table))
            .await?
            .and_then(|row| {
                let schema = row.get("type_schema").and_then(Value::as_str)?;
                let name = row.get("type_name").and_then(Value::as_str)?;
                Some(IdType::from_catalog(schema, name))
            });
        match found {
            Some(id_type) => {
                tracing::debug!(table = %table.name, id_type = ?id_type, "resolved id column type");
                Ok(table.id_type.get_or_init(|| id_type).clone())
            }
            None => {
                tracing::debug!(table = %table.name, column = %table.id_column, "id column not in catalog");
                Ok(IdType::Text)
            }
        }
    }
}

fn is_rejected_literal(code: Option<&str>) -> bool {
    code.is_some_and(|c| REJECTED_LITERAL.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_literal_codes() {
        assert!(is_rejected_literal(Some("22P02")));
        assert!(is_rejected_literal(Some("22003")));
        assert!(!is_rejected_literal(Some("42P01")));
        assert!(!is_rejected_literal(None));
    }
}
