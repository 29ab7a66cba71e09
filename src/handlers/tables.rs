//! Table handlers: list and read by id. The table is resolved from the path segment.

use crate::config::TableSpec;
use crate::error::AppError;
use crate::row::Row;
use crate::service::TableService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// Unregistered tables look like any other unknown route.
fn table_for<'a>(state: &'a AppState, name: &str) -> Result<&'a TableSpec, AppError> {
    state.tables.get(name).ok_or_else(|| AppError::NotFound("Not Found".into()))
}

pub async fn list(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Json<Vec<Row>>, AppError> {
    let table = table_for(&state, &table)?;
    let rows = TableService::list(state.source.as_ref(), table).await?;
    Ok(Json(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> Result<Json<Row>, AppError> {
    let table = table_for(&state, &table)?;
    let row = TableService::read(state.source.as_ref(), table, &id).await?;
    Ok(Json(row))
}
