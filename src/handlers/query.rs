//! Query handler: POST body `{"query": "..."}`.

use crate::error::AppError;
use crate::response::QueryResponse;
use crate::service::QueryService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct QueryRequest {
    /// SQL text; must start with SELECT.
    pub query: String,
}

pub async fn run_query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, AppError> {
    let Json(request) = payload.map_err(|e| match e {
        JsonRejection::BytesRejection(_) => AppError::Rejected(e.status(), e.body_text()),
        other => AppError::Unprocessable(other.body_text()),
    })?;
    let response = QueryService::run(state.source.as_ref(), &request.query).await?;
    Ok(Json(response))
}
