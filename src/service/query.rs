//! Prefix-gated pass-through of caller SQL.

use crate::error::{backend_message, AppError};
use crate::response::QueryResponse;
use crate::sql::{admit_select, QueryBuf};
use crate::store::RowSource;

pub const SELECT_ONLY: &str = "Only SELECT queries are allowed.";

pub struct QueryService;

impl QueryService {
    /// Rejects non-SELECT text; database failures are folded into the envelope, not raised.
    pub async fn run(source: &dyn RowSource, query: &str) -> Result<QueryResponse, AppError> {
        let sql = admit_select(query).ok_or_else(|| AppError::BadRequest(SELECT_ONLY.into()))?;
        match source.fetch_all(&QueryBuf::adhoc(sql)).await {
            Ok(rows) => Ok(QueryResponse::success(rows)),
            Err(e) => {
                tracing::warn!(error = %e, "query failed");
                Ok(QueryResponse::failure(backend_message(&e)))
            }
        }
    }
}
