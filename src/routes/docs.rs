//! GET /openapi.json, built once from the registry.

use crate::config::TableRegistry;
use crate::openapi;
use axum::{routing::get, Json, Router};
use std::sync::Arc;

pub fn docs_routes(tables: &TableRegistry) -> Router {
    let doc = Arc::new(openapi::build(tables));
    Router::new().route(
        "/openapi.json",
        get(move || {
            let doc = Arc::clone(&doc);
            async move { Json(doc.as_ref().clone()) }
        }),
    )
}
