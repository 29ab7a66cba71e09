//! Shared test helpers: an in-memory row source and request plumbing.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use select_gateway::config::{ServerConfig, TableSpec};
use select_gateway::sql::{id_column_type, select_all, select_by_id, QueryBuf};
use select_gateway::{gateway_routes, AppState, IdType, Row, RowSource, TableConfig, TableRegistry};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

struct Canned {
    id_column: Option<String>,
    rows: Vec<Row>,
}

/// Answers by exact SQL text. By-id statements filter the canned rows on the id column.
/// Catalog lookups answer with the id type each table was registered with.
#[derive(Default)]
pub struct StubSource {
    canned: HashMap<String, Canned>,
    /// Quoted table name → Postgres type name of its id column.
    id_types: HashMap<String, String>,
    errors: HashMap<String, String>,
    down: bool,
    log: Arc<Mutex<Vec<QueryBuf>>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every statement fails as if the pool could not reach the database.
    pub fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    /// Table whose id column is `text`.
    pub fn with_table(self, name: &str, id_column: &str, rows: Vec<Value>) -> Self {
        self.with_typed_table(name, id_column, "text", rows)
    }

    /// Table whose id column has the built-in type `id_type` (`uuid`, `int4`, ...).
    pub fn with_typed_table(mut self, name: &str, id_column: &str, id_type: &str, rows: Vec<Value>) -> Self {
        let spec = TableSpec::new(name, id_column);
        let lookup = id_column_type(&spec);
        self.id_types.insert(lookup.params[0].clone(), id_type.into());
        let id_type = IdType::from_catalog("pg_catalog", id_type);
        let rows: Vec<Row> = rows.into_iter().map(into_row).collect();
        self.canned.insert(
            select_all(&spec).sql,
            Canned {
                id_column: None,
                rows: rows.clone(),
            },
        );
        self.canned.insert(
            select_by_id(&spec, &id_type, "").sql,
            Canned {
                id_column: Some(id_column.into()),
                rows,
            },
        );
        self
    }

    pub fn with_rows(mut self, sql: &str, rows: Vec<Value>) -> Self {
        self.canned.insert(
            sql.into(),
            Canned {
                id_column: None,
                rows: rows.into_iter().map(into_row).collect(),
            },
        );
        self
    }

    pub fn with_error(mut self, sql: &str, message: &str) -> Self {
        self.errors.insert(sql.into(), message.into());
        self
    }

    pub fn log(&self) -> Arc<Mutex<Vec<QueryBuf>>> {
        Arc::clone(&self.log)
    }

    fn answer(&self, q: &QueryBuf) -> Result<Vec<Row>, sqlx::Error> {
        self.log.lock().unwrap().push(q.clone());
        if self.down {
            return Err(sqlx::Error::PoolTimedOut);
        }
        if let Some(message) = self.errors.get(&q.sql) {
            return Err(sqlx::Error::Protocol(message.clone()));
        }
        if q.sql == catalog_sql() {
            return Ok(self
                .id_types
                .get(&q.params[0])
                .map(|name| into_row(json!({"type_schema": "pg_catalog", "type_name": name})))
                .into_iter()
                .collect());
        }
        let Some(canned) = self.canned.get(&q.sql) else {
            return Ok(Vec::new());
        };
        Ok(match (&canned.id_column, q.params.first()) {
            (Some(col), Some(id)) => canned
                .rows
                .iter()
                .filter(|row| row.get(col).map(as_text).as_deref() == Some(id.as_str()))
                .cloned()
                .collect(),
            _ => canned.rows.clone(),
        })
    }
}

fn catalog_sql() -> String {
    id_column_type(&TableSpec::new("", "")).sql
}

/// Statements in `log` that were not catalog lookups.
pub fn data_queries(log: &[QueryBuf]) -> Vec<QueryBuf> {
    log.iter().filter(|q| q.sql != catalog_sql()).cloned().collect()
}

fn as_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn into_row(v: Value) -> Row {
    match v {
        Value::Object(map) => map,
        other => panic!("row must be an object, got {other}"),
    }
}

#[async_trait]
impl RowSource for StubSource {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Row>, sqlx::Error> {
        self.answer(q)
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Row>, sqlx::Error> {
        Ok(self.answer(q)?.into_iter().next())
    }
}

pub fn default_registry() -> TableRegistry {
    let tables: Vec<TableConfig> = select_gateway::config::DEFAULT_TABLES
        .iter()
        .map(|(name, id)| TableConfig::new(*name, *id))
        .collect();
    TableRegistry::resolve(&tables).expect("default registry")
}

pub fn app(source: impl RowSource + 'static) -> Router {
    app_with(source, default_registry())
}

pub fn app_with(source: impl RowSource + 'static, tables: TableRegistry) -> Router {
    app_with_server(source, tables, &ServerConfig::default())
}

pub fn app_with_server(source: impl RowSource + 'static, tables: TableRegistry, server: &ServerConfig) -> Router {
    gateway_routes(AppState::new(source, tables), server)
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

pub async fn post_query(app: &Router, query: &str) -> (StatusCode, Value) {
    let body = serde_json::json!({ "query": query }).to_string();
    let req = Request::builder()
        .method("POST")
        .uri("/query")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}
