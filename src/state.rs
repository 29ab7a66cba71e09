//! Shared application state for all routes. Immutable after start-up.

use crate::config::TableRegistry;
use crate::store::RowSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RowSource>,
    pub tables: Arc<TableRegistry>,
}

impl AppState {
    pub fn new(source: impl RowSource + 'static, tables: TableRegistry) -> Self {
        Self {
            source: Arc::new(source),
            tables: Arc::new(tables),
        }
    }
}
