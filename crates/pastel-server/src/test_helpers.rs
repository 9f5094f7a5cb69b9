use std::sync::Arc;

use axum::Router;
use pastel_db::{Database, SqliteDatabase};

use crate::routes::{build_router, InnerAppState};

/// Build a test router over an in-memory SQLite database.
pub fn test_router() -> Router {
    router_with(Arc::new(SqliteDatabase::open_in_memory().unwrap()))
}

/// Build a router over an arbitrary backend.
pub fn router_with(db: Arc<dyn Database>) -> Router {
    build_router(Arc::new(InnerAppState { db }))
}
