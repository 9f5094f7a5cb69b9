pub mod config;
pub mod routes;
mod views;

#[cfg(test)]
mod test_helpers;

use std::sync::Arc;

use anyhow::Result;
use pastel_db::Database;
use tokio::net::TcpListener;

use routes::InnerAppState;

pub async fn serve(listener: TcpListener, db: Arc<dyn Database>) -> Result<()> {
    let state = Arc::new(InnerAppState { db });
    let app = routes::build_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}
