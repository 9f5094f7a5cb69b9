//! Static assets compiled into the binary and served under `/static/`.

use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::{not_found, AppState};

struct Asset {
    name: &'static str,
    content_type: &'static str,
    body: &'static str,
}

const ASSETS: &[Asset] = &[
    Asset {
        name: "pastel.css",
        content_type: "text/css; charset=utf-8",
        body: include_str!("../../static/pastel.css"),
    },
    Asset {
        name: "pastel.js",
        content_type: "text/javascript; charset=utf-8",
        body: include_str!("../../static/pastel.js"),
    },
];

pub fn routes() -> Router<AppState> {
    Router::new().route("/static/{*path}", get(static_asset))
}

async fn static_asset(Path(path): Path<String>) -> Response {
    match ASSETS.iter().find(|a| a.name == path) {
        Some(asset) => ([(header::CONTENT_TYPE, asset.content_type)], asset.body).into_response(),
        None => not_found(),
    }
}
