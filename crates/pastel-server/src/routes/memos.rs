use axum::{
    extract::{
        rejection::FormRejection, DefaultBodyLimit, FromRequest, Multipart, Path, Request, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::Utc;
use pastel_core::memo::CreateMemo;
use pastel_db::DbError;
use serde::Deserialize;
use tracing::{error, info, warn};

use super::{not_found, AppState};
use crate::views::{self, FormView, MemoView};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(form))
        .route(
            "/create",
            post(create_memo)
                .fallback(|| async { method_not_allowed("POST") })
                .layer(DefaultBodyLimit::max(MAX_FORM_BYTES)),
        )
        .route(
            "/memos/{key}",
            get(show_memo)
                .delete(delete_memo)
                .fallback(|| async { method_not_allowed("GET, DELETE") }),
        )
}

/// Upper bound on a create request, urlencoded or multipart.
pub const MAX_FORM_BYTES: usize = 10 << 20;

#[derive(Debug, Deserialize)]
pub struct CreateMemoForm {
    #[serde(default)]
    pub body: String,
}

async fn form() -> Response {
    views::render(&FormView { error: None })
}

/// Pull the `body` field out of an urlencoded or multipart form.
///
/// A request without a form content type reads as a missing field; any other
/// parse failure answers with the rejection's own status.
async fn read_body_field(request: Request) -> Result<String, Response> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoResponse::into_response)?
        {
            if field.name() == Some("body") {
                return field.text().await.map_err(IntoResponse::into_response);
            }
        }
        return Ok(String::new());
    }

    match Form::<CreateMemoForm>::from_request(request, &()).await {
        Ok(Form(form)) => Ok(form.body),
        Err(FormRejection::InvalidFormContentType(_)) => Ok(String::new()),
        Err(e) => {
            warn!("unreadable create form: {e}");
            Err(e.into_response())
        }
    }
}

async fn create_memo(State(state): State<AppState>, request: Request) -> Response {
    let body = match read_body_field(request).await {
        Ok(body) => body,
        Err(resp) => return resp,
    };
    let input = match CreateMemo::new(body, Utc::now()) {
        Ok(input) => input,
        Err(e) => return (StatusCode::BAD_REQUEST, format!("{e}\n")).into_response(),
    };

    match state.db.insert_memo(&input).await {
        Ok(memo) => {
            info!(access_key = %memo.access_key, "created memo");
            found(&format!("/memos/{}", memo.access_key))
        }
        Err(e) => {
            warn!("failed to create memo: {e}");
            let message = e.to_string();
            views::render(&FormView {
                error: Some(&message),
            })
        }
    }
}

async fn show_memo(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    match state.db.find_memo_by_key(&key).await {
        Ok(memo) => views::render(&MemoView::from(&memo)),
        Err(DbError::NotFound(_)) => not_found(),
        Err(e) => internal_error(e),
    }
}

async fn delete_memo(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    match state.db.delete_memo_by_key(&key).await {
        Ok(()) => {
            info!(access_key = %key, "deleted memo");
            found("/")
        }
        Err(DbError::NotFound(_)) => not_found(),
        Err(e) => internal_error(e),
    }
}

/// `302 Found` to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn method_not_allowed(allow: &'static str) -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, allow)]).into_response()
}

fn internal_error(e: DbError) -> Response {
    error!("storage failure: {e}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error\n").into_response()
}
