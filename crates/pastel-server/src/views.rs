use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use pastel_core::memo::Memo;
use tracing::error;

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormView<'a> {
    pub error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "memo.html")]
pub struct MemoView<'a> {
    pub access_key: &'a str,
    pub body: &'a str,
    pub created_at: String,
}

impl<'a> From<&'a Memo> for MemoView<'a> {
    fn from(memo: &'a Memo) -> Self {
        Self {
            access_key: &memo.access_key,
            body: &memo.body,
            created_at: memo.created_at_display(),
        }
    }
}

/// Render a view into a `200 OK` HTML response.
pub fn render<T: Template>(view: &T) -> Response {
    match view.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("template render failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
