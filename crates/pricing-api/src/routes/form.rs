//! Form Page

use axum::response::Html;

/// Single-form page; pickers and bounds are loaded from `/api/v1/options`
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
