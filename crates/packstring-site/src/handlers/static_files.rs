//! Embedded static assets

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Serve embedded style.css
pub async fn serve_css() -> Response {
    let css = include_str!("../static/css/style.css");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        css,
    )
        .into_response()
}

/// Serve embedded app.js
pub async fn serve_app_js() -> Response {
    let js = include_str!("../static/js/app.js");
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        js,
    )
        .into_response()
}

/// Serve robots.txt
pub async fn serve_robots() -> Response {
    let body = include_str!("../static/robots.txt");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}
