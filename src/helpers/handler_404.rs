use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::debug;

pub async fn page_not_found_handler(uri: axum::http::Uri) -> impl IntoResponse {
    debug!("No route for {}", uri);
    (StatusCode::IM_A_TEAPOT, "Oops looks like you landed at the wrong endpoint, teapot")
}
