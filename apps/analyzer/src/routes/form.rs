use axum::response::Html;

const FORM_PAGE: &str = include_str!("../../static/index.html");

/// GET /
/// Serves the browser form that posts to `/analyze-resume`.
pub async fn form_handler() -> Html<&'static str> {
    Html(FORM_PAGE)
}
