pub mod engine;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod session;
pub mod statics;
pub mod store;
pub mod utils;
pub mod views;

use axum::{middleware, Router};

use crate::engine::QuizEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: QuizEngine,
    pub secure_cookies: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::pages::routes())
        .merge(handlers::rounds::routes())
        .merge(handlers::api::routes())
        .layer(middleware::from_fn(csrf_check))
        .nest("/static", statics::routes())
        .with_state(state)
}

/// State-changing requests must come from htmx or carry a JSON body type,
/// neither of which a cross-site form can produce.
async fn csrf_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{header::CONTENT_TYPE, Method, StatusCode};
    use axum::response::IntoResponse;

    let state_changing = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    if state_changing.contains(req.method()) {
        let headers = req.headers();
        let has_hx_request = headers
            .get("HX-Request")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true");
        let is_json = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        if !has_hx_request && !is_json {
            return (StatusCode::FORBIDDEN, "CSRF check failed").into_response();
        }
    }

    next.run(req).await
}
