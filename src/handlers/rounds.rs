use std::collections::HashMap;

use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::{
    engine::{RoundKind, RoundOutcome, RoundStart},
    extractors::{IsHtmx, SessionToken},
    names,
    rejections::AppError,
    views,
    views::quiz as quiz_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::QUIZ_URL, get(quiz_page).post(quiz_submit))
        .route("/chapter/{name}", get(chapter_page).post(chapter_submit))
        .route(names::WRONG_QUIZ_URL, get(wrong_quiz_page).post(wrong_quiz_submit))
        .route(
            names::LAST_WRONG_QUIZ_URL,
            get(last_wrong_page).post(last_wrong_submit),
        )
}

async fn quiz_page(
    State(state): State<AppState>,
    session: SessionToken,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Response, AppError> {
    start(&state, session, is_htmx, RoundKind::Random10).await
}

async fn quiz_submit(
    State(state): State<AppState>,
    session: SessionToken,
    Form(answers): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    submit(&state, session, RoundKind::Random10, answers).await
}

async fn chapter_page(
    State(state): State<AppState>,
    session: SessionToken,
    IsHtmx(is_htmx): IsHtmx,
    Path(chapter): Path<String>,
) -> Result<Response, AppError> {
    start(&state, session, is_htmx, RoundKind::ByChapter(chapter)).await
}

async fn chapter_submit(
    State(state): State<AppState>,
    session: SessionToken,
    Path(chapter): Path<String>,
    Form(answers): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    submit(&state, session, RoundKind::ByChapter(chapter), answers).await
}

async fn wrong_quiz_page(
    State(state): State<AppState>,
    session: SessionToken,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Response, AppError> {
    start(&state, session, is_htmx, RoundKind::AllWrong).await
}

async fn wrong_quiz_submit(
    State(state): State<AppState>,
    session: SessionToken,
    Form(answers): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    submit(&state, session, RoundKind::AllWrong, answers).await
}

async fn last_wrong_page(
    State(state): State<AppState>,
    session: SessionToken,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Response, AppError> {
    start(&state, session, is_htmx, RoundKind::LastWrong).await
}

async fn last_wrong_submit(
    State(state): State<AppState>,
    session: SessionToken,
    Form(answers): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    submit(&state, session, RoundKind::LastWrong, answers).await
}

async fn start(
    state: &AppState,
    session: SessionToken,
    is_htmx: bool,
    kind: RoundKind,
) -> Result<Response, AppError> {
    if session.is_new {
        tracing::debug!("issuing new review session {}", session.token);
    }

    let body = match state.engine.start(&session.token, &kind).await? {
        RoundStart::Pinned(questions) => quiz_views::round(&kind, &questions),
        RoundStart::NoQuestions => quiz_views::no_questions(&kind),
    };

    let headers = session.headers(state.secure_cookies)?;
    Ok((headers, views::render(is_htmx, &kind.label(), body)).into_response())
}

async fn submit(
    state: &AppState,
    session: SessionToken,
    kind: RoundKind,
    answers: HashMap<String, String>,
) -> Result<Response, AppError> {
    let body = match state.engine.grade(&session.token, &kind, &answers).await? {
        RoundOutcome::Graded(report) => quiz_views::result(&report),
        RoundOutcome::NoQuestions => quiz_views::no_questions(&kind),
    };

    let headers = session.headers(state.secure_cookies)?;
    Ok((headers, views::titled(&kind.label(), body)).into_response())
}
