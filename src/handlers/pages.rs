use axum::{
    extract::{Form, State},
    routing::get,
    Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    extractors::IsHtmx,
    names,
    rejections::AppError,
    views,
    views::pages as page_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::INDEX_URL, get(index))
        .route(names::CHAPTERS_URL, get(chapters))
        .route(names::SEARCH_URL, get(search_page).post(search_submit))
        .route(names::WRONG_QUESTIONS_URL, get(wrong_questions))
}

#[derive(Deserialize)]
struct SearchForm {
    #[serde(default)]
    keyword: String,
}

async fn index(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Markup, AppError> {
    let question_count = state.engine.questions().all().await?.len();
    let wrong_count = state.engine.wrong_book().load_all().await?.len();
    Ok(views::render(
        is_htmx,
        "Home",
        page_views::index(question_count, wrong_count),
    ))
}

async fn chapters(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Markup, AppError> {
    let chapters = state.engine.questions().chapters().await?;
    Ok(views::render(is_htmx, "Chapters", page_views::chapters(&chapters)))
}

async fn search_page(IsHtmx(is_htmx): IsHtmx) -> Markup {
    views::render(is_htmx, "Search", page_views::search("", None))
}

async fn search_submit(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Form(form): Form<SearchForm>,
) -> Result<Markup, AppError> {
    let keyword = form.keyword.trim();
    let results = state.engine.questions().search(keyword).await?;
    tracing::debug!("search {keyword:?}: {} result(s)", results.len());
    Ok(views::render(
        is_htmx,
        "Search",
        page_views::search(keyword, Some(&results)),
    ))
}

async fn wrong_questions(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Markup, AppError> {
    let entries = state.engine.wrong_book().load_all().await?;
    Ok(views::render(
        is_htmx,
        "Wrong book",
        page_views::wrong_questions(&entries),
    ))
}
