use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::{
    models::Question,
    rejections::{ApiError, ApiMessage, AppError},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/questions", get(questions))
        .route("/api/chapters", get(chapters))
        .route("/api/random/{count}", get(random))
        .route("/api/search/{keyword}", get(search))
        .route("/api/wrong_questions", get(wrong_questions))
        .route("/api/add_wrong/{id}", post(add_wrong))
        .route("/api/remove_wrong/{id}", post(remove_wrong))
}

async fn questions(State(state): State<AppState>) -> Result<Json<Vec<Question>>, ApiError> {
    Ok(Json(state.engine.questions().all().await?))
}

async fn chapters(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.engine.questions().chapters().await?))
}

async fn random(
    State(state): State<AppState>,
    Path(count): Path<i64>,
) -> Result<Json<Vec<Question>>, ApiError> {
    if count <= 0 {
        return Err(AppError::Input(format!("count must be positive, got {count}")).into());
    }
    Ok(Json(state.engine.questions().sample(count).await?))
}

async fn search(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<Vec<Question>>, ApiError> {
    Ok(Json(state.engine.questions().search(&keyword).await?))
}

async fn wrong_questions(State(state): State<AppState>) -> Result<Json<Vec<Question>>, ApiError> {
    Ok(Json(state.engine.wrong_book().load_all().await?))
}

async fn add_wrong(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiMessage>, ApiError> {
    let question = state.engine.questions().by_id(id).await?;
    let success = state.engine.wrong_book().add_if_absent(question).await?;
    tracing::info!("api add_wrong {id}: inserted={success}");

    Ok(Json(ApiMessage {
        success,
        message: if success {
            "added to the wrong book".to_string()
        } else {
            "question is already in the wrong book".to_string()
        },
    }))
}

async fn remove_wrong(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiMessage>, ApiError> {
    let removed = state.engine.wrong_book().remove_by_id(id).await?;
    tracing::info!("api remove_wrong {id}: removed {removed} entries");

    Ok(Json(ApiMessage {
        success: true,
        message: "removed from the wrong book".to_string(),
    }))
}
