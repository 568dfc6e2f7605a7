use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use maud::{html, Markup};
use serde::Serialize;

use crate::{error::QuizError, views};

#[derive(Debug)]
pub enum AppError {
    Internal(&'static str),
    Input(String),
    NotFound(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Internal(message) => *message,
            AppError::Input(message) | AppError::NotFound(message) => message.as_str(),
        }
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::NotFound(_) => AppError::NotFound(err.to_string()),
            QuizError::InvalidArgument(_) => AppError::Input(err.to_string()),
            QuizError::Io { .. } | QuizError::Json { .. } => {
                tracing::error!("{err}");
                AppError::Internal("could not access the question data")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), error_page(self.message())).into_response()
    }
}

/// The same errors rendered as `{success: false, message}` for `/api` routes.
#[derive(Debug)]
pub struct ApiError(pub AppError);

#[derive(Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiMessage {
            success: false,
            message: self.0.message().to_string(),
        };
        (self.0.status(), Json(body)).into_response()
    }
}

pub trait ResultExt<T> {
    /// Logs the error and turns it into an internal error.
    fn reject(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Internal(message)
        })
    }
}

fn error_page(message: &str) -> Markup {
    views::page(
        "Error",
        html! {
            h1 { (message) }
            p { a href="/" { "Back to the start page" } }
        },
    )
}
