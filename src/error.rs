use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed request failed: HTTP {0}")]
    FeedStatus(reqwest::StatusCode),

    #[error("Feed parsing failed: {0}")]
    FeedParse(#[from] feed_rs::parser::ParseFeedError),

    #[error("Feed entry {entry} is missing <{element}>")]
    MissingElement { entry: usize, element: &'static str },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Http(_) | AppError::FeedStatus(_) => {
                tracing::warn!(error = %self, "Feed fetch failed");
                (StatusCode::BAD_GATEWAY, "FEED_UNAVAILABLE", self.to_string())
            }
            AppError::FeedParse(_) | AppError::MissingElement { .. } => {
                tracing::warn!(error = %self, "Feed ingestion failed");
                (StatusCode::BAD_GATEWAY, "FEED_MALFORMED", self.to_string())
            }
            _ => {
                tracing::error!(error = %self, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
