use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::app::ListingQuery;
use crate::error::{AppError, Result};
use crate::models::{BookmarkFilter, NewBookmark, NewFeedback};

use super::state::AppState;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ListingParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    pub paper_id: Option<String>,
    pub user_name: Option<String>,
    #[serde(alias = "comment")]
    pub comment_text: Option<String>,
    pub rating: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookmarkForm {
    pub user_name: Option<String>,
    pub paper_id: Option<String>,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /papers?search=&category=&page=
pub async fn list_papers(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<impl IntoResponse> {
    let query = ListingQuery {
        search: params.search,
        category: params.category,
        page: parse_page(params.page.as_deref())?,
    };
    let page = state.app.dashboard(&query).await?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /papers
///
/// Stores feedback when paper_id, user_name and comment are all present,
/// then redirects back to the listing either way.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Form(form): Form<FeedbackForm>,
) -> Result<Redirect> {
    let (Some(paper_id), Some(user_name), Some(comment_text)) = (
        non_empty(form.paper_id),
        non_empty(form.user_name),
        non_empty(form.comment_text),
    ) else {
        tracing::debug!("Incomplete feedback form, nothing stored");
        return Ok(Redirect::to("/papers"));
    };
    let rating = parse_rating(form.rating.as_deref())?;

    let feedback = NewFeedback {
        paper_id,
        user_name: Some(user_name),
        comment_text: Some(comment_text),
        rating,
    };
    match state.app.submit_feedback(feedback).await {
        Ok(_) => {}
        Err(err) if err.is_validation() => return Err(err),
        Err(err) => tracing::warn!(error = %err, "Feedback write failed"),
    }

    Ok(Redirect::to("/papers"))
}

/// GET /feedback
pub async fn list_feedback(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let grouped = state.app.feedback_by_paper().await?;
    Ok(Json(DataResponse { data: grouped }))
}

/// POST /bookmarks
pub async fn add_bookmark(
    State(state): State<AppState>,
    Form(form): Form<BookmarkForm>,
) -> Result<Redirect> {
    let bookmark = NewBookmark {
        user_name: non_empty(form.user_name),
        paper_id: form.paper_id.unwrap_or_default(),
    };
    match state.app.bookmark(bookmark).await {
        Ok(_) => {}
        Err(err) if err.is_validation() => return Err(err),
        Err(err) => tracing::warn!(error = %err, "Bookmark write failed"),
    }

    Ok(Redirect::to("/bookmarks"))
}

/// GET /bookmarks?user_name=&paper_id=
pub async fn list_bookmarks(
    State(state): State<AppState>,
    Query(filter): Query<BookmarkFilter>,
) -> Result<impl IntoResponse> {
    let filter = BookmarkFilter {
        user_name: non_empty(filter.user_name),
        paper_id: non_empty(filter.paper_id),
    };
    let bookmarks = state.app.bookmarks(filter).await?;
    Ok(Json(DataResponse { data: bookmarks }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_page(raw: Option<&str>) -> Result<usize> {
    match raw.map(str::trim) {
        None | Some("") => Ok(1),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Validation(format!("page must be a positive integer, got {raw:?}"))),
    }
}

fn parse_rating(raw: Option<&str>) -> Result<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("rating must be a number, got {raw:?}"))),
    }
}
