use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::{
    extractors::{CurrentUser, UserAgent},
    models::PollSubmission,
    names,
    rejections::AppError,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/poll/submit", post(submit))
        .route("/poll/status/invalidate/{document_id}", get(invalidate_status))
        .route("/poll/status/{document_id}/{sheet_id}", get(status))
        .route("/poll/{document_id}", get(poll))
}

/// Responds with an already serialized JSON payload.
fn json(payload: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], payload)
}

async fn poll(
    CurrentUser(_): CurrentUser,
    UserAgent(user_agent): UserAgent,
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let payload = state.polls.poll(&document_id, &user_agent).await?;
    Ok(json(payload))
}

async fn status(
    CurrentUser(_): CurrentUser,
    State(state): State<AppState>,
    Path((document_id, sheet_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let payload = state.polls.status(&document_id, &sheet_id).await?;
    Ok(json(payload))
}

async fn invalidate_status(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> &'static str {
    state.polls.invalidate_status(&document_id);
    names::OK_RESPONSE
}

async fn submit(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(submission): Json<PollSubmission>,
) -> Result<&'static str, AppError> {
    state.polls.submit(&user, &submission).await?;
    Ok(names::OK_RESPONSE)
}
