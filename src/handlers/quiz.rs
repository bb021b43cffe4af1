use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::{
    extractors::CurrentUser,
    models::{LeaderboardEntry, Quiz, QuizSubmission},
    names,
    rejections::AppError,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quiz/submit", post(submit))
        .route("/quiz/leaderboard/{document_id}/{sheet_id}", get(leaderboard))
        .route("/quiz/{document_id}", get(quiz))
}

async fn quiz(
    CurrentUser(_): CurrentUser,
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<Quiz>, AppError> {
    let quiz = state.quizzes.quiz(&document_id).await?;
    Ok(Json(quiz))
}

async fn leaderboard(
    CurrentUser(_): CurrentUser,
    State(state): State<AppState>,
    Path((document_id, sheet_id)): Path<(String, String)>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let entries = state.quizzes.leaderboard(&document_id, &sheet_id).await?;
    Ok(Json(entries))
}

async fn submit(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(submission): Json<QuizSubmission>,
) -> Result<&'static str, AppError> {
    state.quizzes.submit(&user, &submission).await?;
    Ok(names::OK_RESPONSE)
}
