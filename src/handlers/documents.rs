use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{extractors::CurrentUser, models::DocumentListing, rejections::AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/documents/{collection_id}", get(documents))
}

async fn documents(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(collection_id): Path<String>,
) -> Result<Json<Vec<DocumentListing>>, AppError> {
    tracing::debug!("{user} lists collection {collection_id}");
    let listing = state.quizzes.collection(&collection_id).await?;
    Ok(Json(listing))
}
