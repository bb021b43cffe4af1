pub mod cache;
pub mod db;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod services;
pub mod sheets;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{
    cache::MemoryCache,
    db::Db,
    services::{PollService, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quizzes: QuizService,
    pub polls: PollService,
    /// Request header carrying the authenticated user's email address.
    pub user_header: String,
}

impl AppState {
    pub fn new(db: Db, user_header: impl Into<String>) -> Self {
        Self {
            quizzes: QuizService::new(db.clone()),
            polls: PollService::new(db, MemoryCache::new()),
            user_header: user_header.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(handlers::documents::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::poll::routes());

    Router::new()
        .nest(names::API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
