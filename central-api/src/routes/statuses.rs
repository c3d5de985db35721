use axum::{routing::get, Json, Router};

use crate::{
    app_state::AppState,
    domain::models::{status_vocabulary, StatusCycle, StatusVocabularyEntry},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_statuses))
}

/// Canonical status values with their labels and cycle positions.
pub async fn list_statuses() -> Json<Vec<StatusVocabularyEntry>> {
    Json(status_vocabulary(&StatusCycle::default()))
}
