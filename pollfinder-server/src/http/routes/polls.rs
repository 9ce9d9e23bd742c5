//! Poll listing endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use pollfinder_core::{PollQuery, PollResponse};

use crate::http::error::ApiError;
use crate::http::extractors::ValidQuery;
use crate::http::server::AppState;

/// GET /api/polls?date=YYYY-MM-DD&collection=NAME
///
/// Review-worthy polls, newest `added_on` first. Unknown parameters are
/// ignored and a repeated parameter keeps its first value.
async fn list_polls(
    State(state): State<Arc<AppState>>,
    ValidQuery(pairs): ValidQuery<Vec<(String, String)>>,
) -> Result<Json<Vec<PollResponse>>, ApiError> {
    let query = PollQuery::from_pairs(pairs);
    let polls = state.service.list_polls(&query).await?;
    Ok(Json(polls))
}

/// Poll routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/polls", get(list_polls))
}
