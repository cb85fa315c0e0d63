use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use crate::{
    error::ApiError,
    shows::client::TmdbError,
    shows::dto::{PopularResponse, ShowDetails},
    state::AppState,
};

pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows/popular", get(popular))
        .route("/shows/:id", get(details))
}

#[instrument(skip(state))]
pub async fn popular(State(state): State<AppState>) -> Result<Json<PopularResponse>, ApiError> {
    let results = state.tmdb.popular().await.map_err(|e| {
        error!(error = %e, "failed to fetch popular shows");
        ApiError::Upstream("Failed to fetch popular TV shows".into())
    })?;
    Ok(Json(PopularResponse { results }))
}

#[instrument(skip(state))]
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ShowDetails>, ApiError> {
    match state.tmdb.details(id).await {
        Ok(show) => Ok(Json(show)),
        Err(TmdbError::NotFound) => Err(ApiError::NotFound("Show not found".into())),
        Err(e) => {
            error!(error = %e, show_id = id, "failed to fetch show details");
            Err(ApiError::Upstream("Failed to fetch TV show details".into()))
        }
    }
}
