//! Show endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use fyyur_common::time::format_show_time;
use serde::Serialize;
use tracing::{info, warn};

use super::Notice;
use crate::db::shows;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::forms::ShowForm;
use crate::AppState;

/// One row of the full show listing
#[derive(Debug, Serialize)]
pub struct ShowEntry {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShowsResponse {
    pub shows: Vec<ShowEntry>,
}

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Json<ShowsResponse>> {
    let shows = shows::list_shows(&state.db)
        .await?
        .into_iter()
        .map(|s| ShowEntry {
            start_time: format_show_time(&s.start_time),
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            title: s.title,
        })
        .collect();

    Ok(Json(ShowsResponse { shows }))
}

/// GET /shows/create
pub async fn create_show_form() -> Json<ShowForm> {
    Json(ShowForm::default())
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ShowForm>,
) -> ApiResult<(StatusCode, Json<Notice>)> {
    const FAILURE: &str = "An error occurred. Show could not be listed.";

    let show = form.validate().map_err(|e| {
        warn!("Rejected show submission: {}", e);
        ApiError::from_mutation(&e, FAILURE)
    })?;

    shows::insert_show(&state.db, &show).await.map_err(|e| {
        warn!(
            "Show insert (venue {}, artist {}) rolled back: {}",
            show.venue_id, show.artist_id, e
        );
        ApiError::from_mutation(&e, FAILURE)
    })?;

    info!("Created show: venue {} artist {}", show.venue_id, show.artist_id);
    Ok((
        StatusCode::CREATED,
        Json(Notice::new("Show was successfully listed!", None)),
    ))
}

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}
