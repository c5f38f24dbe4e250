//! Artist endpoints
//!
//! Mirrors the venue surface, minus grouping and delete.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fyyur_common::db::Artist;
use fyyur_common::time;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

use super::{EditForm, Notice, SearchResponse};
use crate::db::{artists, shows};
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use crate::forms::{ArtistForm, SearchForm};
use crate::listing::{split_shows, ArtistShow, ListingEntry, ShowSplit};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistsResponse {
    pub artists: Vec<ArtistSummary>,
}

#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub shows: ShowSplit<ArtistShow>,
}

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<ArtistsResponse>> {
    let artists = artists::list_artists(&state.db)
        .await?
        .into_iter()
        .map(|a| ArtistSummary {
            id: a.id,
            name: a.name,
        })
        .collect();

    Ok(Json(ArtistsResponse { artists }))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<SearchForm>,
) -> ApiResult<Json<SearchResponse>> {
    let found = artists::search_artists(&state.db, &form.search_term).await?;
    let upcoming = if state.listing.count_upcoming_shows && !found.is_empty() {
        artists::count_upcoming_shows_by_artist(&state.db, time::now()).await?
    } else {
        HashMap::new()
    };

    let data: Vec<ListingEntry> = found
        .into_iter()
        .map(|a| ListingEntry {
            num_upcoming_shows: upcoming.get(&a.id).copied().unwrap_or(0),
            id: a.id,
            name: a.name,
        })
        .collect();

    Ok(Json(SearchResponse {
        search_term: form.search_term,
        count: data.len(),
        data,
    }))
}

async fn require_artist(state: &AppState, id: i64) -> ApiResult<Artist> {
    artists::get_artist(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Artist {} not found", id)))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ArtistDetail>> {
    let artist = require_artist(&state, id).await?;
    let played = shows::shows_for_artist(&state.db, id).await?;

    Ok(Json(ArtistDetail {
        artist,
        shows: split_shows(&played, time::now()),
    }))
}

/// GET /artists/create
pub async fn create_artist_form() -> Json<ArtistForm> {
    Json(ArtistForm::default())
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ArtistForm>,
) -> ApiResult<(StatusCode, Json<Notice>)> {
    let failure = || format!("An error occurred. Artist {} could not be listed.", form.name);

    let new_artist = form.validate().map_err(|e| {
        warn!("Rejected artist submission: {}", e);
        ApiError::from_mutation(&e, failure())
    })?;

    let id = artists::insert_artist(&state.db, &new_artist).await.map_err(|e| {
        warn!("Artist insert rolled back: {}", e);
        ApiError::from_mutation(&e, failure())
    })?;

    info!("Created artist {} ({})", id, new_artist.name);
    Ok((
        StatusCode::CREATED,
        Json(Notice::new(
            format!("Artist {} was successfully listed!", new_artist.name),
            Some(id),
        )),
    ))
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<EditForm<ArtistForm>>> {
    let artist = require_artist(&state, id).await?;

    Ok(Json(EditForm {
        id,
        form: ArtistForm::from(&artist),
    }))
}

/// POST /artists/:id/edit
pub async fn edit_artist(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(form): ApiJson<ArtistForm>,
) -> ApiResult<Json<Notice>> {
    const FAILURE: &str = "Something went wrong when updating artist!";

    // An unknown id is a 404 regardless of what the form holds
    require_artist(&state, id).await?;

    let changes = form.validate().map_err(|e| {
        warn!("Rejected artist {} edit: {}", id, e);
        ApiError::from_mutation(&e, FAILURE)
    })?;

    let updated = artists::update_artist(&state.db, id, &changes).await.map_err(|e| {
        warn!("Artist {} update rolled back: {}", id, e);
        ApiError::from_mutation(&e, FAILURE)
    })?;

    if !updated {
        return Err(ApiError::NotFound(format!("Artist {} not found", id)));
    }

    info!("Updated artist {}", id);
    Ok(Json(Notice::new("Updated artist successfully!", Some(id))))
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/:id", get(show_artist))
        .route("/artists/:id/edit", get(edit_artist_form).post(edit_artist))
}
