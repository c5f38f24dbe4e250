//! Venue endpoints
//!
//! - GET    /venues             grouped by city
//! - POST   /venues/search      name search
//! - GET    /venues/:id         detail with past/upcoming shows
//! - GET    /venues/create      blank form
//! - POST   /venues/create      insert
//! - DELETE /venues/:id         delete venue and its shows
//! - GET    /venues/:id/edit    current values
//! - POST   /venues/:id/edit    update

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fyyur_common::db::Venue;
use fyyur_common::time;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

use super::{EditForm, Notice, SearchResponse};
use crate::db::{shows, venues};
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use crate::forms::{SearchForm, VenueForm};
use crate::listing::{group_venues_by_city, split_shows, Area, ListingEntry, ShowSplit, VenueShow};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct VenuesResponse {
    pub areas: Vec<Area>,
}

#[derive(Debug, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: ShowSplit<VenueShow>,
}

/// Upcoming-show counts per venue, or an empty map when counting is off
async fn upcoming_counts(state: &AppState) -> ApiResult<HashMap<i64, i64>> {
    if !state.listing.count_upcoming_shows {
        return Ok(HashMap::new());
    }
    Ok(venues::count_upcoming_shows_by_venue(&state.db, time::now()).await?)
}

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Json<VenuesResponse>> {
    let all = venues::list_venues(&state.db).await?;
    let upcoming = upcoming_counts(&state).await?;

    Ok(Json(VenuesResponse {
        areas: group_venues_by_city(&all, &upcoming),
    }))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<SearchForm>,
) -> ApiResult<Json<SearchResponse>> {
    let found = venues::search_venues(&state.db, &form.search_term).await?;
    let upcoming = if found.is_empty() {
        HashMap::new()
    } else {
        upcoming_counts(&state).await?
    };

    let data: Vec<ListingEntry> = found
        .into_iter()
        .map(|v| ListingEntry {
            num_upcoming_shows: upcoming.get(&v.id).copied().unwrap_or(0),
            id: v.id,
            name: v.name,
        })
        .collect();

    Ok(Json(SearchResponse {
        search_term: form.search_term,
        count: data.len(),
        data,
    }))
}

async fn require_venue(state: &AppState, id: i64) -> ApiResult<Venue> {
    venues::get_venue(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Venue {} not found", id)))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<VenueDetail>> {
    let venue = require_venue(&state, id).await?;
    let hosted = shows::shows_for_venue(&state.db, id).await?;

    Ok(Json(VenueDetail {
        venue,
        shows: split_shows(&hosted, time::now()),
    }))
}

/// GET /venues/create
pub async fn create_venue_form() -> Json<VenueForm> {
    Json(VenueForm::default())
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<VenueForm>,
) -> ApiResult<(StatusCode, Json<Notice>)> {
    let failure = || format!("An error occurred. Venue {} could not be listed.", form.name);

    let new_venue = form.validate().map_err(|e| {
        warn!("Rejected venue submission: {}", e);
        ApiError::from_mutation(&e, failure())
    })?;

    let id = venues::insert_venue(&state.db, &new_venue).await.map_err(|e| {
        warn!("Venue insert rolled back: {}", e);
        ApiError::from_mutation(&e, failure())
    })?;

    info!("Created venue {} ({})", id, new_venue.name);
    Ok((
        StatusCode::CREATED,
        Json(Notice::new(
            format!("Venue {} was successfully listed!", new_venue.name),
            Some(id),
        )),
    ))
}

/// DELETE /venues/:id
pub async fn delete_venue(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Notice>> {
    let removed = venues::delete_venue(&state.db, id).await.map_err(|e| {
        warn!("Venue {} delete rolled back: {}", id, e);
        ApiError::Internal("Something went wrong when deleting a venue".to_string())
    })?;

    match removed {
        Some(show_count) => {
            info!("Deleted venue {} and {} shows", id, show_count);
            Ok(Json(Notice::new("Venue deleted successfully", Some(id))))
        }
        None => Err(ApiError::NotFound(format!("Venue {} not found", id))),
    }
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<EditForm<VenueForm>>> {
    let venue = require_venue(&state, id).await?;

    Ok(Json(EditForm {
        id,
        form: VenueForm::from(&venue),
    }))
}

/// POST /venues/:id/edit
pub async fn edit_venue(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(form): ApiJson<VenueForm>,
) -> ApiResult<Json<Notice>> {
    const FAILURE: &str = "Something went wrong when updating venue!";

    // An unknown id is a 404 regardless of what the form holds
    require_venue(&state, id).await?;

    let changes = form.validate().map_err(|e| {
        warn!("Rejected venue {} edit: {}", id, e);
        ApiError::from_mutation(&e, FAILURE)
    })?;

    let updated = venues::update_venue(&state.db, id, &changes).await.map_err(|e| {
        warn!("Venue {} update rolled back: {}", id, e);
        ApiError::from_mutation(&e, FAILURE)
    })?;

    if !updated {
        return Err(ApiError::NotFound(format!("Venue {} not found", id)));
    }

    info!("Updated venue {}", id);
    Ok(Json(Notice::new("Updated venue successfully!", Some(id))))
}

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/:id", get(show_venue).delete(delete_venue))
        .route("/venues/:id/edit", get(edit_venue_form).post(edit_venue))
}
