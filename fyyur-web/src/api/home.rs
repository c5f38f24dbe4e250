//! Home page payload and the fallback for unknown routes

use axum::{extract::State, Json};
use serde::Serialize;

use crate::db::{artists, venues};
use crate::error::{ApiError, ApiResult};
use crate::listing::ListingEntry;
use crate::AppState;

/// Number of recently listed venues and artists on the home page
const RECENT_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub recent_venues: Vec<ListingEntry>,
    pub recent_artists: Vec<ListingEntry>,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> ApiResult<Json<HomeResponse>> {
    let recent_venues = venues::list_recent_venues(&state.db, RECENT_LIMIT)
        .await?
        .into_iter()
        .map(|v| ListingEntry {
            id: v.id,
            name: v.name,
            num_upcoming_shows: 0,
        })
        .collect();

    let recent_artists = artists::list_recent_artists(&state.db, RECENT_LIMIT)
        .await?
        .into_iter()
        .map(|a| ListingEntry {
            id: a.id,
            name: a.name,
            num_upcoming_shows: 0,
        })
        .collect();

    Ok(Json(HomeResponse {
        recent_venues,
        recent_artists,
    }))
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Page not found".to_string())
}
