//! HTTP API handlers for fyyur-web

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use artists::artist_routes;
pub use health::health_routes;
pub use home::{home, not_found};
pub use shows::show_routes;
pub use venues::venue_routes;

use serde::Serialize;

use crate::listing::ListingEntry;

/// Flash-style outcome of a successful mutation
#[derive(Debug, Serialize)]
pub struct Notice {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Notice {
    pub fn new(message: impl Into<String>, id: Option<i64>) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }
}

/// Search results for venues or artists
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<ListingEntry>,
}

/// Current values of an entity, for pre-filling its edit form
#[derive(Debug, Serialize)]
pub struct EditForm<F> {
    pub id: i64,
    pub form: F,
}
