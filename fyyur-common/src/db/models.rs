//! Entity models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Stored value of `venue.seeking_talent` when the venue is seeking talent
pub const SEEKING_TALENT_YES: &str = "y";
/// Stored value of `venue.seeking_talent` otherwise
pub const SEEKING_TALENT_NO: &str = "n";

/// Encode the venue seeking-talent flag for storage
pub fn encode_seeking_talent(seeking: bool) -> &'static str {
    if seeking {
        SEEKING_TALENT_YES
    } else {
        SEEKING_TALENT_NO
    }
}

/// Decode the stored venue seeking-talent flag
pub fn decode_seeking_talent(stored: &str) -> bool {
    stored == SEEKING_TALENT_YES
}

/// A place that hosts shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

/// Venue fields written on create or update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

/// A performer who plays shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Artist fields written on create or update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// A scheduled performance linking one venue and one artist.
///
/// Identified by the (venue_id, artist_id) pair, so a venue and an artist
/// share at most one show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: NaiveDateTime,
    pub title: Option<String>,
}
