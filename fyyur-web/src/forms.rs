//! Request bodies
//!
//! Every submitted field is optional at the wire level (missing fields
//! deserialize to empty values); `validate` turns a form into the model
//! it describes or rejects it with `Error::InvalidInput`.

use fyyur_common::db::{Artist, NewArtist, NewVenue, Show, Venue};
use fyyur_common::time::parse_start_time;
use fyyur_common::{genres, Error, Result};
use serde::{Deserialize, Serialize};

/// Body of `POST /venues/search` and `POST /artists/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

/// Body of `POST /venues/create` and `POST /venues/{id}/edit`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// Body of `POST /artists/create` and `POST /artists/{id}/edit`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

/// Body of `POST /shows/create`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: Option<i64>,
    pub venue_id: Option<i64>,
    pub start_time: String,
    pub title: String,
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidInput(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn tags(input: &[String]) -> Result<Vec<String>> {
    let cleaned: Vec<String> = input.iter().map(|g| g.trim().to_string()).collect();
    genres::validate(&cleaned)?;
    Ok(cleaned)
}

impl VenueForm {
    pub fn validate(&self) -> Result<NewVenue> {
        Ok(NewVenue {
            name: required("name", &self.name)?,
            city: required("city", &self.city)?,
            state: required("state", &self.state)?,
            address: Some(required("address", &self.address)?),
            phone: optional(&self.phone),
            image_link: optional(&self.image_link),
            facebook_link: optional(&self.facebook_link),
            website: optional(&self.website_link),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(&self.seeking_description),
            genres: tags(&self.genres)?,
        })
    }
}

impl From<&Venue> for VenueForm {
    fn from(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone().unwrap_or_default(),
            phone: venue.phone.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website_link: venue.website.clone().unwrap_or_default(),
            genres: venue.genres.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }
}

impl ArtistForm {
    pub fn validate(&self) -> Result<NewArtist> {
        Ok(NewArtist {
            name: required("name", &self.name)?,
            city: required("city", &self.city)?,
            state: required("state", &self.state)?,
            phone: optional(&self.phone),
            genres: tags(&self.genres)?,
            image_link: optional(&self.image_link),
            facebook_link: optional(&self.facebook_link),
            website: optional(&self.website_link),
            seeking_venue: self.seeking_venue,
            seeking_description: optional(&self.seeking_description),
        })
    }
}

impl From<&Artist> for ArtistForm {
    fn from(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website_link: artist.website.clone().unwrap_or_default(),
            genres: artist.genres.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }
}

impl ShowForm {
    pub fn validate(&self) -> Result<Show> {
        let artist_id = self
            .artist_id
            .ok_or_else(|| Error::InvalidInput("artist_id is required".to_string()))?;
        let venue_id = self
            .venue_id
            .ok_or_else(|| Error::InvalidInput("venue_id is required".to_string()))?;

        Ok(Show {
            venue_id,
            artist_id,
            start_time: parse_start_time(&required("start_time", &self.start_time)?)?,
            title: optional(&self.title),
        })
    }
}
