//! Listing aggregation
//!
//! Pure functions that shape entity rows into view payloads: venues grouped
//! by city, and a venue's or artist's shows split into past and upcoming.

use chrono::NaiveDateTime;
use fyyur_common::db::Venue;
use fyyur_common::time::format_show_time;
use serde::Serialize;
use std::collections::HashMap;

use crate::db::shows::ShowListing;

/// Venues sharing one city
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingEntry>,
}

/// Venue or artist entry within an area or a search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Group venues by city, in order of each city's first appearance.
///
/// The grouping key is the city alone. An area's `state` is taken from the
/// last venue seen in that city, so a city name present in two states is
/// reported once with whichever state came last. `upcoming` supplies the
/// per-venue upcoming-show counts; venues missing from it report zero,
/// which is what the listing shows when counting is switched off.
pub fn group_venues_by_city(venues: &[Venue], upcoming: &HashMap<i64, i64>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for venue in venues {
        let entry = ListingEntry {
            id: venue.id,
            name: venue.name.clone(),
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
        };

        match index.get(venue.city.as_str()) {
            Some(&i) => {
                areas[i].state = venue.state.clone();
                areas[i].venues.push(entry);
            }
            None => {
                index.insert(venue.city.as_str(), areas.len());
                areas.push(Area {
                    city: venue.city.clone(),
                    state: venue.state.clone(),
                    venues: vec![entry],
                });
            }
        }
    }

    areas
}

/// A venue's show, seen from the venue page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<&ShowListing> for VenueShow {
    fn from(show: &ShowListing) -> Self {
        Self {
            artist_id: show.artist_id,
            artist_name: show.artist_name.clone(),
            artist_image_link: show.artist_image_link.clone(),
            start_time: format_show_time(&show.start_time),
        }
    }
}

/// An artist's show, seen from the artist page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<&ShowListing> for ArtistShow {
    fn from(show: &ShowListing) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name.clone(),
            venue_image_link: show.venue_image_link.clone(),
            start_time: format_show_time(&show.start_time),
        }
    }
}

/// Shows partitioned around "now"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowSplit<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Partition shows into past (`start_time < now`) and upcoming (the rest).
///
/// Input order is kept within each bucket.
pub fn split_shows<'a, T>(shows: &'a [ShowListing], now: NaiveDateTime) -> ShowSplit<T>
where
    T: From<&'a ShowListing>,
{
    let (past, upcoming): (Vec<&ShowListing>, Vec<&ShowListing>) =
        shows.iter().partition(|show| show.start_time < now);

    let past_shows: Vec<T> = past.into_iter().map(T::from).collect();
    let upcoming_shows: Vec<T> = upcoming.into_iter().map(T::from).collect();

    ShowSplit {
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn venue(id: i64, name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: None,
            phone: None,
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_talent: false,
            seeking_description: None,
            genres: Vec::new(),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn show(artist_id: i64, start_time: NaiveDateTime) -> ShowListing {
        ShowListing {
            venue_id: 1,
            venue_name: "The Musical Hop".to_string(),
            venue_image_link: None,
            artist_id,
            artist_name: format!("Artist {}", artist_id),
            artist_image_link: Some(format!("https://example.com/{}.jpg", artist_id)),
            start_time,
            title: None,
        }
    }

    #[test]
    fn test_same_city_single_group() {
        let venues = vec![
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
        ];

        let areas = group_venues_by_city(&venues, &HashMap::new());

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        let ids: Vec<i64> = areas[0].venues.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(areas[1].city, "New York");
        assert_eq!(areas[1].venues.len(), 1);
    }

    #[test]
    fn test_state_comes_from_last_venue_in_city() {
        let venues = vec![
            venue(1, "Portland Hall", "Portland", "OR"),
            venue(2, "Old Port Tavern", "Portland", "ME"),
        ];

        let areas = group_venues_by_city(&venues, &HashMap::new());

        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].state, "ME");
        assert_eq!(areas[0].venues.len(), 2);
    }

    #[test]
    fn test_upcoming_counts_default_to_zero() {
        let venues = vec![venue(1, "A", "Austin", "TX"), venue(2, "B", "Austin", "TX")];
        let counts = HashMap::from([(2, 4)]);

        let areas = group_venues_by_city(&venues, &counts);
        assert_eq!(areas[0].venues[0].num_upcoming_shows, 0);
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 4);

        let stubbed = group_venues_by_city(&venues, &HashMap::new());
        assert!(stubbed[0].venues.iter().all(|v| v.num_upcoming_shows == 0));
    }

    #[test]
    fn test_empty_listing() {
        assert!(group_venues_by_city(&[], &HashMap::new()).is_empty());
    }

    #[test]
    fn test_split_past_and_upcoming() {
        let now = at(2026, 6, 1, 12);
        let shows = vec![
            show(1, at(2035, 4, 1, 20)),
            show(2, at(2019, 5, 21, 21)),
            show(3, at(2035, 1, 1, 20)),
        ];

        let split: ShowSplit<VenueShow> = split_shows(&shows, now);

        assert_eq!(split.past_shows_count, 1);
        assert_eq!(split.upcoming_shows_count, 2);
        assert_eq!(split.past_shows[0].artist_id, 2);
        assert_eq!(split.past_shows[0].start_time, "2019/05/21 21:00:00");
        // Insertion order, not start-time order
        let upcoming: Vec<i64> = split.upcoming_shows.iter().map(|s| s.artist_id).collect();
        assert_eq!(upcoming, vec![1, 3]);
        assert_eq!(
            split.upcoming_shows[0].artist_image_link.as_deref(),
            Some("https://example.com/1.jpg")
        );
    }

    #[test]
    fn test_show_starting_now_is_upcoming() {
        let now = at(2026, 6, 1, 12);
        let shows = vec![show(1, now)];

        let split: ShowSplit<ArtistShow> = split_shows(&shows, now);

        assert_eq!(split.past_shows_count, 0);
        assert_eq!(split.upcoming_shows_count, 1);
        assert_eq!(split.upcoming_shows[0].venue_name, "The Musical Hop");
    }
}
