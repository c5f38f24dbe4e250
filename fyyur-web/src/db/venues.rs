//! Venue database operations

use chrono::NaiveDateTime;
use fyyur_common::db::{decode_seeking_talent, encode_seeking_talent, NewVenue, Venue};
use fyyur_common::{genres, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::debug;

use super::name_contains;

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link, \
                             website, seeking_talent, seeking_description, genres";

fn venue_from_row(row: &SqliteRow) -> Venue {
    let seeking_talent: String = row.get("seeking_talent");
    let stored_genres: String = row.get("genres");

    Venue {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        address: row.get("address"),
        phone: row.get("phone"),
        image_link: row.get("image_link"),
        facebook_link: row.get("facebook_link"),
        website: row.get("website"),
        seeking_talent: decode_seeking_talent(&seeking_talent),
        seeking_description: row.get("seeking_description"),
        genres: genres::decode(&stored_genres),
    }
}

/// Load every venue, ordered by id
pub async fn list_venues(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let rows = sqlx::query(&format!("SELECT {} FROM venue ORDER BY id", VENUE_COLUMNS))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(venue_from_row).collect())
}

/// Load the most recently listed venues, newest first
pub async fn list_recent_venues(pool: &SqlitePool, limit: i64) -> Result<Vec<Venue>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM venue ORDER BY id DESC LIMIT ?",
        VENUE_COLUMNS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(venue_from_row).collect())
}

/// Load a venue by id
pub async fn get_venue(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let row = sqlx::query(&format!("SELECT {} FROM venue WHERE id = ?", VENUE_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(venue_from_row))
}

/// Case-insensitive substring search on the venue name
///
/// An empty term matches nothing. Matching happens here rather than in SQL
/// because SQLite's `lower()` only folds ASCII.
pub async fn search_venues(pool: &SqlitePool, term: &str) -> Result<Vec<Venue>> {
    if term.is_empty() {
        return Ok(Vec::new());
    }

    let needle = term.to_lowercase();
    let matched: Vec<Venue> = list_venues(pool)
        .await?
        .into_iter()
        .filter(|venue| name_contains(&venue.name, &needle))
        .collect();

    debug!("Venue search {:?} matched {} rows", term, matched.len());
    Ok(matched)
}

/// Insert a venue, returning its generated id
pub async fn insert_venue(pool: &SqlitePool, venue: &NewVenue) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO venue (
            name, city, state, address, phone, image_link, facebook_link,
            website, seeking_talent, seeking_description, genres
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website)
    .bind(encode_seeking_talent(venue.seeking_talent))
    .bind(&venue.seeking_description)
    .bind(genres::encode(&venue.genres))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every field of an existing venue
///
/// Returns `false` when no venue has that id.
pub async fn update_venue(pool: &SqlitePool, id: i64, venue: &NewVenue) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE venue SET
            name = ?, city = ?, state = ?, address = ?, phone = ?,
            image_link = ?, facebook_link = ?, website = ?,
            seeking_talent = ?, seeking_description = ?, genres = ?
        WHERE id = ?
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website)
    .bind(encode_seeking_talent(venue.seeking_talent))
    .bind(&venue.seeking_description)
    .bind(genres::encode(&venue.genres))
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(false);
    }

    tx.commit().await?;
    Ok(true)
}

/// Delete a venue together with all of its shows
///
/// Returns the number of shows removed, or `None` when no venue has that id.
pub async fn delete_venue(pool: &SqlitePool, id: i64) -> Result<Option<u64>> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM venue WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Ok(None);
    }

    let shows = sqlx::query("DELETE FROM show WHERE venue_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM venue WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Some(shows))
}

/// Number of shows starting at or after `now`, keyed by venue id
///
/// Venues without upcoming shows are absent from the map.
pub async fn count_upcoming_shows_by_venue(
    pool: &SqlitePool,
    now: NaiveDateTime,
) -> Result<HashMap<i64, i64>> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT venue_id, COUNT(*) FROM show WHERE start_time >= ? GROUP BY venue_id",
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}
