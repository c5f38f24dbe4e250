//! Artist database operations

use chrono::NaiveDateTime;
use fyyur_common::db::{Artist, NewArtist};
use fyyur_common::{genres, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::debug;

use super::name_contains;

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, genres, image_link, facebook_link, \
                              website, seeking_venue, seeking_description";

fn artist_from_row(row: &SqliteRow) -> Artist {
    let stored_genres: String = row.get("genres");

    Artist {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        phone: row.get("phone"),
        genres: genres::decode(&stored_genres),
        image_link: row.get("image_link"),
        facebook_link: row.get("facebook_link"),
        website: row.get("website"),
        seeking_venue: row.get("seeking_venue"),
        seeking_description: row.get("seeking_description"),
    }
}

/// Load every artist, ordered by id
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query(&format!("SELECT {} FROM artist ORDER BY id", ARTIST_COLUMNS))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(artist_from_row).collect())
}

/// Load the most recently listed artists, newest first
pub async fn list_recent_artists(pool: &SqlitePool, limit: i64) -> Result<Vec<Artist>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM artist ORDER BY id DESC LIMIT ?",
        ARTIST_COLUMNS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(artist_from_row).collect())
}

/// Load an artist by id
pub async fn get_artist(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let row = sqlx::query(&format!("SELECT {} FROM artist WHERE id = ?", ARTIST_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(artist_from_row))
}

/// Case-insensitive substring search on the artist name
///
/// An empty term matches nothing. Matching happens here rather than in SQL
/// because SQLite's `lower()` only folds ASCII.
pub async fn search_artists(pool: &SqlitePool, term: &str) -> Result<Vec<Artist>> {
    if term.is_empty() {
        return Ok(Vec::new());
    }

    let needle = term.to_lowercase();
    let matched: Vec<Artist> = list_artists(pool)
        .await?
        .into_iter()
        .filter(|artist| name_contains(&artist.name, &needle))
        .collect();

    debug!("Artist search {:?} matched {} rows", term, matched.len());
    Ok(matched)
}

/// Insert an artist, returning its generated id
pub async fn insert_artist(pool: &SqlitePool, artist: &NewArtist) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO artist (
            name, city, state, phone, genres, image_link, facebook_link,
            website, seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(genres::encode(&artist.genres))
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website)
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every field of an existing artist
///
/// Returns `false` when no artist has that id.
pub async fn update_artist(pool: &SqlitePool, id: i64, artist: &NewArtist) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE artist SET
            name = ?, city = ?, state = ?, phone = ?, genres = ?,
            image_link = ?, facebook_link = ?, website = ?,
            seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(genres::encode(&artist.genres))
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website)
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(false);
    }

    tx.commit().await?;
    Ok(true)
}

/// Number of shows starting at or after `now`, keyed by artist id
pub async fn count_upcoming_shows_by_artist(
    pool: &SqlitePool,
    now: NaiveDateTime,
) -> Result<HashMap<i64, i64>> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT artist_id, COUNT(*) FROM show WHERE start_time >= ? GROUP BY artist_id",
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}
