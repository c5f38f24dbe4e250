//! Show database operations
//!
//! Shows are always read together with their venue and artist so that
//! callers never dereference a missing counterpart. Rows come back in
//! insertion order.

use chrono::NaiveDateTime;
use fyyur_common::db::Show;
use fyyur_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// A show with its venue and artist resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
    pub title: Option<String>,
}

const SHOW_LISTING_SELECT: &str = r#"
    SELECT s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
           s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
           s.start_time, s.title
    FROM show s
    JOIN venue v ON v.id = s.venue_id
    JOIN artist a ON a.id = s.artist_id
"#;

fn listing_from_row(row: &SqliteRow) -> ShowListing {
    ShowListing {
        venue_id: row.get("venue_id"),
        venue_name: row.get("venue_name"),
        venue_image_link: row.get("venue_image_link"),
        artist_id: row.get("artist_id"),
        artist_name: row.get("artist_name"),
        artist_image_link: row.get("artist_image_link"),
        start_time: row.get("start_time"),
        title: row.get("title"),
    }
}

/// Every show with both sides resolved
pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(&format!("{} ORDER BY s.rowid", SHOW_LISTING_SELECT))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(listing_from_row).collect())
}

/// Shows hosted by one venue
pub async fn shows_for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(&format!(
        "{} WHERE s.venue_id = ? ORDER BY s.rowid",
        SHOW_LISTING_SELECT
    ))
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(listing_from_row).collect())
}

/// Shows played by one artist
pub async fn shows_for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(&format!(
        "{} WHERE s.artist_id = ? ORDER BY s.rowid",
        SHOW_LISTING_SELECT
    ))
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(listing_from_row).collect())
}

/// Insert a show
///
/// Fails with a constraint violation when the venue or artist does not
/// exist, or when the pair already has a show.
pub async fn insert_show(pool: &SqlitePool, show: &Show) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO show (venue_id, artist_id, start_time, title)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(show.venue_id)
    .bind(show.artist_id)
    .bind(show.start_time)
    .bind(&show.title)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{artists, venues};
    use chrono::NaiveDate;
    use fyyur_common::db::{init_in_memory, NewArtist, NewVenue};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(20, 0, 0).unwrap()
    }

    fn show(venue_id: i64, artist_id: i64, start_time: NaiveDateTime) -> Show {
        Show {
            venue_id,
            artist_id,
            start_time,
            title: None,
        }
    }

    async fn seed(pool: &SqlitePool) -> (i64, i64, i64) {
        let venue = NewVenue {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            image_link: Some("https://example.com/hop.jpg".to_string()),
            ..Default::default()
        };
        let artist = |name: &str| NewArtist {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            ..Default::default()
        };

        let v = venues::insert_venue(pool, &venue).await.unwrap();
        let a1 = artists::insert_artist(pool, &artist("Guns N Petals")).await.unwrap();
        let a2 = artists::insert_artist(pool, &artist("The Wild Sax Band")).await.unwrap();
        (v, a1, a2)
    }

    #[tokio::test]
    async fn test_insert_and_list_in_insertion_order() {
        let pool = init_in_memory().await.unwrap();
        let (v, a1, a2) = seed(&pool).await;

        // Later start time inserted first: order follows insertion, not time
        insert_show(&pool, &show(v, a2, at(2035, 4, 1))).await.unwrap();
        let opening = Show {
            title: Some("Opening".to_string()),
            ..show(v, a1, at(2019, 5, 21))
        };
        insert_show(&pool, &opening).await.unwrap();

        let shows = list_shows(&pool).await.unwrap();
        assert_eq!(shows.len(), 2);
        assert_eq!(shows[0].artist_name, "The Wild Sax Band");
        assert_eq!(shows[1].artist_name, "Guns N Petals");
        assert_eq!(shows[1].title.as_deref(), Some("Opening"));
        assert_eq!(shows[1].start_time, at(2019, 5, 21));
        assert_eq!(shows[0].venue_image_link.as_deref(), Some("https://example.com/hop.jpg"));

        assert_eq!(shows_for_venue(&pool, v).await.unwrap().len(), 2);
        assert_eq!(shows_for_artist(&pool, a1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_pair_rejected() {
        let pool = init_in_memory().await.unwrap();
        let (v, a1, _) = seed(&pool).await;

        let first = show(v, a1, at(2035, 1, 1));
        insert_show(&pool, &first).await.unwrap();

        let err = insert_show(&pool, &first).await.expect_err("duplicate pair");
        assert!(err.is_constraint_violation());
        assert_eq!(list_shows(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dangling_reference_rejected() {
        let pool = init_in_memory().await.unwrap();
        let (v, _, _) = seed(&pool).await;

        let err = insert_show(&pool, &show(v, 999, at(2035, 1, 1)))
            .await
            .expect_err("missing artist");
        assert!(err.is_constraint_violation());
        assert!(list_shows(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_venue_removes_its_shows() {
        let pool = init_in_memory().await.unwrap();
        let (v, a1, a2) = seed(&pool).await;
        for a in [a1, a2] {
            insert_show(&pool, &show(v, a, at(2035, 1, 1))).await.unwrap();
        }

        assert_eq!(venues::delete_venue(&pool, v).await.unwrap(), Some(2));
        assert!(list_shows(&pool).await.unwrap().is_empty());
        assert!(venues::get_venue(&pool, v).await.unwrap().is_none());
        assert!(artists::get_artist(&pool, a1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_upcoming_counts() {
        let pool = init_in_memory().await.unwrap();
        let (v, a1, a2) = seed(&pool).await;
        insert_show(&pool, &show(v, a1, at(2019, 5, 21))).await.unwrap();
        insert_show(&pool, &show(v, a2, at(2035, 4, 1))).await.unwrap();

        let now = at(2026, 1, 1);
        let by_venue = venues::count_upcoming_shows_by_venue(&pool, now).await.unwrap();
        assert_eq!(by_venue.get(&v), Some(&1));

        let by_artist = artists::count_upcoming_shows_by_artist(&pool, now).await.unwrap();
        assert_eq!(by_artist.get(&a2), Some(&1));
        assert_eq!(by_artist.get(&a1), None);
    }
}
