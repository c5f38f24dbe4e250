//! Database initialization
//!
//! Opens (creating if needed) the SQLite database and creates the `venue`,
//! `artist` and `show` tables. Safe to call against an existing database.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Busy timeout applied to every connection
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Open or create the database file and ensure the schema exists
pub async fn init_database(db_path: &Path, max_connections: u32) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Foreign keys are a per-connection setting, so they go on the connect
    // options rather than a one-off PRAGMA against the pool.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create a private in-memory database with the schema applied
///
/// Uses a single connection that is never recycled: every connection to
/// `sqlite::memory:` is a separate database.
pub async fn init_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_venue_table(pool).await?;
    create_artist_table(pool).await?;
    create_show_table(pool).await?;
    Ok(())
}

async fn create_venue_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venue (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            address TEXT,
            phone TEXT,
            image_link TEXT,
            facebook_link TEXT,
            website TEXT,
            seeking_talent TEXT NOT NULL DEFAULT 'n' CHECK (seeking_talent IN ('y', 'n')),
            seeking_description TEXT,
            genres TEXT NOT NULL DEFAULT '{}'
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_artist_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artist (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            phone TEXT,
            genres TEXT NOT NULL DEFAULT '{}',
            image_link TEXT,
            facebook_link TEXT,
            website TEXT,
            seeking_venue INTEGER NOT NULL DEFAULT 0,
            seeking_description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_show_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS show (
            venue_id INTEGER NOT NULL REFERENCES venue(id),
            artist_id INTEGER NOT NULL REFERENCES artist(id),
            start_time DATETIME NOT NULL,
            title TEXT,
            PRIMARY KEY (venue_id, artist_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_show_artist ON show(artist_id)")
        .execute(pool)
        .await?;

    Ok(())
}
