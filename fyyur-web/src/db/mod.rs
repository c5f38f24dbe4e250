//! Data access layer for fyyur-web
//!
//! Every function takes the pool from the application state. Lookups by id
//! return `Option`; mutations run inside a transaction that is committed
//! only when every statement succeeded (dropping an uncommitted
//! transaction rolls it back).

pub mod artists;
pub mod shows;
pub mod venues;

/// Case-insensitive substring test used by name search
///
/// Folds with Unicode lowercase rules, so "CAFÉ" finds "Café Über".
/// `needle` must already be lowercased.
pub(crate) fn name_contains(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}
