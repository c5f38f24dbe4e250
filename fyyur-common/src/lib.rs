//! # Fyyur Common Library
//!
//! Shared code for the Fyyur listing service:
//! - Database schema initialization and entity models
//! - Genre tag encoding
//! - Configuration loading
//! - Error types and timestamp helpers

pub mod config;
pub mod db;
pub mod error;
pub mod genres;
pub mod time;

pub use error::{Error, Result};
