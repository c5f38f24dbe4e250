//! Genre tag encoding
//!
//! Genres are stored in a single TEXT column as a brace-delimited list,
//! e.g. `{Jazz,Reggae}`. Reading strips the braces and splits on commas;
//! an element wrapped in double quotes (as written by array-literal
//! serializers for tags containing spaces) has the quotes removed.

use crate::{Error, Result};

/// Encode an ordered list of genre tags for storage
pub fn encode(genres: &[String]) -> String {
    format!("{{{}}}", genres.join(","))
}

/// Decode a stored genre string into its ordered list of tags
///
/// `{}` and the empty string decode to an empty list.
pub fn decode(stored: &str) -> Vec<String> {
    let inner = stored.trim_matches(|c| c == '{' || c == '}');
    if inner.is_empty() {
        return Vec::new();
    }

    inner
        .split(',')
        .map(|tag| {
            tag.strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(tag)
                .to_string()
        })
        .collect()
}

/// Check that every tag survives an encode/decode round trip
pub fn validate(genres: &[String]) -> Result<()> {
    for tag in genres {
        if tag.is_empty() {
            return Err(Error::InvalidInput("genre tags must not be empty".to_string()));
        }
        if tag.contains(|c| matches!(c, '{' | '}' | ',')) {
            return Err(Error::InvalidInput(format!(
                "genre tag may not contain braces or commas: {}",
                tag
            )));
        }
        if tag.starts_with('"') && tag.ends_with('"') {
            return Err(Error::InvalidInput(format!(
                "genre tag may not be wrapped in quotes: {}",
                tag
            )));
        }
    }
    Ok(())
}
