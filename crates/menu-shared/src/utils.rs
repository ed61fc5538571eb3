//! Utility functions

use uuid::Uuid;

use crate::constants::LIST_SEPARATOR;

/// Split a comma-separated query value, dropping blanks.
pub fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(LIST_SEPARATOR).map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a comma-separated list of ids. Returns the first offending token on failure.
pub fn parse_id_list(raw: &str) -> Result<Vec<Uuid>, String> {
    split_list(raw)
        .map(|s| Uuid::parse_str(s).map_err(|_| s.to_string()))
        .collect()
}

/// Join ids into the comma-separated wire form.
pub fn join_ids<'a, I>(ids: I) -> String
where
    I: IntoIterator<Item = &'a Uuid>,
{
    ids.into_iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(&LIST_SEPARATOR.to_string())
}
