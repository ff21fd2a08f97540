//! Id lookup helpers shared by the services.

use finance_domain::Identifiable;
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Shortest id prefix accepted when resolving user-supplied tokens.
pub const MIN_PREFIX_LEN: usize = 4;

/// Finds the single item whose id equals `token` or starts with it.
///
/// Prefixes are matched against the hyphen-free hex form so `1a2b` and
/// `1a2b3c4d-...` both work.
pub fn by_id_or_prefix<'a, T: Identifiable>(
    items: impl IntoIterator<Item = &'a T>,
    token: &str,
) -> CoreResult<&'a T>
where
    T: 'a,
{
    let trimmed = token.trim();
    if let Ok(id) = Uuid::parse_str(trimmed) {
        return items
            .into_iter()
            .find(|item| item.id() == id)
            .ok_or_else(|| CoreError::Unresolved(trimmed.to_string()));
    }

    let needle: String = trimmed
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if needle.len() < MIN_PREFIX_LEN || !needle.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::Unresolved(trimmed.to_string()));
    }

    let mut matches = items
        .into_iter()
        .filter(|item| item.id().simple().to_string().starts_with(&needle));
    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item),
        (Some(_), Some(_)) => Err(CoreError::Ambiguous(trimmed.to_string())),
        (None, _) => Err(CoreError::Unresolved(trimmed.to_string())),
    }
}

/// First eight hex characters of an id, for compact listings.
pub fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}
