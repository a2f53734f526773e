//! Substring search over an already-fetched school list.

use super::school::School;

/// True when the query occurs in the school's name, city, or address,
/// ignoring case. An empty query matches everything.
#[must_use]
pub fn matches(school: &School, query: &str) -> bool {
    let needle = query.to_lowercase();
    [&school.name, &school.city, &school.address]
        .into_iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Schools matching the query, in their original order.
#[must_use]
pub fn filter_schools<'a>(schools: &'a [School], query: &str) -> Vec<&'a School> {
    schools.iter().filter(|s| matches(s, query)).collect()
}
