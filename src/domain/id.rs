//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned school identifier.
///
/// The inner value is private; identifiers come from the store on insert
/// or from deserialized API payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(i64);

impl SchoolId {
    /// Wrap a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw row id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SchoolId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&SchoolId::new(42)).unwrap();
        assert_eq!(json, "42");

        let back: SchoolId = serde_json::from_str("7").unwrap();
        assert_eq!(back.get(), 7);
    }

    #[test]
    fn school_ids_order_by_value() {
        assert!(SchoolId::new(2) > SchoolId::new(1));
        assert_eq!(SchoolId::from(3).to_string(), "3");
    }
}
