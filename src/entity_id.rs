//! Entity identifier module.
//!
//! Provides the `EntityId` type, the opaque identifier the persistence
//! layer assigns to rules, weapons, wargear and units. Uses `Arc<str>`
//! so references can be cloned freely while walking a roster.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Shared string identifier for stored entities.
///
/// The engine never interprets the contents; it only compares ids and
/// hands them back to a [`ReferenceResolver`](crate::ReferenceResolver).
///
/// # Examples
///
/// ```rust
/// use rostercost::EntityId;
///
/// let id = EntityId::new("64f1c0ffee");
/// let same: EntityId = "64f1c0ffee".into();
/// let owned: EntityId = String::from("64f1c0ffee").into();
///
/// assert_eq!(id, same);
/// assert_eq!(id, owned);
/// assert_eq!(id.as_str(), "64f1c0ffee");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntityId(Arc<str>);

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(EntityId::from(s))
    }
}

impl EntityId {
    /// Create a new `EntityId` from a string slice.
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the string representation of this id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
