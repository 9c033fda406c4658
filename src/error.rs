//! Error types for the costing engine.
//!
//! The pure components (text classification, the tiered formula and the
//! weapon stat model) never fail. Errors only arise from reference
//! lookups and from loading configuration.

use crate::entity_id::EntityId;
use thiserror::Error;

/// Errors that can occur while resolving references or loading config.
///
/// # Examples
///
/// ```rust
/// use rostercost::{CostError, EntityId};
///
/// let err = CostError::RuleNotFound(EntityId::new("r1"));
/// assert_eq!(err.to_string(), "Rule not found: r1");
/// assert!(err.is_not_found());
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CostError {
    /// No rule is stored under this id.
    #[error("Rule not found: {0}")]
    RuleNotFound(EntityId),

    /// No weapon is stored under this id.
    #[error("Weapon not found: {0}")]
    WeaponNotFound(EntityId),

    /// No wargear item is stored under this id.
    #[error("WarGear not found: {0}")]
    WarGearNotFound(EntityId),

    /// The resolver backend failed for a reason other than a missing entity.
    #[error("Lookup failed for {id}: {reason}")]
    Lookup { id: EntityId, reason: String },

    /// Classifier configuration could not be parsed or is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CostError {
    /// Returns `true` for dangling-reference errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CostError::RuleNotFound(_) | CostError::WeaponNotFound(_) | CostError::WarGearNotFound(_)
        )
    }

    /// The id the failed lookup was for, if any.
    pub fn entity_id(&self) -> Option<&EntityId> {
        match self {
            CostError::RuleNotFound(id)
            | CostError::WeaponNotFound(id)
            | CostError::WarGearNotFound(id)
            | CostError::Lookup { id, .. } => Some(id),
            CostError::InvalidConfig(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CostError::WeaponNotFound(EntityId::new("bolter"));
        assert!(err.to_string().contains("bolter"));
        assert!(err.to_string().starts_with("Weapon not found"));
    }

    #[test]
    fn test_lookup_error_is_not_a_dangling_reference() {
        let err = CostError::Lookup {
            id: EntityId::new("r9"),
            reason: "connection reset".into(),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.entity_id(), Some(&EntityId::new("r9")));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_config_error_has_no_entity() {
        let err = CostError::InvalidConfig("bad".into());
        assert_eq!(err.entity_id(), None);
        assert!(!err.is_not_found());
    }
}
