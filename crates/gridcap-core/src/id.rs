//! Strongly-typed identifiers for grids, owners, blocks, and rule sets.

use std::fmt;

/// Identifies a grid (entity) in the simulation.
///
/// Assigned by the simulation when the grid is spawned or built. Only
/// positive ids are eligible for exemption lookups; zero and negative
/// ids mean the grid has not been registered yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub i64);

impl EntityId {
    /// Whether this id refers to a registered grid.
    pub fn is_registered(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

/// Identifies a player or faction that owns blocks.
///
/// `OwnerId::NOBODY` (zero) marks system-originated requests such as
/// server-side spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub i64);

impl OwnerId {
    /// The "no owner" id used by system spawns.
    pub const NOBODY: OwnerId = OwnerId(0);

    /// Whether this is the system/no-owner id.
    pub fn is_nobody(self) -> bool {
        self == Self::NOBODY
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OwnerId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

/// Identifies a single block.
///
/// Block identity is what set-union operations key on: two references to
/// the same `BlockId` are the same block, regardless of which grid view
/// they were read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonic version stamped on each published rule set.
///
/// Incremented every time a configuration reload is published, so a
/// decision can be traced back to the exact snapshot it read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleSetVersion(pub u64);

impl fmt::Display for RuleSetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RuleSetVersion {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_registration_requires_positive_id() {
        assert!(EntityId(1).is_registered());
        assert!(!EntityId(0).is_registered());
        assert!(!EntityId(-7).is_registered());
    }

    #[test]
    fn nobody_is_zero() {
        assert!(OwnerId(0).is_nobody());
        assert!(!OwnerId(42).is_nobody());
        assert_eq!(OwnerId::from(0), OwnerId::NOBODY);
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(EntityId(-3).to_string(), "-3");
        assert_eq!(BlockId(9).to_string(), "9");
        assert_eq!(RuleSetVersion(4).to_string(), "4");
    }
}
