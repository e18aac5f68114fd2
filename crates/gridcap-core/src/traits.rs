//! Collaborator traits the engine consumes.
//!
//! Block matching, exemption lookup, per-owner counting, grid lookup, and
//! configuration storage all live outside the decision core. They are
//! injected so the engine can be exercised with fakes.

use std::sync::Arc;

use crate::grid::{Block, BlockDefinition, Grid};
use crate::id::{BlockId, EntityId, OwnerId};
use crate::rule::{LimitRule, RuleSet};

/// Decides whether a block counts toward a rule.
pub trait BlockMatcher: Send + Sync {
    /// Whether blocks of `definition` are limited by `rule`.
    fn is_match(&self, definition: &BlockDefinition, rule: &LimitRule) -> bool;
}

/// Resolves exemption tokens against an owner or grid id.
///
/// Tokens are whatever the configuration holds: raw ids, player names,
/// faction tags. Only the implementation knows how to interpret them.
pub trait ExceptionLookup: Send + Sync {
    /// Whether `id` is named by any token in `exceptions`.
    fn is_excepted(&self, id: i64, exceptions: &[String]) -> bool;
}

/// Per-owner and per-world aggregate counter used at spawn time.
pub trait BlockCounter: Send + Sync {
    /// Check whether `owner` may add every block in `blocks`.
    ///
    /// Returns the id of the first block that would push the owner (or
    /// the world) over a limit.
    fn can_add(&self, blocks: &[Block], owner: OwnerId) -> Result<(), BlockId>;
}

/// Resolves grid ids to live grid views.
pub trait GridLookup: Send + Sync {
    /// The grid with `id`, if it still exists.
    fn grid(&self, id: EntityId) -> Option<Arc<Grid>>;
}

/// Source of the current rule-set snapshot.
///
/// Implementations must publish snapshots atomically: a caller holding
/// the returned `Arc` sees one consistent configuration for as long as it
/// keeps it.
pub trait RuleSetProvider: Send + Sync {
    /// The current snapshot.
    fn snapshot(&self) -> Arc<RuleSet>;
}

impl RuleSetProvider for Arc<RuleSet> {
    fn snapshot(&self) -> Arc<RuleSet> {
        Arc::clone(self)
    }
}
