//! Reference collaborator implementations.
//!
//! Hosts usually supply their own matcher and exemption lookup (player
//! names, faction tags, definition groups). These cover the plain-id,
//! plain-name case and are what [`LimiterBuilder`](crate::LimiterBuilder)
//! falls back to.

use std::sync::Arc;

use gridcap_core::{
    Block, BlockCounter, BlockDefinition, BlockId, BlockMatcher, EntityId, ExceptionLookup, Grid,
    GridLookup, LimitRule, OwnerId,
};

/// Matches a block when any rule token names its type, its subtype, or
/// `type/subtype`. Comparison ignores ASCII case.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockListMatcher;

impl BlockMatcher for BlockListMatcher {
    fn is_match(&self, definition: &BlockDefinition, rule: &LimitRule) -> bool {
        rule.block_list.iter().any(|token| {
            let token = token.trim();
            if let Some((ty, sub)) = token.split_once('/') {
                return ty.eq_ignore_ascii_case(&definition.type_id)
                    && sub.eq_ignore_ascii_case(&definition.subtype_id);
            }
            token.eq_ignore_ascii_case(&definition.type_id)
                || (!definition.subtype_id.is_empty()
                    && token.eq_ignore_ascii_case(&definition.subtype_id))
        })
    }
}

/// Treats exemption tokens as decimal ids.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdExceptions;

impl ExceptionLookup for IdExceptions {
    fn is_excepted(&self, id: i64, exceptions: &[String]) -> bool {
        exceptions
            .iter()
            .any(|token| token.trim().parse::<i64>() == Ok(id))
    }
}

/// Counter that admits everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unlimited;

impl BlockCounter for Unlimited {
    fn can_add(&self, _blocks: &[Block], _owner: OwnerId) -> Result<(), BlockId> {
        Ok(())
    }
}

/// Lookup that knows no grids.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGrids;

impl GridLookup for NoGrids {
    fn grid(&self, _id: EntityId) -> Option<Arc<Grid>> {
        None
    }
}
