//! Merge feasibility.
//!
//! Two grids about to be joined are evaluated as one: the block sets are
//! unioned by [`BlockId`], so a block visible from both views is counted
//! once.

use indexmap::IndexMap;

use gridcap_core::{Block, BlockId, Denial, Grid};

use crate::context::RuleContext;
use crate::quota::threshold_violation;

/// Union of two block lists keyed by block identity.
///
/// Order follows `a` then the blocks of `b` not already seen.
pub fn block_union<'a>(a: &'a [Block], b: &'a [Block]) -> IndexMap<BlockId, &'a Block> {
    let mut merged = IndexMap::with_capacity(a.len() + b.len());
    for block in a.iter().chain(b) {
        merged.entry(block.id).or_insert(block);
    }
    merged
}

/// Check whether `a` and `b` may merge.
///
/// The merged grid takes `a`'s size class and is static if either side
/// is. Rule exceptions are looked up by grid id, not by owner.
pub fn check_merge(
    ctx: &RuleContext<'_>,
    a: Option<&Grid>,
    b: Option<&Grid>,
) -> Result<(), Denial> {
    if !ctx.rules.enabled {
        return Ok(());
    }
    let (Some(a), Some(b)) = (a, b) else {
        return Ok(());
    };

    if ctx.any_owner_excepted(&a.owners) || ctx.any_owner_excepted(&b.owners) {
        return Ok(());
    }

    let merged = block_union(&a.blocks, &b.blocks);
    if merged.is_empty() {
        return Ok(());
    }

    let is_static = a.is_static || b.is_static;
    if let Some(v) = threshold_violation(merged.len(), a.size, is_static, &ctx.rules.thresholds) {
        return Err(v.into());
    }

    for rule in ctx.rules.grid_rules() {
        if ctx.rule_excepted(a.id.0, rule) || ctx.rule_excepted(b.id.0, rule) {
            tracing::trace!(rule = %rule.name, a = %a.id, b = %b.id, "merge: rule excepted");
            continue;
        }
        let count = ctx.count_matching(merged.values().copied(), rule);
        if count as u64 > rule.limit {
            return Err(Denial::RuleLimit {
                rule: rule.name.clone(),
                count,
                limit: rule.limit,
            });
        }
    }

    Ok(())
}
