//! Ship/station conversion feasibility.
//!
//! Thresholds are evaluated as they will apply after the flip. Rule
//! enforcement is narrower: only rules scoped to the *opposite* mobility
//! of the grid's current state are counted, i.e. a station converting to
//! a ship is checked against `ShipsOnly` rules and a ship converting to a
//! station against `StationsOnly` rules. `AllGrids` and the size-scoped
//! rules are never counted here; they already applied before the flip.

use gridcap_core::{Denial, Grid, GridType, LimitRule};

use crate::context::RuleContext;
use crate::quota::check_size;

/// Whether the conversion pass enforces `rule` for a grid that is
/// currently `is_static`.
pub fn enforced_on_conversion(rule: &LimitRule, is_static: bool) -> bool {
    match rule.grid_type {
        GridType::ShipsOnly => is_static,
        GridType::StationsOnly => !is_static,
        GridType::AllGrids | GridType::SmallGridsOnly | GridType::LargeGridsOnly => false,
    }
}

/// Check whether `grid` may flip its mobility.
pub fn check_conversion(ctx: &RuleContext<'_>, grid: Option<&Grid>) -> Result<(), Denial> {
    let Some(grid) = grid else {
        return Ok(());
    };
    if !ctx.rules.enabled {
        return Ok(());
    }

    check_size(ctx, Some(grid), true)?;

    for rule in ctx.rules.grid_rules() {
        if !enforced_on_conversion(rule, grid.is_static) {
            continue;
        }
        if grid.owners.iter().any(|o| ctx.rule_excepted(o.0, rule)) {
            tracing::trace!(rule = %rule.name, grid = %grid.id, "conversion: rule excepted");
            continue;
        }
        let count = ctx.count_matching(&grid.blocks, rule);
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
