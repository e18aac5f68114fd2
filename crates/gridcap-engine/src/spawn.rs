//! Spawn admission for grids that have not entered the simulation.

use gridcap_core::{BlockCounter, Denial, GridBlueprint, OwnerId};

use crate::context::RuleContext;
use crate::quota::check_blueprint_size;

/// Check whether `owner` may spawn `blueprint`.
///
/// A globally exempt owner is admitted before the blueprint is even
/// looked at. System spawns (`OwnerId::NOBODY`) skip the per-owner
/// counter but still respect the size thresholds.
pub fn check_spawn(
    ctx: &RuleContext<'_>,
    counter: &dyn BlockCounter,
    blueprint: Option<&GridBlueprint>,
    owner: OwnerId,
) -> Result<(), Denial> {
    if !ctx.rules.enabled || ctx.globally_excepted(owner.0) {
        return Ok(());
    }

    let blueprint = blueprint.ok_or(Denial::MissingBlueprint)?;
    check_blueprint_size(&ctx.rules.thresholds, Some(blueprint))?;

    if owner.is_nobody() {
        return Ok(());
    }

    counter
        .can_add(&blueprint.blocks, owner)
        .map_err(|block| Denial::OwnerLimit { owner, block })
}
