//! Global size thresholds.
//!
//! Thresholds are exclusive ceilings: a grid whose block count *reaches*
//! an enabled threshold is already in violation. Per-rule limits are the
//! opposite (inclusive), and the two must not be unified.

use gridcap_core::{
    Denial, Grid, GridBlueprint, GridClass, GridSize, SizeViolation, ThresholdKind, Thresholds,
};

use crate::context::RuleContext;

/// Evaluate the four thresholds against explicit grid facts.
///
/// Thresholds are checked in [`ThresholdKind::ALL`] order and the first
/// one reached is reported.
pub fn threshold_violation(
    count: usize,
    size: GridSize,
    is_static: bool,
    thresholds: &Thresholds,
) -> Option<SizeViolation> {
    ThresholdKind::ALL.into_iter().find_map(|kind| {
        let threshold = thresholds.get(kind)?;
        let applies = match kind {
            ThresholdKind::Ships => !is_static,
            ThresholdKind::Stations => is_static,
            ThresholdKind::LargeGrid => size == GridSize::Large,
            ThresholdKind::SmallGrid => size == GridSize::Small,
        };
        (applies && count as u64 >= threshold).then_some(SizeViolation {
            kind,
            count,
            threshold,
        })
    })
}

/// Evaluate thresholds against any grid view.
///
/// `invert_static` previews the grid after a pending mobility flip.
pub fn size_violation<G: GridClass + ?Sized>(
    grid: &G,
    thresholds: &Thresholds,
    invert_static: bool,
) -> Option<SizeViolation> {
    let is_static = grid.is_static() != invert_static;
    threshold_violation(grid.block_count(), grid.size(), is_static, thresholds)
}

/// Whether a live grid is exempt from every check.
///
/// The grid id is only consulted once the grid is registered.
pub fn is_exempt(ctx: &RuleContext<'_>, grid: &Grid) -> bool {
    (grid.id.is_registered() && ctx.globally_excepted(grid.id.0))
        || ctx.any_owner_excepted(&grid.owners)
}

/// Size check for a live grid.
///
/// An absent grid and an exempt grid both pass, as does every grid while
/// the rule set is disabled.
pub fn check_size(
    ctx: &RuleContext<'_>,
    grid: Option<&Grid>,
    invert_static: bool,
) -> Result<(), Denial> {
    let Some(grid) = grid else {
        return Ok(());
    };
    if !ctx.rules.enabled || is_exempt(ctx, grid) {
        return Ok(());
    }
    match size_violation(grid, &ctx.rules.thresholds, invert_static) {
        Some(v) => Err(v.into()),
        None => Ok(()),
    }
}

/// Size check for a blueprint.
///
/// Blueprints carry no id or owners, so no exemption lookup happens here.
/// Callers that know the requesting owner apply exemption themselves.
/// Only thresholds are passed in, so the kill switch is the caller's
/// concern too; [`check_spawn`](crate::spawn::check_spawn) applies both.
pub fn check_blueprint_size(
    thresholds: &Thresholds,
    blueprint: Option<&GridBlueprint>,
) -> Result<(), Denial> {
    let Some(blueprint) = blueprint else {
        return Ok(());
    };
    match size_violation(blueprint, thresholds, false) {
        Some(v) => Err(v.into()),
        None => Ok(()),
    }
}
