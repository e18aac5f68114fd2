//! Grid classification against rule scopes.

use gridcap_core::{GridClass, GridSize, GridType, LimitRule, RuleSet};

/// Whether a grid falls inside `scope`.
///
/// # Examples
///
/// ```
/// use gridcap_core::{GridBlueprint, GridSize, GridType};
/// use gridcap_engine::classify::matches_scope;
///
/// let station = GridBlueprint {
///     blocks: vec![],
///     size: GridSize::Large,
///     is_static: true,
///     display_name: None,
/// };
/// assert!(matches_scope(&station, GridType::StationsOnly));
/// assert!(!matches_scope(&station, GridType::ShipsOnly));
/// ```
pub fn matches_scope<G: GridClass + ?Sized>(grid: &G, scope: GridType) -> bool {
    match scope {
        GridType::AllGrids => true,
        GridType::SmallGridsOnly => grid.size() == GridSize::Small,
        GridType::LargeGridsOnly => grid.size() == GridSize::Large,
        GridType::StationsOnly => grid.is_static(),
        GridType::ShipsOnly => !grid.is_static(),
    }
}

/// Whether `rule` is scoped to grids like `grid`.
pub fn is_grid_type<G: GridClass + ?Sized>(grid: &G, rule: &LimitRule) -> bool {
    matches_scope(grid, rule.grid_type)
}

/// Grid-level rules whose scope covers `grid`, in configuration order.
///
/// Use this to pre-filter before counting so the matcher is not called
/// for rules that cannot apply.
pub fn applicable_rules<'r, G: GridClass + ?Sized>(
    rules: &'r RuleSet,
    grid: &'r G,
) -> impl Iterator<Item = &'r LimitRule> + 'r {
    rules.grid_rules().filter(move |r| is_grid_type(grid, r))
}
