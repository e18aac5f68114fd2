//! The [`Limiter`]: decision entry points over the current rule set.
//!
//! Each entry point takes exactly one snapshot from the provider, runs
//! the relevant checker, logs a denial, and returns. Nothing here mutates
//! a grid or the rule set.

use std::sync::Arc;

use gridcap_core::{
    BlockCounter, BlockMatcher, Denial, EntityId, ExceptionLookup, Grid, GridBlueprint,
    GridLookup, LimitRule, OwnerId, RuleSet, RuleSetProvider,
};

use crate::classify::{applicable_rules, is_grid_type};
use crate::context::RuleContext;
use crate::conversion::check_conversion;
use crate::defaults::{BlockListMatcher, IdExceptions, NoGrids, Unlimited};
use crate::merge::check_merge;
use crate::quota::{check_blueprint_size, check_size, is_exempt};
use crate::spawn::check_spawn;
use crate::store::RuleSetStore;

/// Admission-control engine for grid creation, merge, conversion, and
/// spawn requests.
///
/// Cheap to share: wrap it in an `Arc` and call it from any thread.
pub struct Limiter {
    rules: Arc<dyn RuleSetProvider>,
    matcher: Arc<dyn BlockMatcher>,
    exceptions: Arc<dyn ExceptionLookup>,
    counter: Arc<dyn BlockCounter>,
    grids: Arc<dyn GridLookup>,
}

// Compile-time assertion: Limiter must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Limiter>();
};

impl Limiter {
    /// Start building a limiter.
    pub fn builder() -> LimiterBuilder {
        LimiterBuilder::default()
    }

    /// Current rule-set snapshot.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.rules.snapshot()
    }

    fn context<'a>(&'a self, rules: &'a RuleSet) -> RuleContext<'a> {
        RuleContext::new(rules, self.matcher.as_ref(), self.exceptions.as_ref())
    }

    // ── size ───────────────────────────────────────────────────────

    /// Whether `grid` has reached a global size threshold.
    ///
    /// An absent or exempt grid is never in violation.
    pub fn is_size_violation(&self, grid: Option<&Grid>) -> bool {
        self.check_size(grid).is_err()
    }

    /// [`is_size_violation`](Self::is_size_violation) with the reason.
    pub fn check_size(&self, grid: Option<&Grid>) -> Result<(), Denial> {
        let rules = self.rules.snapshot();
        if !rules.enabled {
            return Ok(());
        }
        check_size(&self.context(&rules), grid, false).inspect_err(|denial| {
            tracing::debug!(
                grid = ?grid.map(|g| g.id),
                version = %rules.version,
                %denial,
                "size violation"
            );
        })
    }

    /// Size check by grid id. Unknown ids are never in violation.
    pub fn is_size_violation_by_id(&self, id: EntityId) -> bool {
        let grid = self.grids.grid(id);
        self.is_size_violation(grid.as_deref())
    }

    /// Size check for a blueprint. No exemption lookup is performed.
    pub fn is_blueprint_size_violation(&self, blueprint: Option<&GridBlueprint>) -> bool {
        let rules = self.rules.snapshot();
        rules.enabled && check_blueprint_size(&rules.thresholds, blueprint).is_err()
    }

    // ── merge ──────────────────────────────────────────────────────

    /// Whether `a` and `b` may merge into one grid.
    pub fn can_merge(&self, a: Option<&Grid>, b: Option<&Grid>) -> bool {
        self.check_merge(a, b).is_ok()
    }

    /// [`can_merge`](Self::can_merge) with the reason.
    pub fn check_merge(&self, a: Option<&Grid>, b: Option<&Grid>) -> Result<(), Denial> {
        let rules = self.rules.snapshot();
        if !rules.enabled {
            return Ok(());
        }
        check_merge(&self.context(&rules), a, b).inspect_err(|denial| {
            tracing::debug!(
                a = ?a.map(|g| g.id),
                b = ?b.map(|g| g.id),
                version = %rules.version,
                %denial,
                "merge denied"
            );
        })
    }

    // ── conversion ─────────────────────────────────────────────────

    /// Whether `grid` may flip between ship and station.
    pub fn allow_conversion(&self, grid: Option<&Grid>) -> bool {
        self.check_conversion(grid).is_ok()
    }

    /// [`allow_conversion`](Self::allow_conversion) with the reason.
    pub fn check_conversion(&self, grid: Option<&Grid>) -> Result<(), Denial> {
        let rules = self.rules.snapshot();
        if !rules.enabled {
            return Ok(());
        }
        check_conversion(&self.context(&rules), grid).inspect_err(|denial| {
            tracing::debug!(
                grid = ?grid.map(|g| g.id),
                to_static = ?grid.map(|g| !g.is_static),
                version = %rules.version,
                %denial,
                "conversion denied"
            );
        })
    }

    // ── spawn ──────────────────────────────────────────────────────

    /// Whether `owner` may spawn `blueprint`.
    pub fn can_spawn(&self, blueprint: Option<&GridBlueprint>, owner: OwnerId) -> bool {
        self.check_spawn(blueprint, owner).is_ok()
    }

    /// [`can_spawn`](Self::can_spawn) with the reason.
    pub fn check_spawn(
        &self,
        blueprint: Option<&GridBlueprint>,
        owner: OwnerId,
    ) -> Result<(), Denial> {
        let rules = self.rules.snapshot();
        if !rules.enabled {
            return Ok(());
        }
        check_spawn(&self.context(&rules), self.counter.as_ref(), blueprint, owner).inspect_err(
            |denial| {
                tracing::debug!(
                    %owner,
                    blueprint = ?blueprint.and_then(|b| b.display_name.as_deref()),
                    version = %rules.version,
                    %denial,
                    "spawn denied"
                );
            },
        )
    }

    // ── classification ─────────────────────────────────────────────

    /// Whether `rule` is scoped to grids like `grid`.
    pub fn is_grid_type(&self, grid: &Grid, rule: &LimitRule) -> bool {
        is_grid_type(grid, rule)
    }

    /// Blueprint overload of [`is_grid_type`](Self::is_grid_type).
    pub fn is_blueprint_grid_type(&self, blueprint: &GridBlueprint, rule: &LimitRule) -> bool {
        is_grid_type(blueprint, rule)
    }

    /// Grid-level rules from the current snapshot whose scope covers `grid`.
    pub fn applicable_rules(&self, grid: &Grid) -> Vec<LimitRule> {
        let rules = self.rules.snapshot();
        applicable_rules(&rules, grid).cloned().collect()
    }

    /// Every limit `grid` currently breaks.
    ///
    /// Intended for admin tooling that sweeps existing grids. Unlike the
    /// request checkers this does not stop at the first problem: the size
    /// violation (if any) comes first, followed by each applicable rule
    /// whose matching count exceeds its limit. Exempt grids report nothing;
    /// rule exceptions are matched against the grid's owners.
    pub fn audit(&self, grid: &Grid) -> Vec<Denial> {
        let rules = self.rules.snapshot();
        if !rules.enabled {
            return Vec::new();
        }
        let ctx = self.context(&rules);
        if is_exempt(&ctx, grid) {
            return Vec::new();
        }

        let mut found = Vec::new();
        if let Err(denial) = check_size(&ctx, Some(grid), false) {
            found.push(denial);
        }
        for rule in applicable_rules(&rules, grid) {
            if grid.owners.iter().any(|o| ctx.rule_excepted(o.0, rule)) {
                continue;
            }
            let count = ctx.count_matching(&grid.blocks, rule);
            if count as u64 > rule.limit {
                found.push(Denial::RuleLimit {
                    rule: rule.name.clone(),
                    count,
                    limit: rule.limit,
                });
            }
        }
        if !found.is_empty() {
            tracing::debug!(grid = %grid.id, violations = found.len(), "audit found violations");
        }
        found
    }
}

// ── LimiterBuilder ─────────────────────────────────────────────────

/// Assembles a [`Limiter`].
///
/// Unset collaborators fall back to the reference implementations in
/// [`defaults`](crate::defaults); an unset rule provider is an empty
/// [`RuleSetStore`].
#[derive(Default)]
pub struct LimiterBuilder {
    rules: Option<Arc<dyn RuleSetProvider>>,
    matcher: Option<Arc<dyn BlockMatcher>>,
    exceptions: Option<Arc<dyn ExceptionLookup>>,
    counter: Option<Arc<dyn BlockCounter>>,
    grids: Option<Arc<dyn GridLookup>>,
}

impl LimiterBuilder {
    /// Rule-set source, typically a shared [`RuleSetStore`].
    pub fn rules(mut self, provider: Arc<dyn RuleSetProvider>) -> Self {
        self.rules = Some(provider);
        self
    }

    /// Block-to-rule matcher.
    pub fn matcher(mut self, matcher: Arc<dyn BlockMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Exemption token resolver.
    pub fn exceptions(mut self, exceptions: Arc<dyn ExceptionLookup>) -> Self {
        self.exceptions = Some(exceptions);
        self
    }

    /// Per-owner counter consulted at spawn.
    pub fn counter(mut self, counter: Arc<dyn BlockCounter>) -> Self {
        self.counter = Some(counter);
        self
    }

    /// Grid lookup for id-based size checks.
    pub fn grids(mut self, grids: Arc<dyn GridLookup>) -> Self {
        self.grids = Some(grids);
        self
    }

    /// Finish building.
    pub fn build(self) -> Limiter {
        Limiter {
            rules: self
                .rules
                .unwrap_or_else(|| Arc::new(RuleSetStore::empty())),
            matcher: self.matcher.unwrap_or_else(|| Arc::new(BlockListMatcher)),
            exceptions: self.exceptions.unwrap_or_else(|| Arc::new(IdExceptions)),
            counter: self.counter.unwrap_or_else(|| Arc::new(Unlimited)),
            grids: self.grids.unwrap_or_else(|| Arc::new(NoGrids)),
        }
    }
}
