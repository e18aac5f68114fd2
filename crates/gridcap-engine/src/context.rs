//! Per-decision evaluation context.
//!
//! A [`RuleContext`] binds one rule-set snapshot to the matcher and
//! exemption lookup for the duration of a single decision. Every checker
//! takes one, so a decision can never read two different snapshots.

use gridcap_core::{Block, BlockMatcher, ExceptionLookup, LimitRule, OwnerId, RuleSet};

/// Borrowed view of everything a checker needs besides the grids.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    /// The snapshot this decision reads.
    pub rules: &'a RuleSet,
    /// Block-to-rule matcher.
    pub matcher: &'a dyn BlockMatcher,
    /// Exemption token resolver.
    pub exceptions: &'a dyn ExceptionLookup,
}

impl<'a> RuleContext<'a> {
    /// Bundle a snapshot with its collaborators.
    pub fn new(
        rules: &'a RuleSet,
        matcher: &'a dyn BlockMatcher,
        exceptions: &'a dyn ExceptionLookup,
    ) -> Self {
        Self {
            rules,
            matcher,
            exceptions,
        }
    }

    /// Whether `id` is on the global exemption list.
    pub fn globally_excepted(&self, id: i64) -> bool {
        self.exceptions.is_excepted(id, &self.rules.exceptions)
    }

    /// Whether any of `owners` is on the global exemption list.
    pub fn any_owner_excepted(&self, owners: &[OwnerId]) -> bool {
        owners.iter().any(|o| self.globally_excepted(o.0))
    }

    /// Whether `id` is exempt from `rule`.
    ///
    /// The global list applies to every rule, so it is consulted after
    /// the rule's own list.
    pub fn rule_excepted(&self, id: i64, rule: &LimitRule) -> bool {
        self.exceptions.is_excepted(id, &rule.exceptions) || self.globally_excepted(id)
    }

    /// Number of `blocks` that count toward `rule`.
    pub fn count_matching<'b, I>(&self, blocks: I, rule: &LimitRule) -> usize
    where
        I: IntoIterator<Item = &'b Block>,
    {
        blocks
            .into_iter()
            .filter(|b| self.matcher.is_match(&b.definition, rule))
            .count()
    }
}
