//! Denial reasons returned by the `check_*` entry points.
//!
//! Every public decision is a boolean; these types explain a `false`
//! without changing it. They are plain data, so a caller can log them,
//! forward them to a player, or drop them.

use std::error::Error;
use std::fmt;

use crate::id::{BlockId, OwnerId};
use crate::rule::ThresholdKind;

/// A global threshold that a grid has reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeViolation {
    /// Which threshold tripped.
    pub kind: ThresholdKind,
    /// Block count that was evaluated.
    pub count: usize,
    /// The configured threshold.
    pub threshold: u64,
}

impl fmt::Display for SizeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} blocks reaches {} of {}",
            self.count, self.kind, self.threshold
        )
    }
}

/// Why a grid operation was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Denial {
    /// A global size threshold was reached.
    Size(SizeViolation),
    /// More blocks match a rule than its limit allows.
    RuleLimit {
        /// Name of the violated rule.
        rule: String,
        /// Matching block count.
        count: usize,
        /// The rule's limit.
        limit: u64,
    },
    /// The per-owner counter refused one of the blocks.
    OwnerLimit {
        /// Owner the blocks would be added for.
        owner: OwnerId,
        /// First block the counter refused.
        block: BlockId,
    },
    /// A spawn was requested without a blueprint.
    MissingBlueprint,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size(v) => write!(f, "size limit: {v}"),
            Self::RuleLimit { rule, count, limit } => {
                write!(f, "rule '{rule}': {count} matching blocks exceeds limit {limit}")
            }
            Self::OwnerLimit { owner, block } => {
                write!(f, "owner {owner} may not add block {block}")
            }
            Self::MissingBlueprint => write!(f, "no blueprint supplied"),
        }
    }
}

impl Error for Denial {}

impl From<SizeViolation> for Denial {
    fn from(v: SizeViolation) -> Self {
        Self::Size(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_rule() {
        let d = Denial::RuleLimit {
            rule: "reactors".into(),
            count: 6,
            limit: 5,
        };
        assert_eq!(
            d.to_string(),
            "rule 'reactors': 6 matching blocks exceeds limit 5"
        );
    }

    #[test]
    fn size_violation_converts() {
        let v = SizeViolation {
            kind: ThresholdKind::SmallGrid,
            count: 50,
            threshold: 50,
        };
        let d: Denial = v.into();
        assert!(matches!(d, Denial::Size(SizeViolation { count: 50, .. })));
        assert!(d.to_string().contains("max blocks per small grid"));
    }
}
