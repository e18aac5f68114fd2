//! Limit rules, global thresholds, and the immutable [`RuleSet`] snapshot.

use std::fmt;

use crate::id::RuleSetVersion;

/// Which grids a [`LimitRule`] applies to.
///
/// Closed set; the classifier matches on it exhaustively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridType {
    /// Every grid.
    #[default]
    AllGrids,
    /// Small block grids only.
    SmallGridsOnly,
    /// Large block grids only.
    LargeGridsOnly,
    /// Static grids only.
    StationsOnly,
    /// Dynamic grids only.
    ShipsOnly,
}

impl fmt::Display for GridType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AllGrids => "all grids",
            Self::SmallGridsOnly => "small grids only",
            Self::LargeGridsOnly => "large grids only",
            Self::StationsOnly => "stations only",
            Self::ShipsOnly => "ships only",
        };
        f.write_str(name)
    }
}

/// A configured cap on the number of matching blocks.
///
/// `limit` is an inclusive ceiling: a grid holding exactly `limit`
/// matching blocks is within the rule, one more violates it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LimitRule {
    /// Unique name, used in logs and denial reasons.
    pub name: String,
    /// Match tokens interpreted by the [`BlockMatcher`](crate::traits::BlockMatcher).
    pub block_list: Vec<String>,
    /// Maximum matching blocks allowed.
    pub limit: u64,
    /// Grid classes this rule is scoped to.
    pub grid_type: GridType,
    /// Whether the rule participates in grid-level checks (merge,
    /// conversion). Rules with this unset are only enforced per owner by
    /// the external counter.
    pub limit_grids: bool,
    /// Owner or grid tokens exempt from this rule.
    pub exceptions: Vec<String>,
}

impl Default for LimitRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            block_list: Vec::new(),
            limit: 0,
            grid_type: GridType::AllGrids,
            limit_grids: true,
            exceptions: Vec::new(),
        }
    }
}

/// One of the four global block-count thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThresholdKind {
    /// `max_blocks_per_ship`.
    Ships,
    /// `max_blocks_per_station`.
    Stations,
    /// `max_blocks_large_grid`.
    LargeGrid,
    /// `max_blocks_small_grid`.
    SmallGrid,
}

impl ThresholdKind {
    /// All kinds, in evaluation order.
    pub const ALL: [ThresholdKind; 4] = [
        ThresholdKind::Ships,
        ThresholdKind::Stations,
        ThresholdKind::LargeGrid,
        ThresholdKind::SmallGrid,
    ];
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ships => "max blocks per ship",
            Self::Stations => "max blocks per station",
            Self::LargeGrid => "max blocks per large grid",
            Self::SmallGrid => "max blocks per small grid",
        };
        f.write_str(name)
    }
}

/// Global block-count thresholds.
///
/// Each threshold is disabled when `<= 0`. Reaching an enabled threshold
/// is already a violation (exclusive ceiling), unlike [`LimitRule::limit`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    /// Cap on dynamic grids.
    pub max_blocks_per_ship: i64,
    /// Cap on static grids.
    pub max_blocks_per_station: i64,
    /// Cap on large block grids.
    pub max_blocks_large_grid: i64,
    /// Cap on small block grids.
    pub max_blocks_small_grid: i64,
}

impl Thresholds {
    /// The configured value for `kind`, or `None` when disabled.
    pub fn get(&self, kind: ThresholdKind) -> Option<u64> {
        let raw = match kind {
            ThresholdKind::Ships => self.max_blocks_per_ship,
            ThresholdKind::Stations => self.max_blocks_per_station,
            ThresholdKind::LargeGrid => self.max_blocks_large_grid,
            ThresholdKind::SmallGrid => self.max_blocks_small_grid,
        };
        u64::try_from(raw).ok().filter(|&v| v > 0)
    }

    /// Whether every threshold is disabled.
    pub fn all_disabled(&self) -> bool {
        ThresholdKind::ALL.iter().all(|&k| self.get(k).is_none())
    }
}

/// Immutable snapshot of the limiter configuration.
///
/// Every decision reads exactly one `RuleSet`; reloads publish a new
/// snapshot rather than mutating this one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSet {
    /// Version stamped when the snapshot was published.
    pub version: RuleSetVersion,
    /// Global kill switch. When `false` every request is admitted.
    pub enabled: bool,
    /// Global block-count thresholds.
    pub thresholds: Thresholds,
    /// Owner or grid tokens exempt from every check.
    pub exceptions: Vec<String>,
    /// Limit rules, in configuration order.
    pub rules: Vec<LimitRule>,
}

impl RuleSet {
    /// Rules that participate in grid-level checks.
    pub fn grid_rules(&self) -> impl Iterator<Item = &LimitRule> {
        self.rules.iter().filter(|r| r.limit_grids)
    }

    /// Look up a rule by name.
    pub fn rule(&self, name: &str) -> Option<&LimitRule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            version: RuleSetVersion(0),
            enabled: true,
            thresholds: Thresholds::default(),
            exceptions: Vec::new(),
            rules: Vec::new(),
        }
    }
}
