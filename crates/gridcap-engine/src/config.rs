//! Limiter configuration, validation, and error types.
//!
//! [`LimiterConfig`] is the serializable document an operator edits.
//! [`validate()`](LimiterConfig::validate) checks structural invariants;
//! [`into_rule_set()`](LimiterConfig::into_rule_set) turns a valid document
//! into the immutable [`RuleSet`] snapshot the checkers read.
//!
//! Non-positive thresholds are not errors: they mean "disabled".

use std::error::Error;
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use gridcap_core::{LimitRule, RuleSet, RuleSetVersion, Thresholds};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while loading or validating a [`LimiterConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema.
    Parse(serde_json::Error),
    /// Two rules share a name.
    DuplicateRule {
        /// The repeated name.
        name: String,
    },
    /// A rule has no match tokens and can never count anything.
    EmptyBlockList {
        /// Name of the offending rule.
        name: String,
    },
    /// A rule has a limit of zero. Forbidding a block outright is done
    /// by the host's block filter, not by a zero-sized rule.
    ZeroLimit {
        /// Name of the offending rule.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::DuplicateRule { name } => write!(f, "duplicate rule name '{name}'"),
            Self::EmptyBlockList { name } => write!(f, "rule '{name}' has an empty block list"),
            Self::ZeroLimit { name } => write!(f, "rule '{name}' has a zero limit"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

// ── LimiterConfig ──────────────────────────────────────────────────

/// Operator-facing limiter configuration.
///
/// Every field has a default, so an empty JSON object is a valid,
/// fully permissive configuration.
///
/// # Examples
///
/// ```
/// use gridcap_engine::config::LimiterConfig;
///
/// let config = LimiterConfig::from_json_str(r#"{
///     "max_blocks_per_ship": 2000,
///     "exceptions": ["76561198000000000"],
///     "limits": [
///         { "name": "reactors", "block_list": ["Reactor"], "limit": 5 }
///     ]
/// }"#).unwrap();
///
/// assert!(config.enable_limits);
/// assert_eq!(config.thresholds.max_blocks_per_ship, 2000);
/// assert_eq!(config.limits[0].limit, 5);
/// assert!(config.limits[0].limit_grids);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimiterConfig {
    /// Global kill switch. Default: `true`.
    pub enable_limits: bool,
    /// Global size thresholds. Default: all disabled.
    #[serde(flatten)]
    pub thresholds: Thresholds,
    /// Owner or grid tokens exempt from every check.
    pub exceptions: Vec<String>,
    /// Limit rules, in evaluation order.
    pub limits: Vec<LimitRule>,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            enable_limits: true,
            thresholds: Thresholds::default(),
            exceptions: Vec::new(),
            limits: Vec::new(),
        }
    }
}

impl LimiterConfig {
    /// Parse a JSON document.
    ///
    /// Parsing does not validate; call [`validate()`](Self::validate) or
    /// [`into_rule_set()`](Self::into_rule_set) afterwards.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate structural invariants.
    ///
    /// Rule names must be unique, and every rule needs at least one match
    /// token and a positive limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = IndexSet::with_capacity(self.limits.len());
        for rule in &self.limits {
            if !seen.insert(rule.name.as_str()) {
                return Err(ConfigError::DuplicateRule {
                    name: rule.name.clone(),
                });
            }
            if rule.block_list.is_empty() {
                return Err(ConfigError::EmptyBlockList {
                    name: rule.name.clone(),
                });
            }
            if rule.limit == 0 {
                return Err(ConfigError::ZeroLimit {
                    name: rule.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Validate and convert into an immutable snapshot stamped `version`.
    pub fn into_rule_set(self, version: RuleSetVersion) -> Result<RuleSet, ConfigError> {
        self.validate()?;
        Ok(RuleSet {
            version,
            enabled: self.enable_limits,
            thresholds: self.thresholds,
            exceptions: self.exceptions,
            rules: self.limits,
        })
    }
}

impl From<&RuleSet> for LimiterConfig {
    fn from(rules: &RuleSet) -> Self {
        Self {
            enable_limits: rules.enabled,
            thresholds: rules.thresholds,
            exceptions: rules.exceptions.clone(),
            limits: rules.rules.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcap_core::GridType;

    fn named(name: &str) -> LimitRule {
        LimitRule {
            name: name.into(),
            block_list: vec!["Reactor".into()],
            limit: 1,
            ..Default::default()
        }
    }

    #[test]
    fn empty_document_is_permissive() {
        let config = LimiterConfig::from_json_str("{}").unwrap();
        assert_eq!(config, LimiterConfig::default());
        let rules = config.into_rule_set(RuleSetVersion(1)).unwrap();
        assert!(rules.enabled);
        assert!(rules.thresholds.all_disabled());
        assert_eq!(rules.version, RuleSetVersion(1));
    }

    #[test]
    fn negative_thresholds_parse_and_stay_disabled() {
        let config = LimiterConfig::from_json_str(
            r#"{ "max_blocks_small_grid": -1, "max_blocks_large_grid": 0 }"#,
        )
        .unwrap();
        assert_eq!(config.validate().ok(), Some(()));
        assert!(config.thresholds.all_disabled());
    }

    #[test]
    fn rule_fields_parse() {
        let config = LimiterConfig::from_json_str(
            r#"{ "limits": [ {
                "name": "ship-thrusters",
                "block_list": ["Thrust"],
                "limit": 12,
                "grid_type": "ShipsOnly",
                "limit_grids": false,
                "exceptions": ["42"]
            } ] }"#,
        )
        .unwrap();
        let rule = &config.limits[0];
        assert_eq!(rule.grid_type, GridType::ShipsOnly);
        assert!(!rule.limit_grids);
        assert_eq!(rule.exceptions, ["42"]);
    }

    #[test]
    fn negative_rule_limit_is_a_parse_error() {
        let err = LimiterConfig::from_json_str(
            r#"{ "limits": [ { "name": "r", "block_list": ["X"], "limit": -1 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn duplicate_rule_names_are_rejected() {
        let config = LimiterConfig {
            limits: vec![named("a"), named("b"), named("a")],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateRule { name }) if name == "a"
        ));
    }

    #[test]
    fn empty_block_list_is_rejected() {
        let mut rule = named("nothing");
        rule.block_list.clear();
        let config = LimiterConfig {
            limits: vec![rule],
            ..Default::default()
        };
        assert!(matches!(
            config.into_rule_set(RuleSetVersion(1)),
            Err(ConfigError::EmptyBlockList { .. })
        ));
    }

    #[test]
    fn zero_rule_limit_is_rejected() {
        let mut rule = named("banned");
        rule.limit = 0;
        let config = LimiterConfig {
            limits: vec![rule],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(&err, ConfigError::ZeroLimit { name } if name == "banned"));
        assert_eq!(err.to_string(), "rule 'banned' has a zero limit");

        let parsed = LimiterConfig::from_json_str(
            r#"{ "limits": [ { "name": "r", "block_list": ["X"], "limit": 0 } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            parsed.into_rule_set(RuleSetVersion(1)),
            Err(ConfigError::ZeroLimit { .. })
        ));
    }

    #[test]
    fn json_round_trip_preserves_rules() {
        let config = LimiterConfig {
            enable_limits: false,
            thresholds: Thresholds {
                max_blocks_per_station: 5000,
                ..Default::default()
            },
            exceptions: vec!["7".into()],
            limits: vec![named("reactors")],
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(LimiterConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn rule_set_converts_back() {
        let config = LimiterConfig {
            limits: vec![named("reactors")],
            ..Default::default()
        };
        let rules = config.clone().into_rule_set(RuleSetVersion(3)).unwrap();
        assert_eq!(LimiterConfig::from(&rules), config);
    }
}
