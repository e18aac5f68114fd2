//! Integration test: behaviors that look surprising but are relied on.
//!
//! Each test pins one asymmetry so that a refactor which "fixes" it
//! fails loudly instead of silently changing admission decisions.

use std::sync::Arc;

use gridcap_core::{Denial, GridType, OwnerId, RuleSet, Thresholds};
use gridcap_engine::context::RuleContext;
use gridcap_engine::conversion::check_conversion;
use gridcap_engine::merge::check_merge;
use gridcap_engine::quota::{check_blueprint_size, check_size};
use gridcap_engine::spawn::check_spawn;
use gridcap_test_utils::{rule, GridBuilder, MockCounter, TokenExceptions, TypeMatcher};

// ── Threshold vs. rule boundaries ────────────────────────────────────

#[test]
fn threshold_is_exclusive_but_rule_limit_is_inclusive() {
    let rules = RuleSet {
        thresholds: Thresholds {
            max_blocks_per_ship: 5,
            ..Default::default()
        },
        rules: vec![rule("armor", "Armor", 4, GridType::AllGrids)],
        ..Default::default()
    };
    let exceptions = TokenExceptions::default();
    let ctx = RuleContext::new(&rules, &TypeMatcher, &exceptions);

    // 4 + 0 blocks: at the rule limit, below the threshold.
    let four = GridBuilder::large(1).blocks("Armor", 4).build();
    let none = GridBuilder::large(2).build();
    assert_eq!(check_merge(&ctx, Some(&four), Some(&none)), Ok(()));

    // 5 blocks reach the threshold, which already denies.
    let one = GridBuilder::large(3).blocks("Armor", 1).build();
    assert!(matches!(
        check_merge(&ctx, Some(&four), Some(&one)),
        Err(Denial::Size(_))
    ));
}

// ── Blueprint size check skips exemption ─────────────────────────────

#[test]
fn blueprint_size_check_ignores_exemptions() {
    let rules = RuleSet {
        thresholds: Thresholds {
            max_blocks_large_grid: 3,
            ..Default::default()
        },
        exceptions: vec!["5".into()],
        ..Default::default()
    };
    let exceptions = TokenExceptions::default();
    let ctx = RuleContext::new(&rules, &TypeMatcher, &exceptions);

    let live = GridBuilder::large(10).owner(OwnerId(5)).blocks("Armor", 3);
    let blueprint = live.clone().blueprint();
    let grid = live.build();

    // Live grid owned by an exempt owner passes.
    assert_eq!(check_size(&ctx, Some(&grid), false), Ok(()));

    // The same shape as a blueprint is judged on size alone.
    let before = exceptions.calls();
    assert!(check_blueprint_size(&rules.thresholds, Some(&blueprint)).is_err());
    assert_eq!(exceptions.calls(), before);

    // Spawn restores the bypass through the requesting owner.
    let counter = MockCounter::allow_all();
    assert_eq!(
        check_spawn(&ctx, &counter, Some(&blueprint), OwnerId(5)),
        Ok(())
    );
    assert!(check_spawn(&ctx, &counter, Some(&blueprint), OwnerId(6)).is_err());
}

// ── Conversion rule scoping ──────────────────────────────────────────

fn conversion_rules() -> RuleSet {
    RuleSet {
        rules: vec![
            rule("all", "All", 1, GridType::AllGrids),
            rule("small", "Small", 1, GridType::SmallGridsOnly),
            rule("large", "Large", 1, GridType::LargeGridsOnly),
            rule("stations", "Station", 1, GridType::StationsOnly),
            rule("ships", "Ship", 1, GridType::ShipsOnly),
        ],
        ..Default::default()
    }
}

fn denied_rule(result: Result<(), Denial>) -> Option<String> {
    match result {
        Ok(()) => None,
        Err(Denial::RuleLimit { rule, .. }) => Some(rule),
        Err(other) => panic!("unexpected denial {other:?}"),
    }
}

#[test]
fn conversion_never_counts_all_or_size_scoped_rules() {
    let rules = conversion_rules();
    let exceptions = TokenExceptions::default();
    let ctx = RuleContext::new(&rules, &TypeMatcher, &exceptions);

    for is_static in [false, true] {
        let mut builder = GridBuilder::large(1)
            .blocks("All", 2)
            .blocks("Small", 2)
            .blocks("Large", 2);
        if is_static {
            builder = builder.station();
        }
        let grid = builder.build();
        assert_eq!(denied_rule(check_conversion(&ctx, Some(&grid))), None);
    }
}

#[test]
fn conversion_counts_only_the_target_mobility_rule() {
    let rules = conversion_rules();
    let exceptions = TokenExceptions::default();
    let ctx = RuleContext::new(&rules, &TypeMatcher, &exceptions);

    // A ship about to become a station: station rules are counted, ship
    // rules are not.
    let ship = GridBuilder::large(1)
        .blocks("Ship", 2)
        .blocks("Station", 2)
        .build();
    assert_eq!(
        denied_rule(check_conversion(&ctx, Some(&ship))),
        Some("stations".into())
    );
    let ship_only_ship_blocks = GridBuilder::large(2).blocks("Ship", 3).build();
    assert_eq!(
        denied_rule(check_conversion(&ctx, Some(&ship_only_ship_blocks))),
        None
    );

    // A station about to become a ship: the reverse.
    let station = GridBuilder::large(3)
        .station()
        .blocks("Ship", 2)
        .blocks("Station", 2)
        .build();
    assert_eq!(
        denied_rule(check_conversion(&ctx, Some(&station))),
        Some("ships".into())
    );
}

// ── Merge rule exceptions are per grid id ────────────────────────────

#[test]
fn merge_rule_exception_follows_either_grid_id() {
    let mut reactors = rule("reactors", "Reactor", 1, GridType::AllGrids);
    reactors.exceptions = vec!["1".into()];
    let rules = RuleSet {
        rules: vec![reactors],
        ..Default::default()
    };
    let exceptions = TokenExceptions::default();
    let ctx = RuleContext::new(&rules, &TypeMatcher, &exceptions);

    let listed = GridBuilder::large(1).blocks("Reactor", 2).build();
    let unlisted = GridBuilder::large(2).blocks("Reactor", 2).build();
    let also_unlisted = GridBuilder::large(3).blocks("Reactor", 2).build();

    assert_eq!(check_merge(&ctx, Some(&listed), Some(&unlisted)), Ok(()));
    assert_eq!(check_merge(&ctx, Some(&unlisted), Some(&listed)), Ok(()));
    assert!(check_merge(&ctx, Some(&unlisted), Some(&also_unlisted)).is_err());
}

#[test]
fn merge_rule_exception_ignores_owners() {
    let mut reactors = rule("reactors", "Reactor", 1, GridType::AllGrids);
    reactors.exceptions = vec!["77".into()];
    let rules = RuleSet {
        rules: vec![reactors],
        ..Default::default()
    };
    let exceptions = TokenExceptions::default();
    let ctx = RuleContext::new(&rules, &TypeMatcher, &exceptions);

    let a = GridBuilder::large(1)
        .owner(OwnerId(77))
        .blocks("Reactor", 2)
        .build();
    let b = GridBuilder::large(2).blocks("Reactor", 2).build();
    assert!(check_merge(&ctx, Some(&a), Some(&b)).is_err());
}

#[test]
fn merge_rules_ignore_grid_type_scope() {
    let rules = RuleSet {
        rules: vec![rule("station-reactors", "Reactor", 1, GridType::StationsOnly)],
        ..Default::default()
    };
    let exceptions = TokenExceptions::default();
    let ctx = RuleContext::new(&rules, &TypeMatcher, &exceptions);

    let a = GridBuilder::large(1).blocks("Reactor", 1).build();
    let b = GridBuilder::large(2).blocks("Reactor", 1).build();
    assert!(check_merge(&ctx, Some(&a), Some(&b)).is_err());
}

// ── Kill switch ──────────────────────────────────────────────────────

#[test]
fn disabled_rule_set_admits_through_every_checker() {
    let rules = RuleSet {
        enabled: false,
        thresholds: Thresholds {
            max_blocks_per_ship: 1,
            max_blocks_per_station: 1,
            ..Default::default()
        },
        rules: vec![rule("reactors", "Reactor", 1, GridType::AllGrids)],
        ..Default::default()
    };
    let exceptions = TokenExceptions::default();
    let ctx = RuleContext::new(&rules, &TypeMatcher, &exceptions);
    let counter = MockCounter::refuse_all();

    let a = GridBuilder::large(1).blocks("Reactor", 5).build();
    let b = GridBuilder::large(2).station().blocks("Reactor", 5).build();
    assert_eq!(check_size(&ctx, Some(&a), false), Ok(()));
    assert_eq!(check_merge(&ctx, Some(&a), Some(&b)), Ok(()));
    assert_eq!(check_conversion(&ctx, Some(&b)), Ok(()));
    assert_eq!(check_spawn(&ctx, &counter, None, OwnerId(5)), Ok(()));
    assert_eq!(counter.calls(), 0);
}

// ── Snapshot isolation ───────────────────────────────────────────────

#[test]
fn decision_reads_one_snapshot() {
    let rules = Arc::new(RuleSet {
        thresholds: Thresholds {
            max_blocks_per_ship: 3,
            ..Default::default()
        },
        ..Default::default()
    });
    let held = Arc::clone(&rules);
    let exceptions = TokenExceptions::default();
    let ctx = RuleContext::new(&held, &TypeMatcher, &exceptions);
    drop(rules);

    let ship = GridBuilder::large(1).blocks("Armor", 3).build();
    assert!(check_size(&ctx, Some(&ship), false).is_err());
}
