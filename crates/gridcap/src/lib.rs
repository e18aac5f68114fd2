//! gridcap: block-limit admission control for multiplayer grid servers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the gridcap sub-crates. For most hosts, adding `gridcap` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use gridcap::prelude::*;
//!
//! let store = Arc::new(RuleSetStore::empty());
//! store
//!     .publish_json(r#"{
//!         "max_blocks_per_ship": 50,
//!         "limits": [
//!             { "name": "reactors", "block_list": ["Reactor"], "limit": 5 }
//!         ]
//!     }"#)
//!     .unwrap();
//!
//! let limiter = Limiter::builder().rules(store).build();
//!
//! let reactor = BlockDefinition::new("Reactor", "LargeBlockSmallGenerator");
//! let ship = |id: i64, first_block: u64, n: u64| Grid {
//!     id: EntityId(id),
//!     blocks: (first_block..first_block + n)
//!         .map(|b| Block::new(b, reactor.clone()))
//!         .collect(),
//!     size: GridSize::Large,
//!     is_static: false,
//!     owners: Owners::new(),
//! };
//!
//! let a = ship(1, 0, 3);
//! let b = ship(2, 100, 3);
//! assert!(!limiter.can_merge(Some(&a), Some(&b))); // six reactors
//! assert!(limiter.can_merge(Some(&a), Some(&ship(3, 200, 2))));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridcap-core` | IDs, grid views, rules, thresholds, denials, collaborator traits |
//! | [`engine`] | `gridcap-engine` | Checkers, configuration, rule-set store, `Limiter` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`gridcap-core`).
///
/// Contains grid and block views, limit rules, thresholds, denial
/// reasons, and the collaborator traits ([`types::BlockMatcher`],
/// [`types::ExceptionLookup`], [`types::BlockCounter`],
/// [`types::GridLookup`], [`types::RuleSetProvider`]).
pub use gridcap_core as types;

/// Decision engine (`gridcap-engine`).
///
/// [`engine::Limiter`] for the boolean entry points,
/// [`engine::RuleSetStore`] for hot-reloadable configuration, and the
/// per-operation checker modules for hosts that manage snapshots
/// themselves.
pub use gridcap_engine as engine;

/// Common imports for typical gridcap usage.
///
/// ```rust
/// use gridcap::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use gridcap_core::{
        Block, BlockCounter, BlockDefinition, BlockId, BlockMatcher, EntityId, ExceptionLookup,
        Grid, GridBlueprint, GridClass, GridLookup, GridSize, GridType, LimitRule, OwnerId,
        Owners, RuleSet, RuleSetProvider, Thresholds,
    };

    // Denials
    pub use gridcap_core::{Denial, SizeViolation};

    // Engine
    pub use gridcap_engine::{ConfigError, Limiter, LimiterConfig, RuleSetStore};
}
