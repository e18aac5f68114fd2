//! Block-limit decision engine for gridcap.
//!
//! Decides whether grids may be merged, converted between ship and
//! station, or spawned, and whether an existing grid is over its size
//! thresholds. Decisions are pure functions of one rule-set snapshot and
//! the grid views passed in.
//!
//! The per-operation checkers ([`quota`], [`merge`], [`conversion`],
//! [`spawn`]) take a [`RuleContext`](context::RuleContext) and can be used
//! directly; each admits everything while the context's rule set is
//! disabled. Most hosts use the [`Limiter`] facade, which owns the
//! collaborators and a [`RuleSetStore`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classify;
pub mod config;
pub mod context;
pub mod conversion;
pub mod defaults;
pub mod limiter;
pub mod merge;
pub mod quota;
pub mod spawn;
pub mod store;

pub use config::{ConfigError, LimiterConfig};
pub use context::RuleContext;
pub use limiter::{Limiter, LimiterBuilder};
pub use store::RuleSetStore;
