//! Core types and traits for the gridcap quota engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: ids, grid and block
//! views, limit rules and thresholds, denial reasons, and the collaborator
//! traits the engine is wired with.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod id;
pub mod rule;
pub mod traits;

pub use error::{Denial, SizeViolation};
pub use grid::{Block, BlockDefinition, Grid, GridBlueprint, GridClass, GridSize, Owners};
pub use id::{BlockId, EntityId, OwnerId, RuleSetVersion};
pub use rule::{GridType, LimitRule, RuleSet, ThresholdKind, Thresholds};
pub use traits::{BlockCounter, BlockMatcher, ExceptionLookup, GridLookup, RuleSetProvider};
