//! Test utilities and mock collaborators for gridcap development.
//!
//! Provides fake implementations of the core collaborator traits
//! ([`BlockMatcher`], [`ExceptionLookup`], [`BlockCounter`],
//! [`GridLookup`]) and the [`fixtures`] builders for grids and rules.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use gridcap_core::{
    Block, BlockCounter, BlockDefinition, BlockId, BlockMatcher, EntityId, ExceptionLookup, Grid,
    GridLookup, LimitRule, OwnerId,
};

pub use fixtures::{rule, GridBuilder};

/// Matches when a rule token equals the block's type id exactly.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeMatcher;

impl BlockMatcher for TypeMatcher {
    fn is_match(&self, definition: &BlockDefinition, rule: &LimitRule) -> bool {
        rule.block_list.iter().any(|t| *t == definition.type_id)
    }
}

/// Exemption lookup that compares tokens to the decimal id.
///
/// Counts calls so tests can assert a path never consulted exemptions.
#[derive(Debug, Default)]
pub struct TokenExceptions {
    calls: AtomicUsize,
}

impl TokenExceptions {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ExceptionLookup for TokenExceptions {
    fn is_excepted(&self, id: i64, exceptions: &[String]) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let id = id.to_string();
        exceptions.iter().any(|t| *t == id)
    }
}

#[derive(Clone, Copy, Debug)]
enum CounterMode {
    AllowAll,
    /// Admit the first `n` blocks, refuse the next one.
    RefuseFrom(usize),
}

/// Mock per-owner counter.
///
/// Records how often it was called and for which owner.
#[derive(Debug)]
pub struct MockCounter {
    mode: CounterMode,
    calls: AtomicUsize,
    last_owner: Mutex<Option<OwnerId>>,
}

impl MockCounter {
    fn with_mode(mode: CounterMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
            last_owner: Mutex::new(None),
        }
    }

    pub fn allow_all() -> Self {
        Self::with_mode(CounterMode::AllowAll)
    }

    pub fn refuse_all() -> Self {
        Self::with_mode(CounterMode::RefuseFrom(0))
    }

    pub fn refuse_from(admitted: usize) -> Self {
        Self::with_mode(CounterMode::RefuseFrom(admitted))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn last_owner(&self) -> Option<OwnerId> {
        *self.last_owner.lock().unwrap()
    }
}

impl BlockCounter for MockCounter {
    fn can_add(&self, blocks: &[Block], owner: OwnerId) -> Result<(), BlockId> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        *self.last_owner.lock().unwrap() = Some(owner);
        match self.mode {
            CounterMode::AllowAll => Ok(()),
            CounterMode::RefuseFrom(n) => match blocks.get(n) {
                Some(block) => Err(block.id),
                None => Ok(()),
            },
        }
    }
}

/// Grid lookup backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MapGridLookup {
    grids: RwLock<HashMap<EntityId, Arc<Grid>>>,
}

impl MapGridLookup {
    pub fn insert(&self, grid: Grid) {
        self.grids.write().unwrap().insert(grid.id, Arc::new(grid));
    }

    pub fn remove(&self, id: EntityId) {
        self.grids.write().unwrap().remove(&id);
    }
}

impl GridLookup for MapGridLookup {
    fn grid(&self, id: EntityId) -> Option<Arc<Grid>> {
        self.grids.read().unwrap().get(&id).cloned()
    }
}
