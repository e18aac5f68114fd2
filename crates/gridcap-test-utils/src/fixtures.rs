//! Grid, blueprint, and rule fixtures.
//!
//! - [`GridBuilder`] — fluent construction of [`Grid`] and [`GridBlueprint`].
//! - [`rule`] — a grid-level [`LimitRule`] matching one block type.

use std::sync::atomic::{AtomicU64, Ordering};

use gridcap_core::{
    Block, BlockDefinition, BlockId, EntityId, Grid, GridBlueprint, GridSize, GridType, LimitRule,
    OwnerId, Owners,
};

/// Counter for generated block ids.
///
/// Starts high so hand-picked ids in tests never collide with generated
/// ones.
static NEXT_BLOCK_ID: AtomicU64 = AtomicU64::new(1_000_000);

fn next_block_id() -> BlockId {
    BlockId(NEXT_BLOCK_ID.fetch_add(1, Ordering::Relaxed))
}

/// Builder for test grids.
///
/// Grids start as ships with no owners and no blocks. Blocks added with
/// [`blocks`](GridBuilder::blocks) get process-unique ids, so two built
/// grids never share a block unless [`block`](GridBuilder::block) is used
/// with the same id.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    id: EntityId,
    size: GridSize,
    is_static: bool,
    owners: Owners,
    blocks: Vec<Block>,
}

impl GridBuilder {
    pub fn new(id: i64, size: GridSize) -> Self {
        Self {
            id: EntityId(id),
            size,
            is_static: false,
            owners: Owners::new(),
            blocks: Vec::new(),
        }
    }

    pub fn small(id: i64) -> Self {
        Self::new(id, GridSize::Small)
    }

    pub fn large(id: i64) -> Self {
        Self::new(id, GridSize::Large)
    }

    pub fn station(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn ship(mut self) -> Self {
        self.is_static = false;
        self
    }

    pub fn owner(mut self, owner: OwnerId) -> Self {
        self.owners.push(owner);
        self
    }

    /// Add `count` fresh blocks of `type_id`.
    pub fn blocks(mut self, type_id: &str, count: usize) -> Self {
        for _ in 0..count {
            self.blocks
                .push(Block::new(next_block_id(), BlockDefinition::new(type_id, "")));
        }
        self
    }

    /// Add one block with an explicit id.
    pub fn block(mut self, id: u64, type_id: &str) -> Self {
        self.blocks
            .push(Block::new(id, BlockDefinition::new(type_id, "")));
        self
    }

    pub fn build(self) -> Grid {
        Grid {
            id: self.id,
            blocks: self.blocks,
            size: self.size,
            is_static: self.is_static,
            owners: self.owners,
        }
    }

    /// Build a blueprint; the id and owners are dropped.
    pub fn blueprint(self) -> GridBlueprint {
        GridBlueprint {
            blocks: self.blocks,
            size: self.size,
            is_static: self.is_static,
            display_name: None,
        }
    }
}

/// A grid-level rule limiting blocks whose type is `type_id`.
pub fn rule(name: &str, type_id: &str, limit: u64, grid_type: GridType) -> LimitRule {
    LimitRule {
        name: name.into(),
        block_list: vec![type_id.into()],
        limit,
        grid_type,
        limit_grids: true,
        exceptions: Vec::new(),
    }
}
