//! Point-in-time views of grids and their blocks.
//!
//! The quota engine never mutates a grid. Callers hand it a [`Grid`] (a
//! live entity already in the simulation) or a [`GridBlueprint`] (an
//! object-builder description that has not been spawned yet) and get a
//! decision back.

use std::fmt;

use smallvec::SmallVec;

use crate::id::{BlockId, EntityId, OwnerId};

/// Owner list for a grid. Most grids have one or two big owners.
pub type Owners = SmallVec<[OwnerId; 2]>;

/// Size class of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridSize {
    /// Small block grid.
    Small,
    /// Large block grid.
    Large,
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Small => write!(f, "small"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// Type descriptor of a block, as consumed by a
/// [`BlockMatcher`](crate::traits::BlockMatcher).
///
/// The core never interprets these strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockDefinition {
    /// Definition type, e.g. `"Reactor"`.
    pub type_id: String,
    /// Definition subtype, e.g. `"LargeBlockSmallGenerator"`. May be empty.
    pub subtype_id: String,
}

impl BlockDefinition {
    /// Build a definition from its type and subtype.
    pub fn new(type_id: impl Into<String>, subtype_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            subtype_id: subtype_id.into(),
        }
    }
}

impl fmt::Display for BlockDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.subtype_id.is_empty() {
            write!(f, "{}", self.type_id)
        } else {
            write!(f, "{}/{}", self.type_id, self.subtype_id)
        }
    }
}

/// A single block within a grid.
///
/// A block belongs to exactly one grid at a time; ownership moves
/// atomically during a merge. `id` is the identity used for set union.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// Stable block identity.
    pub id: BlockId,
    /// Type descriptor used for rule matching.
    pub definition: BlockDefinition,
}

impl Block {
    /// Build a block from an id and a definition.
    pub fn new(id: impl Into<BlockId>, definition: BlockDefinition) -> Self {
        Self {
            id: id.into(),
            definition,
        }
    }
}

/// Classification inputs shared by live grids and blueprints.
///
/// The classifier and the size evaluator only need these two facts
/// plus a block count, so both grid views implement this trait and the
/// checks are written once.
pub trait GridClass {
    /// Size class of the grid.
    fn size(&self) -> GridSize;

    /// Mobility: `true` for stations, `false` for ships.
    fn is_static(&self) -> bool;

    /// Number of blocks in the grid.
    fn block_count(&self) -> usize;
}

/// A live grid, read as a point-in-time snapshot.
///
/// # Examples
///
/// ```
/// use gridcap_core::{Block, BlockDefinition, EntityId, Grid, GridClass, GridSize, OwnerId};
///
/// let grid = Grid {
///     id: EntityId(100),
///     blocks: vec![Block::new(1, BlockDefinition::new("Reactor", "Small"))],
///     size: GridSize::Large,
///     is_static: false,
///     owners: [OwnerId(7)].into_iter().collect(),
/// };
///
/// assert_eq!(grid.block_count(), 1);
/// assert!(grid.is_owned_by(OwnerId(7)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    /// Simulation id of the grid.
    pub id: EntityId,
    /// Blocks currently on the grid.
    pub blocks: Vec<Block>,
    /// Size class.
    pub size: GridSize,
    /// Mobility flag.
    pub is_static: bool,
    /// Majority owners of the grid.
    pub owners: Owners,
}

impl Grid {
    /// Whether `owner` is one of the grid's big owners.
    pub fn is_owned_by(&self, owner: OwnerId) -> bool {
        self.owners.contains(&owner)
    }
}

impl GridClass for Grid {
    fn size(&self) -> GridSize {
        self.size
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// A grid description that has not entered the simulation yet.
///
/// Blueprints come from projections, paste requests, and prefab spawns.
/// They carry no id and no owners.
#[derive(Clone, Debug, PartialEq)]
pub struct GridBlueprint {
    /// Blocks the grid would be built with.
    pub blocks: Vec<Block>,
    /// Size class.
    pub size: GridSize,
    /// Mobility flag.
    pub is_static: bool,
    /// Name shown to players, if any.
    pub display_name: Option<String>,
}

impl GridClass for GridBlueprint {
    fn size(&self) -> GridSize {
        self.size
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_display_omits_empty_subtype() {
        assert_eq!(BlockDefinition::new("Reactor", "").to_string(), "Reactor");
        assert_eq!(
            BlockDefinition::new("Reactor", "LargeBlockSmallGenerator").to_string(),
            "Reactor/LargeBlockSmallGenerator"
        );
    }

    #[test]
    fn blueprint_and_grid_share_classification() {
        let blocks = vec![
            Block::new(1, BlockDefinition::new("Armor", "")),
            Block::new(2, BlockDefinition::new("Armor", "")),
        ];
        let grid = Grid {
            id: EntityId(1),
            blocks: blocks.clone(),
            size: GridSize::Small,
            is_static: true,
            owners: Owners::new(),
        };
        let blueprint = GridBlueprint {
            blocks,
            size: GridSize::Small,
            is_static: true,
            display_name: None,
        };
        assert_eq!(grid.block_count(), blueprint.block_count());
        assert_eq!(GridClass::size(&grid), GridClass::size(&blueprint));
        assert_eq!(
            GridClass::is_static(&grid),
            GridClass::is_static(&blueprint)
        );
    }
}
