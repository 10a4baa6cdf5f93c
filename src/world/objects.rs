//! Structures and harvestable resources occupying world tiles

use serde::{Deserialize, Serialize};

use crate::colony::stockpile::Stockpile;
use crate::core::types::{Position, ResourceId, StructureId};

/// Items that beings carry, deliver and consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Wood,
    Stone,
    Fish,
    Berries,
}

impl ItemKind {
    /// Whether a hungry being can eat this item
    pub fn is_edible(&self) -> bool {
        matches!(self, ItemKind::Fish | ItemKind::Berries)
    }
}

/// Kinds of harvestable world resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Tree,
    Rock,
    FishingSpot,
    BerryBush,
}

impl ResourceKind {
    /// Item produced by harvesting one unit of this resource
    pub fn yields(&self) -> ItemKind {
        match self {
            ResourceKind::Tree => ItemKind::Wood,
            ResourceKind::Rock => ItemKind::Stone,
            ResourceKind::FishingSpot => ItemKind::Fish,
            ResourceKind::BerryBush => ItemKind::Berries,
        }
    }

    /// Whether harvesting this resource yields food
    pub fn is_edible_source(&self) -> bool {
        self.yields().is_edible()
    }
}

/// A harvestable resource occupying one tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    id: ResourceId,
    kind: ResourceKind,
    position: Position,
    stock: u32,
}

impl Resource {
    pub fn new(kind: ResourceKind, position: Position, stock: u32) -> Self {
        Self {
            id: ResourceId::new(),
            kind,
            position,
            stock,
        }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn has_stock(&self) -> bool {
        self.stock > 0
    }

    /// Harvest one unit, yielding its item kind while stock remains
    pub fn take_one(&mut self) -> Option<ItemKind> {
        if self.stock == 0 {
            return None;
        }
        self.stock -= 1;
        Some(self.kind.yields())
    }
}

/// Kinds of buildable structures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    House,
    Storehouse,
}

impl StructureKind {
    /// Materials required to complete construction
    pub fn requirements(&self) -> &'static [(ItemKind, u32)] {
        match self {
            StructureKind::House => &[(ItemKind::Wood, 4), (ItemKind::Stone, 2)],
            StructureKind::Storehouse => &[(ItemKind::Wood, 6)],
        }
    }

    /// How many items the structure's storage holds once complete
    pub fn storage_capacity(&self) -> u32 {
        match self {
            StructureKind::House => 8,
            StructureKind::Storehouse => 100,
        }
    }
}

/// A structure occupying one tile.
///
/// While `needed` is non-empty the structure is an incomplete construction
/// site accepting Build deliveries. Once complete it acts as a storable /
/// takeable for item-transfer actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    id: StructureId,
    kind: StructureKind,
    position: Position,
    /// Remaining construction requirements, in requirement-list order
    needed: Vec<(ItemKind, u32)>,
    storage: Stockpile,
}

impl Structure {
    pub fn new(kind: StructureKind, position: Position) -> Self {
        Self {
            id: StructureId::new(),
            kind,
            position,
            needed: kind.requirements().to_vec(),
            storage: Stockpile::with_capacity(kind.storage_capacity()),
        }
    }

    pub fn id(&self) -> StructureId {
        self.id
    }

    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_complete(&self) -> bool {
        self.needed.is_empty()
    }

    /// First item kind still needed for construction.
    ///
    /// The order is the requirement-list order fixed at placement, so one
    /// delivery per completed work cycle drains requirements deterministically.
    pub fn next_needed(&self) -> Option<ItemKind> {
        self.needed.first().map(|(kind, _)| *kind)
    }

    /// Accept one delivered unit of `kind` toward construction.
    ///
    /// Returns false if the structure no longer needs that kind.
    pub fn deliver(&mut self, kind: ItemKind) -> bool {
        let Some(entry) = self.needed.iter_mut().find(|(k, _)| *k == kind) else {
            return false;
        };
        entry.1 -= 1;
        self.needed.retain(|(_, n)| *n > 0);
        true
    }

    pub fn storage(&self) -> &Stockpile {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut Stockpile {
        &mut self.storage
    }
}
