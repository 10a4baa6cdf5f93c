//! What a being carries

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::world::objects::ItemKind;

/// Item counts carried by a single being
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: AHashMap<ItemKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: ItemKind, amount: u32) {
        *self.items.entry(kind).or_insert(0) += amount;
    }

    /// Remove `amount` of `kind`; false (and no change) if short
    pub fn remove(&mut self, kind: ItemKind, amount: u32) -> bool {
        match self.items.get_mut(&kind) {
            Some(count) if *count >= amount => {
                *count -= amount;
                if *count == 0 {
                    self.items.remove(&kind);
                }
                true
            }
            _ => false,
        }
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        self.items.get(&kind).copied().unwrap_or(0)
    }

    pub fn has(&self, kind: ItemKind) -> bool {
        self.count(kind) > 0
    }

    /// Some edible item kind currently carried, if any.
    ///
    /// Scans a fixed kind order so the choice is deterministic.
    pub fn any_edible(&self) -> Option<ItemKind> {
        [ItemKind::Berries, ItemKind::Fish]
            .into_iter()
            .find(|kind| self.has(*kind))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.items.values().sum()
    }
}
