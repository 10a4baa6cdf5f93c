//! Capacity-bounded item storage held inside structures

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::world::objects::ItemKind;

const DEFAULT_CAPACITY: u32 = 100;

/// Item storage with one capacity shared across every kind.
///
/// Transfers are all-or-nothing: `store` and `withdraw` either move the
/// full amount or leave the stockpile untouched, so an item can never be
/// destroyed at the transfer boundary. Callers that split a transfer
/// across two owners check the result before touching the other side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stockpile {
    items: AHashMap<ItemKind, u32>,
    capacity: u32,
}

impl Default for Stockpile {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Stockpile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            items: AHashMap::new(),
            capacity,
        }
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        self.items.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.items.values().sum()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Whether `amount` more items fit, regardless of kind
    pub fn has_space(&self, amount: u32) -> bool {
        self.total() + amount <= self.capacity
    }

    /// Store `amount` of `kind`; false (and no change) when space is short
    pub fn store(&mut self, kind: ItemKind, amount: u32) -> bool {
        if !self.has_space(amount) {
            return false;
        }
        *self.items.entry(kind).or_insert(0) += amount;
        true
    }

    /// Withdraw `amount` of `kind`; false (and no change) if short
    pub fn withdraw(&mut self, kind: ItemKind, amount: u32) -> bool {
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
}
