//! Obstacle change notification
//!
//! When an obstacle, structure or resource is placed, in-flight move
//! actions need to know whether their cached path just became invalid.
//! The bus is injected explicitly into the world and into each move
//! action; there is no global channel. Delivery is synchronous: every
//! live subscriber is visited before the placing call returns.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::core::types::{Position, TileCoord};

/// Per-subscriber cell watched by one in-flight move action.
///
/// The move action records its cached waypoints here; the bus marks the
/// watch invalidated when a newly placed obstacle lies on those waypoints.
/// Off-path obstacles leave the watch untouched, so unaffected moves never
/// replan.
#[derive(Debug, Default)]
pub struct PathWatch {
    waypoints: Vec<TileCoord>,
    invalidated: bool,
}

impl PathWatch {
    /// Record the waypoints of a freshly computed path
    pub fn set_path(&mut self, path: &[Position]) {
        self.waypoints = path.iter().map(|p| TileCoord::from_position(*p)).collect();
        self.invalidated = false;
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    pub fn covers(&self, coord: TileCoord) -> bool {
        self.waypoints.contains(&coord)
    }

    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Consume the invalidation flag, returning whether it was set
    pub fn take_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }
}

/// Synchronous publish/subscribe channel for obstacle placements
#[derive(Debug, Default)]
pub struct ObstacleBus {
    watchers: RefCell<Vec<Weak<RefCell<PathWatch>>>>,
}

impl ObstacleBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new watch; the subscription lives as long as the
    /// returned handle (dropped move actions unsubscribe automatically).
    pub fn subscribe(&self) -> Rc<RefCell<PathWatch>> {
        let watch = Rc::new(RefCell::new(PathWatch::default()));
        self.watchers.borrow_mut().push(Rc::downgrade(&watch));
        watch
    }

    /// Announce a newly blocked tile to all current subscribers.
    ///
    /// Watches whose cached path crosses the tile are invalidated inline;
    /// dead subscriptions are pruned as a side effect.
    pub fn publish(&self, coord: TileCoord) {
        self.watchers.borrow_mut().retain(|weak| {
            let Some(cell) = weak.upgrade() else {
                return false;
            };
            let mut watch = cell.borrow_mut();
            if watch.covers(coord) {
                watch.invalidate();
            }
            true
        });
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.watchers.borrow().len()
    }
}
