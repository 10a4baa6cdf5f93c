//! The move action: path caching, waypoint following, replanning

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::being::Being;
use crate::core::types::Position;
use crate::pathfinding::Pathfinder;
use crate::world::grid::GridWorld;
use crate::world::notify::PathWatch;

#[derive(Debug, Clone, PartialEq)]
enum MoveState {
    /// No cached path; the next perform requests one
    PathPending,
    /// Following cached waypoints, head first
    Following(VecDeque<Position>),
    /// No route exists; terminal, treated as completed so the role is
    /// asked again next tick instead of blocking forever
    Stuck,
}

/// Steers a being along a computed path toward a fixed destination.
///
/// The action never moves the being itself; it only retargets the being's
/// movement destination to the next waypoint. Physical movement happens in
/// the being's own update step.
pub struct MoveAction {
    destination: Position,
    state: MoveState,
    pathfinder: Rc<dyn Pathfinder>,
    watch: Rc<RefCell<PathWatch>>,
}

impl MoveAction {
    pub fn new(
        destination: Position,
        pathfinder: Rc<dyn Pathfinder>,
        watch: Rc<RefCell<PathWatch>>,
    ) -> Self {
        Self {
            destination,
            state: MoveState::PathPending,
            pathfinder,
            watch,
        }
    }

    pub fn destination(&self) -> Position {
        self.destination
    }

    pub fn is_stuck(&self) -> bool {
        matches!(self.state, MoveState::Stuck)
    }

    pub fn perform(&mut self, being: &mut Being, world: &GridWorld) {
        // An obstacle landed on the cached path: discard it and recompute
        // from wherever the being is now. Off-path obstacles never set the
        // flag, so unaffected moves keep their cache.
        if self.watch.borrow_mut().take_invalidated() {
            tracing::debug!(destination = ?self.destination, "path obstructed, replanning");
            self.watch.borrow_mut().clear();
            self.state = MoveState::PathPending;
        }

        if self.state == MoveState::PathPending {
            let path = self.pathfinder.path(world, being.position, self.destination);
            if path.is_empty() {
                tracing::debug!(destination = ?self.destination, "no route, move is stuck");
                self.state = MoveState::Stuck;
                return;
            }
            self.watch.borrow_mut().set_path(&path);
            self.state = MoveState::Following(path.into());
        }

        if let MoveState::Following(waypoints) = &mut self.state {
            if waypoints.front() == Some(&being.position) {
                waypoints.pop_front();
            }
            match waypoints.front() {
                Some(next) => being.destination = *next,
                None => being.destination = self.destination,
            }
        }
    }

    pub fn is_completed(&self, being: &Being) -> bool {
        self.is_stuck() || being.position == self.destination
    }
}

/// Two moves are the same goal iff their destinations are equal; the
/// path cache is an internal detail and never leaks into equality.
impl PartialEq for MoveAction {
    fn eq(&self, other: &Self) -> bool {
        self.destination == other.destination
    }
}

impl fmt::Debug for MoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveAction")
            .field("destination", &self.destination)
            .field("state", &self.state)
            .finish()
    }
}
