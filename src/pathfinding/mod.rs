//! A* pathfinding over the tile grid
//!
//! Manhattan distance is the heuristic; on a 4-connected grid with
//! uniform step cost it is admissible and consistent. Non-walkable tiles
//! carry an infinite cost and are skipped during relaxation, which
//! excludes them from every route without removing them from the graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;
use ordered_float::OrderedFloat;

use crate::core::types::{Position, TileCoord};
use crate::world::grid::GridWorld;

/// Route computation seam.
///
/// Behind a trait so callers can swap in instrumented implementations;
/// replanning tests count calls through this boundary.
pub trait Pathfinder {
    /// Walkable route from `from` to `to`, inclusive of both endpoints.
    ///
    /// An empty result means the goal is unreachable. Callers treat that
    /// as a steady-state outcome, not an error.
    fn path(&self, world: &GridWorld, from: Position, to: Position) -> Vec<Position>;
}

/// Node in the A* open set
#[derive(Debug, Clone, Copy)]
struct PathNode {
    coord: TileCoord,
    /// g_cost + heuristic
    f_cost: OrderedFloat<f32>,
    /// Insertion sequence; breaks f-cost ties deterministically
    seq: u64,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; earlier insertion wins ties
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Standard A* with a lazy exit: success is detected when the goal is
/// popped from the frontier, not when it is first discovered.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar;

impl Pathfinder for AStar {
    fn path(&self, world: &GridWorld, from: Position, to: Position) -> Vec<Position> {
        let start = TileCoord::from_position(from);
        let goal = TileCoord::from_position(to);

        if !world.in_bounds(start) || !world.in_bounds(goal) {
            return Vec::new();
        }
        if start == goal {
            return vec![start.position()];
        }

        let mut open_set = BinaryHeap::new();
        let mut came_from: AHashMap<TileCoord, TileCoord> = AHashMap::new();
        let mut g_scores: AHashMap<TileCoord, f32> = AHashMap::new();
        let mut seq = 0u64;

        g_scores.insert(start, 0.0);
        open_set.push(PathNode {
            coord: start,
            f_cost: OrderedFloat(start.manhattan_distance(&goal) as f32),
            seq,
        });

        while let Some(current) = open_set.pop() {
            if current.coord == goal {
                return reconstruct_path(&came_from, current.coord);
            }

            let current_g = *g_scores.get(&current.coord).unwrap_or(&f32::INFINITY);

            for neighbour in current.coord.neighbours() {
                let Some(tile) = world.tile_at_coord(neighbour) else {
                    continue;
                };

                let move_cost = tile.cost();
                if move_cost.is_infinite() {
                    continue;
                }

                let tentative_g = current_g + move_cost;
                let neighbour_g = *g_scores.get(&neighbour).unwrap_or(&f32::INFINITY);

                if tentative_g < neighbour_g {
                    came_from.insert(neighbour, current.coord);
                    g_scores.insert(neighbour, tentative_g);

                    seq += 1;
                    open_set.push(PathNode {
                        coord: neighbour,
                        f_cost: OrderedFloat(
                            tentative_g + neighbour.manhattan_distance(&goal) as f32,
                        ),
                        seq,
                    });
                }
            }
        }

        Vec::new() // No path found
    }
}

/// Reconstruct path from came_from map
fn reconstruct_path(came_from: &AHashMap<TileCoord, TileCoord>, mut current: TileCoord) -> Vec<Position> {
    let mut path = vec![current.position()];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev.position());
        current = prev;
    }
    path.reverse();
    path
}
