#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shortest-path and range queries over walkable board tiles.

use std::{
    cmp::Reverse,
    collections::{BTreeSet, BinaryHeap, HashMap, HashSet, VecDeque},
};

use board_topology_board::GridIndex;
use board_topology_core::GridCoord;
use log::trace;

/// Outcome of a shortest-path query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// Shortest route from start to goal, both endpoints included.
    Found(Vec<GridCoord>),
    /// Either endpoint is not walkable, or the two lie in different regions.
    NoPath,
    /// The search hit its expansion budget before reaching the goal.
    BudgetExhausted {
        /// Nodes expanded before the search gave up.
        expanded: usize,
    },
}

impl PathResult {
    /// Route when one was found.
    #[must_use]
    pub fn path(&self) -> Option<&[GridCoord]> {
        match self {
            Self::Found(path) => Some(path),
            Self::NoPath | Self::BudgetExhausted { .. } => None,
        }
    }

    /// Number of moves along the route when one was found.
    #[must_use]
    pub fn steps(&self) -> Option<usize> {
        self.path().map(|path| path.len().saturating_sub(1))
    }
}

/// Open-set entry ordered by estimated total cost, then heuristic, then
/// insertion order, all ascending once wrapped in [`Reverse`].
type OpenEntry = Reverse<(u32, u32, u64, GridCoord)>;

/// Pathfinding queries over a borrowed tile index.
#[derive(Clone, Copy, Debug)]
pub struct PathFinder<'a> {
    grid: &'a GridIndex,
    expansion_budget: Option<usize>,
}

impl<'a> PathFinder<'a> {
    /// Pathfinder without an expansion limit.
    #[must_use]
    pub const fn new(grid: &'a GridIndex) -> Self {
        Self {
            grid,
            expansion_budget: None,
        }
    }

    /// Caps the number of nodes a single search may expand.
    #[must_use]
    pub fn with_expansion_budget(mut self, budget: usize) -> Self {
        self.expansion_budget = Some(budget);
        self
    }

    /// A* search with unit edge cost and a Manhattan heuristic.
    ///
    /// Among entries with equal estimated cost the one closer to the goal is
    /// expanded first, then the one queued earliest.
    #[must_use]
    pub fn find_path(&self, start: GridCoord, goal: GridCoord) -> PathResult {
        if !self.grid.is_walkable(start) || !self.grid.is_walkable(goal) {
            trace!("no path from {start} to {goal}: endpoint not walkable");
            return PathResult::NoPath;
        }
        if start == goal {
            return PathResult::Found(vec![start]);
        }

        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        let mut g_score: HashMap<GridCoord, u32> = HashMap::new();
        let mut came_from: HashMap<GridCoord, GridCoord> = HashMap::new();
        let mut closed: HashSet<GridCoord> = HashSet::new();
        let mut sequence: u64 = 0;
        let mut expanded = 0;

        let start_h = start.manhattan_distance(goal);
        let _ = g_score.insert(start, 0);
        open.push(Reverse((start_h, start_h, sequence, start)));

        while let Some(Reverse((_, _, _, current))) = open.pop() {
            if !closed.insert(current) {
                continue;
            }

            if current == goal {
                trace!("path from {start} to {goal} found after {expanded} expansions");
                return PathResult::Found(reconstruct(&came_from, start, goal));
            }

            if self
                .expansion_budget
                .is_some_and(|budget| expanded >= budget)
            {
                trace!("path from {start} to {goal} abandoned after {expanded} expansions");
                return PathResult::BudgetExhausted { expanded };
            }
            expanded += 1;

            let current_g = g_score.get(&current).copied().unwrap_or(u32::MAX);
            let tentative = current_g.saturating_add(1);

            for neighbor in self.grid.neighbors(current) {
                if closed.contains(&neighbor) || !self.grid.is_walkable(neighbor) {
                    continue;
                }

                let known = g_score.get(&neighbor).copied().unwrap_or(u32::MAX);
                if tentative >= known {
                    continue;
                }

                let _ = g_score.insert(neighbor, tentative);
                let _ = came_from.insert(neighbor, current);
                let h = neighbor.manhattan_distance(goal);
                sequence += 1;
                open.push(Reverse((tentative.saturating_add(h), h, sequence, neighbor)));
            }
        }

        trace!("no path from {start} to {goal} after {expanded} expansions");
        PathResult::NoPath
    }

    /// Walkable tiles within `max_steps` moves of `start`, excluding `start`.
    #[must_use]
    pub fn get_reachable(&self, start: GridCoord, max_steps: u32) -> BTreeSet<GridCoord> {
        let mut reachable = BTreeSet::new();
        if !self.grid.is_walkable(start) {
            return reachable;
        }

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0u32)]);

        while let Some((cell, steps)) = queue.pop_front() {
            if steps >= max_steps {
                continue;
            }

            for neighbor in self.grid.neighbors(cell) {
                if !self.grid.is_walkable(neighbor) || !visited.insert(neighbor) {
                    continue;
                }
                let _ = reachable.insert(neighbor);
                queue.push_back((neighbor, steps + 1));
            }
        }

        reachable
    }

    /// Checks that a route has at least two walkable nodes joined by single moves.
    #[must_use]
    pub fn validate_path(&self, path: &[GridCoord]) -> bool {
        path.len() >= 2
            && path.iter().all(|coord| self.grid.is_walkable(*coord))
            && path.windows(2).all(|pair| pair[0].is_adjacent(pair[1]))
    }

    /// Reports whether a straight row or column of walkable tiles joins the two cells.
    #[must_use]
    pub fn has_direct_path(&self, from: GridCoord, to: GridCoord) -> bool {
        if from.x() == to.x() {
            let (low, high) = ordered(from.z(), to.z());
            (low..=high).all(|z| self.grid.is_walkable(GridCoord::new(from.x(), z)))
        } else if from.z() == to.z() {
            let (low, high) = ordered(from.x(), to.x());
            (low..=high).all(|x| self.grid.is_walkable(GridCoord::new(x, from.z())))
        } else {
            false
        }
    }
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn reconstruct(
    came_from: &HashMap<GridCoord, GridCoord>,
    start: GridCoord,
    goal: GridCoord,
) -> Vec<GridCoord> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&previous) => {
                path.push(previous);
                current = previous;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
