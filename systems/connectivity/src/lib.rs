#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Flood-fill connectivity analysis over a board's tile index.
//!
//! Every query is a pure pass over an immutable [`GridIndex`] snapshot; the
//! analyzer retains no state between calls. Traversals seed from coordinates
//! in ascending order so results are reproducible for an unchanged board.

use std::collections::{BTreeSet, HashSet, VecDeque};

use board_topology_board::GridIndex;
use board_topology_core::{GridCoord, Tile};

/// Tiles that participate in an analysis pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every tile in the index, structure placeholders included.
    AllTiles,
    /// Walkable path tiles only.
    PathCells,
}

impl Scope {
    fn includes(self, tile: &Tile) -> bool {
        match self {
            Self::AllTiles => true,
            Self::PathCells => tile.is_walkable(),
        }
    }
}

/// Connectivity queries over a borrowed tile index.
#[derive(Clone, Copy, Debug)]
pub struct ConnectivityAnalyzer<'a> {
    grid: &'a GridIndex,
    scope: Scope,
}

impl<'a> ConnectivityAnalyzer<'a> {
    /// Analyzer that considers every tile of the index.
    #[must_use]
    pub const fn new(grid: &'a GridIndex) -> Self {
        Self::with_scope(grid, Scope::AllTiles)
    }

    /// Analyzer restricted to walkable path tiles.
    #[must_use]
    pub const fn path_cells(grid: &'a GridIndex) -> Self {
        Self::with_scope(grid, Scope::PathCells)
    }

    /// Analyzer over an explicit scope.
    #[must_use]
    pub const fn with_scope(grid: &'a GridIndex, scope: Scope) -> Self {
        Self { grid, scope }
    }

    /// Scope applied by this analyzer.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// Reports whether a flood fill from one in-scope tile reaches every other.
    ///
    /// An empty scope is never considered connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let coords = self.scoped_coords();
        let Some(&seed) = coords.first() else {
            return false;
        };

        self.flood(seed, &mut HashSet::with_capacity(coords.len())) == coords.len()
    }

    /// Partitions the in-scope tiles into maximal connected regions.
    ///
    /// Regions are listed in the order their smallest coordinate appears.
    #[must_use]
    pub fn find_connected_regions(&self) -> Vec<BTreeSet<GridCoord>> {
        let coords = self.scoped_coords();
        let mut visited = HashSet::with_capacity(coords.len());
        let mut regions = Vec::new();

        for seed in coords {
            if visited.contains(&seed) {
                continue;
            }

            let mut region = BTreeSet::new();
            let mut frontier = VecDeque::from([seed]);
            let _ = visited.insert(seed);

            while let Some(cell) = frontier.pop_front() {
                let _ = region.insert(cell);
                for neighbor in self.scoped_neighbors(cell) {
                    if visited.insert(neighbor) {
                        frontier.push_back(neighbor);
                    }
                }
            }

            regions.push(region);
        }

        regions
    }

    /// In-scope tiles with exactly one in-scope neighbour, in ascending order.
    #[must_use]
    pub fn find_dead_ends(&self) -> Vec<GridCoord> {
        self.scoped_coords()
            .into_iter()
            .filter(|coord| self.degree(*coord) == 1)
            .collect()
    }

    /// Number of in-scope neighbours of an in-scope tile; zero otherwise.
    #[must_use]
    pub fn degree(&self, coord: GridCoord) -> usize {
        if !self.in_scope(coord) {
            return 0;
        }

        self.scoped_neighbors(coord).count()
    }

    /// Largest degree found among in-scope tiles.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.grid
            .iter()
            .filter(|tile| self.scope.includes(tile))
            .map(|tile| self.degree(tile.coord()))
            .max()
            .unwrap_or(0)
    }

    /// Reports whether both coordinates lie in the same connected region.
    #[must_use]
    pub fn same_region(&self, first: GridCoord, second: GridCoord) -> bool {
        if !self.in_scope(first) || !self.in_scope(second) {
            return false;
        }

        let mut visited = HashSet::new();
        let _ = self.flood(first, &mut visited);
        visited.contains(&second)
    }

    fn in_scope(&self, coord: GridCoord) -> bool {
        self.grid
            .get(coord)
            .is_some_and(|tile| self.scope.includes(tile))
    }

    fn scoped_coords(&self) -> Vec<GridCoord> {
        let mut coords: Vec<GridCoord> = self
            .grid
            .iter()
            .filter(|tile| self.scope.includes(tile))
            .map(Tile::coord)
            .collect();
        coords.sort_unstable();
        coords
    }

    fn scoped_neighbors(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> + '_ {
        self.grid
            .neighbors(coord)
            .filter(move |neighbor| self.in_scope(*neighbor))
    }

    /// Breadth-first fill from `seed`, returning the number of tiles reached.
    fn flood(&self, seed: GridCoord, visited: &mut HashSet<GridCoord>) -> usize {
        let mut queue = VecDeque::from([seed]);
        let _ = visited.insert(seed);
        let mut reached = 0;

        while let Some(cell) = queue.pop_front() {
            reached += 1;
            for neighbor in self.scoped_neighbors(cell) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        reached
    }
}
