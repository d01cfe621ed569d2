#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Depth-first sequential id assignment for board tiles and structures.
//!
//! The assigner never mutates the board. It produces a
//! [`SequentialIdAssignment`] that the editor commits through
//! [`Command::CommitSequentialIds`], at which point the board resets every
//! existing id to the sentinel and writes the new positions.

use std::collections::HashSet;

use board_topology_board::{query, Board, GridIndex};
use board_topology_core::{
    Command, Direction, GridCoord, PathKind, SequentialId, SequentialIdAssignment, Structure,
    StructureId, Tile, TileKind,
};
use log::{debug, warn};
use thiserror::Error;

/// Predicate signature used for exclusion and canonical-start checks.
pub type TilePredicate = fn(&Tile) -> bool;

/// Default exclusion: structure placeholders never receive a position.
#[must_use]
pub fn is_structure_tile(tile: &Tile) -> bool {
    tile.kind().is_structure()
}

/// Default canonical start: numbering begins at a hospital tile.
#[must_use]
pub fn is_hospital_tile(tile: &Tile) -> bool {
    tile.kind() == TileKind::Path(PathKind::Hospital)
}

/// Failures that prevent an assignment from being produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum NumberingError {
    /// The board holds no tile satisfying the canonical-start predicate.
    #[error("board has no canonical start tile")]
    MissingCanonicalStart,
    /// A tile branches while linear topology was required.
    #[error("tile {coord} has {degree} numbered neighbours; linear topology allows at most 2")]
    BranchingTopology {
        /// Tile that violates the linear layout.
        coord: GridCoord,
        /// Number of non-excluded neighbours found around the tile.
        degree: usize,
    },
    /// More tiles are reachable than positions exist below the sentinel.
    #[error("more than {limit} reachable tiles cannot be numbered")]
    TooManyTiles {
        /// Number of positions available.
        limit: usize,
    },
}

/// Assigns board positions by walking the path from its canonical start.
#[derive(Clone, Copy, Debug)]
pub struct SequentialIdAssigner<E = TilePredicate, S = TilePredicate> {
    is_excluded: E,
    is_canonical_start: S,
    require_linear_topology: bool,
}

impl SequentialIdAssigner {
    /// Assigner that starts from the lowest hospital tile and skips structures.
    #[must_use]
    pub fn new() -> Self {
        Self::with_predicates(is_structure_tile, is_hospital_tile)
    }
}

impl Default for SequentialIdAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> SequentialIdAssigner<E, S>
where
    E: Fn(&Tile) -> bool,
    S: Fn(&Tile) -> bool,
{
    /// Assigner with caller-provided exclusion and canonical-start predicates.
    #[must_use]
    pub fn with_predicates(is_excluded: E, is_canonical_start: S) -> Self {
        Self {
            is_excluded,
            is_canonical_start,
            require_linear_topology: false,
        }
    }

    /// Rejects boards where a non-origin tile has more than two numbered neighbours.
    #[must_use]
    pub fn require_linear_topology(mut self, required: bool) -> Self {
        self.require_linear_topology = required;
        self
    }

    /// Computes tile and structure positions for the provided board.
    pub fn assign(&self, board: &Board) -> Result<SequentialIdAssignment, NumberingError> {
        let grid = query::grid(board);
        let origin = self.canonical_origin(grid).ok_or_else(|| {
            warn!("numbering skipped: no canonical start among {} tiles", grid.len());
            NumberingError::MissingCanonicalStart
        })?;

        if self.require_linear_topology {
            self.check_linear_topology(grid, origin)?;
        }

        let tiles = self.walk(grid, origin)?;
        let structures = number_structures(query::structures(board));

        debug!(
            "assigned {} tile ids and {} structure ids from origin {origin}",
            tiles.len(),
            structures.len()
        );

        Ok(SequentialIdAssignment::new(Some(origin), tiles, structures))
    }

    /// Wraps [`Self::assign`] into the command that commits the assignment.
    pub fn assign_command(&self, board: &Board) -> Result<Command, NumberingError> {
        self.assign(board)
            .map(|assignment| Command::CommitSequentialIds { assignment })
    }

    fn excluded(&self, grid: &GridIndex, coord: GridCoord) -> bool {
        grid.get(coord).is_some_and(|tile| (self.is_excluded)(tile))
    }

    /// Canonical start with the smallest coordinate, `x` first.
    fn canonical_origin(&self, grid: &GridIndex) -> Option<GridCoord> {
        grid.iter()
            .filter(|tile| (self.is_canonical_start)(*tile))
            .map(Tile::coord)
            .min()
    }

    fn check_linear_topology(
        &self,
        grid: &GridIndex,
        origin: GridCoord,
    ) -> Result<(), NumberingError> {
        for coord in grid.sorted_coords() {
            if coord == origin || self.excluded(grid, coord) {
                continue;
            }

            let degree = grid
                .neighbors(coord)
                .filter(|neighbor| !self.excluded(grid, *neighbor))
                .count();
            if degree > 2 {
                return Err(NumberingError::BranchingTopology { coord, degree });
            }
        }
        Ok(())
    }

    /// Pre-order depth-first walk in north, east, south, west order.
    ///
    /// Each frame records the next direction to try, so the visiting order
    /// matches a recursive traversal without growing the call stack.
    fn walk(
        &self,
        grid: &GridIndex,
        origin: GridCoord,
    ) -> Result<Vec<(GridCoord, SequentialId)>, NumberingError> {
        let mut visited = HashSet::with_capacity(grid.len());
        let mut numbered = Vec::new();
        let mut stack: Vec<(GridCoord, usize)> = Vec::new();

        let _ = visited.insert(origin);
        if !self.excluded(grid, origin) {
            let position = next_position(numbered.len())?;
            numbered.push((origin, position));
            stack.push((origin, 0));
        }

        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = Direction::ALL.get(frame.1) else {
                let _ = stack.pop();
                continue;
            };
            frame.1 += 1;
            let Some(next) = frame.0.step(direction) else {
                continue;
            };

            if !grid.contains(next) || !visited.insert(next) {
                continue;
            }
            if self.excluded(grid, next) {
                continue;
            }

            let position = next_position(numbered.len())?;
            numbered.push((next, position));
            stack.push((next, 0));
        }

        Ok(numbered)
    }
}

fn next_position(assigned: usize) -> Result<SequentialId, NumberingError> {
    u16::try_from(assigned)
        .ok()
        .filter(|position| *position <= SequentialId::MAX_ASSIGNABLE)
        .map(SequentialId::new)
        .ok_or(NumberingError::TooManyTiles {
            limit: usize::from(SequentialId::MAX_ASSIGNABLE) + 1,
        })
}

/// Numbers structures by footprint origin, `z` first, then `x`.
fn number_structures<'a, I>(structures: I) -> Vec<(StructureId, SequentialId)>
where
    I: IntoIterator<Item = &'a Structure>,
{
    let mut ordered: Vec<&Structure> = structures.into_iter().collect();
    ordered.sort_by_key(|structure| {
        let origin = structure.footprint().origin();
        (origin.z(), origin.x(), structure.id())
    });

    ordered
        .into_iter()
        .zip(0..=SequentialId::MAX_ASSIGNABLE)
        .map(|(structure, position)| (structure.id(), SequentialId::new(position)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_topology_board::apply;
    use board_topology_core::{PropertyGroup, StructureSize};

    fn board_with(tiles: &[((i32, i32), PathKind)]) -> Board {
        let mut board = Board::new();
        let mut events = Vec::new();
        for &((x, z), kind) in tiles {
            apply(
                &mut board,
                Command::PlaceTile {
                    coord: GridCoord::new(x, z),
                    kind,
                },
                &mut events,
            );
        }
        board
    }

    fn place_structure(board: &mut Board, x: i32, z: i32, size: StructureSize) {
        let mut events = Vec::new();
        apply(
            board,
            Command::PlaceStructure {
                origin: GridCoord::new(x, z),
                size,
                group: PropertyGroup::new(0),
            },
            &mut events,
        );
    }

    #[test]
    fn missing_hospital_is_reported() {
        let board = board_with(&[((0, 0), PathKind::Empty), ((1, 0), PathKind::Start)]);

        assert_eq!(
            SequentialIdAssigner::new().assign(&board),
            Err(NumberingError::MissingCanonicalStart)
        );
    }

    #[test]
    fn leftmost_canonical_start_wins() {
        let board = board_with(&[
            ((2, 0), PathKind::Hospital),
            ((0, 5), PathKind::Hospital),
            ((0, 7), PathKind::Hospital),
        ]);

        let assignment = SequentialIdAssigner::new()
            .assign(&board)
            .expect("hospital present");

        assert_eq!(assignment.origin(), Some(GridCoord::new(0, 5)));
        assert_eq!(assignment.tile_id(GridCoord::new(0, 5)), SequentialId::new(0));
    }

    #[test]
    fn walk_prefers_north_then_east() {
        // Plus shape centred on the hospital.
        let board = board_with(&[
            ((0, 0), PathKind::Hospital),
            ((0, 1), PathKind::Empty),
            ((1, 0), PathKind::Empty),
            ((0, -1), PathKind::Empty),
            ((-1, 0), PathKind::Empty),
        ]);

        let assignment = SequentialIdAssigner::new()
            .assign(&board)
            .expect("hospital present");
        let order: Vec<GridCoord> = assignment.tiles().iter().map(|(coord, _)| *coord).collect();

        assert_eq!(
            order,
            vec![
                GridCoord::new(0, 0),
                GridCoord::new(0, 1),
                GridCoord::new(1, 0),
                GridCoord::new(0, -1),
                GridCoord::new(-1, 0),
            ]
        );
    }

    #[test]
    fn walk_descends_before_backtracking() {
        // Branch north of the origin is finished before the east neighbour.
        let board = board_with(&[
            ((0, 0), PathKind::Hospital),
            ((0, 1), PathKind::Empty),
            ((1, 1), PathKind::Empty),
            ((1, 0), PathKind::Empty),
            ((2, 0), PathKind::Empty),
        ]);

        let assignment = SequentialIdAssigner::new()
            .assign(&board)
            .expect("hospital present");

        assert_eq!(assignment.tile_id(GridCoord::new(0, 1)), SequentialId::new(1));
        assert_eq!(assignment.tile_id(GridCoord::new(1, 1)), SequentialId::new(2));
        assert_eq!(
            assignment.tile_id(GridCoord::new(1, 0)),
            SequentialId::new(3),
            "reached through (1, 1) heading south"
        );
        assert_eq!(assignment.tile_id(GridCoord::new(2, 0)), SequentialId::new(4));
    }

    #[test]
    fn structures_are_skipped_and_block_the_walk() {
        let mut board = board_with(&[
            ((0, 0), PathKind::Hospital),
            ((1, 0), PathKind::Empty),
            ((4, 0), PathKind::Empty),
        ]);
        place_structure(&mut board, 2, 0, StructureSize::Quad);

        let assignment = SequentialIdAssigner::new()
            .assign(&board)
            .expect("hospital present");

        assert_eq!(assignment.tiles().len(), 2);
        assert!(!assignment.tile_id(GridCoord::new(2, 0)).is_valid());
        assert!(
            !assignment.tile_id(GridCoord::new(4, 0)).is_valid(),
            "tiles beyond a structure are unreachable"
        );
    }

    #[test]
    fn islands_keep_the_sentinel() {
        let board = board_with(&[
            ((0, 0), PathKind::Hospital),
            ((0, 1), PathKind::Empty),
            ((5, 5), PathKind::Empty),
        ]);

        let assignment = SequentialIdAssigner::new()
            .assign(&board)
            .expect("hospital present");

        assert_eq!(assignment.tile_id(GridCoord::new(5, 5)), SequentialId::INVALID);
        assert_eq!(assignment.tiles().len(), 2);
    }

    #[test]
    fn custom_predicates_change_start_and_exclusion() {
        let board = board_with(&[
            ((0, 0), PathKind::Hospital),
            ((1, 0), PathKind::Fee),
            ((2, 0), PathKind::Start),
            ((3, 0), PathKind::Empty),
        ]);
        let assigner = SequentialIdAssigner::with_predicates(
            |tile: &Tile| tile.kind() == TileKind::Path(PathKind::Fee),
            |tile: &Tile| tile.kind() == TileKind::Path(PathKind::Start),
        );

        let assignment = assigner.assign(&board).expect("start present");

        assert_eq!(assignment.origin(), Some(GridCoord::new(2, 0)));
        assert_eq!(assignment.tile_id(GridCoord::new(3, 0)), SequentialId::new(1));
        assert!(!assignment.tile_id(GridCoord::new(1, 0)).is_valid());
        assert!(!assignment.tile_id(GridCoord::new(0, 0)).is_valid());
    }

    #[test]
    fn linear_topology_rejects_branches_when_required() {
        let board = board_with(&[
            ((0, 0), PathKind::Hospital),
            ((1, 0), PathKind::Empty),
            ((2, 0), PathKind::Empty),
            ((1, 1), PathKind::Empty),
            ((1, -1), PathKind::Empty),
        ]);

        assert!(SequentialIdAssigner::new().assign(&board).is_ok());
        assert_eq!(
            SequentialIdAssigner::new()
                .require_linear_topology(true)
                .assign(&board),
            Err(NumberingError::BranchingTopology {
                coord: GridCoord::new(1, 0),
                degree: 4,
            })
        );
    }

    #[test]
    fn structures_are_numbered_by_row_then_column() {
        let mut board = board_with(&[((0, 0), PathKind::Hospital)]);
        place_structure(&mut board, 5, 3, StructureSize::Single);
        place_structure(&mut board, 2, 3, StructureSize::Quad);
        place_structure(&mut board, 9, 1, StructureSize::Single);

        let assignment = SequentialIdAssigner::new()
            .assign(&board)
            .expect("hospital present");

        assert_eq!(
            assignment.structures(),
            &[
                (StructureId::new(2), SequentialId::new(0)),
                (StructureId::new(1), SequentialId::new(1)),
                (StructureId::new(0), SequentialId::new(2)),
            ]
        );
    }

    #[test]
    fn assign_command_wraps_assignment() {
        let board = board_with(&[((0, 0), PathKind::Hospital)]);
        let assigner = SequentialIdAssigner::new();

        let command = assigner.assign_command(&board).expect("hospital present");

        assert_eq!(
            command,
            Command::CommitSequentialIds {
                assignment: assigner.assign(&board).expect("hospital present"),
            }
        );
    }

    #[test]
    fn position_overflow_is_an_error() {
        assert_eq!(
            next_position(usize::from(SequentialId::MAX_ASSIGNABLE)),
            Ok(SequentialId::new(SequentialId::MAX_ASSIGNABLE))
        );
        assert!(matches!(
            next_position(usize::from(u16::MAX)),
            Err(NumberingError::TooManyTiles { limit: 65535 })
        ));
    }
}
