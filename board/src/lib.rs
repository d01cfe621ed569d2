#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for the topology engine.

mod grid;
mod structures;

pub use grid::GridIndex;

use std::collections::HashSet;

use board_topology_core::{
    Command, Event, Footprint, GridCoord, PathKind, PropertyGroup, RemovalError,
    SequentialIdAssignment, Structure, StructureId, StructureSize, Tile, TileKind,
};
use structures::StructureRegistry;
use thiserror::Error;

/// Represents the authoritative board: every tile plus the structure registry.
#[derive(Clone, Debug)]
pub struct Board {
    grid: GridIndex,
    structures: StructureRegistry,
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: GridIndex::new(),
            structures: StructureRegistry::new(),
        }
    }

    /// Rebuilds a board from previously saved tiles and structures.
    ///
    /// Saved board positions are trusted as-is. Structure footprint cells that
    /// were not saved as tiles receive fresh placeholders. Every footprint cell
    /// belongs to exactly one structure.
    pub fn restore<T, S>(tiles: T, structures: S) -> Result<Self, RestoreError>
    where
        T: IntoIterator<Item = Tile>,
        S: IntoIterator<Item = Structure>,
    {
        let mut board = Self::new();
        for tile in tiles {
            board
                .grid
                .put(tile)
                .map_err(|_| RestoreError::DuplicateTile { coord: tile.coord() })?;
        }

        let mut claimed = HashSet::new();
        for structure in structures {
            let footprint = structure.footprint();
            for coord in footprint.cells() {
                if !claimed.insert(coord) {
                    return Err(RestoreError::FootprintOverlap {
                        structure: structure.id(),
                        coord,
                    });
                }
                match board.grid.get(coord).map(Tile::kind) {
                    Some(TileKind::Structure(_)) => {}
                    Some(TileKind::Path(_)) => {
                        return Err(RestoreError::FootprintConflict {
                            structure: structure.id(),
                            coord,
                        });
                    }
                    None => {
                        let placeholder = Tile::new(coord, TileKind::Structure(footprint.size()));
                        board
                            .grid
                            .put(placeholder)
                            .map_err(|_| RestoreError::DuplicateTile { coord })?;
                    }
                }
            }

            if !board.structures.restore(structure) {
                return Err(RestoreError::DuplicateStructure {
                    structure: structure.id(),
                });
            }
        }

        Ok(board)
    }

    fn place_tile(&mut self, coord: GridCoord, kind: PathKind, out_events: &mut Vec<Event>) {
        match self.grid.put(Tile::path(coord, kind)) {
            Ok(()) => out_events.push(Event::TilePlaced { coord, kind }),
            Err(reason) => out_events.push(Event::TilePlacementRejected { coord, reason }),
        }
    }

    fn remove_tile(&mut self, coord: GridCoord, out_events: &mut Vec<Event>) {
        let reason = match self.grid.get(coord).map(Tile::kind) {
            None => Some(RemovalError::MissingTile),
            Some(TileKind::Structure(_)) => Some(RemovalError::StructureCell),
            Some(TileKind::Path(_)) => None,
        };

        if let Some(reason) = reason {
            out_events.push(Event::TileRemovalRejected { coord, reason });
            return;
        }

        let _ = self.grid.remove(coord);
        out_events.push(Event::TileRemoved { coord });
    }

    fn place_structure(
        &mut self,
        origin: GridCoord,
        size: StructureSize,
        group: PropertyGroup,
        out_events: &mut Vec<Event>,
    ) {
        let footprint = Footprint::new(origin, size);
        let placeholders: Vec<Tile> = footprint
            .cells()
            .into_iter()
            .map(|coord| Tile::new(coord, TileKind::Structure(size)))
            .collect();

        if let Err(reason) = self.grid.put_all(&placeholders) {
            out_events.push(Event::StructurePlacementRejected { footprint, reason });
            return;
        }

        let structure = self.structures.allocate(group, footprint);
        out_events.push(Event::StructurePlaced {
            structure,
            group,
            footprint,
        });
    }

    fn remove_structure(&mut self, structure: StructureId, out_events: &mut Vec<Event>) {
        let Some(removed) = self.structures.remove(structure) else {
            out_events.push(Event::StructureRemovalRejected {
                structure,
                reason: RemovalError::MissingStructure,
            });
            return;
        };

        let footprint = removed.footprint();
        for coord in footprint.cells() {
            if self
                .grid
                .get(coord)
                .is_some_and(|tile| tile.kind().is_structure())
            {
                let _ = self.grid.remove(coord);
            }
        }

        out_events.push(Event::StructureRemoved {
            structure,
            footprint,
        });
    }

    fn commit_sequential_ids(
        &mut self,
        assignment: &SequentialIdAssignment,
        out_events: &mut Vec<Event>,
    ) {
        self.grid.reset_sequential_ids();
        self.structures.reset_sequential_ids();

        let mut tiles = 0;
        for &(coord, id) in assignment.tiles() {
            match self.grid.get_mut(coord) {
                Some(tile) if tile.is_walkable() => {
                    tile.set_sequential_id(id);
                    tiles += 1;
                }
                Some(_) => {
                    log::warn!("skipping board position {id} for structure cell {coord}");
                }
                None => {
                    log::warn!("skipping board position {id} for missing tile {coord}");
                }
            }
        }

        let mut structures = 0;
        for &(structure_id, id) in assignment.structures() {
            if let Some(structure) = self.structures.get_mut(structure_id) {
                structure.set_sequential_id(id);
                structures += 1;
            } else {
                log::warn!(
                    "skipping structure number {id} for missing structure {}",
                    structure_id.get()
                );
            }
        }

        log::debug!("committed {tiles} tile positions and {structures} structure numbers");
        out_events.push(Event::SequentialIdsCommitted { tiles, structures });
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors raised while rebuilding a board from saved records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RestoreError {
    /// Two saved tiles share a coordinate.
    #[error("more than one tile saved at {coord}")]
    DuplicateTile {
        /// Coordinate stored twice.
        coord: GridCoord,
    },
    /// Two saved structures share an identifier.
    #[error("structure {} saved more than once", .structure.get())]
    DuplicateStructure {
        /// Identifier stored twice.
        structure: StructureId,
    },
    /// A structure footprint overlaps a saved path tile.
    #[error("structure {} overlaps path tile at {coord}", .structure.get())]
    FootprintConflict {
        /// Structure whose footprint conflicts.
        structure: StructureId,
        /// Path tile inside the footprint.
        coord: GridCoord,
    },
    /// Two saved structure footprints cover the same cell.
    #[error("structure {} overlaps another structure at {coord}", .structure.get())]
    FootprintOverlap {
        /// Structure restored second.
        structure: StructureId,
        /// Cell claimed by both footprints.
        coord: GridCoord,
    },
}

/// Applies the provided command to the board, mutating state deterministically.
pub fn apply(board: &mut Board, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceTile { coord, kind } => board.place_tile(coord, kind, out_events),
        Command::RemoveTile { coord } => board.remove_tile(coord, out_events),
        Command::PlaceStructure {
            origin,
            size,
            group,
        } => board.place_structure(origin, size, group, out_events),
        Command::RemoveStructure { structure } => board.remove_structure(structure, out_events),
        Command::CommitSequentialIds { assignment } => {
            board.commit_sequential_ids(&assignment, out_events);
        }
    }
}

/// Query functions that provide read-only access to the board state.
pub mod query {
    use board_topology_core::{GridCoord, SequentialId, Structure, StructureId, Tile};

    use super::{Board, GridIndex};

    /// Provides read-only access to the tile index.
    #[must_use]
    pub fn grid(board: &Board) -> &GridIndex {
        &board.grid
    }

    /// Tile stored at the coordinate, if any.
    #[must_use]
    pub fn tile_at(board: &Board, coord: GridCoord) -> Option<&Tile> {
        board.grid.get(coord)
    }

    /// Board position recorded for the coordinate, if a tile exists there.
    #[must_use]
    pub fn sequential_id(board: &Board, coord: GridCoord) -> Option<SequentialId> {
        board.grid.sequential_id(coord)
    }

    /// Structures in ascending identifier order.
    pub fn structures(board: &Board) -> impl Iterator<Item = &Structure> {
        board.structures.iter()
    }

    /// Structure registered under the identifier, if any.
    #[must_use]
    pub fn structure(board: &Board, id: StructureId) -> Option<&Structure> {
        board.structures.get(id)
    }

    /// Structure whose footprint covers the coordinate, if any.
    #[must_use]
    pub fn structure_at(board: &Board, coord: GridCoord) -> Option<&Structure> {
        board.structures.at(coord)
    }

    /// Number of registered structures.
    #[must_use]
    pub fn structure_count(board: &Board) -> usize {
        board.structures.len()
    }

    /// Number of tiles, structure placeholders included.
    #[must_use]
    pub fn tile_count(board: &Board) -> usize {
        board.grid.len()
    }

    /// Number of walkable path tiles.
    #[must_use]
    pub fn path_tile_count(board: &Board) -> usize {
        board.grid.iter().filter(|tile| tile.is_walkable()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_topology_core::{PlacementError, SequentialId};

    fn place(board: &mut Board, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(board, command, &mut events);
        events
    }

    #[test]
    fn apply_places_path_tile() {
        let mut board = Board::new();

        let events = place(
            &mut board,
            Command::PlaceTile {
                coord: GridCoord::new(1, 2),
                kind: PathKind::Hospital,
            },
        );

        assert_eq!(
            events,
            vec![Event::TilePlaced {
                coord: GridCoord::new(1, 2),
                kind: PathKind::Hospital,
            }]
        );
        assert_eq!(
            query::tile_at(&board, GridCoord::new(1, 2)).map(Tile::kind),
            Some(TileKind::Path(PathKind::Hospital))
        );
    }

    #[test]
    fn apply_rejects_tile_on_occupied_cell() {
        let mut board = Board::new();
        let coord = GridCoord::new(0, 0);
        let _ = place(
            &mut board,
            Command::PlaceTile {
                coord,
                kind: PathKind::Empty,
            },
        );

        let events = place(
            &mut board,
            Command::PlaceTile {
                coord,
                kind: PathKind::Fee,
            },
        );

        assert_eq!(
            events,
            vec![Event::TilePlacementRejected {
                coord,
                reason: PlacementError::Occupied { coord },
            }]
        );
    }

    #[test]
    fn structure_placement_writes_placeholders() {
        let mut board = Board::new();

        let events = place(
            &mut board,
            Command::PlaceStructure {
                origin: GridCoord::new(0, 0),
                size: StructureSize::Quad,
                group: PropertyGroup::new(4),
            },
        );

        assert_eq!(
            events,
            vec![Event::StructurePlaced {
                structure: StructureId::new(0),
                group: PropertyGroup::new(4),
                footprint: Footprint::new(GridCoord::new(0, 0), StructureSize::Quad),
            }]
        );
        assert_eq!(query::tile_count(&board), 4);
        assert_eq!(query::path_tile_count(&board), 0);
        assert_eq!(
            query::structure_at(&board, GridCoord::new(1, 1)).map(Structure::id),
            Some(StructureId::new(0))
        );
    }

    #[test]
    fn structure_placement_rejected_when_footprint_overlaps() {
        let mut board = Board::new();
        let _ = place(
            &mut board,
            Command::PlaceTile {
                coord: GridCoord::new(1, 0),
                kind: PathKind::Empty,
            },
        );

        let events = place(
            &mut board,
            Command::PlaceStructure {
                origin: GridCoord::new(0, 0),
                size: StructureSize::Quad,
                group: PropertyGroup::new(0),
            },
        );

        assert_eq!(
            events,
            vec![Event::StructurePlacementRejected {
                footprint: Footprint::new(GridCoord::new(0, 0), StructureSize::Quad),
                reason: PlacementError::Occupied {
                    coord: GridCoord::new(1, 0)
                },
            }]
        );
        assert_eq!(query::tile_count(&board), 1);
        assert_eq!(query::structure_count(&board), 0);
    }

    #[test]
    fn structure_cells_cannot_be_removed_as_tiles() {
        let mut board = Board::new();
        let _ = place(
            &mut board,
            Command::PlaceStructure {
                origin: GridCoord::new(3, 3),
                size: StructureSize::Single,
                group: PropertyGroup::new(0),
            },
        );

        let events = place(
            &mut board,
            Command::RemoveTile {
                coord: GridCoord::new(3, 3),
            },
        );

        assert_eq!(
            events,
            vec![Event::TileRemovalRejected {
                coord: GridCoord::new(3, 3),
                reason: RemovalError::StructureCell,
            }]
        );
    }

    #[test]
    fn removing_structure_clears_footprint() {
        let mut board = Board::new();
        let _ = place(
            &mut board,
            Command::PlaceStructure {
                origin: GridCoord::new(0, 0),
                size: StructureSize::Quad,
                group: PropertyGroup::new(0),
            },
        );

        let events = place(
            &mut board,
            Command::RemoveStructure {
                structure: StructureId::new(0),
            },
        );

        assert_eq!(
            events,
            vec![Event::StructureRemoved {
                structure: StructureId::new(0),
                footprint: Footprint::new(GridCoord::new(0, 0), StructureSize::Quad),
            }]
        );
        assert!(query::grid(&board).is_empty());

        let events = place(
            &mut board,
            Command::RemoveStructure {
                structure: StructureId::new(0),
            },
        );
        assert_eq!(
            events,
            vec![Event::StructureRemovalRejected {
                structure: StructureId::new(0),
                reason: RemovalError::MissingStructure,
            }]
        );
    }

    #[test]
    fn commit_resets_ids_before_writing_assignment() {
        let mut board = Board::restore(
            [
                Tile::with_sequential_id(
                    GridCoord::new(0, 0),
                    TileKind::Path(PathKind::Hospital),
                    SequentialId::new(5),
                ),
                Tile::with_sequential_id(
                    GridCoord::new(1, 0),
                    TileKind::Path(PathKind::Empty),
                    SequentialId::new(6),
                ),
            ],
            [],
        )
        .expect("board restores");

        let assignment = SequentialIdAssignment::new(
            Some(GridCoord::new(0, 0)),
            vec![
                (GridCoord::new(0, 0), SequentialId::new(0)),
                (GridCoord::new(9, 9), SequentialId::new(1)),
            ],
            Vec::new(),
        );
        let events = place(&mut board, Command::CommitSequentialIds { assignment });

        assert_eq!(
            events,
            vec![Event::SequentialIdsCommitted {
                tiles: 1,
                structures: 0,
            }]
        );
        assert_eq!(
            query::sequential_id(&board, GridCoord::new(0, 0)),
            Some(SequentialId::new(0))
        );
        assert_eq!(
            query::sequential_id(&board, GridCoord::new(1, 0)),
            Some(SequentialId::INVALID)
        );
    }

    #[test]
    fn restore_trusts_saved_positions() {
        let board = Board::restore(
            [Tile::with_sequential_id(
                GridCoord::new(2, 2),
                TileKind::Path(PathKind::Chance),
                SequentialId::new(17),
            )],
            [],
        )
        .expect("board restores");

        assert_eq!(
            query::sequential_id(&board, GridCoord::new(2, 2)),
            Some(SequentialId::new(17))
        );
    }

    #[test]
    fn restore_rejects_footprint_over_path_tile() {
        let result = Board::restore(
            [Tile::path(GridCoord::new(1, 1), PathKind::Empty)],
            [Structure::new(
                StructureId::new(0),
                PropertyGroup::new(0),
                Footprint::new(GridCoord::new(0, 0), StructureSize::Quad),
            )],
        );

        assert_eq!(
            result.err(),
            Some(RestoreError::FootprintConflict {
                structure: StructureId::new(0),
                coord: GridCoord::new(1, 1),
            })
        );
    }

    #[test]
    fn restore_fills_missing_placeholders() {
        let board = Board::restore(
            [],
            [Structure::new(
                StructureId::new(2),
                PropertyGroup::new(1),
                Footprint::new(GridCoord::new(0, 0), StructureSize::Quad),
            )],
        )
        .expect("board restores");

        assert_eq!(query::tile_count(&board), 4);
        assert!(query::structure(&board, StructureId::new(2)).is_some());
    }

    #[test]
    fn restore_rejects_overlapping_footprints() {
        let result = Board::restore(
            [],
            [
                Structure::new(
                    StructureId::new(0),
                    PropertyGroup::new(0),
                    Footprint::new(GridCoord::new(0, 0), StructureSize::Quad),
                ),
                Structure::new(
                    StructureId::new(1),
                    PropertyGroup::new(0),
                    Footprint::new(GridCoord::new(1, 1), StructureSize::Single),
                ),
            ],
        );

        assert_eq!(
            result.err(),
            Some(RestoreError::FootprintOverlap {
                structure: StructureId::new(1),
                coord: GridCoord::new(1, 1),
            })
        );
    }

    #[test]
    fn restore_accepts_saved_placeholders_for_one_structure() {
        let board = Board::restore(
            [Tile::new(
                GridCoord::new(0, 1),
                TileKind::Structure(StructureSize::Quad),
            )],
            [Structure::new(
                StructureId::new(0),
                PropertyGroup::new(0),
                Footprint::new(GridCoord::new(0, 0), StructureSize::Quad),
            )],
        )
        .expect("board restores");

        assert_eq!(query::tile_count(&board), 4);
    }
}
