#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the board topology engine.
//!
//! This crate defines the value types and the message surface that connect
//! the editor layer, the authoritative board, and the pure analysis systems.
//! The editor submits [`Command`] values describing desired mutations, the
//! board executes those commands via its `apply` entry point and broadcasts
//! [`Event`] values describing what changed. Analysis systems borrow the board
//! immutably and never mutate it directly; numbering results travel back to the
//! board as a [`Command::CommitSequentialIds`] request.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single board cell expressed as `x` and `z` grid coordinates.
///
/// Coordinates are ordered by `x` first and `z` second. Every pass that needs a
/// deterministic traversal order relies on this ordering.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridCoord {
    x: i32,
    z: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Column component of the coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row component of the coordinate.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: GridCoord) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.z.abs_diff(other.z))
    }

    /// Coordinate one step away in the provided direction, or `None` past the
    /// edge of the coordinate space.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<GridCoord> {
        let (dx, dz) = direction.offset();
        Some(GridCoord::new(
            self.x.checked_add(dx)?,
            self.z.checked_add(dz)?,
        ))
    }

    /// Cardinal neighbours in north, east, south, west order.
    ///
    /// Neighbours outside the coordinate space are skipped.
    pub fn cardinal_neighbors(self) -> impl Iterator<Item = GridCoord> {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.step(direction))
    }

    /// Reports whether the two coordinates share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: GridCoord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Direction of travel from `self` to an adjacent coordinate.
    #[must_use]
    pub fn direction_to(self, other: GridCoord) -> Option<Direction> {
        if !self.is_adjacent(other) {
            return None;
        }

        Direction::ALL
            .into_iter()
            .find(|direction| self.step(*direction) == Some(other))
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Cardinal directions of the board grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward increasing `z`.
    North,
    /// Toward increasing `x`.
    East,
    /// Toward decreasing `z`.
    South,
    /// Toward decreasing `x`.
    West,
}

impl Direction {
    /// All directions in the canonical neighbour order used by every traversal.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Offset applied to a coordinate when stepping in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }
}

/// Kinds of tiles that belong to the walkable board path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PathKind {
    /// Plain land adjacent to ownable structures.
    Empty,
    /// Dedicated starting tile.
    Start,
    /// Hospital tile; the canonical numbering origin.
    Hospital,
    /// Lottery tile.
    Lottery,
    /// Chance tile.
    Chance,
    /// Bonus payout tile.
    Bonus,
    /// Fee collection tile.
    Fee,
    /// Card station tile.
    Card,
    /// News tile.
    News,
}

impl PathKind {
    /// Every path kind in declaration order.
    pub const ALL: [PathKind; 9] = [
        PathKind::Empty,
        PathKind::Start,
        PathKind::Hospital,
        PathKind::Lottery,
        PathKind::Chance,
        PathKind::Bonus,
        PathKind::Fee,
        PathKind::Card,
        PathKind::News,
    ];

    /// Stable lowercase name used by layouts and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Start => "start",
            Self::Hospital => "hospital",
            Self::Lottery => "lottery",
            Self::Chance => "chance",
            Self::Bonus => "bonus",
            Self::Fee => "fee",
            Self::Card => "card",
            Self::News => "news",
        }
    }
}

/// Footprint sizes supported for multi-cell structures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StructureSize {
    /// A structure occupying a single cell.
    Single,
    /// A structure occupying a two-by-two block of cells.
    Quad,
}

impl StructureSize {
    /// Number of cells along each edge of the footprint.
    #[must_use]
    pub const fn edge(self) -> i32 {
        match self {
            Self::Single => 1,
            Self::Quad => 2,
        }
    }
}

/// Category of a tile.
///
/// Path cells form the numbered, walkable board. Structure cells are
/// placeholders written into every footprint cell of a structure; they are
/// skipped by numbering and never walkable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Walkable board tile.
    Path(PathKind),
    /// Placeholder occupied by a structure footprint.
    Structure(StructureSize),
}

impl TileKind {
    /// Reports whether units may traverse tiles of this kind.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Path(_))
    }

    /// Reports whether the tile is a structure placeholder.
    #[must_use]
    pub const fn is_structure(self) -> bool {
        matches!(self, Self::Structure(_))
    }

    /// Path kind of the tile, if it belongs to the board path.
    #[must_use]
    pub const fn path_kind(self) -> Option<PathKind> {
        match self {
            Self::Path(kind) => Some(kind),
            Self::Structure(_) => None,
        }
    }
}

/// Position of a tile or structure along the numbered board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequentialId(u16);

impl SequentialId {
    /// Reserved sentinel carried by tiles that hold no position.
    pub const INVALID: SequentialId = SequentialId(u16::MAX);

    /// Largest position that can be assigned before reaching the sentinel.
    pub const MAX_ASSIGNABLE: u16 = u16::MAX - 1;

    /// Creates a sequential identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the raw numeric representation, sentinel included.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Reports whether the identifier holds a real position.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 != u16::MAX
    }

    /// Position held by the identifier, or `None` for the sentinel.
    #[must_use]
    pub const fn position(&self) -> Option<u16> {
        if self.is_valid() {
            Some(self.0)
        } else {
            None
        }
    }
}

impl Default for SequentialId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for SequentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position() {
            Some(position) => write!(f, "{position}"),
            None => write!(f, "-"),
        }
    }
}

/// Single addressable cell of the board grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    coord: GridCoord,
    kind: TileKind,
    #[serde(default)]
    sequential_id: SequentialId,
}

impl Tile {
    /// Creates a tile without a board position.
    #[must_use]
    pub const fn new(coord: GridCoord, kind: TileKind) -> Self {
        Self {
            coord,
            kind,
            sequential_id: SequentialId::INVALID,
        }
    }

    /// Creates a path tile without a board position.
    #[must_use]
    pub const fn path(coord: GridCoord, kind: PathKind) -> Self {
        Self::new(coord, TileKind::Path(kind))
    }

    /// Restores a tile together with a previously saved board position.
    #[must_use]
    pub const fn with_sequential_id(
        coord: GridCoord,
        kind: TileKind,
        sequential_id: SequentialId,
    ) -> Self {
        Self {
            coord,
            kind,
            sequential_id,
        }
    }

    /// Coordinate that identifies the tile.
    #[must_use]
    pub const fn coord(&self) -> GridCoord {
        self.coord
    }

    /// Category of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Board position currently recorded for the tile.
    #[must_use]
    pub const fn sequential_id(&self) -> SequentialId {
        self.sequential_id
    }

    /// Reports whether units may stand on the tile.
    #[must_use]
    pub const fn is_walkable(&self) -> bool {
        self.kind.is_walkable()
    }

    /// Overwrites the recorded board position.
    ///
    /// Only the board's numbering commit calls this; positions are never
    /// patched per tile.
    pub fn set_sequential_id(&mut self, sequential_id: SequentialId) {
        self.sequential_id = sequential_id;
    }
}

/// Set of cells occupied by a structure, anchored at its lowest corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    origin: GridCoord,
    size: StructureSize,
}

impl Footprint {
    /// Creates a footprint anchored at `origin`.
    #[must_use]
    pub const fn new(origin: GridCoord, size: StructureSize) -> Self {
        Self { origin, size }
    }

    /// Corner cell with the smallest `x` and `z`.
    #[must_use]
    pub const fn origin(&self) -> GridCoord {
        self.origin
    }

    /// Footprint size.
    #[must_use]
    pub const fn size(&self) -> StructureSize {
        self.size
    }

    /// Cells covered by the footprint, in ascending coordinate order.
    #[must_use]
    pub fn cells(&self) -> Vec<GridCoord> {
        let edge = self.size.edge();
        let mut cells = Vec::with_capacity((edge * edge) as usize);
        for dx in 0..edge {
            for dz in 0..edge {
                cells.push(GridCoord::new(
                    self.origin.x().saturating_add(dx),
                    self.origin.z().saturating_add(dz),
                ));
            }
        }
        cells
    }

    /// Reports whether the footprint covers the provided cell.
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        let edge = self.size.edge();
        let dx = coord.x().wrapping_sub(self.origin.x());
        let dz = coord.z().wrapping_sub(self.origin.z());
        (0..edge).contains(&dx) && (0..edge).contains(&dz)
    }
}

/// Unique identifier assigned to a structure by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructureId(u32);

impl StructureId {
    /// Creates a new structure identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Designer-defined group an ownable structure belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyGroup(u16);

impl PropertyGroup {
    /// Creates a new property group identifier.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the group.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for PropertyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group {}", self.0)
    }
}

/// Ownable structure placed on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    id: StructureId,
    group: PropertyGroup,
    footprint: Footprint,
    #[serde(default)]
    sequential_id: SequentialId,
}

impl Structure {
    /// Creates a structure without a board position.
    #[must_use]
    pub const fn new(id: StructureId, group: PropertyGroup, footprint: Footprint) -> Self {
        Self {
            id,
            group,
            footprint,
            sequential_id: SequentialId::INVALID,
        }
    }

    /// Identifier allocated by the board.
    #[must_use]
    pub const fn id(&self) -> StructureId {
        self.id
    }

    /// Ownable group of the structure.
    #[must_use]
    pub const fn group(&self) -> PropertyGroup {
        self.group
    }

    /// Cells occupied by the structure.
    #[must_use]
    pub const fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Structure number recorded by the latest numbering commit.
    #[must_use]
    pub const fn sequential_id(&self) -> SequentialId {
        self.sequential_id
    }

    /// Overwrites the recorded structure number.
    pub fn set_sequential_id(&mut self, sequential_id: SequentialId) {
        self.sequential_id = sequential_id;
    }
}

/// Complete numbering produced by a reassignment pass.
///
/// Tiles and structures absent from the assignment receive the sentinel when
/// the assignment is committed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequentialIdAssignment {
    origin: Option<GridCoord>,
    tiles: Vec<(GridCoord, SequentialId)>,
    structures: Vec<(StructureId, SequentialId)>,
}

impl SequentialIdAssignment {
    /// Creates an assignment from traversal-ordered tile and structure entries.
    #[must_use]
    pub fn new(
        origin: Option<GridCoord>,
        tiles: Vec<(GridCoord, SequentialId)>,
        structures: Vec<(StructureId, SequentialId)>,
    ) -> Self {
        Self {
            origin,
            tiles,
            structures,
        }
    }

    /// Tile the traversal started from.
    #[must_use]
    pub const fn origin(&self) -> Option<GridCoord> {
        self.origin
    }

    /// Tile positions in assignment order.
    #[must_use]
    pub fn tiles(&self) -> &[(GridCoord, SequentialId)] {
        &self.tiles
    }

    /// Structure numbers in assignment order.
    #[must_use]
    pub fn structures(&self) -> &[(StructureId, SequentialId)] {
        &self.structures
    }

    /// Position assigned to the provided coordinate, sentinel when unassigned.
    #[must_use]
    pub fn tile_id(&self, coord: GridCoord) -> SequentialId {
        self.tiles
            .iter()
            .find(|(candidate, _)| *candidate == coord)
            .map_or(SequentialId::INVALID, |(_, id)| *id)
    }
}

/// Commands that express all permissible board mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Places a path tile at a free coordinate.
    PlaceTile {
        /// Cell receiving the tile.
        coord: GridCoord,
        /// Path kind of the new tile.
        kind: PathKind,
    },
    /// Removes the path tile stored at the coordinate.
    RemoveTile {
        /// Cell whose tile should be removed.
        coord: GridCoord,
    },
    /// Places a structure and writes placeholders into its footprint.
    PlaceStructure {
        /// Corner cell anchoring the footprint.
        origin: GridCoord,
        /// Footprint size of the structure.
        size: StructureSize,
        /// Ownable group of the structure.
        group: PropertyGroup,
    },
    /// Removes a structure together with its placeholders.
    RemoveStructure {
        /// Identifier of the structure targeted for removal.
        structure: StructureId,
    },
    /// Resets every board position and writes the provided numbering.
    CommitSequentialIds {
        /// Numbering produced by a full reassignment pass.
        assignment: SequentialIdAssignment,
    },
}

/// Events broadcast by the board after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a path tile was placed.
    TilePlaced {
        /// Cell that received the tile.
        coord: GridCoord,
        /// Path kind of the placed tile.
        kind: PathKind,
    },
    /// Reports that a tile placement request was rejected.
    TilePlacementRejected {
        /// Cell provided in the request.
        coord: GridCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a path tile was removed.
    TileRemoved {
        /// Cell that held the tile.
        coord: GridCoord,
    },
    /// Reports that a tile removal request was rejected.
    TileRemovalRejected {
        /// Cell provided in the request.
        coord: GridCoord,
        /// Specific reason the removal failed.
        reason: RemovalError,
    },
    /// Confirms that a structure was placed.
    StructurePlaced {
        /// Identifier allocated to the structure.
        structure: StructureId,
        /// Ownable group of the structure.
        group: PropertyGroup,
        /// Cells now occupied by the structure.
        footprint: Footprint,
    },
    /// Reports that a structure placement request was rejected.
    StructurePlacementRejected {
        /// Footprint requested for the structure.
        footprint: Footprint,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a structure was removed.
    StructureRemoved {
        /// Identifier of the removed structure.
        structure: StructureId,
        /// Cells previously occupied by the structure.
        footprint: Footprint,
    },
    /// Reports that a structure removal request was rejected.
    StructureRemovalRejected {
        /// Identifier provided in the request.
        structure: StructureId,
        /// Specific reason the removal failed.
        reason: RemovalError,
    },
    /// Confirms that a numbering pass was committed.
    SequentialIdsCommitted {
        /// Number of tiles that received a position.
        tiles: usize,
        /// Number of structures that received a number.
        structures: usize,
    },
}

/// Reasons a placement request may be rejected by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell already holds a tile.
    #[error("cell {coord} is already occupied")]
    Occupied {
        /// First occupied cell encountered.
        coord: GridCoord,
    },
}

/// Reasons a removal request may be rejected by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum RemovalError {
    /// No tile exists at the requested cell.
    #[error("no tile exists at the requested cell")]
    MissingTile,
    /// The cell is a structure placeholder and must be removed with its structure.
    #[error("cell belongs to a structure footprint")]
    StructureCell,
    /// No structure with the provided identifier exists.
    #[error("no structure with the requested identifier exists")]
    MissingStructure,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = GridCoord::new(-1, 2);
        let destination = GridCoord::new(3, -1);
        assert_eq!(origin.manhattan_distance(destination), 7);
        assert_eq!(destination.manhattan_distance(origin), 7);
    }

    #[test]
    fn cardinal_neighbors_follow_north_east_south_west() {
        let neighbors: Vec<GridCoord> = GridCoord::new(0, 0).cardinal_neighbors().collect();
        assert_eq!(
            neighbors,
            vec![
                GridCoord::new(0, 1),
                GridCoord::new(1, 0),
                GridCoord::new(0, -1),
                GridCoord::new(-1, 0),
            ]
        );
    }

    #[test]
    fn coordinate_space_edges_have_no_wrapping_neighbors() {
        let corner = GridCoord::new(i32::MAX, i32::MIN);

        assert_eq!(corner.step(Direction::East), None);
        assert_eq!(corner.step(Direction::South), None);
        assert_eq!(
            corner.cardinal_neighbors().collect::<Vec<_>>(),
            vec![
                GridCoord::new(i32::MAX, i32::MIN + 1),
                GridCoord::new(i32::MAX - 1, i32::MIN),
            ]
        );
        assert_eq!(
            GridCoord::new(i32::MIN, 0).manhattan_distance(GridCoord::new(i32::MAX, 1)),
            u32::MAX
        );
    }

    #[test]
    fn direction_to_requires_adjacency() {
        let origin = GridCoord::new(4, 4);
        assert_eq!(
            origin.direction_to(GridCoord::new(4, 5)),
            Some(Direction::North)
        );
        assert_eq!(
            origin.direction_to(GridCoord::new(3, 4)),
            Some(Direction::West)
        );
        assert_eq!(origin.direction_to(GridCoord::new(5, 5)), None);
        assert_eq!(origin.direction_to(origin), None);
    }

    #[test]
    fn coordinates_order_by_x_then_z() {
        let mut coords = vec![
            GridCoord::new(1, 0),
            GridCoord::new(0, 5),
            GridCoord::new(0, -2),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![
                GridCoord::new(0, -2),
                GridCoord::new(0, 5),
                GridCoord::new(1, 0)
            ]
        );
    }

    #[test]
    fn quad_footprint_covers_four_cells() {
        let footprint = Footprint::new(GridCoord::new(2, 3), StructureSize::Quad);
        assert_eq!(
            footprint.cells(),
            vec![
                GridCoord::new(2, 3),
                GridCoord::new(2, 4),
                GridCoord::new(3, 3),
                GridCoord::new(3, 4),
            ]
        );
        assert!(footprint.contains(GridCoord::new(3, 4)));
        assert!(!footprint.contains(GridCoord::new(4, 4)));
    }

    #[test]
    fn single_footprint_covers_origin_only() {
        let footprint = Footprint::new(GridCoord::new(-3, 1), StructureSize::Single);
        assert_eq!(footprint.cells(), vec![GridCoord::new(-3, 1)]);
    }

    #[test]
    fn sentinel_holds_no_position() {
        assert!(!SequentialId::INVALID.is_valid());
        assert_eq!(SequentialId::INVALID.position(), None);
        assert_eq!(SequentialId::default(), SequentialId::INVALID);
        assert_eq!(SequentialId::new(7).position(), Some(7));
    }

    #[test]
    fn structure_placeholders_are_not_walkable() {
        assert!(TileKind::Path(PathKind::Hospital).is_walkable());
        assert!(!TileKind::Structure(StructureSize::Quad).is_walkable());
        assert_eq!(TileKind::Structure(StructureSize::Single).path_kind(), None);
    }

    #[test]
    fn new_tiles_start_without_position() {
        let tile = Tile::path(GridCoord::new(0, 0), PathKind::Empty);
        assert_eq!(tile.sequential_id(), SequentialId::INVALID);
    }

    #[test]
    fn assignment_reports_sentinel_for_unlisted_tiles() {
        let assignment = SequentialIdAssignment::new(
            Some(GridCoord::new(0, 0)),
            vec![(GridCoord::new(0, 0), SequentialId::new(0))],
            Vec::new(),
        );
        assert_eq!(assignment.tile_id(GridCoord::new(0, 0)), SequentialId::new(0));
        assert_eq!(
            assignment.tile_id(GridCoord::new(9, 9)),
            SequentialId::INVALID
        );
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn numbered_tile_round_trips_through_bincode() {
        let tile = Tile::with_sequential_id(
            GridCoord::new(-4, 9),
            TileKind::Path(PathKind::Chance),
            SequentialId::new(12),
        );
        assert_round_trip(&tile);
    }

    #[test]
    fn structure_round_trips_through_bincode() {
        let mut structure = Structure::new(
            StructureId::new(3),
            PropertyGroup::new(2),
            Footprint::new(GridCoord::new(1, 1), StructureSize::Quad),
        );
        structure.set_sequential_id(SequentialId::new(0));
        assert_round_trip(&structure);
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::Occupied {
            coord: GridCoord::new(2, 2),
        });
    }
}
