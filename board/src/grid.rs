//! Hash-indexed tile storage keyed by grid coordinate.

use std::collections::{hash_map::Entry, HashMap, HashSet};

use board_topology_core::{GridCoord, PlacementError, SequentialId, Tile};

/// Mapping from grid coordinates to tile records.
///
/// Each coordinate holds at most one tile. Single-tile operations run in
/// expected constant time; passes that need a stable visiting order use
/// [`GridIndex::sorted_coords`] because hash iteration order is unspecified.
#[derive(Clone, Debug, Default)]
pub struct GridIndex {
    tiles: HashMap<GridCoord, Tile>,
}

impl GridIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from the provided tiles, rejecting duplicate coordinates.
    pub fn from_tiles<I>(tiles: I) -> Result<Self, PlacementError>
    where
        I: IntoIterator<Item = Tile>,
    {
        let mut index = Self::new();
        for tile in tiles {
            index.put(tile)?;
        }
        Ok(index)
    }

    /// Inserts a tile at its coordinate.
    pub fn put(&mut self, tile: Tile) -> Result<(), PlacementError> {
        match self.tiles.entry(tile.coord()) {
            Entry::Occupied(occupied) => Err(PlacementError::Occupied {
                coord: *occupied.key(),
            }),
            Entry::Vacant(slot) => {
                let _ = slot.insert(tile);
                Ok(())
            }
        }
    }

    /// Inserts every tile or none of them.
    pub fn put_all(&mut self, tiles: &[Tile]) -> Result<(), PlacementError> {
        let mut pending = HashSet::with_capacity(tiles.len());
        for tile in tiles {
            let coord = tile.coord();
            if self.tiles.contains_key(&coord) || !pending.insert(coord) {
                return Err(PlacementError::Occupied { coord });
            }
        }

        self.tiles
            .extend(tiles.iter().map(|tile| (tile.coord(), *tile)));
        Ok(())
    }

    /// Removes and returns the tile stored at the coordinate.
    pub fn remove(&mut self, coord: GridCoord) -> Option<Tile> {
        self.tiles.remove(&coord)
    }

    /// Tile stored at the coordinate, if any.
    #[must_use]
    pub fn get(&self, coord: GridCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub(crate) fn get_mut(&mut self, coord: GridCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    /// Reports whether a tile exists at the coordinate.
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Reports whether a walkable tile exists at the coordinate.
    #[must_use]
    pub fn is_walkable(&self, coord: GridCoord) -> bool {
        self.get(coord).is_some_and(Tile::is_walkable)
    }

    /// Occupied cardinal neighbours of the coordinate in north, east, south, west order.
    pub fn neighbors(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> + '_ {
        coord
            .cardinal_neighbors()
            .filter(move |neighbor| self.tiles.contains_key(neighbor))
    }

    /// Number of tiles stored in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Reports whether the index holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterator over every tile in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Every occupied coordinate in ascending `x`, then `z` order.
    #[must_use]
    pub fn sorted_coords(&self) -> Vec<GridCoord> {
        let mut coords: Vec<GridCoord> = self.tiles.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    /// Board position recorded for the tile at the coordinate.
    #[must_use]
    pub fn sequential_id(&self, coord: GridCoord) -> Option<SequentialId> {
        self.get(coord).map(Tile::sequential_id)
    }

    pub(crate) fn reset_sequential_ids(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.set_sequential_id(SequentialId::INVALID);
        }
    }
}
