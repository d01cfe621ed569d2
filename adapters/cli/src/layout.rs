//! Saved board layouts read and written by the command-line adapter.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use board_topology_board::{query, Board, RestoreError};
use board_topology_core::{Structure, Tile};
use serde::{Deserialize, Serialize};

/// Path tiles and structures that make up a saved board.
///
/// Structure placeholder cells are not stored; they are rebuilt from each
/// structure's footprint when the board is restored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct BoardLayout {
    /// Path tiles, including any saved board positions.
    #[serde(default)]
    pub(crate) tiles: Vec<Tile>,
    /// Ownable structures, including any saved structure numbers.
    #[serde(default)]
    pub(crate) structures: Vec<Structure>,
}

impl BoardLayout {
    /// Captures the walkable tiles and structures of a board in stable order.
    #[must_use]
    pub(crate) fn from_board(board: &Board) -> Self {
        let grid = query::grid(board);
        let tiles = grid
            .sorted_coords()
            .into_iter()
            .filter_map(|coord| grid.get(coord).copied())
            .filter(Tile::is_walkable)
            .collect();

        Self {
            tiles,
            structures: query::structures(board).copied().collect(),
        }
    }

    /// Rebuilds the board, trusting saved positions as-is.
    pub(crate) fn to_board(&self) -> Result<Board, RestoreError> {
        Board::restore(self.tiles.iter().copied(), self.structures.iter().copied())
    }

    /// Parses either a JSON layout or a single-line transfer string.
    pub(crate) fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.starts_with('{') {
            return serde_json::from_str(trimmed).context("could not parse JSON board layout");
        }

        Self::decode(trimmed).context("could not decode layout transfer string")
    }

    /// Reads and parses a layout file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read layout file {}", path.display()))?;
        let layout =
            Self::parse(&text).with_context(|| format!("invalid layout in {}", path.display()))?;
        log::info!(
            "loaded {} with {} tiles and {} structures",
            path.display(),
            layout.tiles.len(),
            layout.structures.len()
        );
        Ok(layout)
    }

    /// Writes the layout as pretty-printed JSON.
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("could not serialise layout")?;
        fs::write(path, json)
            .with_context(|| format!("could not write layout file {}", path.display()))
    }
}
