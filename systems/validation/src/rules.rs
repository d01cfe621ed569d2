//! Thresholds applied by the validation engine.

use serde::{Deserialize, Serialize};

/// Tunable thresholds for every validation rule.
///
/// Missing fields fall back to [`ValidationRules::default`] when deserialised,
/// so configuration files only need to list the values they change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationRules {
    /// Fewest path tiles a playable board may hold.
    pub min_tiles: usize,
    /// Most path tiles a playable board may hold.
    pub max_tiles: usize,
    /// Requires a start or hospital tile somewhere on the board.
    pub require_start_tile: bool,
    /// Requires at least one hospital tile.
    pub require_hospital: bool,
    /// Fewest ownable structures a board may hold.
    pub min_properties: usize,
    /// Most dead ends tolerated before a warning is raised.
    pub max_dead_ends: usize,
    /// Requires every path tile to belong to a single region.
    pub require_connected: bool,
    /// Smallest comfortable number of structures per property group.
    pub min_group_size: usize,
    /// Largest comfortable number of structures per property group.
    pub max_group_size: usize,
    /// Fewest distinct property groups before a variety warning is raised.
    pub min_group_variety: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_tiles: 20,
            max_tiles: 100,
            require_start_tile: true,
            require_hospital: true,
            min_properties: 8,
            max_dead_ends: 2,
            require_connected: true,
            min_group_size: 2,
            max_group_size: 4,
            min_group_variety: 3,
        }
    }
}
