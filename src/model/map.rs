use serde::{Deserialize, Serialize};

use super::entity::Position;
use super::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridKind {
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub kind: GridKind,
    pub size: GridSize,
    pub cell_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapState {
    pub id: String,
    pub name: String,
    pub grid: Grid,
    pub terrain: Vec<Tile>,
    pub fog_of_war_enabled: bool,
}

impl MapState {
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.grid.size.w
            && (pos.y as u32) < self.grid.size.h
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.terrain.iter().find(|t| t.x == pos.x && t.y == pos.y)
    }

    /// Terrain not explicitly listed is treated as open ground, matching the
    /// pattern of a sparse terrain override list over an implicit open grid.
    pub fn blocks_movement(&self, pos: Position) -> bool {
        self.tile_at(pos).map(|t| t.blocks_movement).unwrap_or(false)
    }

    pub fn blocks_vision(&self, pos: Position) -> bool {
        self.tile_at(pos).map(|t| t.blocks_vision).unwrap_or(false)
    }
}
