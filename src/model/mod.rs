pub mod combat;
pub mod entity;
pub mod game_state;
pub mod map;
pub mod rng_state;
pub mod tile;
pub mod ui;

pub use combat::{CombatMode, CombatState};
pub use entity::{
    condition, Controller, ControllerType, Entity, EntityKind, InventoryItem, Position, Stats,
    Token,
};
pub use game_state::{Difficulty, Entities, EventLog, GameState};
pub use map::{Grid, GridKind, GridSize, MapState};
pub use rng_state::{RngMode, RngState, RollRecord};
pub use tile::{Tile, TileKind};
pub use ui::UiState;
