use serde::{Deserialize, Serialize};

use crate::events::Event;

use super::combat::CombatState;
use super::entity::{Entity, EntityKind, Position};
use super::map::MapState;
use super::rng_state::RngState;
use super::ui::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Deadly,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<Event>,
}

impl EventLog {
    /// Next `evt-NNNN` id, zero-padded to 4 and monotonically increasing.
    pub fn next_event_id(&self) -> String {
        format!("evt-{:04}", self.events.len() + 1)
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub players: Vec<Entity>,
    #[serde(default)]
    pub npcs: Vec<Entity>,
    #[serde(default)]
    pub objects: Vec<Entity>,
}

impl Entities {
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.players.iter().chain(self.npcs.iter()).chain(self.objects.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.players
            .iter_mut()
            .chain(self.npcs.iter_mut())
            .chain(self.objects.iter_mut())
    }

    pub fn bucket(&self, kind: EntityKind) -> &[Entity] {
        match kind {
            EntityKind::Player => &self.players,
            EntityKind::Npc => &self.npcs,
            EntityKind::Object => &self.objects,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.iter_mut().find(|e| e.id == id)
    }

    pub fn entity_at(&self, pos: Position) -> Option<&Entity> {
        self.iter().find(|e| e.position == pos)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub schema_version: String,
    pub campaign_id: String,
    pub session_id: String,
    pub timestamp: String,
    pub map: MapState,
    pub entities: Entities,
    pub combat: CombatState,
    pub rng: RngState,
    pub log: EventLog,
    #[serde(default)]
    pub ui: UiState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl GameState {
    /// The core never aliases state across an `apply_action` boundary: a
    /// plain derived `Clone` is sufficient because `GameState` owns every
    /// substructure outright (no `Rc`/`Arc` sharing anywhere in the tree).
    pub fn deep_clone(&self) -> GameState {
        self.clone()
    }
}
