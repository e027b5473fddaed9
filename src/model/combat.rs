use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatMode {
    Exploration,
    Combat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    pub mode: CombatMode,
    pub round: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_entity_id: Option<String>,
    #[serde(default)]
    pub initiative_order: Vec<String>,
}

impl CombatState {
    pub fn exploration() -> Self {
        Self {
            mode: CombatMode::Exploration,
            round: 0,
            active_entity_id: None,
            initiative_order: Vec::new(),
        }
    }

    pub fn is_combat(&self) -> bool {
        self.mode == CombatMode::Combat
    }
}

impl Default for CombatState {
    fn default() -> Self {
        Self::exploration()
    }
}
