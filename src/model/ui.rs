use serde::{Deserialize, Serialize};

use super::entity::Position;

/// Caller-owned UI hints. The core never mutates these except to carry them
/// through on a cloned state; they do not affect game-logic determinism.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hovered_cell: Option<Position>,
}
