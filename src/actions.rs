//! The declarative action ADT callers submit to [`crate::apply::apply_action`].

use serde::{Deserialize, Serialize};

use crate::model::Position;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "MOVE")]
    Move { entity_id: String, path: Vec<Position> },
    #[serde(rename = "ATTACK")]
    Attack { attacker_id: String, target_id: String },
    #[serde(rename = "END_TURN")]
    EndTurn { entity_id: String },
    #[serde(rename = "ROLL_INITIATIVE")]
    RollInitiative {},
    #[serde(rename = "SET_SEED")]
    SetSeed { seed: String },
}

impl Action {
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::Move { .. } => "MOVE",
            Action::Attack { .. } => "ATTACK",
            Action::EndTurn { .. } => "END_TURN",
            Action::RollInitiative {} => "ROLL_INITIATIVE",
            Action::SetSeed { .. } => "SET_SEED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_action_round_trips_through_json() {
        let action = Action::Move {
            entity_id: "pc-seren".to_string(),
            path: vec![Position::new(2, 4), Position::new(2, 5)],
        };
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }

    #[test]
    fn unknown_action_type_fails_to_deserialize() {
        let json = r#"{"type":"TELEPORT","entity_id":"x"}"#;
        let result: Result<Action, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
