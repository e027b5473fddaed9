//! The append-only event log vocabulary. Every event the core ever emits is
//! one of these seven kinds; resolvers never invent ad-hoc payloads.

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::model::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Players,
    Npcs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeEntry {
    pub entity_id: String,
    pub roll: i32,
}

/// The tagged payload body of an [`Event`]. Serializes as `{"type": "...",
/// "payload": {...}}` via `tag`/`content`, matching the wire format in
/// spec §6 exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum EventKind {
    #[serde(rename = "MOVE_APPLIED")]
    MoveApplied {
        entity_id: String,
        from: Position,
        final_position: Position,
        steps: u32,
    },
    #[serde(rename = "ATTACK_RESOLVED")]
    AttackResolved {
        attacker_id: String,
        target_id: String,
        raw_roll: i32,
        attack_modifier: i32,
        attack_roll: i32,
        target_base_ac: i32,
        ac_modifier: i32,
        effective_ac: i32,
        disadvantage: bool,
        hit: bool,
        damage: i64,
        target_hp_after: i64,
    },
    #[serde(rename = "INITIATIVE_ROLLED")]
    InitiativeRolled { order: Vec<InitiativeEntry> },
    #[serde(rename = "TURN_ENDED")]
    TurnEnded {
        entity_id: String,
        next_entity_id: String,
        round: u32,
    },
    #[serde(rename = "COMBAT_ENDED")]
    CombatEnded { winner: Winner },
    #[serde(rename = "RNG_SEED_SET")]
    RngSeedSet { seed: String },
    #[serde(rename = "ACTION_REJECTED")]
    ActionRejected { action: Action, reasons: Vec<String> },
}

impl EventKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            EventKind::MoveApplied { .. } => "MOVE_APPLIED",
            EventKind::AttackResolved { .. } => "ATTACK_RESOLVED",
            EventKind::InitiativeRolled { .. } => "INITIATIVE_ROLLED",
            EventKind::TurnEnded { .. } => "TURN_ENDED",
            EventKind::CombatEnded { .. } => "COMBAT_ENDED",
            EventKind::RngSeedSet { .. } => "RNG_SEED_SET",
            EventKind::ActionRejected { .. } => "ACTION_REJECTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub timestamp: u64,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    pub fn new(id: impl Into<String>, timestamp: u64, kind: EventKind) -> Self {
        Self {
            id: id.into(),
            timestamp,
            kind,
        }
    }
}
