use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Integer grid coordinate, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `max(|dx|, |dy|)` — diagonal movement counts as 1.
    pub fn chebyshev_distance(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// `|dx| + |dy|` — no diagonal shortcuts.
    pub fn manhattan_distance(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Player,
    Npc,
    Object,
}

/// Condition codes the core engine itself branches on. Custom rule modules
/// may attach other condition strings; the engine's own resolvers only ever
/// special-case these.
pub mod condition {
    pub const DEAD: &str = "dead";
    pub const STUNNED: &str = "stunned";
    pub const POISONED: &str = "poisoned";
    pub const PRONE: &str = "prone";
    pub const BLESSED: &str = "blessed";
    pub const BURNING: &str = "burning";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Stats {
    pub hp_current: i64,
    pub hp_max: i64,
    pub ac: i32,
    pub movement_speed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_range: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_range: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_bonus: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_bonus: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dexterity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_reduction: Option<i32>,
    /// Weapon damage type an attack roll carries, consulted by
    /// `DamageHooks::resistance` against a target's `resistances` list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_kind: Option<String>,
}

impl Stats {
    /// `attack_range` read with its documented default of 1 (adjacent only).
    pub fn attack_range_or_default(&self) -> u32 {
        self.attack_range.unwrap_or(1)
    }

    /// `vision_range` read with its documented default, taken from
    /// `VisibilityPreferences::default_vision_range`.
    pub fn vision_range_or_default(&self) -> u32 {
        self.vision_range.unwrap_or(crate::config::VisibilityPreferences::default().default_vision_range)
    }

    /// `damage_kind` read with its documented default of `"physical"`.
    pub fn damage_kind_or_default(&self) -> &str {
        self.damage_kind.as_deref().unwrap_or("physical")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub qty: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerType {
    Human,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    #[serde(rename = "type")]
    pub kind: ControllerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub kind: EntityKind,
    pub name: String,
    pub position: Position,
    pub size: u32,
    pub stats: Stats,
    /// Ordered set of non-empty condition codes. Ordered (not a `HashSet`) so
    /// that serialization and `state_hash` stay stable without needing a
    /// secondary sort key.
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    pub token: Token,
    pub controller: Controller,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability_cooldowns: Option<HashMap<String, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistances: Option<Vec<String>>,
}

impl Entity {
    pub fn is_alive(&self) -> bool {
        !self.has_condition(condition::DEAD)
    }

    pub fn has_condition(&self, code: &str) -> bool {
        self.conditions.iter().any(|c| c == code)
    }

    pub fn add_condition(&mut self, code: &str) {
        if !self.has_condition(code) {
            self.conditions.push(code.to_string());
        }
    }

    /// Apply lethal damage bookkeeping: clamp hp to zero and, if it reached
    /// zero, attach the `dead` condition. Idempotent.
    pub fn apply_damage(&mut self, amount: i64) {
        self.stats.hp_current = (self.stats.hp_current - amount).max(0);
        if self.stats.hp_current == 0 {
            self.add_condition(condition::DEAD);
        }
    }
}
