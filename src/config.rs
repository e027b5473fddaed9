//! Process-wide tunables that live outside `GameState` (SPEC_FULL §A.3):
//! default vision range, the planner's safety bound, replay verification
//! behavior, and the difficulty modifier table. Laid out as a struct of
//! small preference groups, each with its own `Default`, mirroring the
//! layered preferences pattern used elsewhere in this lineage.

use serde::{Deserialize, Serialize};

use crate::model::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyModifiers {
    pub attack_modifier: i32,
    pub ac_modifier: i32,
    pub hp_multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: DifficultyModifiers,
    pub normal: DifficultyModifiers,
    pub hard: DifficultyModifiers,
    pub deadly: DifficultyModifiers,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyModifiers { attack_modifier: -2, ac_modifier: 2, hp_multiplier: 0.75 },
            normal: DifficultyModifiers { attack_modifier: 0, ac_modifier: 0, hp_multiplier: 1.0 },
            hard: DifficultyModifiers { attack_modifier: 2, ac_modifier: -1, hp_multiplier: 1.25 },
            deadly: DifficultyModifiers { attack_modifier: 4, ac_modifier: -2, hp_multiplier: 1.5 },
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> DifficultyModifiers {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
            Difficulty::Deadly => self.deadly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityPreferences {
    pub default_vision_range: u32,
}

impl Default for VisibilityPreferences {
    fn default() -> Self {
        Self { default_vision_range: 8 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannerPreferences {
    /// Hard ceiling on actions folded per NPC turn; see `controller.rs`.
    pub safety_bound: usize,
}

impl Default for PlannerPreferences {
    fn default() -> Self {
        Self { safety_bound: 20 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayPreferences {
    pub verify_on_load: bool,
}

impl Default for ReplayPreferences {
    fn default() -> Self {
        Self { verify_on_load: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    pub visibility: VisibilityPreferences,
    pub planner: PlannerPreferences,
    pub replay: ReplayPreferences,
    pub difficulty: DifficultyTable,
}
