//! An alternate ruleset demonstrating that the engine is not hard-wired to
//! d20 conventions: 2d10-vs-target-number attack rolls, flat (non-random)
//! weapon damage, and no ability cooldowns at all.

use crate::model::{Entity, RngState, TileKind};
use crate::rng;

use super::{
    AbilityHooks, AttackRollOutcome, CombatHooks, ConditionEffect, ConditionHooks, DamageHooks,
    HealingHooks, ModuleMeta, MovementHooks, RuleModule,
};

const FLAT_WEAPON_DAMAGE: i64 = 4;

pub struct HomebrewRuleModule {
    meta: ModuleMeta,
}

impl HomebrewRuleModule {
    pub fn new() -> Self {
        Self {
            meta: ModuleMeta {
                id: "homebrew-2d10".to_string(),
                name: "Homebrew 2d10".to_string(),
                version: "1.0.0".to_string(),
                description: "2d10 attack rolls vs. target number, flat weapon damage, no cooldowns"
                    .to_string(),
                author: "core".to_string(),
            },
        }
    }
}

impl Default for HomebrewRuleModule {
    fn default() -> Self {
        Self::new()
    }
}

struct HomebrewCombat;
struct HomebrewAbilities;
struct HomebrewConditions;
struct HomebrewMovement;
struct HomebrewDamage;
struct HomebrewHealing;

impl CombatHooks for HomebrewCombat {
    fn attack_roll(&self, attacker: &Entity, rng_state: &RngState) -> (AttackRollOutcome, RngState) {
        let disadvantage = crate::conditions::has_attack_disadvantage(attacker);
        let (first, after_first) = rng::roll_dice(rng_state, 2, 10, "attack");
        if !disadvantage {
            let outcome = AttackRollOutcome { raw_roll: first as i32, disadvantage, attack_roll: first as i32 };
            return (outcome, after_first);
        }
        let (second, after_second) = rng::roll_dice(&after_first, 2, 10, "attack-disadvantage");
        let chosen = first.min(second);
        let outcome = AttackRollOutcome { raw_roll: first as i32, disadvantage, attack_roll: chosen as i32 };
        (outcome, after_second)
    }

    /// Flat, non-random weapon damage — the hallmark of this ruleset.
    fn damage_roll(&self, _attacker: &Entity, _target: &Entity, rng_state: &RngState) -> (i64, RngState) {
        (FLAT_WEAPON_DAMAGE, rng_state.clone())
    }

    fn initiative(&self, _entity: &Entity, rng_state: &RngState) -> (i32, RngState) {
        let (roll, next) = rng::roll_dice(rng_state, 2, 10, "initiative");
        (roll as i32, next)
    }

    fn attack_range(&self, attacker: &Entity) -> u32 {
        attacker.stats.attack_range_or_default()
    }

    fn can_attack(&self, attacker: &Entity, target: &Entity) -> bool {
        attacker.is_alive() && target.is_alive() && attacker.id != target.id
    }
}

impl AbilityHooks for HomebrewAbilities {
    fn can_use(&self, caster: &Entity, _ability_id: &str) -> bool {
        caster.is_alive()
    }

    /// No cooldowns in this ruleset.
    fn cooldown(&self, _ability_id: &str) -> u32 {
        0
    }

    fn cost(&self, _ability_id: &str) -> u32 {
        0
    }
}

impl ConditionHooks for HomebrewConditions {
    fn effects(&self, condition: &str) -> ConditionEffect {
        // Harsher poison/burn ticks than the default module; everything else
        // reuses the shared table.
        let mut effect = crate::conditions::effects(condition);
        if condition == crate::model::condition::POISONED || condition == crate::model::condition::BURNING {
            effect.tick_damage *= 2;
        }
        effect
    }

    fn tick(&self, entity: &Entity) -> i64 {
        entity
            .conditions
            .iter()
            .map(|c| self.effects(c).tick_damage)
            .sum()
    }
}

impl MovementHooks for HomebrewMovement {
    fn terrain_cost(&self, kind: TileKind) -> u32 {
        match kind {
            TileKind::Water => 3,
            other => other.default_step_cost(),
        }
    }

    fn speed(&self, entity: &Entity) -> u32 {
        entity.stats.movement_speed
    }
}

impl DamageHooks for HomebrewDamage {
    fn reduction(&self, damage: i64, target: &Entity) -> i64 {
        let reduction = target.stats.damage_reduction.unwrap_or(0) as i64;
        (damage - reduction).max(0)
    }

    fn resistance(&self, damage: i64, target: &Entity, damage_kind: &str) -> i64 {
        let resisted = target
            .resistances
            .as_ref()
            .map_or(false, |list| list.iter().any(|r| r == damage_kind));
        if resisted {
            damage / 2
        } else {
            damage
        }
    }

    /// No crit multiplier in this ruleset; a 20-equivalent result (both dice
    /// max) simply hits normally.
    fn critical(&self, base: i64, _raw_roll: i32) -> i64 {
        base
    }
}

impl HealingHooks for HomebrewHealing {
    fn amount(&self, base: i64) -> i64 {
        base
    }

    fn can_heal(&self, healer: &Entity, target: &Entity) -> bool {
        healer.is_alive() && target.is_alive()
    }
}

impl RuleModule for HomebrewRuleModule {
    fn meta(&self) -> &ModuleMeta {
        &self.meta
    }
    fn combat(&self) -> &dyn CombatHooks {
        &HomebrewCombat
    }
    fn abilities(&self) -> &dyn AbilityHooks {
        &HomebrewAbilities
    }
    fn conditions(&self) -> &dyn ConditionHooks {
        &HomebrewConditions
    }
    fn movement(&self) -> &dyn MovementHooks {
        &HomebrewMovement
    }
    fn damage(&self) -> &dyn DamageHooks {
        &HomebrewDamage
    }
    fn healing(&self) -> &dyn HealingHooks {
        &HomebrewHealing
    }
}
