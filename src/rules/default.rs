//! The shipped d20-style ruleset: d20 attack rolls against AC, 1d6 base
//! weapon damage, standard terrain costs.

use crate::model::{Entity, RngState, TileKind};
use crate::rng;

use super::{
    AbilityHooks, AttackRollOutcome, CombatHooks, ConditionEffect, ConditionHooks, DamageHooks,
    HealingHooks, ModuleMeta, MovementHooks, RuleModule,
};

pub struct DefaultRuleModule {
    meta: ModuleMeta,
}

impl DefaultRuleModule {
    pub fn new() -> Self {
        Self {
            meta: ModuleMeta {
                id: "default-d20".to_string(),
                name: "Standard d20".to_string(),
                version: "1.0.0".to_string(),
                description: "d20 attack rolls vs. AC, 1d6 weapon damage, standard terrain costs"
                    .to_string(),
                author: "core".to_string(),
            },
        }
    }
}

impl Default for DefaultRuleModule {
    fn default() -> Self {
        Self::new()
    }
}

struct DefaultCombat;
struct DefaultAbilities;
struct DefaultConditions;
struct DefaultMovement;
struct DefaultDamage;
struct DefaultHealing;

impl CombatHooks for DefaultCombat {
    fn attack_roll(&self, attacker: &Entity, rng_state: &RngState) -> (AttackRollOutcome, RngState) {
        let disadvantage = crate::conditions::has_attack_disadvantage(attacker);
        let (first, after_first) = rng::roll_d20(rng_state, "attack");
        if !disadvantage {
            let outcome = AttackRollOutcome { raw_roll: first as i32, disadvantage, attack_roll: first as i32 };
            return (outcome, after_first);
        }
        let (second, after_second) = rng::roll_d20(&after_first, "attack-disadvantage");
        let chosen = first.min(second);
        let outcome = AttackRollOutcome { raw_roll: first as i32, disadvantage, attack_roll: chosen as i32 };
        (outcome, after_second)
    }

    fn damage_roll(&self, _attacker: &Entity, _target: &Entity, rng_state: &RngState) -> (i64, RngState) {
        rng::roll_dice(rng_state, 1, 6, "damage")
    }

    fn initiative(&self, _entity: &Entity, rng_state: &RngState) -> (i32, RngState) {
        let (roll, next) = rng::roll_d20(rng_state, "initiative");
        (roll as i32, next)
    }

    fn attack_range(&self, attacker: &Entity) -> u32 {
        attacker.stats.attack_range_or_default()
    }

    fn can_attack(&self, attacker: &Entity, target: &Entity) -> bool {
        attacker.is_alive() && target.is_alive() && attacker.id != target.id
    }
}

impl AbilityHooks for DefaultAbilities {
    fn can_use(&self, caster: &Entity, ability_id: &str) -> bool {
        caster.is_alive()
            && caster
                .ability_cooldowns
                .as_ref()
                .and_then(|c| c.get(ability_id))
                .map_or(true, |&remaining| remaining == 0)
    }

    fn cooldown(&self, _ability_id: &str) -> u32 {
        1
    }

    fn cost(&self, _ability_id: &str) -> u32 {
        0
    }
}

impl ConditionHooks for DefaultConditions {
    fn effects(&self, condition: &str) -> ConditionEffect {
        crate::conditions::effects(condition)
    }

    fn tick(&self, entity: &Entity) -> i64 {
        crate::conditions::tick_damage(entity)
    }
}

impl MovementHooks for DefaultMovement {
    fn terrain_cost(&self, kind: TileKind) -> u32 {
        kind.default_step_cost()
    }

    fn speed(&self, entity: &Entity) -> u32 {
        entity.stats.movement_speed
    }
}

impl DamageHooks for DefaultDamage {
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

    fn critical(&self, base: i64, raw_roll: i32) -> i64 {
        if raw_roll == 20 {
            base * 2
        } else {
            base
        }
    }
}

impl HealingHooks for DefaultHealing {
    fn amount(&self, base: i64) -> i64 {
        base
    }

    fn can_heal(&self, healer: &Entity, target: &Entity) -> bool {
        healer.is_alive() && target.is_alive()
    }
}

impl RuleModule for DefaultRuleModule {
    fn meta(&self) -> &ModuleMeta {
        &self.meta
    }
    fn combat(&self) -> &dyn CombatHooks {
        &DefaultCombat
    }
    fn abilities(&self) -> &dyn AbilityHooks {
        &DefaultAbilities
    }
    fn conditions(&self) -> &dyn ConditionHooks {
        &DefaultConditions
    }
    fn movement(&self) -> &dyn MovementHooks {
        &DefaultMovement
    }
    fn damage(&self) -> &dyn DamageHooks {
        &DefaultDamage
    }
    fn healing(&self) -> &dyn HealingHooks {
        &DefaultHealing
    }
}
