//! Engine-fixed condition semantics (spec §4.7) — the helpers resolvers call
//! directly, independent of whichever rule module is active. A custom rule
//! module can still reinterpret individual condition codes through its own
//! `ConditionHooks::effects`, but the core's own branch points only ever test
//! the codes in [`crate::model::condition`].

use crate::model::{condition, Entity};
use crate::rules::ConditionEffect;

/// The baseline effect table every rule module starts from.
pub fn effects(code: &str) -> ConditionEffect {
    match code {
        c if c == condition::STUNNED => ConditionEffect { skip_turn: true, ..Default::default() },
        c if c == condition::POISONED => ConditionEffect { tick_damage: 2, ..Default::default() },
        c if c == condition::PRONE => ConditionEffect {
            ac_modifier: -2,
            disadvantage: true,
            ..Default::default()
        },
        c if c == condition::BLESSED => ConditionEffect { attack_modifier: 1, ..Default::default() },
        c if c == condition::BURNING => ConditionEffect { tick_damage: 3, ..Default::default() },
        // `dead` carries no modifiers of its own: entities with it are
        // already excluded from initiative, attacks, and the planner.
        _ => ConditionEffect::default(),
    }
}

pub fn has_attack_disadvantage(entity: &Entity) -> bool {
    entity.conditions.iter().any(|c| effects(c).disadvantage)
}

pub fn get_attack_modifier(entity: &Entity) -> i32 {
    let base = entity.stats.attack_bonus.unwrap_or(0);
    let from_conditions: i32 = entity.conditions.iter().map(|c| effects(c).attack_modifier).sum();
    base + from_conditions
}

pub fn get_ac_modifier(entity: &Entity) -> i32 {
    entity.conditions.iter().map(|c| effects(c).ac_modifier).sum()
}

pub fn should_skip_turn(entity: &Entity) -> bool {
    !entity.is_alive() || entity.conditions.iter().any(|c| effects(c).skip_turn)
}

/// Total per-round tick damage across all of an entity's conditions.
pub fn tick_damage(entity: &Entity) -> i64 {
    entity.conditions.iter().map(|c| effects(c).tick_damage).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;
    use crate::testutil::player;

    #[test]
    fn stunned_entity_skips_its_turn() {
        let mut e = player("pc-seren", Position::new(0, 0));
        e.add_condition(condition::STUNNED);
        assert!(should_skip_turn(&e));
    }

    #[test]
    fn prone_grants_disadvantage_and_lowers_effective_ac() {
        let mut e = player("pc-seren", Position::new(0, 0));
        e.add_condition(condition::PRONE);
        assert!(has_attack_disadvantage(&e));
        assert_eq!(get_ac_modifier(&e), -2);
    }

    #[test]
    fn blessed_adds_a_flat_attack_bonus() {
        let mut e = player("pc-seren", Position::new(0, 0));
        e.add_condition(condition::BLESSED);
        assert_eq!(get_attack_modifier(&e), 1);
    }

    #[test]
    fn dead_entity_always_skips_turn_even_without_other_conditions() {
        let mut e = player("pc-seren", Position::new(0, 0));
        e.add_condition(condition::DEAD);
        assert!(should_skip_turn(&e));
    }
}
