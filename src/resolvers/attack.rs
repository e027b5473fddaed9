use crate::config::DifficultyTable;
use crate::error::{ErrorCode, GameError};
use crate::events::EventKind;
use crate::model::{condition, EntityKind, GameState};
use crate::rules::RuleModule;

use super::ResolverResult;

fn fail(code: ErrorCode, message: impl Into<String>) -> ResolverResult {
    Err(vec![GameError::new(code, message)])
}

/// `difficulty` is read-only and only ever nudges NPC offense and player
/// defense (spec §4.6): it never touches the RNG stream, and player-on-NPC
/// attacks are unaffected. An NPC attacker's `attack_modifier` shifts by
/// `attack_modifier`; a player target's effective AC shifts by
/// `ac_modifier`. `easy` therefore means weaker NPC attacks plus tougher
/// player defense; `deadly` means the reverse.
fn difficulty_attack_modifier(state: &GameState, attacker_kind: EntityKind) -> i32 {
    match (state.difficulty, attacker_kind) {
        (Some(d), EntityKind::Npc) => DifficultyTable::default().get(d).attack_modifier,
        _ => 0,
    }
}

fn difficulty_ac_modifier(state: &GameState, target_kind: EntityKind) -> i32 {
    match (state.difficulty, target_kind) {
        (Some(d), EntityKind::Player) => DifficultyTable::default().get(d).ac_modifier,
        _ => 0,
    }
}

pub fn resolve(state: &mut GameState, attacker_id: &str, target_id: &str, rules: &dyn RuleModule) -> ResolverResult {
    if attacker_id == target_id {
        return fail(ErrorCode::SelfAttack, "an entity cannot attack itself");
    }
    let attacker = match state.entities.get(attacker_id) {
        Some(e) => e,
        None => return fail(ErrorCode::EntityNotFound, format!("attacker '{}' does not exist", attacker_id)),
    };
    if !attacker.is_alive() {
        return fail(ErrorCode::DeadEntity, format!("attacker '{}' is dead", attacker_id));
    }
    let target = match state.entities.get(target_id) {
        Some(e) => e,
        None => return fail(ErrorCode::EntityNotFound, format!("target '{}' does not exist", target_id)),
    };
    if !target.is_alive() {
        return fail(ErrorCode::TargetDead, format!("target '{}' is already dead", target_id));
    }
    if attacker.has_condition(condition::STUNNED) {
        return fail(ErrorCode::InvalidAction, format!("attacker '{}' is stunned", attacker_id));
    }

    let attack_range = rules.combat().attack_range(attacker);
    if attacker.position.chebyshev_distance(target.position) > attack_range as i32 {
        return fail(ErrorCode::OutOfRange, format!("target '{}' is outside attack range {}", target_id, attack_range));
    }

    let attacker_snapshot = attacker.clone();
    let target_kind = target.kind;
    let target_base_ac = target.stats.ac;
    let ac_modifier = crate::conditions::get_ac_modifier(target) + difficulty_ac_modifier(state, target_kind);

    let (attack_outcome, rng_after_attack) = rules.combat().attack_roll(&attacker_snapshot, &state.rng);
    let attack_modifier =
        crate::conditions::get_attack_modifier(&attacker_snapshot) + difficulty_attack_modifier(state, attacker_snapshot.kind);
    let effective_ac = target_base_ac + ac_modifier;
    let hit_total = attack_outcome.attack_roll + attack_modifier;
    let hit = hit_total >= effective_ac;

    let (damage, rng_after_damage, target_hp_after) = if hit {
        let target_snapshot = state.entities.get(target_id).unwrap().clone();
        let (raw_damage, rng_after) = rules.combat().damage_roll(&attacker_snapshot, &target_snapshot, &rng_after_attack);
        let critical_damage = rules.damage().critical(raw_damage, attack_outcome.attack_roll);
        let damage_kind = attacker_snapshot.stats.damage_kind_or_default();
        let resisted_damage = rules.damage().resistance(critical_damage, &target_snapshot, damage_kind);
        let damage = rules.damage().reduction(resisted_damage, &target_snapshot);
        let target_mut = state.entities.get_mut(target_id).unwrap();
        target_mut.apply_damage(damage);
        (damage, rng_after, target_mut.stats.hp_current)
    } else {
        let hp = state.entities.get(target_id).unwrap().stats.hp_current;
        (0, rng_after_attack, hp)
    };

    state.rng = rng_after_damage;

    let event_id = state.log.next_event_id();
    let timestamp = state.log.events.len() as u64;
    state.log.push(crate::events::Event::new(
        event_id,
        timestamp,
        EventKind::AttackResolved {
            attacker_id: attacker_id.to_string(),
            target_id: target_id.to_string(),
            raw_roll: attack_outcome.raw_roll,
            attack_modifier,
            attack_roll: attack_outcome.attack_roll,
            target_base_ac,
            ac_modifier,
            effective_ac,
            disadvantage: attack_outcome.disadvantage,
            hit,
            damage,
            target_hp_after,
        },
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::default_module;
    use crate::testutil::combat_fixture;

    #[test]
    fn attack_resolves_reproducibly_from_the_same_seed() {
        let rules = default_module();

        let mut a = combat_fixture();
        let result_a = resolve(&mut a, "pc-seren", "npc-goblin-a", rules.as_ref());
        assert!(result_a.is_ok());

        let mut b = combat_fixture();
        let result_b = resolve(&mut b, "pc-seren", "npc-goblin-a", rules.as_ref());
        assert!(result_b.is_ok());

        assert_eq!(a.log.events, b.log.events);
        assert_eq!(
            a.entities.get("npc-goblin-a").unwrap().stats.hp_current,
            b.entities.get("npc-goblin-a").unwrap().stats.hp_current
        );
    }

    #[test]
    fn deadly_difficulty_raises_npc_attack_modifier_and_lowers_player_ac() {
        let rules = default_module();
        let mut state = combat_fixture();
        state.difficulty = Some(crate::model::Difficulty::Deadly);

        let result = resolve(&mut state, "npc-goblin-a", "pc-seren", rules.as_ref());
        assert!(result.is_ok());
        let EventKind::AttackResolved { attack_modifier, ac_modifier, .. } = &state.log.events[0].kind else {
            panic!("expected ATTACK_RESOLVED");
        };
        assert_eq!(*attack_modifier, 4);
        assert_eq!(*ac_modifier, -2);
    }

    #[test]
    fn difficulty_never_touches_a_player_attacking_an_npc() {
        let rules = default_module();
        let mut state = combat_fixture();
        state.difficulty = Some(crate::model::Difficulty::Deadly);

        let result = resolve(&mut state, "pc-seren", "npc-goblin-a", rules.as_ref());
        assert!(result.is_ok());
        let EventKind::AttackResolved { attack_modifier, ac_modifier, .. } = &state.log.events[0].kind else {
            panic!("expected ATTACK_RESOLVED");
        };
        assert_eq!(*attack_modifier, 0);
        assert_eq!(*ac_modifier, 0);
    }

    #[test]
    fn resistance_hook_is_consulted_between_critical_and_reduction() {
        let rules = default_module();

        let mut without_resistance = combat_fixture();
        without_resistance.entities.npcs[0].stats.ac = -100;
        let result_without = resolve(&mut without_resistance, "pc-seren", "npc-goblin-a", rules.as_ref());
        assert!(result_without.is_ok());
        let EventKind::AttackResolved { damage: damage_without, hit: hit_without, .. } = &without_resistance.log.events[0].kind
        else {
            panic!("expected ATTACK_RESOLVED");
        };
        assert!(*hit_without);

        let mut with_resistance = combat_fixture();
        with_resistance.entities.npcs[0].stats.ac = -100;
        with_resistance.entities.npcs[0].resistances = Some(vec!["physical".to_string()]);
        let result_with = resolve(&mut with_resistance, "pc-seren", "npc-goblin-a", rules.as_ref());
        assert!(result_with.is_ok());
        let EventKind::AttackResolved { damage: damage_with, hit: hit_with, .. } = &with_resistance.log.events[0].kind else {
            panic!("expected ATTACK_RESOLVED");
        };
        assert!(*hit_with);

        assert_eq!(*damage_with, damage_without / 2);
    }

    #[test]
    fn self_attack_is_rejected() {
        let mut state = combat_fixture();
        let rules = default_module();
        let result = resolve(&mut state, "pc-seren", "pc-seren", rules.as_ref());
        assert!(matches!(result, Err(errs) if errs[0].code == ErrorCode::SelfAttack));
    }

    #[test]
    fn out_of_range_attack_is_rejected() {
        let mut state = combat_fixture();
        state.entities.npcs[0].position = crate::model::Position::new(50, 50);
        let rules = default_module();
        let result = resolve(&mut state, "pc-seren", "npc-goblin-a", rules.as_ref());
        assert!(matches!(result, Err(errs) if errs[0].code == ErrorCode::OutOfRange));
    }
}
