use crate::error::{ErrorCode, GameError};
use crate::events::{EventKind, InitiativeEntry};
use crate::model::{CombatMode, GameState};
use crate::rules::RuleModule;

use super::ResolverResult;

pub fn resolve(state: &mut GameState, rules: &dyn RuleModule) -> ResolverResult {
    if state.combat.mode != CombatMode::Exploration {
        return Err(vec![GameError::new(ErrorCode::CombatAlready, "combat is already in progress")]);
    }

    let participants: Vec<crate::model::Entity> = state
        .entities
        .players
        .iter()
        .chain(state.entities.npcs.iter())
        .filter(|e| e.is_alive())
        .cloned()
        .collect();

    let mut rolled: Vec<(String, i32)> = Vec::with_capacity(participants.len());
    let mut rng = state.rng.clone();
    for entity in &participants {
        let (roll, next_rng) = rules.combat().initiative(entity, &rng);
        rolled.push((entity.id.clone(), roll));
        rng = next_rng;
    }
    state.rng = rng;

    rolled.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    state.combat.mode = CombatMode::Combat;
    state.combat.round = 1;
    state.combat.initiative_order = rolled.iter().map(|(id, _)| id.clone()).collect();
    state.combat.active_entity_id = state.combat.initiative_order.first().cloned();

    let order = rolled
        .into_iter()
        .map(|(entity_id, roll)| InitiativeEntry { entity_id, roll })
        .collect();

    let event_id = state.log.next_event_id();
    let timestamp = state.log.events.len() as u64;
    state
        .log
        .push(crate::events::Event::new(event_id, timestamp, EventKind::InitiativeRolled { order }));

    Ok(())
}
