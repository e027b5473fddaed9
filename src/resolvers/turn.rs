use crate::error::{ErrorCode, GameError};
use crate::events::{EventKind, Winner};
use crate::model::{CombatMode, GameState};

use super::ResolverResult;

fn fail(code: ErrorCode, message: impl Into<String>) -> ResolverResult {
    Err(vec![GameError::new(code, message)])
}

fn faction_all_dead(entities: &[crate::model::Entity]) -> bool {
    !entities.is_empty() && entities.iter().all(|e| !e.is_alive())
}

pub fn resolve(state: &mut GameState, entity_id: &str) -> ResolverResult {
    if state.combat.mode != CombatMode::Combat {
        return fail(ErrorCode::InvalidAction, "END_TURN is only valid in combat");
    }
    if state.combat.active_entity_id.as_deref() != Some(entity_id) {
        return fail(ErrorCode::NotYourTurn, format!("it is not '{}'s turn", entity_id));
    }

    let players_dead = faction_all_dead(&state.entities.players);
    let npcs_dead = faction_all_dead(&state.entities.npcs);

    if players_dead || npcs_dead {
        let winner = if players_dead { Winner::Npcs } else { Winner::Players };
        state.combat.mode = CombatMode::Exploration;
        state.combat.round = 0;
        state.combat.active_entity_id = None;
        state.combat.initiative_order = Vec::new();

        push_event(state, EventKind::CombatEnded { winner });
        return Ok(());
    }

    let order = state.combat.initiative_order.clone();
    let current_index = order.iter().position(|id| id == entity_id).ok_or_else(|| {
        vec![GameError::new(ErrorCode::InvalidAction, format!("'{}' is not in initiative_order", entity_id))]
    })?;

    let mut next_index = (current_index + 1) % order.len();
    let mut wrapped = next_index <= current_index;
    while !state.entities.get(&order[next_index]).map(|e| e.is_alive()).unwrap_or(false) {
        let stepped = (next_index + 1) % order.len();
        if stepped <= next_index {
            wrapped = true;
        }
        next_index = stepped;
    }

    if wrapped {
        state.combat.round += 1;
    }
    let next_entity_id = order[next_index].clone();
    state.combat.active_entity_id = Some(next_entity_id.clone());

    let round = state.combat.round;
    push_event(
        state,
        EventKind::TurnEnded { entity_id: entity_id.to_string(), next_entity_id, round },
    );
    Ok(())
}

fn push_event(state: &mut GameState, kind: EventKind) {
    let event_id = state.log.next_event_id();
    let timestamp = state.log.events.len() as u64;
    state.log.push(crate::events::Event::new(event_id, timestamp, kind));
}
