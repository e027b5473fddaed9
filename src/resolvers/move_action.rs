use crate::error::{ErrorCode, GameError};
use crate::events::EventKind;
use crate::model::{CombatMode, GameState, Position};

use super::ResolverResult;

fn fail(code: ErrorCode, message: impl Into<String>) -> ResolverResult {
    Err(vec![GameError::new(code, message)])
}

pub fn resolve(state: &mut GameState, entity_id: &str, path: &[Position]) -> ResolverResult {
    let entity = match state.entities.get(entity_id) {
        Some(e) => e,
        None => return fail(ErrorCode::EntityNotFound, format!("entity '{}' does not exist", entity_id)),
    };
    if !entity.is_alive() {
        return fail(ErrorCode::DeadEntity, format!("entity '{}' is dead", entity_id));
    }
    if state.combat.mode == CombatMode::Combat {
        if state.combat.active_entity_id.as_deref() != Some(entity_id) {
            return fail(ErrorCode::NotYourTurn, format!("it is not '{}'s turn", entity_id));
        }
    }

    if path.is_empty() {
        return fail(ErrorCode::InvalidAction, "path must be non-empty");
    }
    let mut prev = entity.position;
    for &step in path {
        let dx = (step.x - prev.x).abs();
        let dy = (step.y - prev.y).abs();
        if !((dx == 1 && dy == 0) || (dx == 0 && dy == 1)) {
            return fail(ErrorCode::DiagonalStep, format!("step {:?} -> {:?} is not an orthogonal unit step", prev, step));
        }
        prev = step;
    }

    if path.len() as u32 > entity.stats.movement_speed {
        return fail(
            ErrorCode::OutOfRange,
            format!("path length {} exceeds movement_speed {}", path.len(), entity.stats.movement_speed),
        );
    }

    for &step in path {
        if !state.map.in_bounds(step) {
            return fail(ErrorCode::OutOfBounds, format!("step {:?} is out of bounds", step));
        }
    }

    for &step in path {
        if state.map.blocks_movement(step) {
            return fail(ErrorCode::BlockedCell, format!("step {:?} is on a blocking tile", step));
        }
    }

    for &step in path {
        let occupied = state.entities.iter().any(|e| e.id != entity_id && e.position == step);
        if occupied {
            return fail(ErrorCode::Overlap, format!("step {:?} is occupied by another entity", step));
        }
    }

    let from = entity.position;
    let final_position = *path.last().unwrap();
    let steps = path.len() as u32;

    state.entities.get_mut(entity_id).unwrap().position = final_position;

    let event_id = state.log.next_event_id();
    let timestamp = state.log.events.len() as u64;
    state.log.push(crate::events::Event::new(
        event_id,
        timestamp,
        EventKind::MoveApplied { entity_id: entity_id.to_string(), from, final_position, steps },
    ));

    Ok(())
}
