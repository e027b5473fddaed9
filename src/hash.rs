//! Canonical state hashing (spec §4.12): a stable digest over a normalized
//! projection of game-meaningful state, used as the replay verification
//! primitive. UI fields are excluded; entities are sorted by id so that
//! hashing does not depend on scenario-author ordering.

use sha2::{Digest, Sha256};

use crate::model::{Entity, GameState};

fn push_entity(buf: &mut String, entity: &Entity) {
    buf.push_str(&entity.id);
    buf.push('|');
    buf.push_str(&format!("{:?}", entity.kind));
    buf.push('|');
    buf.push_str(&format!("{},{}", entity.position.x, entity.position.y));
    buf.push('|');
    buf.push_str(&format!("{}/{}", entity.stats.hp_current, entity.stats.hp_max));
    buf.push('|');
    buf.push_str(&format!("{}", entity.stats.ac));
    buf.push('|');
    let mut conditions = entity.conditions.clone();
    conditions.sort();
    buf.push_str(&conditions.join(","));
    buf.push('\n');
}

/// Builds the normalized, deterministically ordered string the hash is taken
/// over. Kept as a standalone function (rather than inlined into
/// `state_hash`) so tests can assert on the projection directly.
fn canonical_projection(state: &GameState) -> String {
    let mut buf = String::new();

    buf.push_str("schema_version=");
    buf.push_str(&state.schema_version);
    buf.push('\n');

    buf.push_str(&format!("map={}x{}\n", state.map.grid.size.w, state.map.grid.size.h));

    let mut entities: Vec<&Entity> = state.entities.iter().collect();
    entities.sort_by(|a, b| a.id.cmp(&b.id));
    for entity in entities {
        push_entity(&mut buf, entity);
    }

    buf.push_str(&format!(
        "combat={:?}|round={}|active={}\n",
        state.combat.mode,
        state.combat.round,
        state.combat.active_entity_id.as_deref().unwrap_or("")
    ));
    buf.push_str(&format!("initiative={}\n", state.combat.initiative_order.join(",")));

    buf.push_str(&format!("rng_mode={:?}|seed={}\n", state.rng.mode, state.rng.seed.as_deref().unwrap_or("")));
    for roll in &state.rng.last_rolls {
        buf.push_str(&format!("roll:{}:{}:{}\n", roll.id, roll.formula, roll.result_total));
    }

    for event in &state.log.events {
        buf.push_str(&format!("event:{}:{}:{}\n", event.id, event.timestamp, event.kind.type_name()));
    }

    buf
}

/// Hex-encoded SHA-256 digest of the canonical projection.
pub fn state_hash(state: &GameState) -> String {
    let projection = canonical_projection(state);
    let digest = Sha256::digest(projection.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
