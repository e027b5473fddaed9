//! Direct exercises of the 25 state invariants the validator enforces.

mod common;

use tabletop_engine::model::{condition, InventoryItem, Position, RngMode};
use tabletop_engine::validate;

#[test]
fn a_clean_fixture_validates() {
    let state = common::exploration_fixture();
    let result = validate(&state);
    assert!(result.ok, "{:?}", result.errors);
}

#[test]
fn entity_kind_must_match_its_bucket() {
    let mut state = common::exploration_fixture();
    state.entities.players[0].kind = tabletop_engine::model::EntityKind::Npc;
    let result = validate(&state);
    assert!(!result.ok);
}

#[test]
fn hp_current_cannot_exceed_hp_max() {
    let mut state = common::exploration_fixture();
    state.entities.players[0].stats.hp_current = state.entities.players[0].stats.hp_max + 5;
    assert!(!validate(&state).ok);
}

#[test]
fn hp_max_must_be_at_least_one() {
    let mut state = common::exploration_fixture();
    state.entities.players[0].stats.hp_max = 0;
    assert!(!validate(&state).ok);
}

#[test]
fn entity_position_must_be_in_bounds() {
    let mut state = common::exploration_fixture();
    state.entities.players[0].position = Position::new(-1, 0);
    assert!(!validate(&state).ok);
}

#[test]
fn two_entities_cannot_share_a_cell() {
    let mut state = common::exploration_fixture();
    let pos = state.entities.npcs[0].position;
    state.entities.players[0].position = pos;
    assert!(!validate(&state).ok);
}

#[test]
fn condition_strings_cannot_be_empty() {
    let mut state = common::exploration_fixture();
    state.entities.players[0].conditions.push(String::new());
    assert!(!validate(&state).ok);
}

#[test]
fn inventory_ids_must_be_unique_per_entity() {
    let mut state = common::exploration_fixture();
    let item = InventoryItem { id: "itm-1".to_string(), name: "Torch".to_string(), qty: 1, tags: Vec::new() };
    state.entities.players[0].inventory.push(item.clone());
    state.entities.players[0].inventory.push(item);
    assert!(!validate(&state).ok);
}

#[test]
fn exploration_mode_requires_round_zero_and_no_active_entity() {
    let mut state = common::exploration_fixture();
    state.combat.round = 2;
    assert!(!validate(&state).ok);
}

#[test]
fn combat_mode_requires_an_existing_active_entity() {
    let mut state = common::combat_fixture();
    state.combat.active_entity_id = Some("nobody".to_string());
    assert!(!validate(&state).ok);
}

#[test]
fn initiative_order_cannot_reference_unknown_entities() {
    let mut state = common::combat_fixture();
    state.combat.initiative_order.push("ghost".to_string());
    assert!(!validate(&state).ok);
}

#[test]
fn active_entity_must_appear_in_initiative_order() {
    let mut state = common::combat_fixture();
    state.combat.active_entity_id = Some("npc-goblin-a".to_string());
    state.combat.initiative_order = vec!["pc-seren".to_string()];
    assert!(!validate(&state).ok);
}

#[test]
fn initiative_order_cannot_contain_duplicates() {
    let mut state = common::combat_fixture();
    state.combat.initiative_order.push("pc-seren".to_string());
    assert!(!validate(&state).ok);
}

#[test]
fn combat_round_must_be_at_least_one() {
    let mut state = common::combat_fixture();
    state.combat.round = 0;
    assert!(!validate(&state).ok);
}

#[test]
fn map_size_must_be_at_least_one_by_one() {
    let mut state = common::exploration_fixture();
    state.map.grid.size.w = 0;
    assert!(!validate(&state).ok);
}

#[test]
fn seeded_rng_mode_requires_a_nonempty_seed() {
    let mut state = common::exploration_fixture();
    state.rng.mode = RngMode::Seeded;
    state.rng.seed = None;
    assert!(!validate(&state).ok);
}

#[test]
fn ui_selected_entity_must_exist() {
    let mut state = common::exploration_fixture();
    state.ui.selected_entity_id = Some("nobody".to_string());
    assert!(!validate(&state).ok);
}

#[test]
fn ui_hovered_cell_must_be_in_bounds() {
    let mut state = common::exploration_fixture();
    state.ui.hovered_cell = Some(Position::new(999, 999));
    assert!(!validate(&state).ok);
}

#[test]
fn dead_entities_still_occupy_their_cell_and_pass_hp_bounds() {
    let mut state = common::exploration_fixture();
    state.entities.npcs[0].stats.hp_current = 0;
    state.entities.npcs[0].add_condition(condition::DEAD);
    assert!(validate(&state).ok, "a dead but well-formed entity must still validate");
}
