//! Fixture builders shared by unit tests across the crate. Not part of the
//! public API — gated behind `cfg(test)` the way the teacher crate keeps its
//! scenario fixtures close to the modules that consume them.

use crate::model::{
    CombatState, Controller, ControllerType, Entities, Entity, EntityKind, EventLog, Grid,
    GridKind, GridSize, GameState, MapState, Position, RngState, Stats, Token, UiState,
};

pub fn player(id: &str, pos: Position) -> Entity {
    Entity {
        id: id.to_string(),
        kind: EntityKind::Player,
        name: id.to_string(),
        position: pos,
        size: 1,
        stats: Stats {
            hp_current: 20,
            hp_max: 20,
            ac: 14,
            movement_speed: 6,
            ..Default::default()
        },
        conditions: Vec::new(),
        inventory: Vec::new(),
        token: Token { style: "circle".to_string(), sprite_key: None },
        controller: Controller { kind: ControllerType::Human, player_id: Some(id.to_string()) },
        ability_cooldowns: None,
        resistances: None,
    }
}

pub fn npc(id: &str, pos: Position) -> Entity {
    let mut e = player(id, pos);
    e.kind = EntityKind::Npc;
    e.stats.hp_current = 12;
    e.stats.hp_max = 12;
    e.stats.ac = 13;
    e.controller = Controller { kind: ControllerType::Ai, player_id: None };
    e
}

pub fn blank_map(w: u32, h: u32) -> MapState {
    MapState {
        id: "map-1".to_string(),
        name: "Test Map".to_string(),
        grid: Grid { kind: GridKind::Square, size: GridSize { w, h }, cell_size: 5 },
        terrain: Vec::new(),
        fog_of_war_enabled: false,
    }
}

pub fn exploration_fixture() -> GameState {
    GameState {
        schema_version: "1.0.0".to_string(),
        campaign_id: "camp-1".to_string(),
        session_id: "sess-1".to_string(),
        timestamp: "2026-01-01T00:00:00Z".to_string(),
        map: blank_map(15, 10),
        entities: Entities {
            players: vec![player("pc-seren", Position::new(2, 3))],
            npcs: vec![npc("npc-goblin-a", Position::new(10, 5))],
            objects: Vec::new(),
        },
        combat: CombatState::exploration(),
        rng: RngState::manual(),
        log: EventLog::default(),
        ui: UiState::default(),
        difficulty: None,
    }
}

pub fn combat_fixture() -> GameState {
    let mut state = exploration_fixture();
    state.entities.players[0].position = Position::new(3, 5);
    state.entities.npcs[0].position = Position::new(4, 5);
    state.entities.npcs[0].stats.hp_current = 5;
    state.entities.npcs[0].stats.hp_max = 12;
    state.entities.npcs[0].stats.ac = 13;
    state.entities.players[0].stats.hp_current = 20;
    state.entities.players[0].stats.hp_max = 28;
    state.entities.players[0].stats.ac = 16;
    state.combat = CombatState {
        mode: crate::model::CombatMode::Combat,
        round: 1,
        active_entity_id: Some("pc-seren".to_string()),
        initiative_order: vec!["pc-seren".to_string(), "npc-goblin-a".to_string()],
    };
    state.rng = crate::rng::set_seed(&state.rng, "combat-seed-42");
    state
}
