//! Deterministic NPC turn planning (spec §4.10). A conservative, rule-based
//! planner: attack if already in range, otherwise close the distance,
//! otherwise stand pat. It never emits a malformed action — when it cannot
//! plan anything useful it falls back to `[END_TURN]`.

use crate::actions::Action;
use crate::model::{Entity, EntityKind, GameState, Position};
use crate::pathfinding::{self, PathOptions};
use crate::rules::RuleModule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpcPlan {
    pub actions: Vec<Action>,
    pub reasoning: String,
}

fn end_turn(entity_id: &str) -> Action {
    Action::EndTurn { entity_id: entity_id.to_string() }
}

fn plan_of(actions: Vec<Action>, reasoning: impl Into<String>) -> NpcPlan {
    NpcPlan { actions, reasoning: reasoning.into() }
}

fn opposite_faction(kind: EntityKind) -> EntityKind {
    match kind {
        EntityKind::Player => EntityKind::Npc,
        EntityKind::Npc => EntityKind::Player,
        EntityKind::Object => EntityKind::Object,
    }
}

pub fn plan_npc_turn(state: &GameState, npc_id: &str, rules: &dyn RuleModule) -> NpcPlan {
    let actor = match state.entities.get(npc_id) {
        Some(e) => e,
        None => return plan_of(vec![end_turn(npc_id)], "entity not found"),
    };

    if !actor.is_alive() || crate::conditions::should_skip_turn(actor) {
        return plan_of(vec![end_turn(npc_id)], "incapacitated this turn");
    }

    let hostile_kind = opposite_faction(actor.kind);
    let mut hostiles: Vec<&Entity> = state.entities.bucket(hostile_kind).iter().filter(|e| e.is_alive()).collect();
    if hostiles.is_empty() {
        return plan_of(vec![end_turn(npc_id)], "no living hostiles remain");
    }
    hostiles.sort_by(|a, b| {
        actor
            .position
            .manhattan_distance(a.position)
            .cmp(&actor.position.manhattan_distance(b.position))
            .then_with(|| a.position.x.cmp(&b.position.x))
            .then_with(|| a.position.y.cmp(&b.position.y))
    });

    let attack_range = rules.combat().attack_range(actor) as i32;
    if let Some(target) = hostiles.iter().find(|t| actor.position.chebyshev_distance(t.position) <= attack_range) {
        return plan_of(
            vec![Action::Attack { attacker_id: npc_id.to_string(), target_id: target.id.clone() }, end_turn(npc_id)],
            format!("{} is already in range", target.id),
        );
    }

    // `hostiles` is sorted nearest-first by Manhattan distance, ties broken by
    // (x, y). Walk it tier by tier (one tier = one Manhattan distance) and
    // stop at the first tier with a reachable target; A* cost only decides
    // which target wins within a tier, never across tiers (spec §4.10:
    // Manhattan distance is the primary key, A* cost a tie-breaker).
    let mut best_reachable: Option<(pathfinding::PathResult, &Entity)> = None;
    let mut tier_start = 0;
    while tier_start < hostiles.len() {
        let tier_distance = actor.position.manhattan_distance(hostiles[tier_start].position);
        let mut tier_end = tier_start;
        while tier_end < hostiles.len() && actor.position.manhattan_distance(hostiles[tier_end].position) == tier_distance {
            tier_end += 1;
        }

        let mut tier_best: Option<(pathfinding::PathResult, &Entity)> = None;
        for target in &hostiles[tier_start..tier_end] {
            if let Some(path) = pathfinding::find_path_to_adjacent(state, rules, npc_id, &target.id) {
                let better = tier_best.as_ref().map_or(true, |(b, _)| path.cost < b.cost);
                if better {
                    tier_best = Some((path, *target));
                }
            }
        }

        if tier_best.is_some() {
            best_reachable = tier_best;
            break;
        }
        tier_start = tier_end;
    }

    if let Some((path, target)) = best_reachable {
        return plan_of(
            vec![
                Action::Move { entity_id: npc_id.to_string(), path: path.path },
                Action::Attack { attacker_id: npc_id.to_string(), target_id: target.id.clone() },
                end_turn(npc_id),
            ],
            format!("moving to engage {}", target.id),
        );
    }

    let nearest = hostiles[0];
    let truncated = truncate_toward(state, rules, actor, nearest);
    if truncated.is_empty() {
        return plan_of(vec![end_turn(npc_id)], format!("no path toward {} within budget", nearest.id));
    }
    plan_of(
        vec![Action::Move { entity_id: npc_id.to_string(), path: truncated }, end_turn(npc_id)],
        format!("advancing toward {}", nearest.id),
    )
}

/// Picks the cheapest adjacent-to-target path ignoring `movement_speed`, then
/// keeps only the prefix of steps the entity's actual budget can afford.
fn truncate_toward(state: &GameState, rules: &dyn RuleModule, actor: &Entity, target: &Entity) -> Vec<Position> {
    let mut candidates: Vec<Position> = [(0, -1), (0, 1), (-1, 0), (1, 0)]
        .into_iter()
        .map(|(dx, dy)| Position::new(target.position.x + dx, target.position.y + dy))
        .filter(|p| state.map.in_bounds(*p))
        .collect();
    candidates.sort_by_key(|p| (p.x, p.y));

    let opts = PathOptions { entity_id: Some(&actor.id), max_cost: None, allow_occupied_goal: false };
    let mut best: Option<pathfinding::PathResult> = None;
    for cell in candidates {
        if let Some(path) = pathfinding::find_path(state, rules, actor.position, cell, &opts) {
            if best.as_ref().map_or(true, |b| path.cost < b.cost) {
                best = Some(path);
            }
        }
    }

    let Some(full_path) = best else { return Vec::new() };
    let mut budget = actor.stats.movement_speed;
    let mut truncated = Vec::new();
    for step in full_path.path {
        let cost = rules.movement().terrain_cost(state.map.tile_at(step).map(|t| t.kind).unwrap_or(crate::model::TileKind::Open));
        if cost > budget {
            break;
        }
        budget -= cost;
        truncated.push(step);
    }
    truncated
}
