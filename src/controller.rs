//! The combat controller (spec §4.11): folds a planned NPC turn through
//! `apply_action`, and drives a whole encounter round by round.

use log::warn;

use crate::apply::{apply_action_with_rules, ApplyResult};
use crate::events::{Event, EventKind};
use crate::model::{CombatMode, GameState};
use crate::planner;
use crate::rules::RuleModule;

/// Hard ceiling on actions folded for a single NPC turn, read from
/// `PlannerPreferences::safety_bound`. Guards against a planner/resolver
/// interaction looping without making progress; the documented default of 20
/// is far more than any legitimate plan (at most 3 actions) ever needs.
fn planner_safety_bound() -> usize {
    crate::config::PlannerPreferences::default().safety_bound
}

pub struct NpcTurnOutcome {
    pub state: GameState,
    pub events: Vec<Event>,
    pub narration: Vec<String>,
}

fn narrate(event: &Event) -> String {
    match &event.kind {
        EventKind::MoveApplied { entity_id, final_position, steps, .. } => {
            format!("{} moves {} step(s) to ({}, {})", entity_id, steps, final_position.x, final_position.y)
        }
        EventKind::AttackResolved { attacker_id, target_id, hit, damage, target_hp_after, .. } => {
            if *hit {
                format!("{} hits {} for {} damage ({} hp left)", attacker_id, target_id, damage, target_hp_after)
            } else {
                format!("{} misses {}", attacker_id, target_id)
            }
        }
        EventKind::InitiativeRolled { order } => {
            format!("initiative rolled: {}", order.iter().map(|e| e.entity_id.as_str()).collect::<Vec<_>>().join(", "))
        }
        EventKind::TurnEnded { entity_id, next_entity_id, round } => {
            format!("{} ends their turn; {} is up (round {})", entity_id, next_entity_id, round)
        }
        EventKind::CombatEnded { winner } => format!("combat ends: {:?} win", winner),
        EventKind::RngSeedSet { seed } => format!("rng seeded with '{}'", seed),
        EventKind::ActionRejected { reasons, .. } => format!("action rejected: {}", reasons.join(", ")),
    }
}

/// Runs `npc_id`'s planned turn to completion, folding each planned action
/// through `apply_action`. Aborts on the first rejection (which should not
/// happen for a well-formed plan, but a custom rule module's preconditions
/// may still reject it) and returns the partial progress plus the rejection.
pub fn execute_npc_turn(state: &GameState, npc_id: &str, rules: &dyn RuleModule) -> NpcTurnOutcome {
    let plan = planner::plan_npc_turn(state, npc_id, rules);
    let mut current = state.deep_clone();
    let mut events = Vec::new();
    let mut narration = Vec::new();
    narration.push(format!("{}: {}", npc_id, plan.reasoning));

    for action in plan.actions.iter().take(planner_safety_bound()) {
        let ApplyResult { ok, next_state, events: step_events, .. } = apply_action_with_rules(&current, action, rules);
        for event in &step_events {
            narration.push(narrate(event));
        }
        events.extend(step_events);
        current = next_state;
        if !ok {
            warn!("npc '{}' plan step {:?} was rejected; aborting turn", npc_id, action.type_name());
            break;
        }
    }

    NpcTurnOutcome { state: current, events, narration }
}

pub struct CombatSimulation {
    pub state: GameState,
    pub events: Vec<Event>,
    pub rounds: u32,
}

/// Repeats `execute_npc_turn` for each NPC whose turn arrives, until combat
/// ends or `max_rounds` is reached.
pub fn simulate_combat(state: &GameState, max_rounds: u32, rules: &dyn RuleModule) -> CombatSimulation {
    let mut current = state.deep_clone();
    let mut events = Vec::new();
    let starting_round = current.combat.round;

    while current.combat.mode == CombatMode::Combat {
        let rounds_elapsed = current.combat.round.saturating_sub(starting_round);
        if rounds_elapsed >= max_rounds {
            break;
        }
        let Some(active_id) = current.combat.active_entity_id.clone() else { break };
        let Some(active) = current.entities.get(&active_id) else { break };

        if active.controller.kind != crate::model::ControllerType::Ai {
            // A human-controlled entity's turn requires an external action;
            // the simulator cannot progress past it on its own.
            break;
        }

        let outcome = execute_npc_turn(&current, &active_id, rules);
        events.extend(outcome.events);
        current = outcome.state;
    }

    CombatSimulation { state: current, events, rounds: current.combat.round.saturating_sub(starting_round) }
}
