//! The single entry point for advancing state (spec §4.9): clone, dispatch,
//! emit. Never mutates its input, never panics on a rejected action.

use log::{debug, info, trace};

use crate::actions::Action;
use crate::events::{Event, EventKind};
use crate::model::GameState;
use crate::resolvers;
use crate::rules::{self, RuleModule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub ok: bool,
    pub next_state: GameState,
    /// Events produced by *this* call only, not the full log.
    pub events: Vec<Event>,
    pub errors: Vec<String>,
}

/// Convenience wrapper over [`apply_action_with_rules`] using the
/// process-wide active rule module (spec's external interface lists
/// `apply_action(state, action)` with no rules parameter). Callers that want
/// to inject a specific module — tests, the replay CLI, a homebrew session —
/// should call `apply_action_with_rules` directly instead of mutating the
/// global registry.
pub fn apply_action(state: &GameState, action: &Action) -> ApplyResult {
    let active_module = rules::active();
    apply_action_with_rules(state, action, active_module.as_ref())
}

/// The pure core of `apply_action`, parameterized over an explicit rule
/// module rather than the process-wide registry. This is what every resolver
/// test and the combat controller call directly.
pub fn apply_action_with_rules(state: &GameState, action: &Action, rules: &dyn RuleModule) -> ApplyResult {
    rules::begin_action();
    let result = run(state, action, rules);
    rules::end_action();
    result
}

fn run(state: &GameState, action: &Action, rules: &dyn RuleModule) -> ApplyResult {
    trace!("apply_action dispatching {}", action.type_name());
    let mut next_state = state.deep_clone();
    let events_before = next_state.log.events.len();

    match resolvers::dispatch(&mut next_state, action, rules) {
        Ok(()) => {
            if matches!(action, Action::RollInitiative {}) {
                info!("combat started via ROLL_INITIATIVE");
            }
            let new_events = next_state.log.events[events_before..].to_vec();
            if new_events.iter().any(|e| matches!(e.kind, EventKind::CombatEnded { .. })) {
                info!("combat ended");
            }
            ApplyResult { ok: true, next_state, events: new_events, errors: Vec::new() }
        }
        Err(errors) => {
            debug!("action {} rejected: {:?}", action.type_name(), errors);
            // Discard every mutation the resolver made before failing by
            // starting over from a fresh clone; only the rejection event is
            // appended to it.
            let mut rejected_state = state.deep_clone();
            let reasons: Vec<String> = errors.iter().map(|e| e.code.as_str().to_string()).collect();
            let event_id = rejected_state.log.next_event_id();
            let timestamp = rejected_state.log.events.len() as u64;
            let event = Event::new(
                event_id,
                timestamp,
                EventKind::ActionRejected { action: action.clone(), reasons: reasons.clone() },
            );
            rejected_state.log.push(event.clone());
            ApplyResult { ok: false, next_state: rejected_state, events: vec![event], errors: reasons }
        }
    }
}
