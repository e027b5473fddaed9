//! Per-action resolvers (spec §4.8). Each resolver takes a clone of state
//! already produced by [`crate::apply::apply_action`], runs its ordered
//! precondition chain, and on success mutates the clone and appends exactly
//! one primary event. On failure it returns the accumulated errors without
//! touching `state` — `apply_action` is responsible for discarding the whole
//! clone and appending the single `ACTION_REJECTED` event instead.

mod attack;
mod initiative;
mod move_action;
mod seed;
mod turn;

use crate::actions::Action;
use crate::error::GameError;
use crate::model::GameState;
use crate::rules::RuleModule;

pub type ResolverResult = Result<(), Vec<GameError>>;

pub fn dispatch(state: &mut GameState, action: &Action, rules: &dyn RuleModule) -> ResolverResult {
    match action {
        Action::Move { entity_id, path } => move_action::resolve(state, entity_id, path),
        Action::Attack { attacker_id, target_id } => attack::resolve(state, attacker_id, target_id, rules),
        Action::EndTurn { entity_id } => turn::resolve(state, entity_id),
        Action::RollInitiative {} => initiative::resolve(state, rules),
        Action::SetSeed { seed: seed_value } => seed::resolve(state, seed_value),
    }
}
