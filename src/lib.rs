//! Deterministic, authoritative tabletop-RPG simulation engine.
//!
//! Given a declarative [`model::GameState`] and a declared [`actions::Action`],
//! this crate validates the action against game rules, advances state
//! through a seeded random stream, and emits an append-only event log.
//! Identical `(state, action-sequence)` pairs always yield byte-identical
//! resulting states — the property that makes replay, hashing, and
//! deterministic testing possible.
//!
//! The engine is synchronous, single-threaded, and pure apart from optional
//! logging through the `log` facade.

pub mod actions;
pub mod apply;
pub mod bundle;
pub mod conditions;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod hash;
pub mod model;
pub mod pathfinding;
pub mod planner;
pub mod resolvers;
pub mod rng;
pub mod rules;
pub mod validation;
pub mod visibility;

#[cfg(test)]
pub(crate) mod testutil;

pub use actions::Action;
pub use apply::{apply_action, apply_action_with_rules, ApplyResult};
pub use error::{EngineError, ErrorCode, GameError};
pub use events::{Event, EventKind};
pub use hash::state_hash;
pub use model::GameState;
pub use pathfinding::{find_path, find_path_for_entity, find_path_to_adjacent, PathOptions, PathResult};
pub use validation::{validate, ValidationResult};
pub use visibility::{compute_visible_cells, Faction};
