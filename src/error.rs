//! Canonical error codes surfaced across the action pipeline.
//!
//! [`ErrorCode`] is the *closed* set named in the engine contract: resolvers,
//! the validator, and `apply_action` never invent a new variant at the call
//! site. [`EngineError`] is a separate, smaller enum for failures that are
//! programmer mistakes rather than game-rule rejections (rule module
//! registry misuse, malformed scenario/replay bundles) — it is never placed
//! in `ApplyResult.errors`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the fixed set of rejection codes the core ever surfaces.
///
/// No other code is ever returned from `validate`, a resolver, or
/// `apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidAction,
    EntityNotFound,
    TargetDead,
    DeadEntity,
    SelfAttack,
    OutOfRange,
    BlockedCell,
    DiagonalStep,
    Overlap,
    NotYourTurn,
    CombatAlready,
    OutOfBounds,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidAction => "INVALID_ACTION",
            ErrorCode::EntityNotFound => "ENTITY_NOT_FOUND",
            ErrorCode::TargetDead => "TARGET_DEAD",
            ErrorCode::DeadEntity => "DEAD_ENTITY",
            ErrorCode::SelfAttack => "SELF_ATTACK",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::BlockedCell => "BLOCKED_CELL",
            ErrorCode::DiagonalStep => "DIAGONAL_STEP",
            ErrorCode::Overlap => "OVERLAP",
            ErrorCode::NotYourTurn => "NOT_YOUR_TURN",
            ErrorCode::CombatAlready => "COMBAT_ALREADY",
            ErrorCode::OutOfBounds => "OUT_OF_BOUNDS",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single validator/resolver error: the code plus a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameError {
    pub code: ErrorCode,
    pub message: String,
}

impl GameError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GameError {}

/// Failures that never reach `ApplyResult` — registry misuse, bad bundles.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("rule module '{0}' is already registered")]
    ModuleAlreadyRegistered(String),
    #[error("rule module '{0}' is not registered")]
    ModuleNotRegistered(String),
    #[error("rule module '{0}' is missing hook category '{1}'")]
    IncompleteModule(String, &'static str),
    #[error("cannot hot-swap the active rule module mid-action")]
    SwapDuringAction,
    #[error("bundle is malformed: {0}")]
    InvalidBundle(String),
    #[error("scenario failed validation: {0:?}")]
    ScenarioInvalid(Vec<GameError>),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
