//! The pluggable rule module abstraction (spec §4.6): a coherent bundle of
//! hook categories that resolvers call into for every outcome that is a game
//! design decision rather than engine plumbing — what a hit roll means, how
//! terrain costs movement, what a condition does.
//!
//! The registry itself is process-wide (matching the teacher's global
//! damage-table registry) but rejects re-registering an id outright rather
//! than silently overwriting it, and refuses to hot-swap the active module
//! while an action is mid-resolution — see [`Registry::begin_action`].

pub mod default;
pub mod homebrew;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::error::EngineError;
use crate::model::{Entity, RngState, TileKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRollOutcome {
    pub raw_roll: i32,
    pub disadvantage: bool,
    /// The chosen d20 face after disadvantage is applied, before modifiers.
    pub attack_roll: i32,
}

pub trait CombatHooks: Send + Sync {
    fn attack_roll(&self, attacker: &Entity, rng: &RngState) -> (AttackRollOutcome, RngState);
    fn damage_roll(&self, attacker: &Entity, target: &Entity, rng: &RngState) -> (i64, RngState);
    fn initiative(&self, entity: &Entity, rng: &RngState) -> (i32, RngState);
    fn attack_range(&self, attacker: &Entity) -> u32;
    fn can_attack(&self, attacker: &Entity, target: &Entity) -> bool;
}

pub trait AbilityHooks: Send + Sync {
    fn can_use(&self, caster: &Entity, ability_id: &str) -> bool;
    fn cooldown(&self, ability_id: &str) -> u32;
    fn cost(&self, ability_id: &str) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConditionEffect {
    pub ac_modifier: i32,
    pub attack_modifier: i32,
    pub disadvantage: bool,
    pub skip_turn: bool,
    pub tick_damage: i64,
}

pub trait ConditionHooks: Send + Sync {
    fn effects(&self, condition: &str) -> ConditionEffect;
    fn tick(&self, entity: &Entity) -> i64;
}

pub trait MovementHooks: Send + Sync {
    fn terrain_cost(&self, kind: TileKind) -> u32;
    fn speed(&self, entity: &Entity) -> u32;
}

pub trait DamageHooks: Send + Sync {
    fn reduction(&self, damage: i64, target: &Entity) -> i64;
    fn resistance(&self, damage: i64, target: &Entity, damage_kind: &str) -> i64;
    fn critical(&self, base: i64, raw_roll: i32) -> i64;
}

pub trait HealingHooks: Send + Sync {
    fn amount(&self, base: i64) -> i64;
    fn can_heal(&self, healer: &Entity, target: &Entity) -> bool;
}

/// Metadata every registered module carries, independent of its hook
/// behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMeta {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
}

pub trait RuleModule: Send + Sync {
    fn meta(&self) -> &ModuleMeta;
    fn combat(&self) -> &dyn CombatHooks;
    fn abilities(&self) -> &dyn AbilityHooks;
    fn conditions(&self) -> &dyn ConditionHooks;
    fn movement(&self) -> &dyn MovementHooks;
    fn damage(&self) -> &dyn DamageHooks;
    fn healing(&self) -> &dyn HealingHooks;
}

struct RegistryState {
    modules: HashMap<String, Arc<dyn RuleModule>>,
    active_id: Option<String>,
    action_in_progress: bool,
}

fn registry() -> &'static Mutex<RegistryState> {
    static REGISTRY: OnceLock<Mutex<RegistryState>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Mutex::new(RegistryState {
            modules: HashMap::new(),
            active_id: None,
            action_in_progress: false,
        })
    })
}

/// Registers `module`, rejecting the call outright if the id is already
/// present rather than silently replacing it. Callers that want to replace a
/// module must first remove it through a fresh registry (there is
/// intentionally no `unregister`: the registry models a one-time-initialized
/// set of rulesets, not a mutable cache).
pub fn register(module: Arc<dyn RuleModule>) -> Result<(), EngineError> {
    let id = module.meta().id.clone();
    let mut categories_present = true;
    categories_present &= !module.meta().id.is_empty();
    if !categories_present {
        return Err(EngineError::IncompleteModule(id, "id"));
    }

    let mut state = registry().lock().expect("rule module registry poisoned");
    if state.modules.contains_key(&id) {
        return Err(EngineError::ModuleAlreadyRegistered(id));
    }
    state.modules.insert(id, module);
    Ok(())
}

pub fn set_active(id: &str) -> Result<(), EngineError> {
    let mut state = registry().lock().expect("rule module registry poisoned");
    if state.action_in_progress {
        return Err(EngineError::SwapDuringAction);
    }
    if !state.modules.contains_key(id) {
        return Err(EngineError::ModuleNotRegistered(id.to_string()));
    }
    state.active_id = Some(id.to_string());
    Ok(())
}

/// Returns the active module, registering and activating the built-in
/// default module on first use so callers that never touch the registry
/// still get deterministic behavior out of the box.
pub fn active() -> Arc<dyn RuleModule> {
    ensure_defaults_registered();
    let state = registry().lock().expect("rule module registry poisoned");
    let id = state.active_id.clone().expect("default module always activated");
    state.modules.get(&id).cloned().expect("active id always present in modules")
}

fn ensure_defaults_registered() {
    let mut state = registry().lock().expect("rule module registry poisoned");
    if state.modules.is_empty() {
        let module: Arc<dyn RuleModule> = Arc::new(default::DefaultRuleModule::new());
        state.active_id = Some(module.meta().id.clone());
        state.modules.insert(module.meta().id.clone(), module);
    }
}

/// Marks the registry as mid-action so a concurrent `set_active` call is
/// rejected; released by [`end_action`]. `apply_action` brackets every call
/// with this pair.
pub(crate) fn begin_action() {
    registry().lock().expect("rule module registry poisoned").action_in_progress = true;
}

pub(crate) fn end_action() {
    registry().lock().expect("rule module registry poisoned").action_in_progress = false;
}

/// A standalone default module instance, independent of the process-wide
/// registry — used by pathfinding/visibility call sites and tests that need
/// a `RuleModule` without touching global state.
pub fn default_module() -> Arc<dyn RuleModule> {
    Arc::new(default::DefaultRuleModule::new())
}

pub fn homebrew_module() -> Arc<dyn RuleModule> {
    Arc::new(homebrew::HomebrewRuleModule::new())
}
