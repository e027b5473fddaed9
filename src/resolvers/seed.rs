use crate::events::EventKind;
use crate::model::GameState;
use crate::rng;

use super::ResolverResult;

/// SET_SEED has no precondition beyond well-formed shape.
pub fn resolve(state: &mut GameState, seed: &str) -> ResolverResult {
    state.rng = rng::set_seed(&state.rng, seed);

    let event_id = state.log.next_event_id();
    let timestamp = state.log.events.len() as u64;
    state.log.push(crate::events::Event::new(
        event_id,
        timestamp,
        EventKind::RngSeedSet { seed: seed.to_string() },
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::exploration_fixture;

    #[test]
    fn set_seed_switches_mode_and_resets_the_counter() {
        let mut state = exploration_fixture();
        let result = resolve(&mut state, "new-seed");
        assert!(result.is_ok());
        assert_eq!(state.rng.mode, crate::model::RngMode::Seeded);
        assert_eq!(state.rng.rolls_consumed(), 0);
        assert_eq!(state.log.events.len(), 1);
    }
}
