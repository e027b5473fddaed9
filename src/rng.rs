//! Deterministic pseudorandom stream keyed by `(seed, rolls_consumed)`.
//!
//! Unlike a conventional RNG object, nothing here holds mutable generator
//! state: every roll is a pure function of the seed string and the number of
//! rolls already recorded in [`RngState::last_rolls`]. That is what makes
//! `fold(apply_action, state, actions)` replayable byte-for-byte from a
//! fresh process — there is no hidden generator to desync.
//!
//! The mixing function is locked as of `schema_version` 1.x: it is a
//! splitmix64 finalizer applied to an FNV-1a hash of the seed string folded
//! with the roll index and, for multi-die rolls, a per-die sub-index.
//! Changing this algorithm changes every replay's outcome and must bump
//! `schema_version`.

use crate::model::{RngMode, RngState, RollRecord};

const RNG_ALGORITHM_VERSION: &str = "splitmix64-v1";

fn fnv1a(seed: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in seed.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// splitmix64 finalizer (Steele, Lea & Flood 2014) — avalanches its input
/// into a stream that passes standard empirical randomness suites.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn stream_value(seed_hash: u64, roll_index: u64, die_index: u64) -> u64 {
    let folded = splitmix64(die_index.wrapping_add(1))
        ^ splitmix64(roll_index.wrapping_add(0x9E37_79B9))
        ^ seed_hash;
    splitmix64(folded)
}

/// The core has no wall-clock entropy source (spec §5): an unseeded
/// ("manual") stream uses the empty string as its implicit seed, so a fresh
/// engine is deterministic before any `SET_SEED` action ever runs.
fn effective_seed_hash(rng: &RngState) -> u64 {
    fnv1a(rng.seed.as_deref().unwrap_or(""))
}

fn roll_one_die(seed_hash: u64, roll_index: u64, die_index: u64, faces: u32) -> i64 {
    debug_assert!(faces > 0, "a die must have at least one face");
    1 + (stream_value(seed_hash, roll_index, die_index) % faces as u64) as i64
}

/// Roll a single d20. Returns the face value in `[1, 20]` and the state with
/// the roll's provenance appended to `last_rolls`.
pub fn roll_d20(state: &RngState, source: &str) -> (i64, RngState) {
    roll_dice(state, 1, 20, source)
}

/// Roll `n` dice with `faces` sides each and sum them. Appends a single
/// [`RollRecord`] summarizing the whole call — the per-roll granularity the
/// determinism contract is defined over (spec §4.2).
pub fn roll_dice(state: &RngState, n: u32, faces: u32, source: &str) -> (i64, RngState) {
    let seed_hash = effective_seed_hash(state);
    let roll_index = state.rolls_consumed();

    let mut total: i64 = 0;
    for die in 0..n {
        total += roll_one_die(seed_hash, roll_index, die as u64, faces);
    }

    let mut next = state.clone();
    next.last_rolls.push(RollRecord {
        id: format!("roll-{:06}", roll_index),
        timestamp: roll_index,
        formula: format!("{}d{}", n, faces),
        result_total: total,
        source: source.to_string(),
    });

    (total, next)
}

/// `SET_SEED`: switches the stream to `seeded` mode and resets the
/// seed-derived roll counter by clearing prior roll provenance.
pub fn set_seed(state: &RngState, seed: impl Into<String>) -> RngState {
    RngState {
        mode: RngMode::Seeded,
        seed: Some(seed.into()),
        last_rolls: Vec::new(),
    }
}

pub fn algorithm_version() -> &'static str {
    RNG_ALGORITHM_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_and_prior_rolls_yield_identical_next_roll() {
        let a = set_seed(&RngState::manual(), "combat-seed-42");
        let b = set_seed(&RngState::manual(), "combat-seed-42");

        let (result_a, _) = roll_d20(&a, "attack");
        let (result_b, _) = roll_d20(&b, "attack");
        assert_eq!(result_a, result_b);
    }

    #[test]
    fn consecutive_rolls_from_the_same_seed_can_differ() {
        let seeded = set_seed(&RngState::manual(), "seed-1");
        let (_, after_first) = roll_d20(&seeded, "a");
        let (first_again, _) = roll_d20(&seeded, "a");
        let (second, _) = roll_d20(&after_first, "a");
        assert_eq!(first_again, first_again); // sanity: pure function
        // Not asserting inequality (dice can tie) but the roll index moved.
        assert_eq!(after_first.rolls_consumed(), 1);
        let _ = second;
    }

    #[test]
    fn d20_result_is_always_in_range() {
        let mut state = set_seed(&RngState::manual(), "range-check");
        for _ in 0..200 {
            let (result, next) = roll_d20(&state, "probe");
            assert!((1..=20).contains(&result));
            state = next;
        }
    }

    #[test]
    fn roll_dice_sums_n_faces_sided_dice() {
        let state = set_seed(&RngState::manual(), "dmg-seed");
        let (total, next) = roll_dice(&state, 2, 6, "damage");
        assert!((2..=12).contains(&total));
        assert_eq!(next.last_rolls.len(), 1);
        assert_eq!(next.last_rolls[0].formula, "2d6");
    }

    #[test]
    fn unseeded_manual_stream_is_still_deterministic() {
        let a = RngState::manual();
        let b = RngState::manual();
        let (result_a, _) = roll_d20(&a, "x");
        let (result_b, _) = roll_d20(&b, "x");
        assert_eq!(result_a, result_b);
    }

    #[test]
    fn set_seed_resets_the_roll_counter() {
        let (_, state) = roll_d20(&set_seed(&RngState::manual(), "s"), "x");
        assert_eq!(state.rolls_consumed(), 1);
        let reseeded = set_seed(&state, "s2");
        assert_eq!(reseeded.rolls_consumed(), 0);
    }
}
