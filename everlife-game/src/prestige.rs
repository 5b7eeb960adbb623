//! The prestige reset: trade a finished life for permanent multipliers.
//!
//! The transition is atomic. Ineligibility rejects before any mutation, and
//! a successful run replaces the whole state with a fresh one, carrying over
//! only the defined subset (points, level, achievements, statistics,
//! settings) before reapplying the permanent bonuses.

use crate::constants::{
    BASE_MAX_ENERGY, LOG_LIFE_BEGIN, LOG_PRESTIGE, PRESTIGE_ENERGY_BONUS,
    PRESTIGE_GOLD_DIVISOR, PRESTIGE_GOLD_RATE, PRESTIGE_SKILL_MULTIPLIER_RATE,
    PRESTIGE_SKILL_RATE, PRESTIGE_SKILL_WEIGHT,
};
use crate::data::GameData;
use crate::error::EngineError;
use crate::events::EventCategory;
use crate::lifestyle;
use crate::numbers::{floor_f64_to_u32, u32_to_f64, u64_to_f64};
use crate::state::GameState;

/// Prestige unlocks once the maximum age has been reached.
#[must_use]
pub fn eligible(state: &GameState) -> bool {
    state.age >= state.max_age
}

/// Points awarded for the life lived so far: lifetime gold and accumulated
/// skill levels, never less than one.
#[must_use]
pub fn calculate_prestige_points(state: &GameState) -> u32 {
    let raw = state.statistics.total_gold_earned / PRESTIGE_GOLD_DIVISOR
        + u64_to_f64(state.total_skill_levels()) * PRESTIGE_SKILL_WEIGHT;
    floor_f64_to_u32(raw).max(1)
}

/// Apply the permanent bonuses for the given total point count.
fn reapply_bonuses(state: &mut GameState) {
    let points = u32_to_f64(state.prestige_points);
    state.multipliers.gold = 1.0 + points * PRESTIGE_GOLD_RATE;
    state.multipliers.skill = 1.0 + points * PRESTIGE_SKILL_RATE;
    state.max_energy = BASE_MAX_ENERGY + points * PRESTIGE_ENERGY_BONUS;
    state.energy = state.max_energy;
    let skill_multiplier = 1.0 + points * PRESTIGE_SKILL_MULTIPLIER_RATE;
    for record in state.skills.values_mut() {
        record.multiplier = skill_multiplier;
    }
}

/// Perform the prestige reset.
///
/// Returns the points gained by this prestige.
///
/// # Errors
///
/// [`EngineError::NotEligible`] before the maximum age; the state is
/// untouched in that case.
pub fn perform_prestige(
    state: &mut GameState,
    data: &GameData,
    now_ms: f64,
) -> Result<u32, EngineError> {
    if !eligible(state) {
        return Err(EngineError::NotEligible);
    }

    let gained = calculate_prestige_points(state);
    let mut fresh = GameState::new(data);

    // Carry-over subset.
    fresh.prestige_points = state.prestige_points + gained;
    fresh.prestige_level = state.prestige_level + 1;
    fresh.achievements = std::mem::take(&mut state.achievements);
    fresh.statistics = state.statistics.clone();
    fresh.statistics.prestige_count += 1;
    fresh.settings = state.settings.clone();
    fresh.speed = state.speed;
    fresh.seed = state.seed;
    fresh.rng = state.rng.take();

    reapply_bonuses(&mut fresh);
    lifestyle::refresh_effects(&mut fresh, data);

    fresh.push_log(LOG_PRESTIGE, &gained.to_string());
    fresh.push_log(LOG_LIFE_BEGIN, &fresh.prestige_level.to_string());
    fresh.push_event(
        EventCategory::Prestige,
        format!("prestige complete, {gained} points gained"),
        now_ms,
    );
    log::info!(
        "prestige {} complete: +{gained} points, {} total",
        fresh.prestige_level,
        fresh.prestige_points
    );

    *state = fresh;
    Ok(gained)
}
