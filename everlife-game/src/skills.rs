//! Skill progression: XP accrual, leveling, growth-rate modifiers, and
//! real-time decay.
//!
//! Leveling is carry-over based: XP spills into the next level rather than
//! resetting, and one grant can clear several levels. Decay runs on wall
//! time, independent of the simulation tick loop, so idle skills rust even
//! while the game is paused.

use crate::constants::{
    ATTRIBUTE_BONUS_RATE, ATTRIBUTE_NEUTRAL, BASE_XP, DECAY_CHECK_INTERVAL_MS,
    DECAY_INTERVAL_MS, DECAY_XP_DRAIN_FACTOR, DISCIPLINE_ATTRIBUTE,
    DISCIPLINE_DAMPENING_FACTOR, DISCIPLINE_DAMPENING_SCALE, LOG_SKILL_DECAY,
    LOG_SKILL_LEVEL_UP, SECONDARY_ATTRIBUTE_FACTOR, SYNERGY_CAP, SYNERGY_LEVEL_SCALE,
    SYNERGY_RATE, XP_SCALING_FACTOR,
};
use crate::error::EngineError;
use crate::events::EventCategory;
use crate::numbers::{floor_f64_to_u32, level_exponent, u32_to_f64};
use crate::state::GameState;

/// XP required to advance from `level` to the next one.
///
/// The curve is exponential on purpose: late levels are costly.
#[must_use]
pub fn xp_for_level(level: u32) -> f64 {
    (BASE_XP * XP_SCALING_FACTOR.powi(level_exponent(level))).floor()
}

/// Raw synergy bonus for a skill before the cap, from the levels of its
/// synergy partners.
fn raw_synergy(state: &GameState, skill_id: &str) -> f64 {
    let Some(record) = state.skills.get(skill_id) else {
        return 0.0;
    };
    record
        .synergies
        .iter()
        .map(|partner| {
            u32_to_f64(state.skill_level(partner)) / SYNERGY_LEVEL_SCALE * SYNERGY_RATE
        })
        .sum()
}

/// Capped synergy bonus.
#[must_use]
pub fn synergy_bonus(state: &GameState, skill_id: &str) -> f64 {
    raw_synergy(state, skill_id).min(SYNERGY_CAP)
}

fn attribute_bonus(state: &GameState, attribute_id: &str) -> f64 {
    (state.attribute_value(attribute_id) - ATTRIBUTE_NEUTRAL) * ATTRIBUTE_BONUS_RATE
}

/// Effective growth rate for a skill: base rate scaled by attribute and
/// synergy bonuses. Cached per skill; the cache is invalidated on any level,
/// attribute, or synergy change and must never change the numeric result.
pub fn effective_growth_rate(state: &mut GameState, skill_id: &str) -> f64 {
    if let Some(cached) = state.growth_cache.get(skill_id) {
        return *cached;
    }
    let Some(record) = state.skills.get(skill_id) else {
        return 0.0;
    };
    let primary = attribute_bonus(state, &record.primary_attribute);
    let secondary = record
        .secondary_attribute
        .as_deref()
        .map_or(0.0, |attr| attribute_bonus(state, attr) * SECONDARY_ATTRIBUTE_FACTOR);
    let base = record.growth_rate;
    let rate = base * (1.0 + primary + secondary + synergy_bonus(state, skill_id));
    state.growth_cache.insert(String::from(skill_id), rate);
    rate
}

/// Grant raw XP to a skill. The amount is scaled by the effective growth
/// rate and the skill's permanent prestige multiplier before applying.
///
/// Returns the number of levels gained.
///
/// # Errors
///
/// Returns [`EngineError::InvalidReference`] for an unknown skill id; no
/// state is mutated in that case.
pub fn add_xp(
    state: &mut GameState,
    skill_id: &str,
    raw_amount: f64,
    now_ms: f64,
) -> Result<u32, EngineError> {
    if !state.skills.contains_key(skill_id) {
        log::debug!("add_xp ignored unknown skill {skill_id}");
        return Err(EngineError::InvalidReference(format!("skill:{skill_id}")));
    }
    if !raw_amount.is_finite() || raw_amount <= 0.0 {
        return Ok(0);
    }

    let rate = effective_growth_rate(state, skill_id);
    let record = state
        .skills
        .get_mut(skill_id)
        .ok_or_else(|| EngineError::InvalidReference(format!("skill:{skill_id}")))?;
    let adjusted = raw_amount * rate * record.multiplier;
    record.xp += adjusted;
    record.last_updated_ms = now_ms;

    let mut gained = 0u32;
    while record.level < record.max_level && record.xp >= xp_for_level(record.level) {
        record.xp -= xp_for_level(record.level);
        record.level += 1;
        gained += 1;
    }
    if record.level >= record.max_level {
        // XP beyond the cap is discarded, not banked.
        record.xp = 0.0;
    }

    state.statistics.total_xp_gained += adjusted;
    if gained > 0 {
        let level = state.skills[skill_id].level;
        state.statistics.level_ups += u64::from(gained);
        state.push_log(LOG_SKILL_LEVEL_UP, &format!("{skill_id}:{level}"));
        state.push_event(
            EventCategory::Skill,
            format!("{skill_id} reached level {level}"),
            now_ms,
        );
        state.invalidate_growth_cache();
    }
    Ok(gained)
}

/// Adjust an attribute by `delta`, clamping to the legal range.
///
/// # Errors
///
/// Returns [`EngineError::InvalidReference`] for an unknown attribute id.
pub fn modify_attribute(
    state: &mut GameState,
    attribute_id: &str,
    delta: f64,
) -> Result<f64, EngineError> {
    let Some(value) = state.attributes.get_mut(attribute_id) else {
        return Err(EngineError::InvalidReference(format!(
            "attribute:{attribute_id}"
        )));
    };
    *value = (*value + delta).clamp(
        crate::constants::ATTRIBUTE_MIN,
        crate::constants::ATTRIBUTE_MAX,
    );
    let result = *value;
    state.invalidate_growth_cache();
    Ok(result)
}

/// Run the real-time decay sweep if the check interval has elapsed.
///
/// Each skill untouched for at least one decay interval loses progress:
/// XP drains first at an accelerated rate, then whole levels fall, never
/// below the skill's base value. A high discipline attribute dampens the
/// loss. Returns the number of skills that decayed.
pub fn poll_decay(state: &mut GameState, now_ms: f64) -> u32 {
    if state.last_decay_check_ms == 0.0 {
        // First poll anchors the sweep and stamps untouched skills.
        state.last_decay_check_ms = now_ms;
        for record in state.skills.values_mut() {
            if record.last_updated_ms == 0.0 {
                record.last_updated_ms = now_ms;
            }
        }
        return 0;
    }
    if now_ms - state.last_decay_check_ms < DECAY_CHECK_INTERVAL_MS {
        return 0;
    }
    state.last_decay_check_ms = now_ms;

    let dampening = 1.0
        - (state.attribute_value(DISCIPLINE_ATTRIBUTE) / DISCIPLINE_DAMPENING_SCALE
            * DISCIPLINE_DAMPENING_FACTOR);
    let mut decayed = 0u32;
    let mut any_level_dropped = false;

    for record in state.skills.values_mut() {
        if record.decay_rate <= 0.0 {
            continue;
        }
        if record.last_updated_ms == 0.0 {
            record.last_updated_ms = now_ms;
            continue;
        }
        let elapsed = now_ms - record.last_updated_ms;
        if elapsed < DECAY_INTERVAL_MS {
            continue;
        }
        let intervals = floor_f64_to_u32(elapsed / DECAY_INTERVAL_MS);
        let mut amount = u32_to_f64(record.level)
            * record.decay_rate
            * u32_to_f64(intervals)
            * dampening;
        if amount <= 0.0 {
            continue;
        }

        // XP rusts away before levels do, at the accelerated drain rate.
        if record.xp > 0.0 {
            let drain = (amount * DECAY_XP_DRAIN_FACTOR).min(record.xp);
            record.xp -= drain;
            amount -= drain / DECAY_XP_DRAIN_FACTOR;
        }
        if amount > 0.0 && record.level > record.base_value {
            let loss = floor_f64_to_u32(amount).min(record.level - record.base_value);
            if loss > 0 {
                record.level -= loss;
                any_level_dropped = true;
            }
        }
        // Consume the whole intervals, keeping the remainder's timing.
        record.last_updated_ms += u32_to_f64(intervals) * DECAY_INTERVAL_MS;
        decayed += 1;
    }

    if decayed > 0 {
        log::debug!("decay sweep touched {decayed} skills");
        state.push_log(LOG_SKILL_DECAY, &decayed.to_string());
    }
    if any_level_dropped {
        state.invalidate_growth_cache();
    }
    decayed
}
