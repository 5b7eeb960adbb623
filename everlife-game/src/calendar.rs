//! Day/season/year advancement driven by clock ticks.
//!
//! Each tick is processed sequentially: day rollover, season rollover, the
//! Spring aging step, daily upkeep, then job accrual. The end-of-life
//! transition is terminal: it fires on the tick that crosses the boundary
//! and any remaining pending ticks are discarded.

use crate::constants::{
    DAYS_PER_SEASON, LOG_BIRTHDAY, LOG_LIFE_ENDED, MORTALITY_BASE_AGE,
    MORTALITY_RISK_CAP, MORTALITY_RISK_PER_YEAR, TICKS_PER_DAY,
};
use crate::data::GameData;
use crate::events::EventCategory;
use crate::numbers::u32_to_f64;
use crate::state::{Ending, GameState, Season};
use crate::{jobs, lifestyle};
use rand::Rng;

fn end_life(state: &mut GameState, ending: Ending, now_ms: f64) {
    state.ending = Some(ending);
    state.paused = true;
    state.push_log(LOG_LIFE_ENDED, ending.as_str());
    state.push_event(
        EventCategory::Life,
        match ending {
            Ending::Retirement => format!("retired at age {}", state.age),
            Ending::Mortality => format!("passed away at age {}", state.age),
        },
        now_ms,
    );
    log::info!("life ended: {} at age {}", ending.as_str(), state.age);
}

/// Yearly mortality roll. Disabled entirely without an RNG; the risk grows
/// linearly past the base age and scales with the lifestyle modifier.
fn roll_mortality(state: &mut GameState, now_ms: f64) {
    if state.age <= MORTALITY_BASE_AGE {
        return;
    }
    let years_past = u32_to_f64(state.age - MORTALITY_BASE_AGE);
    let risk = (years_past * MORTALITY_RISK_PER_YEAR).min(MORTALITY_RISK_CAP)
        * state.lifestyle_effects.mortality_modifier;
    let Some(rng) = state.rng.as_mut() else {
        return;
    };
    if rng.random::<f64>() < risk {
        end_life(state, Ending::Mortality, now_ms);
    }
}

/// Process one simulation tick. Returns `true` while the life continues.
fn on_tick(state: &mut GameState, data: &GameData, now_ms: f64) -> bool {
    state.total_ticks += 1;
    state.ticks_since_day_start += 1;

    let mut day_incremented = false;
    if state.ticks_since_day_start >= TICKS_PER_DAY {
        state.ticks_since_day_start = 0;
        state.day += 1;
        day_incremented = true;
        state.statistics.days_lived += 1;
        state.energy = state.max_energy;
    }

    if state.day > DAYS_PER_SEASON {
        state.day = 1;
        state.season = state.season.next();
        if state.season == Season::Spring {
            state.year += 1;
            state.age += 1;
            state.push_log(LOG_BIRTHDAY, &state.age.to_string());
            if state.age >= state.max_age {
                end_life(state, Ending::Retirement, now_ms);
                return false;
            }
            roll_mortality(state, now_ms);
            if state.is_over() {
                return false;
            }
        }
    }

    if day_incremented {
        lifestyle::apply_daily_cost(state, data, now_ms);
    }
    jobs::tick_accrual(state, data, now_ms);
    true
}

/// Advance the calendar by up to `ticks` ticks, stopping at a terminal
/// transition. Returns the number of ticks actually processed.
pub fn advance_ticks(state: &mut GameState, data: &GameData, ticks: u32, now_ms: f64) -> u32 {
    let mut processed = 0u32;
    for _ in 0..ticks {
        if state.is_over() {
            break;
        }
        let alive = on_tick(state, data, now_ms);
        processed += 1;
        if !alive {
            break;
        }
    }
    processed
}
