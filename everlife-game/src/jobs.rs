//! Career tracks: per-tick accrual, per-job leveling, and promotion.
//!
//! Income and skill rewards are yearly figures in the catalog, paid out
//! per tick. Job levels share the skill XP curve but progress independently,
//! keyed by job id so leaving and re-applying never wipes earned levels.

use crate::constants::{
    JOB_PROGRESS_PER_YEAR, LOG_JOB_APPLIED, LOG_JOB_LEVEL_UP, LOG_JOB_PROMOTION,
    TICKS_PER_YEAR,
};
use crate::data::{GameData, TierDef};
use crate::error::EngineError;
use crate::events::EventCategory;
use crate::numbers::u32_to_f64;
use crate::skills::{self, xp_for_level};
use crate::state::{ActiveJob, GameState};

fn tier_requirements_met(state: &GameState, tier: &TierDef) -> bool {
    tier.required_skill
        .iter()
        .all(|(skill_id, min)| state.skill_level(skill_id) >= *min)
}

/// Take a job at the given tier.
///
/// # Errors
///
/// [`EngineError::InvalidReference`] for an unknown job or tier index, and
/// [`EngineError::RequirementNotMet`] when skill or job-level gates fail.
/// State is untouched on failure. Progress already earned in this track is
/// kept when re-applying.
pub fn apply_for_job(
    state: &mut GameState,
    data: &GameData,
    job_id: &str,
    tier_index: usize,
    now_ms: f64,
) -> Result<(), EngineError> {
    let Some(job) = data.job(job_id) else {
        return Err(EngineError::InvalidReference(format!("job:{job_id}")));
    };
    let Some(tier) = job.tier(tier_index) else {
        return Err(EngineError::InvalidReference(format!(
            "job:{job_id}:tier:{tier_index}"
        )));
    };

    if !tier_requirements_met(state, tier) {
        return Err(EngineError::RequirementNotMet(format!(
            "{} requires higher skills",
            tier.title
        )));
    }
    if state.job_level(job_id) < tier.required_job_level {
        return Err(EngineError::RequirementNotMet(format!(
            "{} requires job level {}",
            tier.title, tier.required_job_level
        )));
    }

    state.active_job = Some(ActiveJob {
        job_id: String::from(job_id),
        tier_index,
    });
    state.job_progress.entry(String::from(job_id)).or_default();
    state.push_log(LOG_JOB_APPLIED, &format!("{job_id}:{tier_index}"));
    state.push_event(
        EventCategory::Job,
        format!("hired as {}", tier.title),
        now_ms,
    );
    Ok(())
}

/// Index of the highest tier in the active job whose skill requirements the
/// player currently meets, if it is above the held tier. Promotion only ever
/// moves up.
#[must_use]
pub fn eligible_promotion(state: &GameState, data: &GameData) -> Option<usize> {
    let active = state.active_job.as_ref()?;
    let job = data.job(&active.job_id)?;
    let best = job
        .tiers
        .iter()
        .enumerate()
        .filter(|(_, tier)| tier_requirements_met(state, tier))
        .map(|(index, _)| index)
        .next_back()?;
    (best > active.tier_index).then_some(best)
}

/// Promote within the active career track when a higher tier's skill gates
/// are met. Returns the new tier index if a promotion happened.
pub fn check_career_upgrade(
    state: &mut GameState,
    data: &GameData,
    now_ms: f64,
) -> Option<usize> {
    let best = eligible_promotion(state, data)?;
    let active = state.active_job.as_mut()?;
    active.tier_index = best;
    let job_id = active.job_id.clone();
    let title = data
        .job(&job_id)
        .and_then(|job| job.tier(best))
        .map_or_else(String::new, |tier| tier.title.clone());
    state.statistics.promotions += 1;
    state.push_log(LOG_JOB_PROMOTION, &format!("{job_id}:{best}"));
    state.push_event(EventCategory::Job, format!("promoted to {title}"), now_ms);
    Some(best)
}

/// One tick of gold income, skill rewards, and job progress for the active
/// job. No-op without an active job or after the life has ended.
pub fn tick_accrual(state: &mut GameState, data: &GameData, now_ms: f64) {
    if state.is_over() {
        return;
    }
    let Some(active) = state.active_job.clone() else {
        return;
    };
    let Some(tier) = data.job(&active.job_id).and_then(|j| j.tier(active.tier_index)) else {
        log::warn!("active job {}:{} missing from catalog", active.job_id, active.tier_index);
        return;
    };
    let ticks_per_year = u32_to_f64(TICKS_PER_YEAR);

    let gold_gain = tier.income_per_year / ticks_per_year * state.multipliers.gold;
    state.gold += gold_gain;
    state.statistics.total_gold_earned += gold_gain;

    let rewards: Vec<(String, f64)> = tier
        .skill_reward_per_year
        .iter()
        .map(|(id, per_year)| (id.clone(), per_year / ticks_per_year))
        .collect();
    for (skill_id, per_tick) in rewards {
        let amount = per_tick * state.multipliers.skill;
        // Unknown reward ids degrade to a logged no-op.
        let _ = skills::add_xp(state, &skill_id, amount, now_ms);
    }

    let leveled = {
        let progress = state
            .job_progress
            .entry(active.job_id.clone())
            .or_default();
        progress.xp += JOB_PROGRESS_PER_YEAR / ticks_per_year;
        let mut gained = 0u32;
        while progress.xp >= xp_for_level(progress.level) {
            progress.xp -= xp_for_level(progress.level);
            progress.level += 1;
            gained += 1;
        }
        gained
    };
    if leveled > 0 {
        let level = state.job_level(&active.job_id);
        state.push_log(LOG_JOB_LEVEL_UP, &format!("{}:{level}", active.job_id));
        state.push_event(
            EventCategory::Job,
            format!("{} job level {level}", active.job_id),
            now_ms,
        );
    }

    check_career_upgrade(state, data, now_ms);
}
