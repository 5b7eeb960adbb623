//! End-of-life reporting.

use crate::prestige;
use crate::state::{Ending, GameState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Final report surfaced when a life ends, before the player prestiges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeSummary {
    pub ending: Ending,
    pub age: u32,
    pub years_lived: u32,
    pub days_lived: u64,
    pub gold: f64,
    pub total_gold_earned: f64,
    pub total_skill_levels: u64,
    /// Skill levels at death, highest first.
    pub skill_levels: Vec<(String, u32)>,
    pub job_levels: BTreeMap<String, u32>,
    pub achievements_unlocked: usize,
    pub prestige_level: u32,
    /// Points a prestige performed now would award.
    pub prospective_prestige_points: u32,
}

impl LifeSummary {
    /// Build the report for a finished life. `None` while the life is still
    /// running.
    #[must_use]
    pub fn from_state(state: &GameState) -> Option<Self> {
        let ending = state.ending?;
        let mut skill_levels: Vec<(String, u32)> = state
            .skills
            .iter()
            .map(|(id, record)| (id.clone(), record.level))
            .collect();
        skill_levels.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Some(Self {
            ending,
            age: state.age,
            years_lived: state.year,
            days_lived: state.statistics.days_lived,
            gold: state.gold,
            total_gold_earned: state.statistics.total_gold_earned,
            total_skill_levels: state.total_skill_levels(),
            skill_levels,
            job_levels: state
                .job_progress
                .iter()
                .map(|(id, progress)| (id.clone(), progress.level))
                .collect(),
            achievements_unlocked: state.achievements.len(),
            prestige_level: state.prestige_level,
            prospective_prestige_points: prestige::calculate_prestige_points(state),
        })
    }
}
