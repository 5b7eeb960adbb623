//! The session controller: one owned state, one clock, the engines wired in
//! dependency order.
//!
//! `advance` drives the simulation time base (Clock, then Calendar, then job
//! accrual inside each tick) and `poll_decay` drives the independent real
//! time base. Decay deliberately keeps running while the game is paused,
//! matching the idle-game reading of "skills rust in real time"; the tests
//! pin that behavior down.

use crate::clock::{effective_interval_ms, Clock};
use crate::constants::{
    LOG_ACHIEVEMENT_UNLOCKED, LOG_SKILL_TRAINED, TRAINING_ENERGY_COST, TRAINING_XP_AMOUNT,
};
use crate::data::{GameData, LifestyleCategory};
use crate::error::EngineError;
use crate::events::EventCategory;
use crate::numbers::u32_to_f64;
use crate::result::LifeSummary;
use crate::state::{GameSpeed, GameState};
use crate::{calendar, jobs, lifestyle, prestige, skills};
use crate::{AchievementEvaluator, EventSink};
use std::rc::Rc;

/// A running play session.
pub struct GameSession {
    state: GameState,
    data: GameData,
    clock: Clock,
    sink: Option<Rc<dyn EventSink>>,
    evaluator: Option<Rc<dyn AchievementEvaluator>>,
}

impl GameSession {
    #[must_use]
    pub fn new(data: GameData, mut state: GameState) -> Self {
        lifestyle::refresh_effects(&mut state, &data);
        Self {
            state,
            data,
            clock: Clock::new(),
            sink: None,
            evaluator: None,
        }
    }

    /// Attach a notification sink. Absence is a configuration choice; the
    /// engine never probes for one at runtime.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Rc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Attach an achievement evaluator, consulted once per simulated year
    /// and after each prestige.
    #[must_use]
    pub fn with_achievement_evaluator(mut self, evaluator: Rc<dyn AchievementEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn data(&self) -> &GameData {
        &self.data
    }

    /// Advance the simulation to `now_ms`. Returns the ticks processed.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let ticks = self.clock.advance(&self.state, now_ms);
        if ticks == 0 {
            self.drain_events();
            return 0;
        }
        let year_before = self.state.year;
        let processed = calendar::advance_ticks(&mut self.state, &self.data, ticks, now_ms);
        self.state.statistics.time_played_seconds +=
            u32_to_f64(processed) * effective_interval_ms(self.state.speed) / 1_000.0;
        if self.state.year != year_before || self.state.is_over() {
            self.evaluate_achievements(now_ms);
        }
        self.drain_events();
        processed
    }

    /// Run the real-time decay sweep. Independent of `advance` and of the
    /// pause flag. Returns the number of skills that decayed.
    pub fn poll_decay(&mut self, now_ms: f64) -> u32 {
        let decayed = skills::poll_decay(&mut self.state, now_ms);
        self.drain_events();
        decayed
    }

    pub fn pause(&mut self) {
        self.state.paused = true;
    }

    /// Resume ticking. Time spent paused is discarded, never replayed.
    pub fn resume(&mut self, now_ms: f64) {
        if self.state.is_over() {
            return;
        }
        self.state.paused = false;
        self.clock.reset(now_ms);
    }

    /// Change speed. Partial progress toward the next tick carries over.
    pub fn set_speed(&mut self, speed: GameSpeed) {
        self.state.speed = speed;
    }

    /// Spend energy and free time training a skill by hand.
    ///
    /// # Errors
    ///
    /// [`EngineError::RequirementNotMet`] when the life is over, energy is
    /// short, or the lifestyle leaves no free time;
    /// [`EngineError::InvalidReference`] for an unknown skill.
    pub fn train_skill(&mut self, skill_id: &str, now_ms: f64) -> Result<u32, EngineError> {
        if self.state.is_over() {
            return Err(EngineError::RequirementNotMet(String::from(
                "the life has ended",
            )));
        }
        if self.state.energy < TRAINING_ENERGY_COST {
            return Err(EngineError::RequirementNotMet(String::from(
                "not enough energy",
            )));
        }
        if self.state.lifestyle_effects.free_time_hours <= 0.0 {
            return Err(EngineError::RequirementNotMet(String::from(
                "no free time to train",
            )));
        }
        let gained = skills::add_xp(&mut self.state, skill_id, TRAINING_XP_AMOUNT, now_ms)?;
        self.state.energy -= TRAINING_ENERGY_COST;
        self.state.push_log(LOG_SKILL_TRAINED, skill_id);
        self.drain_events();
        Ok(gained)
    }

    /// Select a lifestyle option.
    ///
    /// # Errors
    ///
    /// See [`lifestyle::select_option`].
    pub fn select_lifestyle(
        &mut self,
        category: LifestyleCategory,
        option_id: &str,
        now_ms: f64,
    ) -> Result<(), EngineError> {
        let result =
            lifestyle::select_option(&mut self.state, &self.data, category, option_id, now_ms);
        self.drain_events();
        result
    }

    /// Apply for a job tier.
    ///
    /// # Errors
    ///
    /// See [`jobs::apply_for_job`].
    pub fn apply_for_job(
        &mut self,
        job_id: &str,
        tier_index: usize,
        now_ms: f64,
    ) -> Result<(), EngineError> {
        let result = jobs::apply_for_job(&mut self.state, &self.data, job_id, tier_index, now_ms);
        self.drain_events();
        result
    }

    /// Perform the prestige reset and start the next life.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotEligible`] before the maximum age.
    pub fn perform_prestige(&mut self, now_ms: f64) -> Result<u32, EngineError> {
        let gained = prestige::perform_prestige(&mut self.state, &self.data, now_ms)?;
        self.clock.reset(now_ms);
        self.evaluate_achievements(now_ms);
        self.drain_events();
        Ok(gained)
    }

    /// The end-of-life report, once the life has ended.
    #[must_use]
    pub fn life_summary(&self) -> Option<LifeSummary> {
        LifeSummary::from_state(&self.state)
    }

    fn evaluate_achievements(&mut self, now_ms: f64) {
        let Some(evaluator) = self.evaluator.clone() else {
            return;
        };
        for id in evaluator.newly_satisfied(&self.state) {
            if self.state.achievements.insert(id.clone()) {
                self.state.push_log(LOG_ACHIEVEMENT_UNLOCKED, &id);
                self.state.push_event(
                    EventCategory::Achievement,
                    format!("achievement unlocked: {id}"),
                    now_ms,
                );
            }
        }
    }

    fn drain_events(&mut self) {
        if self.state.pending_events.is_empty() {
            return;
        }
        let events = std::mem::take(&mut self.state.pending_events);
        if let Some(sink) = &self.sink {
            for event in &events {
                sink.emit(event);
            }
        }
    }
}
