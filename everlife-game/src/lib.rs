//! Everlife core: a platform-agnostic progression engine for an idle life
//! simulation.
//!
//! The crate owns the deterministic simulation only. A player ages through
//! ticks, days, seasons, and years; a job pays gold and skill XP each tick;
//! skills level on an exponential curve, boosted by attributes and synergies
//! and rusting over real time; lifestyle choices shape the daily time budget,
//! upkeep cost, and mortality risk; reaching the maximum age unlocks a
//! prestige reset with permanent multipliers.
//!
//! Everything platform-specific is injected: [`DataLoader`] supplies the
//! static catalogs, [`GameStorage`] persists the [`GameState`] wholesale,
//! [`EventSink`] receives notifications, and [`AchievementEvaluator`] decides
//! unlocks. Absence of a collaborator is a configuration choice, never a
//! runtime probe.

pub mod calendar;
pub mod clock;
pub mod constants;
pub mod data;
pub mod error;
pub mod events;
pub mod jobs;
pub mod lifestyle;
pub mod numbers;
pub mod prestige;
pub mod result;
pub mod session;
pub mod skills;
pub mod state;

pub use data::{
    AchievementDef, AttributeDef, CategoryDef, GameData, JobDef, LifestyleCatalog,
    LifestyleCategory, LifestyleOption, SkillDef, TierDef,
};
pub use error::EngineError;
pub use events::{EngineEvent, EventCategory};
pub use result::LifeSummary;
pub use session::GameSession;
pub use state::{
    ActiveJob, Ending, GameSpeed, GameState, JobProgress, LifestyleEffects,
    LifestyleSelection, Multipliers, Season, Settings, SkillRecord, Statistics,
};

use anyhow::anyhow;
use std::fmt;

/// Supplies the static catalogs at startup.
pub trait DataLoader {
    type Error: fmt::Display;

    /// Load all catalogs.
    ///
    /// # Errors
    ///
    /// Implementations surface their own failure type; the engine degrades
    /// to the minimal built-in catalog rather than halting.
    fn load_data(&self) -> Result<GameData, Self::Error>;
}

/// Opaque persistence for the whole game state.
pub trait GameStorage {
    type Error: fmt::Display;

    /// Persist the state wholesale.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn save(&self, state: &GameState) -> Result<(), Self::Error>;

    /// Load the previously saved state, `None` when no save exists.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn load(&self) -> Result<Option<GameState>, Self::Error>;
}

/// Receives engine notifications. Must not block.
pub trait EventSink {
    fn emit(&self, event: &EngineEvent);
}

/// Decides which achievements a state newly satisfies.
pub trait AchievementEvaluator {
    fn newly_satisfied(&self, state: &GameState) -> Vec<String>;
}

/// Startup and persistence seam. Construction order is fixed: load config,
/// build or restore the state, wire the session, then start the clock.
pub struct GameEngine<L: DataLoader, S: GameStorage> {
    loader: L,
    storage: S,
}

impl<L: DataLoader, S: GameStorage> GameEngine<L, S> {
    pub fn new(loader: L, storage: S) -> Self {
        Self { loader, storage }
    }

    /// Load the catalogs through the injected loader, without the fallback.
    ///
    /// # Errors
    ///
    /// [`EngineError::DataLoad`] wrapping the loader's failure.
    pub fn try_load_data(&self) -> Result<GameData, EngineError> {
        self.loader
            .load_data()
            .map_err(|err| EngineError::DataLoad(err.to_string()))
    }

    fn load_data(&self) -> GameData {
        self.try_load_data().unwrap_or_else(|err| {
            log::warn!("{err}, using minimal fallback");
            GameData::minimal_fallback()
        })
    }

    /// Start a brand-new life.
    #[must_use]
    pub fn new_session(&self) -> GameSession {
        let data = self.load_data();
        let mut state = GameState::new(&data);
        state.push_log(constants::LOG_LIFE_BEGIN, "1");
        GameSession::new(data, state)
    }

    /// Start a new life with a deterministic RNG, enabling the stochastic
    /// features (the yearly mortality roll).
    #[must_use]
    pub fn new_seeded_session(&self, seed: u64) -> GameSession {
        let data = self.load_data();
        let mut state = GameState::new(&data).with_seed(seed);
        state.push_log(constants::LOG_LIFE_BEGIN, "1");
        GameSession::new(data, state)
    }

    /// Restore the saved session, if one exists.
    ///
    /// # Errors
    ///
    /// Propagates storage failures; a missing save is `Ok(None)`.
    pub fn load_game(&self) -> anyhow::Result<Option<GameSession>> {
        let Some(mut state) = self
            .storage
            .load()
            .map_err(|err| anyhow!("loading save failed: {err}"))?
        else {
            return Ok(None);
        };
        let data = self.load_data();
        state.rehydrate(&data);
        Ok(Some(GameSession::new(data, state)))
    }

    /// Persist the session's state.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub fn save_game(&self, session: &GameSession) -> anyhow::Result<()> {
        self.storage
            .save(session.state())
            .map_err(|err| anyhow!("saving failed: {err}"))
    }
}
