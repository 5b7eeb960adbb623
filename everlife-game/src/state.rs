//! The mutable session aggregate every engine reads and writes.
//!
//! `GameState` is the canonical serialization unit: persistence round-trips
//! it wholesale, and `rehydrate` re-attaches the runtime-only pieces (RNG,
//! caches, event buffer) that `#[serde(skip)]` drops. Each engine mutates its
//! own subtree; cross-subtree access is read-only.

use crate::constants::{
    BASE_MAX_ENERGY, DEFAULT_MAX_AGE, STARTING_AGE, STARTING_GOLD,
};
use crate::data::{GameData, LifestyleCategory, SkillDef};
use crate::events::{EngineEvent, EventCategory};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// The four-season cycle. Spring is the year boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::Spring => 0,
            Self::Summer => 1,
            Self::Autumn => 2,
            Self::Winter => 3,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Autumn,
            Self::Autumn => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "autumn" => Ok(Self::Autumn),
            "winter" => Ok(Self::Winter),
            _ => Err(()),
        }
    }
}

/// Discrete simulation speeds. Serialized as the numeric factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(into = "u32", try_from = "u32")]
pub enum GameSpeed {
    #[default]
    Normal,
    Double,
    Quadruple,
}

impl GameSpeed {
    #[must_use]
    pub const fn factor(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::Double => 2,
            Self::Quadruple => 4,
        }
    }

    #[must_use]
    pub fn multiplier(self) -> f64 {
        f64::from(self.factor())
    }
}

impl From<GameSpeed> for u32 {
    fn from(speed: GameSpeed) -> Self {
        speed.factor()
    }
}

impl TryFrom<u32> for GameSpeed {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Normal),
            2 => Ok(Self::Double),
            4 => Ok(Self::Quadruple),
            other => Err(format!("unsupported game speed factor: {other}")),
        }
    }
}

/// Why a life ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ending {
    /// Reached the maximum age.
    Retirement,
    /// Lost the yearly mortality roll.
    Mortality,
}

impl Ending {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retirement => "retirement",
            Self::Mortality => "mortality",
        }
    }
}

/// Per-session instance of a skill, derived from its catalog definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub base_value: u32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub xp: f64,
    #[serde(default = "default_one")]
    pub growth_rate: f64,
    #[serde(default)]
    pub decay_rate: f64,
    /// Permanent per-skill multiplier, only ever set by prestige.
    #[serde(default = "default_one")]
    pub multiplier: f64,
    pub primary_attribute: String,
    #[serde(default)]
    pub secondary_attribute: Option<String>,
    #[serde(default)]
    pub synergies: SmallVec<[String; 4]>,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    /// Wall-clock ms of the last XP touch; zero means never touched.
    #[serde(default)]
    pub last_updated_ms: f64,
}

impl SkillRecord {
    #[must_use]
    pub fn from_def(def: &SkillDef) -> Self {
        Self {
            id: def.id.clone(),
            category: def.category.clone(),
            base_value: def.base_value,
            level: def.base_value,
            xp: 0.0,
            growth_rate: def.growth_rate,
            decay_rate: def.decay_rate,
            multiplier: 1.0,
            primary_attribute: def.primary_attribute.clone(),
            secondary_attribute: def.secondary_attribute.clone(),
            synergies: def.synergies.clone(),
            max_level: def.max_level,
            last_updated_ms: 0.0,
        }
    }
}

/// The job currently held, by catalog reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveJob {
    pub job_id: String,
    pub tier_index: usize,
}

/// Per-job-id progression. Persists when the player leaves and later
/// re-applies for the same track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JobProgress {
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub xp: f64,
}

/// Selected option ids, one per lifestyle category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LifestyleSelection {
    #[serde(default)]
    pub housing: String,
    #[serde(default)]
    pub transportation: String,
    #[serde(default)]
    pub diet: String,
}

impl LifestyleSelection {
    #[must_use]
    pub fn get(&self, category: LifestyleCategory) -> &str {
        match category {
            LifestyleCategory::Housing => &self.housing,
            LifestyleCategory::Transportation => &self.transportation,
            LifestyleCategory::Diet => &self.diet,
        }
    }

    pub fn set(&mut self, category: LifestyleCategory, id: impl Into<String>) {
        let slot = match category {
            LifestyleCategory::Housing => &mut self.housing,
            LifestyleCategory::Transportation => &mut self.transportation,
            LifestyleCategory::Diet => &mut self.diet,
        };
        *slot = id.into();
    }
}

/// Derived record recomputed whenever selections change. Persisted for
/// display continuity but always recomputed on rehydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleEffects {
    pub mortality_modifier: f64,
    pub comfort: f64,
    pub cost_per_day: f64,
    pub sleep_hours: f64,
    pub commute_hours: f64,
    pub meal_hours: f64,
    pub free_time_hours: f64,
}

impl Default for LifestyleEffects {
    fn default() -> Self {
        Self {
            mortality_modifier: 1.0,
            comfort: 0.0,
            cost_per_day: 0.0,
            sleep_hours: crate::constants::BASE_SLEEP_HOURS,
            commute_hours: crate::constants::BASE_COMMUTE_HOURS,
            meal_hours: crate::constants::BASE_MEAL_HOURS,
            free_time_hours: 0.0,
        }
    }
}

/// Permanent progress multipliers. Only the prestige engine writes these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub gold: f64,
    pub skill: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self { gold: 1.0, skill: 1.0 }
    }
}

/// Monotonic counters. Survive prestige; never decremented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Statistics {
    #[serde(default)]
    pub total_gold_earned: f64,
    #[serde(default)]
    pub total_xp_gained: f64,
    #[serde(default)]
    pub level_ups: u64,
    #[serde(default)]
    pub promotions: u64,
    #[serde(default)]
    pub days_lived: u64,
    #[serde(default)]
    pub prestige_count: u32,
    #[serde(default)]
    pub time_played_seconds: f64,
}

/// Player preferences. Survive prestige untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub autosave: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            autosave: true,
        }
    }
}

/// The whole session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default = "default_gold")]
    pub gold: f64,
    #[serde(default = "default_age")]
    pub age: u32,
    #[serde(default = "default_max_age")]
    pub max_age: u32,

    /// Day within the season, 1-based.
    #[serde(default = "default_one_u32")]
    pub day: u32,
    #[serde(default)]
    pub season: Season,
    /// Simulated year, 1-based.
    #[serde(default = "default_one_u32")]
    pub year: u32,
    #[serde(default)]
    pub ticks_since_day_start: u32,
    #[serde(default)]
    pub total_ticks: u64,

    #[serde(default)]
    pub speed: GameSpeed,
    #[serde(default)]
    pub paused: bool,

    #[serde(default = "default_energy")]
    pub energy: f64,
    #[serde(default = "default_energy")]
    pub max_energy: f64,

    #[serde(default)]
    pub skills: BTreeMap<String, SkillRecord>,
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,

    #[serde(default)]
    pub active_job: Option<ActiveJob>,
    #[serde(default)]
    pub job_progress: BTreeMap<String, JobProgress>,

    #[serde(default)]
    pub lifestyle: LifestyleSelection,
    #[serde(default)]
    pub lifestyle_effects: LifestyleEffects,

    #[serde(default)]
    pub multipliers: Multipliers,
    #[serde(default)]
    pub prestige_points: u32,
    #[serde(default)]
    pub prestige_level: u32,

    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub achievements: BTreeSet<String>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub ending: Option<Ending>,

    /// Real-time anchor for the decay sweep; zero until the first poll.
    #[serde(default)]
    pub last_decay_check_ms: f64,
    /// Seed the RNG is rebuilt from on rehydration. `None` disables all
    /// stochastic behavior.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(skip)]
    pub rng: Option<ChaCha20Rng>,
    #[serde(skip)]
    pub pending_events: Vec<EngineEvent>,
    #[serde(skip)]
    pub growth_cache: HashMap<String, f64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            gold: default_gold(),
            age: default_age(),
            max_age: default_max_age(),
            day: 1,
            season: Season::Spring,
            year: 1,
            ticks_since_day_start: 0,
            total_ticks: 0,
            speed: GameSpeed::Normal,
            paused: false,
            energy: default_energy(),
            max_energy: default_energy(),
            skills: BTreeMap::new(),
            attributes: BTreeMap::new(),
            active_job: None,
            job_progress: BTreeMap::new(),
            lifestyle: LifestyleSelection::default(),
            lifestyle_effects: LifestyleEffects::default(),
            multipliers: Multipliers::default(),
            prestige_points: 0,
            prestige_level: 0,
            statistics: Statistics::default(),
            achievements: BTreeSet::new(),
            settings: Settings::default(),
            logs: Vec::new(),
            ending: None,
            last_decay_check_ms: 0.0,
            seed: None,
            rng: None,
            pending_events: Vec::new(),
            growth_cache: HashMap::new(),
        }
    }
}

impl GameState {
    /// Build a fresh state with skill and attribute instances derived from
    /// the catalog and the zero-cost lifestyle row selected per category.
    /// Lifestyle effects are left at their defaults; callers recompute them
    /// once engines are wired up.
    #[must_use]
    pub fn new(data: &GameData) -> Self {
        let mut state = Self::default();
        state.instantiate_catalog(data);
        state
    }

    /// Attach a deterministic RNG. Stochastic features stay off without one.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = Some(ChaCha20Rng::seed_from_u64(seed));
        self
    }

    /// Restore runtime-only fields after deserialization: rebuild the RNG
    /// from the stored seed, clear caches, and add instances for any catalog
    /// entries introduced since the save was written.
    pub fn rehydrate(&mut self, data: &GameData) {
        self.rng = self.seed.map(ChaCha20Rng::seed_from_u64);
        self.pending_events.clear();
        self.growth_cache.clear();
        self.instantiate_catalog(data);
        self.energy = self.energy.clamp(0.0, self.max_energy);
    }

    fn instantiate_catalog(&mut self, data: &GameData) {
        for def in &data.skills {
            self.skills
                .entry(def.id.clone())
                .or_insert_with(|| SkillRecord::from_def(def));
        }
        for attr in &data.attributes {
            self.attributes
                .entry(attr.id.clone())
                .or_insert(attr.base_value);
        }
        for category in LifestyleCategory::ALL {
            if self.lifestyle.get(category).is_empty() {
                if let Some(option) = data.lifestyle.zero_cost(category) {
                    self.lifestyle.set(category, option.id.clone());
                }
            }
        }
    }

    /// Current level of a skill, zero for unknown ids.
    #[must_use]
    pub fn skill_level(&self, id: &str) -> u32 {
        self.skills.get(id).map_or(0, |s| s.level)
    }

    /// Current attribute value, defaulting to the neutral midpoint and
    /// clamped to the legal range.
    #[must_use]
    pub fn attribute_value(&self, id: &str) -> f64 {
        self.attributes
            .get(id)
            .copied()
            .unwrap_or(crate::constants::ATTRIBUTE_NEUTRAL)
            .clamp(
                crate::constants::ATTRIBUTE_MIN,
                crate::constants::ATTRIBUTE_MAX,
            )
    }

    #[must_use]
    pub fn job_level(&self, job_id: &str) -> u32 {
        self.job_progress.get(job_id).map_or(0, |p| p.level)
    }

    /// A career track counts as completed once its job level reaches the
    /// configured threshold. Used by lifestyle requirement gates.
    #[must_use]
    pub fn career_completed(&self, job_id: &str) -> bool {
        self.job_level(job_id) >= crate::constants::CAREER_COMPLETION_LEVEL
    }

    /// Sum of all skill levels, used by the prestige point formula.
    #[must_use]
    pub fn total_skill_levels(&self) -> u64 {
        self.skills.values().map(|s| u64::from(s.level)).sum()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    /// Append a structured log key with optional detail.
    pub fn push_log(&mut self, key: &str, detail: &str) {
        if detail.is_empty() {
            self.logs.push(String::from(key));
        } else {
            self.logs.push(format!("{key}:{detail}"));
        }
    }

    /// Buffer a notification for the session to drain after the current
    /// operation completes. Never blocks.
    pub fn push_event(
        &mut self,
        category: EventCategory,
        message: impl Into<String>,
        now_ms: f64,
    ) {
        self.pending_events
            .push(EngineEvent::new(category, message, now_ms));
    }

    /// Drop any cached effective growth rates. Cheap to rebuild lazily.
    pub fn invalidate_growth_cache(&mut self) {
        self.growth_cache.clear();
    }
}

fn default_gold() -> f64 {
    STARTING_GOLD
}

fn default_age() -> u32 {
    STARTING_AGE
}

fn default_max_age() -> u32 {
    DEFAULT_MAX_AGE
}

fn default_energy() -> f64 {
    BASE_MAX_ENERGY
}

fn default_one() -> f64 {
    1.0
}

fn default_one_u32() -> u32 {
    1
}

fn default_max_level() -> u32 {
    100
}

fn default_true() -> bool {
    true
}
