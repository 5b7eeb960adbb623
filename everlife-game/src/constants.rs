//! Centralized balance and tuning constants for the Everlife progression engine.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_LIFE_BEGIN: &str = "log.life.begin";
pub(crate) const LOG_LIFE_ENDED: &str = "log.life.ended";
pub(crate) const LOG_BIRTHDAY: &str = "log.year.birthday";
pub(crate) const LOG_SKILL_LEVEL_UP: &str = "log.skill.level-up";
pub(crate) const LOG_SKILL_DECAY: &str = "log.skill.decay";
pub(crate) const LOG_SKILL_TRAINED: &str = "log.skill.trained";
pub(crate) const LOG_JOB_PROMOTION: &str = "log.job.promotion";
pub(crate) const LOG_JOB_APPLIED: &str = "log.job.applied";
pub(crate) const LOG_JOB_LEVEL_UP: &str = "log.job.level-up";
pub(crate) const LOG_LIFESTYLE_SELECTED: &str = "log.lifestyle.selected";
pub(crate) const LOG_LIFESTYLE_INSOLVENCY: &str = "log.lifestyle.insolvency";
pub(crate) const LOG_PRESTIGE: &str = "log.prestige.performed";
pub(crate) const LOG_ACHIEVEMENT_UNLOCKED: &str = "log.achievement.unlocked";

// Calendar geometry --------------------------------------------------------
pub(crate) const BASE_TICK_INTERVAL_MS: f64 = 1_000.0;
pub(crate) const TICKS_PER_DAY: u32 = 5;
pub(crate) const DAYS_PER_SEASON: u32 = 30;
pub(crate) const SEASONS_PER_YEAR: u32 = 4;
pub(crate) const TICKS_PER_YEAR: u32 = TICKS_PER_DAY * DAYS_PER_SEASON * SEASONS_PER_YEAR;
/// Upper bound on ticks emitted by a single clock advance. A tab left in the
/// background for days must not stall the main thread on catch-up.
pub(crate) const MAX_TICKS_PER_ADVANCE: u32 = 10_000;

// Skill XP curve -----------------------------------------------------------
pub(crate) const BASE_XP: f64 = 100.0;
pub(crate) const XP_SCALING_FACTOR: f64 = 1.1;

// Growth-rate modifiers ----------------------------------------------------
pub(crate) const ATTRIBUTE_NEUTRAL: f64 = 5.0;
pub(crate) const ATTRIBUTE_BONUS_RATE: f64 = 0.05;
pub(crate) const SECONDARY_ATTRIBUTE_FACTOR: f64 = 0.5;
pub(crate) const ATTRIBUTE_MIN: f64 = 1.0;
pub(crate) const ATTRIBUTE_MAX: f64 = 20.0;
pub(crate) const SYNERGY_LEVEL_SCALE: f64 = 100.0;
pub(crate) const SYNERGY_RATE: f64 = 0.1;
pub(crate) const SYNERGY_CAP: f64 = 0.5;

// Skill decay --------------------------------------------------------------
/// Real-time cadence at which the decay sweep is evaluated.
pub(crate) const DECAY_CHECK_INTERVAL_MS: f64 = 30_000.0;
/// Real time a skill must sit untouched before rust sets in.
pub(crate) const DECAY_INTERVAL_MS: f64 = 300_000.0;
/// XP drains this many times faster than levels while any XP remains.
pub(crate) const DECAY_XP_DRAIN_FACTOR: f64 = 10.0;
pub(crate) const DISCIPLINE_ATTRIBUTE: &str = "discipline";
pub(crate) const DISCIPLINE_DAMPENING_SCALE: f64 = 20.0;
pub(crate) const DISCIPLINE_DAMPENING_FACTOR: f64 = 0.5;

// Lifestyle tuning ---------------------------------------------------------
pub(crate) const HOUSING_MORTALITY_WEIGHT: f64 = 0.15;
pub(crate) const TRANSPORT_MORTALITY_WEIGHT: f64 = 0.05;
pub(crate) const DIET_MORTALITY_WEIGHT: f64 = 0.10;
pub(crate) const MORTALITY_MODIFIER_FLOOR: f64 = 0.25;
pub(crate) const BASE_SLEEP_HOURS: f64 = 8.0;
pub(crate) const BASE_COMMUTE_HOURS: f64 = 1.0;
pub(crate) const BASE_MEAL_HOURS: f64 = 1.5;
pub(crate) const MIN_COMMUTE_HOURS: f64 = 0.0;
pub(crate) const MIN_MEAL_HOURS: f64 = 0.5;
pub(crate) const FIXED_CLEANING_HOURS: f64 = 0.5;
pub(crate) const DEFAULT_WORKING_HOURS: f64 = 8.0;
pub(crate) const DEFAULT_TRAINING_HOURS: f64 = 1.0;
/// Job level at which a career track counts as completed for lifestyle gates.
pub(crate) const CAREER_COMPLETION_LEVEL: u32 = 50;

// Job tuning ---------------------------------------------------------------
/// Job XP accrued over one full working year at the active job.
pub(crate) const JOB_PROGRESS_PER_YEAR: f64 = 600.0;

// Training -----------------------------------------------------------------
pub(crate) const TRAINING_ENERGY_COST: f64 = 10.0;
pub(crate) const TRAINING_XP_AMOUNT: f64 = 5.0;

// Prestige -----------------------------------------------------------------
pub(crate) const PRESTIGE_GOLD_DIVISOR: f64 = 10_000.0;
pub(crate) const PRESTIGE_SKILL_WEIGHT: f64 = 0.5;
pub(crate) const PRESTIGE_GOLD_RATE: f64 = 0.05;
pub(crate) const PRESTIGE_SKILL_RATE: f64 = 0.03;
pub(crate) const PRESTIGE_SKILL_MULTIPLIER_RATE: f64 = 0.05;
pub(crate) const PRESTIGE_ENERGY_BONUS: f64 = 2.0;

// Life defaults ------------------------------------------------------------
pub(crate) const BASE_MAX_ENERGY: f64 = 100.0;
pub(crate) const STARTING_AGE: u32 = 18;
pub(crate) const DEFAULT_MAX_AGE: u32 = 65;
pub(crate) const STARTING_GOLD: f64 = 0.0;

// Mortality ----------------------------------------------------------------
/// Age below which the yearly mortality roll never fires.
pub(crate) const MORTALITY_BASE_AGE: u32 = 50;
pub(crate) const MORTALITY_RISK_PER_YEAR: f64 = 0.002;
pub(crate) const MORTALITY_RISK_CAP: f64 = 0.25;
