//! Engine error taxonomy.
//!
//! Nothing in the core is fatal to the process: every failure either surfaces
//! as a recoverable rejection to the caller or degrades to a logged no-op.

use thiserror::Error;

/// Recoverable failures surfaced by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A gated operation (job application, lifestyle selection) was attempted
    /// without meeting its requirements. No state was mutated.
    #[error("requirement not met: {0}")]
    RequirementNotMet(String),

    /// An unknown skill, job, attribute, or lifestyle id was passed in.
    /// The operation is a no-op.
    #[error("unknown reference: {0}")]
    InvalidReference(String),

    /// Prestige was attempted before the retirement age was reached.
    #[error("prestige requires reaching the maximum age")]
    NotEligible,

    /// External configuration could not be loaded or parsed. The engine falls
    /// back to the built-in minimal catalog instead of halting.
    #[error("data load failure: {0}")]
    DataLoad(String),
}
