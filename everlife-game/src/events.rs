//! Discrete engine events handed to the presentation layer.
//!
//! Engines buffer events on the game state and never block on the sink: the
//! session drains the buffer after each advance and forwards the records to
//! whichever [`crate::EventSink`] was injected, if any.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad grouping used by the presentation layer to route notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Skill,
    Job,
    Lifestyle,
    Prestige,
    Achievement,
    Life,
}

impl EventCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Job => "job",
            Self::Lifestyle => "lifestyle",
            Self::Prestige => "prestige",
            Self::Achievement => "achievement",
            Self::Life => "life",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single notification record emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineEvent {
    pub message: String,
    pub category: EventCategory,
    /// Wall-clock timestamp in milliseconds, as supplied by the embedder.
    pub timestamp_ms: f64,
}

impl EngineEvent {
    #[must_use]
    pub fn new(category: EventCategory, message: impl Into<String>, timestamp_ms: f64) -> Self {
        Self {
            message: message.into(),
            category,
            timestamp_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_serde() {
        let json = serde_json::to_string(&EventCategory::Lifestyle).unwrap();
        assert_eq!(json, "\"lifestyle\"");
        let back: EventCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EventCategory::Lifestyle);
    }

    #[test]
    fn event_carries_message_and_timestamp() {
        let event = EngineEvent::new(EventCategory::Job, "promoted to Analyst", 1_500.0);
        assert_eq!(event.category.as_str(), "job");
        assert_eq!(event.message, "promoted to Analyst");
        assert!((event.timestamp_ms - 1_500.0).abs() < f64::EPSILON);
    }
}
