//! Plan generation and completion tracking.

pub mod generate;
pub mod progress;

use thiserror::Error;

pub use generate::{GeneratePlanRequest, PlannerConfig, build_schedule, generate_plan};
pub use progress::{MILESTONES, Milestone, ToggleOutcome, toggle_topic_completion};

/// Errors raised while generating or mutating a plan.
///
/// Every variant is detected before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("incomplete configuration: {missing} must be selected before generating a plan")]
    IncompleteConfiguration { missing: &'static str },

    #[error(
        "insufficient lead time: exam is {days_until_exam} day(s) away, at least {minimum} required"
    )]
    InsufficientLeadTime { days_until_exam: i64, minimum: i64 },

    #[error("hours per day must be at least 1")]
    InvalidHoursPerDay,

    #[error("day index {index} out of range (plan has {len} days)")]
    DayOutOfRange { index: usize, len: usize },

    #[error("topic index {index} out of range (day {day} has {len} topics)")]
    TopicOutOfRange { day: usize, index: usize, len: usize },
}
