//! Topic completion toggles and progress milestones.

use studyplan_store::StudyPlan;
use tracing::{debug, info};

use super::PlanError;

/// Progress thresholds that raise a milestone when crossed upward.
pub const MILESTONES: [u8; 4] = [25, 50, 75, 100];

/// A progress threshold reached by a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    /// Threshold in [`MILESTONES`] crossed by the toggle.
    pub threshold: u8,
    /// Plan progress after the toggle.
    pub progress: u8,
}

/// Result of [`toggle_topic_completion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// New completion state of the toggled topic.
    pub completed: bool,
    /// Whether the topic's day is now fully completed.
    pub day_completed: bool,
    pub previous_progress: u8,
    pub progress: u8,
    /// Every threshold crossed upward by this toggle, lowest first.
    pub milestones: Vec<Milestone>,
}

/// Flip the completion flag of one scheduled topic.
///
/// Recomputes the day's completion and the plan's progress. Out-of-range
/// indices are rejected without touching the plan.
pub fn toggle_topic_completion(
    plan: &mut StudyPlan,
    day_index: usize,
    topic_index: usize,
) -> Result<ToggleOutcome, PlanError> {
    let day_count = plan.days.len();
    let day = plan
        .days
        .get_mut(day_index)
        .ok_or(PlanError::DayOutOfRange {
            index: day_index,
            len: day_count,
        })?;

    let topic_count = day.topics.len();
    let topic = day
        .topics
        .get_mut(topic_index)
        .ok_or(PlanError::TopicOutOfRange {
            day: day_index,
            index: topic_index,
            len: topic_count,
        })?;

    topic.completed = !topic.completed;
    let completed = topic.completed;
    debug!(
        day = day_index,
        topic = %topic.topic_name,
        completed,
        "topic toggled"
    );

    day.refresh_completion();
    let day_completed = day.is_completed;

    let previous_progress = plan.progress;
    let progress = plan.recompute_progress();
    let milestones = crossed_milestones(previous_progress, progress);

    for m in &milestones {
        info!(
            plan_id = %plan.id,
            threshold = m.threshold,
            progress = m.progress,
            "progress milestone reached"
        );
    }

    Ok(ToggleOutcome {
        completed,
        day_completed,
        previous_progress,
        progress,
        milestones,
    })
}

fn crossed_milestones(before: u8, after: u8) -> Vec<Milestone> {
    MILESTONES
        .iter()
        .filter(|&&t| before < t && after >= t)
        .map(|&threshold| Milestone {
            threshold,
            progress: after,
        })
        .collect()
}
