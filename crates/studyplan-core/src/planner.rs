//! Planner service: owns the store and the single active plan.
//!
//! Requests come in as plain values ([`GeneratePlanRequest`],
//! [`ToggleTopicRequest`]) and every operation is all-or-nothing: the
//! in-memory plan only changes after the store accepted the write.
//!
//! ```text
//! Unconfigured --generate--> Active --toggle--> Active
//!      ^                       |  \--generate--> Active (replaced)
//!      +--------reset----------+
//! ```

use studyplan_store::{PlanStore, StoreError, StudyPlan};
use thiserror::Error;
use tracing::{info, warn};

use crate::calendar::export_schedule_as_calendar;
use crate::plan::{
    GeneratePlanRequest, PlanError, PlannerConfig, ToggleOutcome, generate_plan,
    toggle_topic_completion,
};

/// Errors surfaced by [`StudyPlanner`].
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("failed to persist plan: {0}")]
    Store(#[from] StoreError),

    #[error("no active study plan; generate one first")]
    NoActivePlan,
}

/// Lifecycle state of the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanState {
    /// No plan; waiting for a university, course, and exam date.
    Unconfigured,
    Active { progress: u8 },
}

/// Request to flip one topic's completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleTopicRequest {
    pub day_index: usize,
    pub topic_index: usize,
}

impl ToggleTopicRequest {
    pub fn new(day_index: usize, topic_index: usize) -> Self {
        Self {
            day_index,
            topic_index,
        }
    }
}

/// Owns the active plan and keeps it in sync with a [`PlanStore`].
#[derive(Debug)]
pub struct StudyPlanner<S: PlanStore> {
    store: S,
    config: PlannerConfig,
    active: Option<StudyPlan>,
}

impl<S: PlanStore> StudyPlanner<S> {
    /// Open a planner, restoring any plan already in `store`.
    ///
    /// Day completion and progress are recomputed from the topic flags.
    pub fn open(store: S, config: PlannerConfig) -> Result<Self, StoreError> {
        let mut active = store.load()?;
        if let Some(plan) = &mut active {
            for day in &mut plan.days {
                day.refresh_completion();
            }
            plan.recompute_progress();
            info!(plan_id = %plan.id, progress = plan.progress, "restored active plan");
        }
        Ok(Self {
            store,
            config,
            active,
        })
    }

    pub fn state(&self) -> PlanState {
        match &self.active {
            None => PlanState::Unconfigured,
            Some(plan) => PlanState::Active {
                progress: plan.progress,
            },
        }
    }

    pub fn active(&self) -> Option<&StudyPlan> {
        self.active.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generate a new plan and make it the active one.
    ///
    /// Any existing plan is discarded, never merged.
    pub fn generate(&mut self, request: &GeneratePlanRequest) -> Result<&StudyPlan, PlannerError> {
        let plan = generate_plan(request, &self.config)?;
        self.store.save(&plan)?;

        if let Some(old) = &self.active {
            info!(old_plan_id = %old.id, new_plan_id = %plan.id, "replacing active plan");
        }
        Ok(self.active.insert(plan))
    }

    /// Toggle a topic on the active plan and persist the result.
    pub fn toggle(&mut self, request: ToggleTopicRequest) -> Result<ToggleOutcome, PlannerError> {
        let current = self.active.as_ref().ok_or(PlannerError::NoActivePlan)?;

        let mut updated = current.clone();
        let outcome =
            toggle_topic_completion(&mut updated, request.day_index, request.topic_index)?;
        self.store.save(&updated)?;
        self.active = Some(updated);

        Ok(outcome)
    }

    /// Discard the active plan and clear the store.
    ///
    /// The in-memory plan is dropped even if clearing the store fails.
    pub fn reset(&mut self) -> Result<(), PlannerError> {
        if let Some(plan) = self.active.take() {
            info!(plan_id = %plan.id, "study plan reset");
        }
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear stored plan");
            return Err(e.into());
        }
        Ok(())
    }

    /// Render the active plan as an iCalendar document.
    pub fn export_calendar(&self) -> Result<String, PlannerError> {
        let plan = self.active.as_ref().ok_or(PlannerError::NoActivePlan)?;
        Ok(export_schedule_as_calendar(plan))
    }
}
